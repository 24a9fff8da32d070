//! Generation-at-a-time genetic search.
//!
//! The optimizer holds only its configuration. The population belongs to
//! the caller, who passes it into [`GeneticOptimizer::step`] and receives
//! the next one back; an empty population is seeded with random tours.
//!
//! One step:
//!
//! 1. picks parent pairs by tournament selection;
//! 2. recombines each pair with probability `crossover_rate`, otherwise
//!    copies the parents;
//! 3. mutates each child with probability `mutation_rate`;
//! 4. keeps the shortest tours among parents and children, restoring the
//!    original population size.
//!
//! The reported best is the shortest survivor of this step. Callers that
//! want a running best across steps track it themselves.

mod config;
mod operators;

use rand::Rng;
use tourkit_core::{CityId, Instance, Tour};

pub use config::{CrossoverMethod, GeneticConfig, MutationMethod};

use crate::ConfigError;

/// Result of one [`GeneticOptimizer::step`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation {
    /// Survivors, shortest first; pass back into the next step.
    pub population: Vec<Tour>,
    /// Shortest tour in `population`.
    pub best: Tour,
    /// Length of `best`.
    pub best_length: f64,
}

/// A validated genetic optimizer.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use tourkit_core::test_support::unit_square;
/// use tourkit_heuristics::{GeneticConfig, GeneticOptimizer};
///
/// let optimizer = GeneticOptimizer::new(GeneticConfig::default())?;
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let square = unit_square();
/// let mut generation = optimizer.step(&square, Vec::new(), &mut rng)?;
/// for _ in 0..20 {
///     generation = optimizer.step(&square, generation.population, &mut rng)?;
/// }
/// assert_eq!(generation.population.len(), 50);
/// assert!((generation.best_length - 4.0).abs() < 1e-9);
/// # Ok::<(), tourkit_heuristics::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GeneticOptimizer {
    config: GeneticConfig,
}

impl GeneticOptimizer {
    /// Validate `config` and build an optimizer.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by
    /// [`GeneticConfig::validate`].
    pub fn new(config: GeneticConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[must_use]
    pub const fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// Advance `population` by one generation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPopulation`] when a member is not a
    /// permutation of the instance's cities.
    pub fn step<R: Rng + ?Sized>(
        &self,
        instance: &Instance,
        population: Vec<Tour>,
        rng: &mut R,
    ) -> Result<Generation, ConfigError> {
        for (index, member) in population.iter().enumerate() {
            member
                .validate(instance.dimension())
                .map_err(|source| ConfigError::InvalidPopulation { index, source })?;
        }
        let parents = if population.is_empty() {
            (0..self.config.population_size)
                .map(|_| instance.random_tour(rng))
                .collect()
        } else {
            population
        };
        let scored: Vec<(Tour, f64)> = parents
            .into_iter()
            .map(|tour| score(instance, tour))
            .collect();

        let children = self.breed(&scored, rng);
        let mut pool = scored;
        let size = pool.len();
        pool.extend(children.into_iter().map(|tour| score(instance, tour)));
        pool.sort_by(|(_, a), (_, b)| a.total_cmp(b));
        pool.truncate(size);

        let (best, best_length) = pool.first().cloned().unwrap_or_default();
        log::debug!("generation of {size}: best length {best_length}");
        Ok(Generation {
            population: pool.into_iter().map(|(tour, _)| tour).collect(),
            best,
            best_length,
        })
    }

    /// As many children as there are parents.
    fn breed<R: Rng + ?Sized>(&self, scored: &[(Tour, f64)], rng: &mut R) -> Vec<Tour> {
        let size = scored.len();
        let mut children = Vec::with_capacity(size);
        while children.len() < size {
            let first = self.tournament(scored, rng);
            let second = self.tournament(scored, rng);
            let pair = if rng.gen_bool(self.config.crossover_rate) {
                [
                    operators::crossover(self.config.crossover, first, second, rng),
                    operators::crossover(self.config.crossover, second, first, rng),
                ]
            } else {
                [first.to_vec(), second.to_vec()]
            };
            for mut child in pair {
                if children.len() == size {
                    break;
                }
                if rng.gen_bool(self.config.mutation_rate) {
                    operators::mutate(self.config.mutation, &mut child, rng);
                }
                children.push(Tour::from(child));
            }
        }
        children
    }

    /// The shortest of `tournament_size` uniformly drawn contestants.
    fn tournament<'p, R: Rng + ?Sized>(
        &self,
        scored: &'p [(Tour, f64)],
        rng: &mut R,
    ) -> &'p [CityId] {
        let mut winner: Option<&(Tour, f64)> = None;
        for _ in 0..self.config.tournament_size {
            let contestant = scored.get(rng.gen_range(0..scored.len()));
            if let Some(candidate) = contestant
                && winner.is_none_or(|(_, length)| candidate.1 < *length)
            {
                winner = Some(candidate);
            }
        }
        winner.map(|(tour, _)| tour.cities()).unwrap_or_default()
    }
}

fn score(instance: &Instance, tour: Tour) -> (Tour, f64) {
    let length = instance.tour_length(tour.cities());
    (tour, length)
}
