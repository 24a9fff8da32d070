//! Name-based dispatch over every tour algorithm.

use std::fmt;
use std::str::FromStr;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tourkit_core::{CityId, Instance, Solver, Tour, Trace};
use tourkit_heuristics::{
    Construction, Generation, GeneticConfig, GeneticOptimizer, LocalSearch, LocalSearchConfig,
    Neighbourhood,
};

use crate::EngineError;

/// Every algorithm the engine can run, by family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Build a tour from scratch.
    Construction(Construction),
    /// Improve a starting tour.
    LocalSearch(Neighbourhood),
    /// Solve small instances exactly (`ilp_solver`).
    Exact,
    /// Advance a caller-owned population by one generation (`genetic`).
    Genetic,
}

impl Algorithm {
    /// Name accepted by [`Engine::run_algorithm`] for the exact solver.
    pub const EXACT_NAME: &'static str = "ilp_solver";
    /// Name accepted by [`Engine::run_algorithm`] for the genetic step.
    pub const GENETIC_NAME: &'static str = "genetic";

    /// Every algorithm, in the order they are usually listed.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Construction::ALL
            .into_iter()
            .map(Self::Construction)
            .chain(Neighbourhood::ALL.into_iter().map(Self::LocalSearch))
            .chain([Self::Exact, Self::Genetic])
            .collect()
    }

    /// Snake-case name used by the dispatcher.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Construction(rule) => rule.name(),
            Self::LocalSearch(neighbourhood) => neighbourhood.name(),
            Self::Exact => Self::EXACT_NAME,
            Self::Genetic => Self::GENETIC_NAME,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|algorithm| algorithm.name() == s)
            .ok_or_else(|| EngineError::UnsupportedAlgorithm(s.to_owned()))
    }
}

/// Keyword configuration for [`Engine::run`].
///
/// Each algorithm reads only the fields that concern it.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmOptions {
    /// First city for construction heuristics.
    pub start_city: CityId,
    /// Starting tour for local search; a random tour when absent.
    pub start_tour: Option<Vec<CityId>>,
    /// Local search iteration cap.
    pub local_search: LocalSearchConfig,
    /// Genetic rates, operators and sizes.
    pub genetic: GeneticConfig,
    /// Population to advance; empty on the first generation.
    pub population: Vec<Tour>,
}

impl Default for AlgorithmOptions {
    fn default() -> Self {
        Self {
            start_city: 1,
            start_tour: None,
            local_search: LocalSearchConfig::default(),
            genetic: GeneticConfig::default(),
            population: Vec::new(),
        }
    }
}

/// What an algorithm produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgorithmOutput {
    /// Snapshots and lengths from every non-genetic algorithm.
    Trace(Trace),
    /// Next population and its best member, from `genetic`.
    Generation(Generation),
}

impl AlgorithmOutput {
    /// The trace, unless this is a genetic generation.
    #[must_use]
    pub const fn trace(&self) -> Option<&Trace> {
        match self {
            Self::Trace(trace) => Some(trace),
            Self::Generation(_) => None,
        }
    }

    /// The generation, unless this is a trace.
    #[must_use]
    pub const fn generation(&self) -> Option<&Generation> {
        match self {
            Self::Trace(_) => None,
            Self::Generation(generation) => Some(generation),
        }
    }

    /// Length of the final tour: the last trace entry or the generation's
    /// best. `None` for an empty trace.
    #[must_use]
    pub fn final_length(&self) -> Option<f64> {
        match self {
            Self::Trace(trace) => trace.last_length(),
            Self::Generation(generation) => Some(generation.best_length),
        }
    }
}

/// Runs algorithms against one loaded instance.
///
/// The engine owns the random source used for random starting tours and
/// genetic operators, so a fixed seed makes every run reproducible.
///
/// # Examples
/// ```
/// use tourkit::{AlgorithmOptions, Engine};
/// use tourkit_core::test_support::unit_square;
///
/// let mut engine = Engine::new(unit_square());
/// let output = engine.run_algorithm("nearest_neighbor", &AlgorithmOptions::default())?;
/// assert_eq!(output.final_length(), Some(4.0));
/// # Ok::<(), tourkit::EngineError>(())
/// ```
pub struct Engine {
    instance: Instance,
    rng: ChaCha8Rng,
    exact: Option<Box<dyn Solver>>,
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("instance", &self.instance.info().name)
            .field("dimension", &self.instance.dimension())
            .field("exact", &self.exact.is_some())
            .finish_non_exhaustive()
    }
}

impl Engine {
    /// Seed used by [`Engine::new`].
    pub const DEFAULT_SEED: u64 = 0;

    /// An engine seeded with [`Engine::DEFAULT_SEED`].
    #[must_use]
    pub fn new(instance: Instance) -> Self {
        Self::with_seed(instance, Self::DEFAULT_SEED)
    }

    /// An engine whose random choices derive from `seed`.
    #[must_use]
    pub fn with_seed(instance: Instance, seed: u64) -> Self {
        Self {
            instance,
            rng: ChaCha8Rng::seed_from_u64(seed),
            exact: default_exact_solver(),
        }
    }

    /// Replace the solver used for `ilp_solver`.
    #[must_use]
    pub fn with_exact_solver(mut self, solver: impl Solver + 'static) -> Self {
        self.exact = Some(Box::new(solver));
        self
    }

    /// The instance every algorithm runs against.
    #[must_use]
    pub const fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Run the algorithm called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnsupportedAlgorithm`] for an unknown name,
    /// and otherwise whatever [`Engine::run`] returns.
    pub fn run_algorithm(
        &mut self,
        name: &str,
        options: &AlgorithmOptions,
    ) -> Result<AlgorithmOutput, EngineError> {
        let algorithm: Algorithm = name.parse()?;
        self.run(algorithm, options)
    }

    /// Run `algorithm` with `options`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] for a start city,
    /// start tour, population or configuration the algorithm rejects,
    /// [`EngineError::Solve`] when the exact backend fails, and
    /// [`EngineError::MissingFeature`] when `ilp_solver` is requested
    /// without an exact solver.
    pub fn run(
        &mut self,
        algorithm: Algorithm,
        options: &AlgorithmOptions,
    ) -> Result<AlgorithmOutput, EngineError> {
        log::debug!("running {algorithm} on {} cities", self.instance.dimension());
        let output = match algorithm {
            Algorithm::Construction(rule) => {
                AlgorithmOutput::Trace(rule.build(&self.instance, options.start_city)?)
            }
            Algorithm::LocalSearch(neighbourhood) => {
                let search = LocalSearch::new(neighbourhood, options.local_search)?;
                let start = options.start_tour.clone().unwrap_or_else(|| {
                    self.instance.random_tour(&mut self.rng).into_cities()
                });
                AlgorithmOutput::Trace(search.improve(&self.instance, &start)?)
            }
            Algorithm::Exact => {
                let solver = self.exact.as_deref().ok_or(EngineError::MissingFeature {
                    feature: "solver-ilp",
                    action: Algorithm::EXACT_NAME,
                })?;
                AlgorithmOutput::Trace(solver.solve(&self.instance)?)
            }
            Algorithm::Genetic => {
                let optimizer = GeneticOptimizer::new(options.genetic)?;
                let generation =
                    optimizer.step(&self.instance, options.population.clone(), &mut self.rng)?;
                AlgorithmOutput::Generation(generation)
            }
        };
        Ok(output)
    }
}

#[cfg(feature = "solver-ilp")]
fn default_exact_solver() -> Option<Box<dyn Solver>> {
    Some(Box::new(tourkit_solver_ilp::IlpSolver::new()))
}

#[cfg(not(feature = "solver-ilp"))]
const fn default_exact_solver() -> Option<Box<dyn Solver>> {
    None
}
