use std::fmt;
use std::str::FromStr;

use crate::ConfigError;

/// Recombination operators. Each one yields a valid permutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverMethod {
    /// Order crossover (`OC`): copy a slice of the first parent, then fill
    /// the gaps with the second parent's cities in the order they appear
    /// after the slice.
    Order,
    /// Partially mapped crossover (`PMX`): copy a slice of the first parent
    /// and repair the rest of the second parent through the slice's
    /// position mapping.
    PartiallyMapped,
    /// Cycle crossover (`CX`): alternate whole position cycles between the
    /// parents, so every city keeps a parent's position.
    Cycle,
}

impl CrossoverMethod {
    /// Every method, in a stable order.
    pub const ALL: [Self; 3] = [Self::Order, Self::PartiallyMapped, Self::Cycle];

    /// Short upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Order => "OC",
            Self::PartiallyMapped => "PMX",
            Self::Cycle => "CX",
        }
    }
}

impl fmt::Display for CrossoverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CrossoverMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownCrossover(s.to_owned()))
    }
}

/// Perturbation operators applied to a single tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationMethod {
    /// Exchange two cities (`SWAP`).
    Swap,
    /// Move one city to another position (`INSERT`).
    Insert,
    /// Reverse a slice of the tour (`INVERSION`).
    Inversion,
}

impl MutationMethod {
    /// Every method, in a stable order.
    pub const ALL: [Self; 3] = [Self::Swap, Self::Insert, Self::Inversion];

    /// Short upper-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Swap => "SWAP",
            Self::Insert => "INSERT",
            Self::Inversion => "INVERSION",
        }
    }
}

impl fmt::Display for MutationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MutationMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownMutation(s.to_owned()))
    }
}

/// Settings for one [`GeneticOptimizer`](super::GeneticOptimizer) step.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneticConfig {
    /// Probability that a selected parent pair is recombined.
    pub crossover_rate: f64,
    /// Recombination operator.
    pub crossover: CrossoverMethod,
    /// Probability that each offspring is mutated.
    pub mutation_rate: f64,
    /// Mutation operator.
    pub mutation: MutationMethod,
    /// Population size used when the caller supplies an empty population.
    pub population_size: usize,
    /// Number of contestants drawn for each parent.
    pub tournament_size: usize,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            crossover_rate: 0.5,
            crossover: CrossoverMethod::Order,
            mutation_rate: 0.5,
            mutation: MutationMethod::Swap,
            population_size: 50,
            tournament_size: 3,
        }
    }
}

impl GeneticConfig {
    /// Build a configuration from rates and operator names, keeping the
    /// default sizes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownCrossover`] or
    /// [`ConfigError::UnknownMutation`] for unrecognised names, and
    /// [`ConfigError::RateOutOfRange`] for rates outside `[0, 1]`.
    ///
    /// # Examples
    /// ```
    /// use tourkit_heuristics::{ConfigError, CrossoverMethod, GeneticConfig};
    ///
    /// let config = GeneticConfig::from_names(0.9, "pmx", 0.1, "inversion")?;
    /// assert_eq!(config.crossover, CrossoverMethod::PartiallyMapped);
    ///
    /// let err = GeneticConfig::from_names(1.5, "OC", 0.1, "SWAP").unwrap_err();
    /// assert!(matches!(err, ConfigError::RateOutOfRange { name: "crossover_rate", .. }));
    /// # Ok::<(), ConfigError>(())
    /// ```
    pub fn from_names(
        crossover_rate: f64,
        crossover: &str,
        mutation_rate: f64,
        mutation: &str,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            crossover_rate,
            crossover: crossover.parse()?,
            mutation_rate,
            mutation: mutation.parse()?,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Check rates and sizes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::RateOutOfRange`] for a rate outside `[0, 1]`
    /// (including NaN) and [`ConfigError::NonPositive`] for a zero size.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;
        if self.population_size == 0 {
            return Err(ConfigError::NonPositive {
                name: "population_size",
            });
        }
        if self.tournament_size == 0 {
            return Err(ConfigError::NonPositive {
                name: "tournament_size",
            });
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { name, value })
    }
}
