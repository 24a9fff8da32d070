use thiserror::Error;
use tourkit_core::{CityId, TourError};

/// Invalid algorithm configuration, reported before any search work.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A probability lies outside `[0, 1]`.
    #[error("{name} must lie in [0, 1], got {value}")]
    RateOutOfRange {
        /// Name of the offending setting.
        name: &'static str,
        /// Value supplied.
        value: f64,
    },
    /// The crossover name is not one of `OC`, `PMX` or `CX`.
    #[error("unknown crossover method `{0}`")]
    UnknownCrossover(String),
    /// The mutation name is not one of `SWAP`, `INSERT` or `INVERSION`.
    #[error("unknown mutation method `{0}`")]
    UnknownMutation(String),
    /// The construction rule name is not recognised.
    #[error("unknown construction rule `{0}`")]
    UnknownConstruction(String),
    /// The local-search neighbourhood name is not recognised.
    #[error("unknown neighbourhood `{0}`")]
    UnknownNeighbourhood(String),
    /// A count that must be strictly positive is zero.
    #[error("{name} must be greater than zero")]
    NonPositive {
        /// Name of the offending setting.
        name: &'static str,
    },
    /// The starting city is not part of the instance.
    #[error("start city {city} is outside 1..={dimension}")]
    StartCityOutOfRange {
        /// City requested.
        city: CityId,
        /// Number of cities in the instance.
        dimension: usize,
    },
    /// A supplied starting tour is not a permutation of the cities.
    #[error("start tour is invalid: {0}")]
    InvalidStartTour(#[source] TourError),
    /// A member of the supplied population is not a permutation of the cities.
    #[error("population member {index} is invalid: {source}")]
    InvalidPopulation {
        /// Position of the member in the population.
        index: usize,
        /// Why the member was rejected.
        source: TourError,
    },
}
