//! Facade crate for the tourkit TSP engine.
//!
//! This crate re-exports the core domain types and heuristics, loads
//! TSPLIB files, and exposes [`Engine`], which runs any algorithm by name
//! against one instance. The exact solver is compiled in behind the
//! `solver-ilp` feature.
//!
//! # Examples
//! ```
//! use tourkit::{AlgorithmOptions, Engine};
//! use tourkit_core::test_support::unit_square;
//!
//! let mut engine = Engine::new(unit_square());
//! let options = AlgorithmOptions {
//!     start_tour: Some(vec![1, 3, 2, 4]),
//!     ..AlgorithmOptions::default()
//! };
//! let output = engine.run_algorithm("pairwise_exchange", &options)?;
//! assert_eq!(output.final_length(), Some(4.0));
//! # Ok::<(), tourkit::EngineError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod engine;
mod error;
mod load;

pub use engine::{Algorithm, AlgorithmOptions, AlgorithmOutput, Engine};
pub use error::{EngineError, LoadError};
pub use load::{load_instance, save_instance};

pub use tourkit_core::{
    CityId, DistanceMatrix, EdgeWeightType, Instance, InstanceError, InstanceInfo, MAX_DIMENSION,
    SolveError, Solver, Tour, TourError, Trace, tsplib,
};
pub use tourkit_heuristics::{
    ConfigError, Construction, CrossoverMethod, Generation, GeneticConfig, GeneticOptimizer,
    LocalSearch, LocalSearchConfig, MutationMethod, Neighbourhood,
};

#[cfg(feature = "solver-ilp")]
#[cfg_attr(docsrs, doc(cfg(feature = "solver-ilp")))]
pub use tourkit_solver_ilp::{
    IlpSolver, MAX_EXACT_CITIES, MicroLpBackend, MilpBackend, TourModel, edges_to_tour,
};
