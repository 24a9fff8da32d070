//! Tour-building and tour-improving heuristics.
//!
//! Three families work against a loaded [`Instance`](tourkit_core::Instance):
//!
//! - [`construction`] builds a tour from a single starting city with a
//!   greedy rule, recording every insertion in a [`Trace`](tourkit_core::Trace).
//! - [`local_search`] improves an existing tour with best-improvement moves
//!   until no improving move remains.
//! - [`genetic`] evolves a caller-owned population one generation per call.
//!
//! Configuration is validated before any work starts; failures are reported
//! as [`ConfigError`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod construction;
mod error;
pub mod genetic;
pub mod local_search;

pub use construction::Construction;
pub use error::ConfigError;
pub use genetic::{
    CrossoverMethod, Generation, GeneticConfig, GeneticOptimizer, MutationMethod,
};
pub use local_search::{LocalSearch, LocalSearchConfig, Neighbourhood};

/// Improvements smaller than this are treated as ties.
pub(crate) const EPSILON: f64 = 1e-9;
