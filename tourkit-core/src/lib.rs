//! Core domain types for the tourkit engine.
//!
//! An [`Instance`] is loaded once, from TSPLIB text via [`tsplib::parse`] or
//! from coordinates via [`Instance::from_points`], and is read-only
//! afterwards. Every algorithm works against its [`DistanceMatrix`] and
//! produces a [`Trace`] of intermediate tours and their lengths.
//!
//! Constructors return `Result` to surface invalid input early.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod distance;
mod instance;
mod matrix;
mod solver;
mod tour;
mod trace;
pub mod tsplib;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use distance::EdgeWeightType;
pub use instance::{Instance, InstanceError, InstanceInfo};
pub use matrix::DistanceMatrix;
pub use solver::{SolveError, Solver};
pub use tour::{CityId, Tour, TourError};
pub use trace::Trace;

/// Largest dimension accepted by the loader and [`Instance`] constructors.
pub const MAX_DIMENSION: usize = 20_000;
