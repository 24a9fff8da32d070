//! Exact TSP solver for small instances.
//!
//! This crate provides [`IlpSolver`], an implementation of the
//! [`Solver`](tourkit_core::Solver) trait that formulates the instance as an
//! integer program ([`TourModel`]), hands it to a [`MilpBackend`], and
//! stitches the selected edges back into a tour with [`edges_to_tour`].
//!
//! The formulation enumerates every subset of cities, so it is limited to
//! [`MAX_EXACT_CITIES`]. The default backend is `good_lp`'s pure-Rust
//! `microlp` solver.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod backend;
mod model;
mod solver;
mod stitch;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use backend::{MicroLpBackend, MilpBackend};
pub use model::{Bound, EdgeConstraint, MAX_EXACT_CITIES, TourModel};
pub use solver::IlpSolver;
pub use stitch::edges_to_tour;
