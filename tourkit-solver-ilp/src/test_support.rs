//! Test-only backends for `tourkit-solver-ilp`.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).

use std::sync::atomic::{AtomicUsize, Ordering};

use tourkit_core::SolveError;

use crate::{MilpBackend, TourModel};

/// A [`MilpBackend`] that returns a fixed edge selection verbatim.
///
/// Lets tests feed the stitching step an arbitrary, possibly invalid, edge
/// set without running an optimiser.
///
/// It also counts calls, so tests can assert the backend was skipped.
#[derive(Debug, Default)]
pub struct FixedBackend {
    selection: Vec<usize>,
    calls: AtomicUsize,
}

impl FixedBackend {
    /// Construct a backend that always selects `selection`.
    #[must_use]
    pub const fn new(selection: Vec<usize>) -> Self {
        Self {
            selection,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many models this backend has been asked to solve.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl MilpBackend for FixedBackend {
    fn select_edges(&self, _model: &TourModel) -> Result<Vec<usize>, SolveError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.selection.clone())
    }
}

/// A [`MilpBackend`] that always fails with [`SolveError::Backend`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingBackend;

impl MilpBackend for FailingBackend {
    fn select_edges(&self, _model: &TourModel) -> Result<Vec<usize>, SolveError> {
        Err(SolveError::Backend("solver unavailable".to_owned()))
    }
}
