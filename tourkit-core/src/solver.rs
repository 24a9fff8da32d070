//! The boundary between the engine and whole-instance solvers.

use thiserror::Error;

use crate::{Instance, Trace};

/// Errors returned by [`Solver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The instance exceeds what an exact formulation can handle.
    ///
    /// Solvers treat this as a soft condition: they log it and return an
    /// empty [`Trace`] instead of propagating the error.
    #[error("instance has {dimension} cities; the exact model supports at most {max}")]
    ModelTooLarge {
        /// Number of cities in the instance.
        dimension: usize,
        /// Largest supported dimension.
        max: usize,
    },
    /// The external optimisation backend failed.
    #[error("optimisation backend failed: {0}")]
    Backend(String),
    /// The backend returned something that is not a single Hamiltonian cycle.
    #[error("solver returned an invalid tour: {0}")]
    InvalidSolution(String),
}

/// Produce a tour for a whole instance.
///
/// Implementations must not panic on valid instances; they return
/// [`SolveError`] for backend failures instead.
/// Solvers must be `Send + Sync` so a single instance can be shared between
/// threads.
pub trait Solver: Send + Sync {
    /// Solve `instance`, recording intermediate tours in a [`Trace`].
    fn solve(&self, instance: &Instance) -> Result<Trace, SolveError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::unit_square;

    struct IdentitySolver;

    impl Solver for IdentitySolver {
        fn solve(&self, instance: &Instance) -> Result<Trace, SolveError> {
            if instance.dimension() > 3 {
                return Err(SolveError::ModelTooLarge {
                    dimension: instance.dimension(),
                    max: 3,
                });
            }
            let tour: Vec<_> = instance.cities().collect();
            let mut trace = Trace::new();
            trace.push(&tour, instance.tour_length(&tour));
            Ok(trace)
        }
    }

    #[rstest]
    fn reports_model_too_large() {
        let err = IdentitySolver
            .solve(&unit_square())
            .expect_err("four cities exceed the toy limit");
        assert_eq!(
            err,
            SolveError::ModelTooLarge {
                dimension: 4,
                max: 3
            }
        );
        assert_eq!(
            err.to_string(),
            "instance has 4 cities; the exact model supports at most 3"
        );
    }
}
