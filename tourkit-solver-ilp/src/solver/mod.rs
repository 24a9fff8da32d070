//! [`IlpSolver`]: exact tours for small instances.

use tourkit_core::{CityId, Instance, SolveError, Solver, Trace};

use crate::backend::{MicroLpBackend, MilpBackend};
use crate::model::TourModel;
use crate::stitch::edges_to_tour;

/// Exact solver that formulates a [`TourModel`] and delegates it to a
/// [`MilpBackend`].
///
/// Instances above [`MAX_EXACT_CITIES`](crate::MAX_EXACT_CITIES) are not
/// an error: the solver logs a warning and returns an empty [`Trace`].
/// Instances with fewer than three cities have a single tour and skip the
/// backend entirely.
///
/// The trace reveals the optimal tour one city at a time: entry `k` holds
/// its first `k` cities, and every entry records the full optimal length.
///
/// # Examples
/// ```
/// use tourkit_core::Solver;
/// use tourkit_core::test_support::unit_square;
/// use tourkit_solver_ilp::IlpSolver;
///
/// let trace = IlpSolver::new().solve(&unit_square())?;
/// assert_eq!(trace.last_tour(), Some(&[1, 2, 3, 4][..]));
/// assert_eq!(trace.lengths(), &[4.0; 4]);
/// # Ok::<(), tourkit_core::SolveError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct IlpSolver<B = MicroLpBackend> {
    backend: B,
}

impl IlpSolver {
    /// Construct a solver backed by [`MicroLpBackend`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            backend: MicroLpBackend,
        }
    }
}

impl<B: MilpBackend> IlpSolver<B> {
    /// Construct a solver with an explicit backend.
    #[must_use]
    pub const fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    /// The backend this solver delegates to.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    fn optimal_tour(&self, instance: &Instance) -> Result<Option<Vec<CityId>>, SolveError> {
        if instance.dimension() < 3 {
            return Ok(Some(instance.cities().collect()));
        }
        let model = match TourModel::build(instance) {
            Err(SolveError::ModelTooLarge { dimension, max }) => {
                log::warn!(
                    "exact solver skipped: {dimension} cities exceed the limit of {max}; \
                     the model needs memory exponential in the city count"
                );
                return Ok(None);
            }
            built => built?,
        };

        let chosen = self.backend.select_edges(&model)?;
        let edges: Vec<(CityId, CityId)> = chosen
            .iter()
            .map(|&index| {
                model.edges().get(index).copied().ok_or_else(|| {
                    SolveError::InvalidSolution(format!("edge index {index} is out of range"))
                })
            })
            .collect::<Result<_, _>>()?;
        let tour = edges_to_tour(&edges)?;
        if tour.len() != model.dimension() {
            return Err(SolveError::InvalidSolution(format!(
                "tour visits {} of {} cities",
                tour.len(),
                model.dimension()
            )));
        }
        Ok(Some(tour))
    }
}

impl<B: MilpBackend> Solver for IlpSolver<B> {
    fn solve(&self, instance: &Instance) -> Result<Trace, SolveError> {
        let mut trace = Trace::new();
        let Some(tour) = self.optimal_tour(instance)? else {
            return Ok(trace);
        };
        let length = instance.tour_length(&tour);
        for visited in 1..=tour.len() {
            trace.push(tour.get(..visited).unwrap_or_default(), length);
        }
        log::debug!("exact solver: optimal length {length}");
        Ok(trace)
    }
}

#[cfg(test)]
mod tests;
