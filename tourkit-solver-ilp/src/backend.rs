//! Mixed-integer solvers that can optimise a [`TourModel`].

use good_lp::{
    Expression, ProblemVariables, Solution, SolverModel, Variable, constraint, microlp, variable,
};
use tourkit_core::SolveError;

use crate::model::{Bound, EdgeConstraint, TourModel};

/// An external MILP solver.
///
/// Implementations return the indices of the edge variables set to one in
/// an optimal solution. They must be `Send + Sync` so an
/// [`IlpSolver`](crate::IlpSolver) can satisfy the
/// [`Solver`](tourkit_core::Solver) bounds.
pub trait MilpBackend: Send + Sync {
    /// Optimise `model` and report the selected edge indices.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::Backend`] when the solver fails or reports the
    /// model infeasible.
    fn select_edges(&self, model: &TourModel) -> Result<Vec<usize>, SolveError>;
}

/// Pure-Rust branch-and-bound through `good_lp`'s `microlp` solver.
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpBackend;

impl MilpBackend for MicroLpBackend {
    fn select_edges(&self, model: &TourModel) -> Result<Vec<usize>, SolveError> {
        let mut variables = ProblemVariables::new();
        let selected: Vec<Variable> = model
            .costs()
            .iter()
            .map(|_| variables.add(variable().binary()))
            .collect();
        let objective: Expression = selected
            .iter()
            .zip(model.costs())
            .map(|(&edge, &cost)| edge * cost)
            .sum();

        let problem = model.constraints().iter().fold(
            variables.minimise(objective).using(microlp),
            |problem, row| problem.with(row_constraint(&selected, row)),
        );
        let solution = problem
            .solve()
            .map_err(|err| SolveError::Backend(err.to_string()))?;

        Ok(selected
            .iter()
            .enumerate()
            .filter(|&(_, &edge)| solution.value(edge) > 0.5)
            .map(|(index, _)| index)
            .collect())
    }
}

fn row_constraint(selected: &[Variable], row: &EdgeConstraint) -> good_lp::Constraint {
    let lhs: Expression = row
        .edges
        .iter()
        .filter_map(|&index| selected.get(index).copied())
        .sum();
    match row.bound {
        Bound::Exactly(count) => constraint!(lhs == f64::from(count)),
        Bound::AtMost(count) => constraint!(lhs <= f64::from(count)),
    }
}
