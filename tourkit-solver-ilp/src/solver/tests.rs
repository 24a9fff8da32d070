//! Tests for the `IlpSolver`.

use super::*;
use rstest::rstest;
use tourkit_core::test_support::{explicit_instance, points_instance, random_instance, unit_square};

use crate::test_support::{FailingBackend, FixedBackend};

#[rstest]
fn square_is_solved_to_optimality() {
    let trace = IlpSolver::new().solve(&unit_square()).expect("square solves");
    assert_eq!(
        trace.tours(),
        &[vec![1], vec![1, 2], vec![1, 2, 3], vec![1, 2, 3, 4]]
    );
    assert!(trace.lengths().iter().all(|&length| length == 4.0));
}

#[rstest]
fn beats_the_identity_order_on_a_shuffled_hexagon() {
    // A hexagon listed out of perimeter order.
    let instance = points_instance(&[
        (0.0, 0.0),
        (2.0, 0.0),
        (1.0, 1.7),
        (3.0, 1.7),
        (1.0, -1.7),
        (2.0, 3.4),
    ]);
    let trace = IlpSolver::new().solve(&instance).expect("hexagon solves");
    let best = trace.last_length().expect("non-empty trace");
    let identity: Vec<_> = instance.cities().collect();
    assert!(best < instance.tour_length(&identity));
    assert_eq!(trace.len(), 6);
}

#[rstest]
#[case(1, vec![vec![1]])]
#[case(2, vec![vec![1], vec![1, 2]])]
fn tiny_instances_skip_the_backend(#[case] size: usize, #[case] expected: Vec<Vec<usize>>) {
    let solver = IlpSolver::with_backend(FixedBackend::default());
    let trace = solver
        .solve(&random_instance(size, 5))
        .expect("tiny instances solve");
    assert_eq!(trace.tours(), expected.as_slice());
    assert_eq!(solver.backend().calls(), 0);
}

#[rstest]
fn oversized_instances_yield_an_empty_trace() {
    let solver = IlpSolver::with_backend(FixedBackend::default());
    let trace = solver
        .solve(&random_instance(16, 5))
        .expect("size guard is soft");
    assert!(trace.is_empty());
    assert_eq!(solver.backend().calls(), 0);
}

#[rstest]
fn backend_failures_propagate() {
    let err = IlpSolver::with_backend(FailingBackend)
        .solve(&explicit_instance())
        .expect_err("backend fails");
    assert_eq!(err, SolveError::Backend("solver unavailable".to_owned()));
}

#[rstest]
#[case(vec![0, 1, 2, 3])]
#[case(vec![0, 2, 99])]
#[case(vec![0, 3, 5])]
fn malformed_selections_are_invalid_solutions(#[case] selection: Vec<usize>) {
    let err = IlpSolver::with_backend(FixedBackend::new(selection))
        .solve(&unit_square())
        .expect_err("selection is not a tour");
    assert!(matches!(err, SolveError::InvalidSolution(_)), "{err:?}");
}
