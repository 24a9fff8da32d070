//! Rebuild a tour from the undirected edges an optimiser selected.

use tourkit_core::{CityId, SolveError};

/// Walk a set of undirected edges that forms one Hamiltonian cycle over
/// `1..=edges.len()` and return the cities in visiting order.
///
/// The walk starts at the first endpoint of the first edge and leaves
/// through that edge.
///
/// # Errors
///
/// Returns [`SolveError::InvalidSolution`] when the edges do not form a
/// single cycle through every city: fewer than three edges, a self-loop, a
/// city outside the range, a city with other than two edges, or several
/// disjoint subtours.
///
/// # Examples
/// ```
/// use tourkit_solver_ilp::edges_to_tour;
///
/// let tour = edges_to_tour(&[(1, 2), (3, 4), (2, 3), (1, 4)])?;
/// assert_eq!(tour, vec![1, 2, 3, 4]);
/// # Ok::<(), tourkit_core::SolveError>(())
/// ```
pub fn edges_to_tour(edges: &[(CityId, CityId)]) -> Result<Vec<CityId>, SolveError> {
    let dimension = edges.len();
    let Some(&(first, second)) = edges.first().filter(|_| dimension >= 3) else {
        return Err(invalid(format!("{dimension} edges cannot form a cycle")));
    };

    let mut neighbours: Vec<Vec<CityId>> = vec![Vec::with_capacity(2); dimension + 1];
    for &(a, b) in edges {
        if a == b {
            return Err(invalid(format!("self-loop at city {a}")));
        }
        for (from, to) in [(a, b), (b, a)] {
            let adjacent = neighbours
                .get_mut(from)
                .filter(|_| from != 0)
                .ok_or_else(|| invalid(format!("city {from} is outside 1..={dimension}")))?;
            if adjacent.len() == 2 {
                return Err(invalid(format!("city {from} has more than two edges")));
            }
            adjacent.push(to);
        }
    }

    let mut tour = Vec::with_capacity(dimension);
    tour.push(first);
    let (mut previous, mut current) = (first, second);
    while current != first {
        tour.push(current);
        let next = neighbours
            .get(current)
            .and_then(|adjacent| adjacent.iter().copied().find(|&city| city != previous))
            .ok_or_else(|| invalid(format!("the walk dead-ends at city {current}")))?;
        previous = current;
        current = next;
    }

    if tour.len() != dimension {
        return Err(invalid(format!(
            "edges close a subtour of {} cities out of {dimension}",
            tour.len()
        )));
    }
    Ok(tour)
}

fn invalid(reason: String) -> SolveError {
    SolveError::InvalidSolution(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[(1, 2), (2, 3), (3, 1)], vec![1, 2, 3])]
    #[case(&[(2, 1), (3, 1), (2, 3)], vec![2, 1, 3])]
    #[case(&[(1, 3), (4, 2), (2, 1), (3, 4)], vec![1, 3, 4, 2])]
    fn walks_a_single_cycle(#[case] edges: &[(CityId, CityId)], #[case] expected: Vec<CityId>) {
        assert_eq!(edges_to_tour(edges).expect("edges form a cycle"), expected);
    }

    #[rstest]
    #[case(&[(1, 2)], "1 edges cannot form a cycle")]
    #[case(&[(1, 2), (2, 1), (1, 1)], "self-loop at city 1")]
    #[case(&[(1, 2), (2, 3), (3, 0)], "city 0 is outside 1..=3")]
    #[case(&[(1, 2), (2, 3), (3, 4)], "city 4 is outside 1..=3")]
    #[case(&[(1, 2), (1, 3), (1, 4), (2, 3)], "city 1 has more than two edges")]
    #[case(&[(1, 2), (2, 1), (3, 4), (4, 3)], "the walk dead-ends at city 2")]
    #[case(
        &[(1, 2), (2, 3), (3, 1), (4, 5), (5, 6), (6, 4)],
        "edges close a subtour of 3 cities out of 6"
    )]
    fn rejects_anything_but_one_hamiltonian_cycle(
        #[case] edges: &[(CityId, CityId)],
        #[case] reason: &str,
    ) {
        assert_eq!(
            edges_to_tour(edges),
            Err(SolveError::InvalidSolution(reason.to_owned()))
        );
    }
}
