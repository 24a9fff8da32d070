//! Test-only instances shared by unit, behaviour and property tests.
//!
//! Available under `cfg(test)` and the `test-support` feature.

use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{DistanceMatrix, EdgeWeightType, Instance, InstanceInfo};

/// TSPLIB text for the unit square `(0,0) (0,1) (1,1) (1,0)`.
pub const UNIT_SQUARE_TSP: &str = "\
NAME : square.tsp
TYPE : TSP
COMMENT : unit square
DIMENSION : 4
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0 0
2 0 1
3 1 1
4 1 0
EOF
";

/// Four Euclidean cities on the corners of the unit square.
///
/// The optimal tour `[1, 2, 3, 4]` has length `4.0`.
#[must_use]
pub fn unit_square() -> Instance {
    points_instance(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
}

/// A Euclidean instance from `(x, y)` pairs.
///
/// # Panics
///
/// Panics if `points` is empty or larger than [`crate::MAX_DIMENSION`].
#[must_use]
#[expect(clippy::expect_used, reason = "test fixtures fail loudly")]
pub fn points_instance(points: &[(f64, f64)]) -> Instance {
    let coords = points.iter().map(|&(x, y)| Coord { x, y }).collect();
    Instance::from_points(EdgeWeightType::Euc2d, coords).expect("fixture points are valid")
}

/// `count` Euclidean cities scattered over a 100×100 box.
///
/// The same `seed` always yields the same instance.
#[must_use]
pub fn random_instance(count: usize, seed: u64) -> Instance {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let points: Vec<(f64, f64)> = (0..count)
        .map(|_| (rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
        .collect();
    points_instance(&points)
}

/// Three cities with explicit distances and no coordinates.
///
/// `d(1,2) = 3`, `d(1,3) = 4`, `d(2,3) = 5`.
///
/// # Panics
///
/// Never panics; the fixture is statically valid.
#[must_use]
#[expect(clippy::expect_used, reason = "test fixtures fail loudly")]
pub fn explicit_instance() -> Instance {
    let mut matrix = DistanceMatrix::zeroed(3);
    matrix.set(1, 2, 3.0);
    matrix.set(1, 3, 4.0);
    matrix.set(2, 3, 5.0);
    let info = InstanceInfo {
        name: Some("triangle".to_owned()),
        problem_type: Some("TSP".to_owned()),
        dimension: 3,
        edge_weight_type: Some("EXPLICIT".to_owned()),
        edge_weight_format: Some("FULL_MATRIX".to_owned()),
        ..InstanceInfo::default()
    };
    Instance::new(info, matrix, None).expect("fixture matrix is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn random_instances_depend_only_on_the_seed() {
        assert_eq!(random_instance(6, 3), random_instance(6, 3));
        assert_ne!(random_instance(6, 3), random_instance(6, 4));
        assert_eq!(random_instance(6, 3).dimension(), 6);
    }
}
