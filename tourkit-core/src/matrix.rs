//! Dense symmetric distance matrix addressed by 1-based city ids.

use crate::CityId;

/// An `(N+1)×(N+1)` table of distances between cities `1..=N`.
///
/// Row and column `0` are unused so that city ids index the table
/// directly. Writes go through [`DistanceMatrix::set`], which fills both
/// triangles, so the matrix is symmetric by construction.
///
/// # Examples
/// ```
/// use tourkit_core::DistanceMatrix;
///
/// let mut matrix = DistanceMatrix::zeroed(3);
/// matrix.set(1, 3, 2.5);
/// assert_eq!(matrix.get(3, 1), 2.5);
/// assert_eq!(matrix.dimension(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DistanceMatrix {
    dimension: usize,
    values: Vec<f64>,
}

impl DistanceMatrix {
    /// Construct an all-zero matrix for `dimension` cities.
    #[must_use]
    pub fn zeroed(dimension: usize) -> Self {
        let stride = dimension + 1;
        Self {
            dimension,
            values: vec![0.0; stride * stride],
        }
    }

    /// Number of cities covered by the matrix.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Distance between cities `from` and `to`.
    ///
    /// # Panics
    ///
    /// Panics if either id is greater than [`DistanceMatrix::dimension`].
    #[must_use]
    #[expect(
        clippy::indexing_slicing,
        reason = "ids are validated by tour construction; out-of-range access is a caller bug"
    )]
    pub fn get(&self, from: CityId, to: CityId) -> f64 {
        debug_assert!(from <= self.dimension && to <= self.dimension);
        self.values[self.offset(from, to)]
    }

    /// Store `value` for both `(a, b)` and `(b, a)`.
    ///
    /// # Panics
    ///
    /// Panics if either id is greater than [`DistanceMatrix::dimension`].
    #[expect(
        clippy::indexing_slicing,
        reason = "loaders only write ids they have range-checked"
    )]
    pub fn set(&mut self, a: CityId, b: CityId, value: f64) {
        let forward = self.offset(a, b);
        let backward = self.offset(b, a);
        self.values[forward] = value;
        self.values[backward] = value;
    }

    /// Whether `get(i, j) == get(j, i)` for every pair of cities.
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (1..=self.dimension).all(|i| {
            (i + 1..=self.dimension).all(|j| self.get(i, j).total_cmp(&self.get(j, i)).is_eq())
        })
    }

    /// Row `city` restricted to columns `1..=N`.
    pub fn row(&self, city: CityId) -> impl Iterator<Item = f64> + '_ {
        (1..=self.dimension).map(move |other| self.get(city, other))
    }

    const fn offset(&self, row: CityId, col: CityId) -> usize {
        row * (self.dimension + 1) + col
    }
}
