//! Tours and the cost primitives every algorithm shares.
//!
//! A tour is read as a cycle: the last city connects back to the first.

use geo::Coord;
use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::Instance;

/// One-based city identifier, `1..=N`.
pub type CityId = usize;

/// An ordered visit sequence over every city of an instance.
///
/// Construction does not validate; call [`Tour::validate`] on tours that
/// come from outside the engine.
///
/// # Examples
/// ```
/// use tourkit_core::Tour;
///
/// let tour = Tour::new(vec![1, 3, 2]);
/// assert_eq!(tour.len(), 3);
/// assert!(tour.validate(3).is_ok());
/// assert!(tour.validate(4).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tour {
    cities: Vec<CityId>,
}

/// Ways in which a sequence fails to be a tour of `1..=N`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    /// The sequence does not visit exactly `N` cities.
    #[error("tour visits {found} cities but the instance has {expected}")]
    WrongLength {
        /// Number of cities in the instance.
        expected: usize,
        /// Number of entries in the tour.
        found: usize,
    },
    /// An id lies outside `1..=N`.
    #[error("city {city} is outside 1..={dimension}")]
    CityOutOfRange {
        /// Offending id.
        city: CityId,
        /// Number of cities in the instance.
        dimension: usize,
    },
    /// A city is visited twice.
    #[error("city {0} is visited more than once")]
    DuplicateCity(CityId),
}

impl Tour {
    /// Wrap a visit sequence.
    #[must_use]
    pub const fn new(cities: Vec<CityId>) -> Self {
        Self { cities }
    }

    /// Visit order.
    #[must_use]
    pub fn cities(&self) -> &[CityId] {
        &self.cities
    }

    /// Number of visits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Whether the tour visits nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Unwrap into the visit sequence.
    #[must_use]
    pub fn into_cities(self) -> Vec<CityId> {
        self.cities
    }

    /// Check that the tour is a permutation of `1..=dimension`.
    ///
    /// # Errors
    ///
    /// Returns [`TourError::WrongLength`] when the tour does not visit
    /// `dimension` cities, [`TourError::CityOutOfRange`] for an id outside
    /// `1..=dimension`, and [`TourError::DuplicateCity`] for the first city
    /// visited twice.
    pub fn validate(&self, dimension: usize) -> Result<(), TourError> {
        if self.cities.len() != dimension {
            return Err(TourError::WrongLength {
                expected: dimension,
                found: self.cities.len(),
            });
        }
        let mut seen = vec![false; dimension + 1];
        for &city in &self.cities {
            let Some(slot) = seen.get_mut(city).filter(|_| city != 0) else {
                return Err(TourError::CityOutOfRange { city, dimension });
            };
            if *slot {
                return Err(TourError::DuplicateCity(city));
            }
            *slot = true;
        }
        Ok(())
    }

    /// Cyclic edges `(tour[p], tour[p + 1 mod N])`.
    pub fn edges(&self) -> impl Iterator<Item = (CityId, CityId)> + '_ {
        cyclic_edges(&self.cities)
    }
}

impl From<Vec<CityId>> for Tour {
    fn from(cities: Vec<CityId>) -> Self {
        Self::new(cities)
    }
}

impl AsRef<[CityId]> for Tour {
    fn as_ref(&self) -> &[CityId] {
        &self.cities
    }
}

/// Consecutive pairs of `cities`, closing back to the first.
pub(crate) fn cyclic_edges(cities: &[CityId]) -> impl Iterator<Item = (CityId, CityId)> + '_ {
    cities
        .iter()
        .copied()
        .zip(cities.iter().copied().cycle().skip(1))
}

impl Instance {
    /// Marginal cost of splicing city `k` into the edge `(i, j)`.
    ///
    /// Equal to `d(i, k) + d(k, j) - d(i, j)`, and therefore symmetric in
    /// `i` and `j`.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use tourkit_core::{EdgeWeightType, Instance};
    ///
    /// let line = Instance::from_points(
    ///     EdgeWeightType::Euc2d,
    ///     vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 4.0, y: 0.0 }, Coord { x: 2.0, y: 0.0 }],
    /// )?;
    /// // City 3 already lies on the edge (1, 2).
    /// assert_eq!(line.insertion_cost(1, 2, 3), 0.0);
    /// # Ok::<(), tourkit_core::InstanceError>(())
    /// ```
    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "insertion cost is a float sum")]
    pub fn insertion_cost(&self, i: CityId, j: CityId, k: CityId) -> f64 {
        self.distance(i, k) + self.distance(k, j) - self.distance(i, j)
    }

    /// Cyclic length of a (possibly partial) visit sequence.
    ///
    /// Sequences of fewer than two cities have length zero.
    #[must_use]
    pub fn tour_length(&self, cities: &[CityId]) -> f64 {
        if cities.len() < 2 {
            return 0.0;
        }
        cyclic_edges(cities).map(|(a, b)| self.distance(a, b)).sum()
    }

    /// A uniformly random permutation of all cities.
    pub fn random_tour<R: Rng + ?Sized>(&self, rng: &mut R) -> Tour {
        let mut cities: Vec<CityId> = self.cities().collect();
        cities.shuffle(rng);
        Tour::new(cities)
    }

    /// Closed display polyline for a visit sequence.
    ///
    /// The first point is repeated at the end. Returns an empty list when the
    /// instance carries no coordinates.
    #[must_use]
    pub fn to_points(&self, cities: &[CityId]) -> Vec<Coord<f64>> {
        if self.coordinates().is_none() {
            return Vec::new();
        }
        cities
            .iter()
            .chain(cities.first())
            .filter_map(|&city| self.coordinate(city))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::rstest;

    use crate::test_support::{explicit_instance, unit_square};

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "assertions compare float lengths")]
    fn square_perimeter_is_four() {
        let square = unit_square();
        assert!((square.tour_length(&[1, 2, 3, 4]) - 4.0).abs() < 1e-12);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "assertions compare float lengths")]
    fn crossed_square_uses_both_diagonals() {
        let square = unit_square();
        let want = 2.0 + 2.0 * 2.0_f64.sqrt();
        assert!((square.tour_length(&[1, 3, 2, 4]) - want).abs() < 1e-9);
    }

    #[rstest]
    #[case(&[], 0.0)]
    #[case(&[3], 0.0)]
    #[case(&[1, 2], 2.0)]
    #[expect(clippy::float_arithmetic, reason = "assertions compare float lengths")]
    fn short_sequences(#[case] cities: &[CityId], #[case] want: f64) {
        let square = unit_square();
        assert!((square.tour_length(cities) - want).abs() < 1e-12);
    }

    #[rstest]
    fn random_tour_is_a_permutation() {
        let square = unit_square();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let tour = square.random_tour(&mut rng);
        assert!(tour.validate(square.dimension()).is_ok());
    }

    #[rstest]
    fn to_points_closes_polyline() {
        let square = unit_square();
        let points = square.to_points(&[1, 2, 3, 4]);
        assert_eq!(points.len(), 5);
        assert_eq!(points.first(), points.last());
    }

    #[rstest]
    fn to_points_without_coordinates_is_empty() {
        let instance = explicit_instance();
        assert!(instance.to_points(&[1, 2, 3]).is_empty());
    }

    #[rstest]
    #[case(vec![1, 2], TourError::WrongLength { expected: 3, found: 2 })]
    #[case(vec![1, 2, 4], TourError::CityOutOfRange { city: 4, dimension: 3 })]
    #[case(vec![0, 1, 2], TourError::CityOutOfRange { city: 0, dimension: 3 })]
    #[case(vec![1, 2, 2], TourError::DuplicateCity(2))]
    fn validate_rejects(#[case] cities: Vec<CityId>, #[case] want: TourError) {
        assert_eq!(Tour::new(cities).validate(3), Err(want));
    }

    #[rstest]
    fn edges_wrap_around() {
        let tour = Tour::new(vec![4, 1, 3]);
        let edges: Vec<_> = tour.edges().collect();
        assert_eq!(edges, vec![(4, 1), (1, 3), (3, 4)]);
    }
}
