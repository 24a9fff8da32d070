//! Step-by-step record of an algorithm's progress.

use geo::Coord;

use crate::{CityId, Instance};

/// Parallel sequences of tour snapshots and their lengths.
///
/// Each snapshot is an owned copy taken when it was pushed, so later
/// mutation of the algorithm's working tour never alters recorded steps.
/// Both sequences always have the same length.
///
/// # Examples
/// ```
/// use tourkit_core::Trace;
///
/// let mut tour = vec![1, 2];
/// let mut trace = Trace::new();
/// trace.push(&tour, 2.0);
/// tour.push(3);
/// trace.push(&tour, 3.0);
///
/// assert_eq!(trace.len(), 2);
/// assert_eq!(trace.tours()[0], vec![1, 2]);
/// assert_eq!(trace.last_length(), Some(3.0));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace {
    tours: Vec<Vec<CityId>>,
    lengths: Vec<f64>,
}

impl Trace {
    /// An empty trace.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tours: Vec::new(),
            lengths: Vec::new(),
        }
    }

    /// Record a snapshot of `tour` with its length.
    pub fn push(&mut self, tour: &[CityId], length: f64) {
        self.tours.push(tour.to_vec());
        self.lengths.push(length);
    }

    /// Number of recorded steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }

    /// Snapshots in the order they were recorded.
    #[must_use]
    pub fn tours(&self) -> &[Vec<CityId>] {
        &self.tours
    }

    /// Lengths in the order they were recorded.
    #[must_use]
    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// The most recent snapshot.
    #[must_use]
    pub fn last_tour(&self) -> Option<&[CityId]> {
        self.tours.last().map(Vec::as_slice)
    }

    /// The most recent length.
    #[must_use]
    pub fn last_length(&self) -> Option<f64> {
        self.lengths.last().copied()
    }

    /// Closed display polylines for every snapshot.
    ///
    /// Each entry is empty when `instance` has no coordinates.
    #[must_use]
    pub fn points(&self, instance: &Instance) -> Vec<Vec<Coord<f64>>> {
        self.tours
            .iter()
            .map(|tour| instance.to_points(tour))
            .collect()
    }

    /// Split into `(tours, lengths)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Vec<CityId>>, Vec<f64>) {
        (self.tours, self.lengths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    use crate::test_support::unit_square;

    #[rstest]
    fn sequences_stay_parallel() {
        let mut trace = Trace::new();
        trace.push(&[1], 0.0);
        trace.push(&[1, 2], 2.0);
        let (tours, lengths) = trace.into_parts();
        assert_eq!(tours.len(), lengths.len());
    }

    #[rstest]
    fn points_follow_snapshots() {
        let square = unit_square();
        let mut trace = Trace::new();
        trace.push(&[1, 2], 2.0);
        trace.push(&[1, 2, 3, 4], 4.0);
        let points = trace.points(&square);
        assert_eq!(points.len(), 2);
        assert_eq!(points.first().map(Vec::len), Some(3));
        assert_eq!(points.last().map(Vec::len), Some(5));
    }

    #[rstest]
    fn empty_trace_has_no_last_step() {
        let trace = Trace::new();
        assert!(trace.is_empty());
        assert_eq!(trace.last_tour(), None);
        assert_eq!(trace.last_length(), None);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn serialises_as_parallel_arrays() {
        let mut trace = Trace::new();
        trace.push(&[1, 2], 2.0);
        let json = serde_json::to_value(&trace).expect("trace serialises");
        assert_eq!(json["tours"], serde_json::json!([[1, 2]]));
        assert_eq!(json["lengths"], serde_json::json!([2.0]));
    }
}
