//! Greedy construction heuristics.
//!
//! Every heuristic starts from a one-city tour and adds one city per step,
//! so a run over `N` cities records exactly `N` snapshots: the seed and
//! `N - 1` additions. Candidates are scanned in ascending id order and
//! insertion positions in tour order; the first strict minimum (or maximum)
//! wins, which makes every run deterministic for a given start city.

use std::fmt;
use std::str::FromStr;

use tourkit_core::{CityId, Instance, SolveError, Solver, Trace};

use crate::ConfigError;

/// The available construction rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Construction {
    /// Append the unvisited city closest to the last city of the tour.
    NearestNeighbor,
    /// Insert the unvisited city closest to the tour at its cheapest
    /// position.
    NearestInsertion,
    /// Insert the unvisited city farthest from the tour at its cheapest
    /// position.
    FarthestInsertion,
    /// Insert the (city, position) pair with the globally smallest
    /// insertion cost.
    CheapestInsertion,
}

impl Construction {
    /// Every rule, in a stable order.
    pub const ALL: [Self; 4] = [
        Self::NearestNeighbor,
        Self::NearestInsertion,
        Self::FarthestInsertion,
        Self::CheapestInsertion,
    ];

    /// Snake-case name used by the engine dispatcher.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NearestNeighbor => "nearest_neighbor",
            Self::NearestInsertion => "nearest_insertion",
            Self::FarthestInsertion => "farthest_insertion",
            Self::CheapestInsertion => "cheapest_insertion",
        }
    }

    /// Build a tour starting from `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::StartCityOutOfRange`] when `start` is not a
    /// city of `instance`.
    ///
    /// # Examples
    /// ```
    /// use tourkit_core::test_support::unit_square;
    /// use tourkit_heuristics::Construction;
    ///
    /// let trace = Construction::NearestNeighbor.build(&unit_square(), 1)?;
    /// assert_eq!(trace.last_tour(), Some(&[1, 2, 3, 4][..]));
    /// assert_eq!(trace.last_length(), Some(4.0));
    /// # Ok::<(), tourkit_heuristics::ConfigError>(())
    /// ```
    pub fn build(self, instance: &Instance, start: CityId) -> Result<Trace, ConfigError> {
        if !instance.cities().contains(&start) {
            return Err(ConfigError::StartCityOutOfRange {
                city: start,
                dimension: instance.dimension(),
            });
        }
        let trace = self.run(instance, start);
        log::debug!(
            "{} from city {start}: {} steps, length {}",
            self.name(),
            trace.len(),
            trace.last_length().unwrap_or_default()
        );
        Ok(trace)
    }

    fn run(self, instance: &Instance, start: CityId) -> Trace {
        match self {
            Self::NearestNeighbor => nearest_neighbor(instance, start),
            Self::NearestInsertion => select_and_insert(instance, start, Selection::Nearest),
            Self::FarthestInsertion => select_and_insert(instance, start, Selection::Farthest),
            Self::CheapestInsertion => cheapest_insertion(instance, start),
        }
    }
}

impl fmt::Display for Construction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Construction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.name() == s)
            .ok_or_else(|| ConfigError::UnknownConstruction(s.to_owned()))
    }
}

/// Runs the rule from city 1.
impl Solver for Construction {
    fn solve(&self, instance: &Instance) -> Result<Trace, SolveError> {
        Ok(self.run(instance, 1))
    }
}

/// Which candidate the insertion heuristics pick next.
#[derive(Debug, Clone, Copy)]
enum Selection {
    Nearest,
    Farthest,
}

impl Selection {
    fn prefers(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Self::Nearest => candidate < incumbent,
            Self::Farthest => candidate > incumbent,
        }
    }
}

fn record(trace: &mut Trace, instance: &Instance, tour: &[CityId]) {
    trace.push(tour, instance.tour_length(tour));
}

/// All cities except `start`, in ascending order.
fn unvisited(instance: &Instance, start: CityId) -> Vec<CityId> {
    instance.cities().filter(|&city| city != start).collect()
}

fn nearest_neighbor(instance: &Instance, start: CityId) -> Trace {
    let mut tour = vec![start];
    let mut remaining = unvisited(instance, start);
    let mut trace = Trace::new();
    record(&mut trace, instance, &tour);

    let mut current = start;
    while let Some((index, _)) = first_min(
        remaining
            .iter()
            .map(|&city| instance.distance(current, city)),
    ) {
        current = remaining.remove(index);
        tour.push(current);
        record(&mut trace, instance, &tour);
    }
    trace
}

/// Nearest and farthest insertion: pick a city by its distance to the tour,
/// then splice it in at its cheapest position.
fn select_and_insert(instance: &Instance, start: CityId, selection: Selection) -> Trace {
    let mut tour = vec![start];
    let mut remaining = unvisited(instance, start);
    let mut to_tour: Vec<f64> = remaining
        .iter()
        .map(|&city| instance.distance(start, city))
        .collect();
    let mut trace = Trace::new();
    record(&mut trace, instance, &tour);

    while let Some(index) = first_preferred(&to_tour, selection) {
        let city = remaining.remove(index);
        to_tour.remove(index);
        let (position, _) = cheapest_position(instance, &tour, city);
        tour.insert(position, city);
        for (&other, distance) in remaining.iter().zip(to_tour.iter_mut()) {
            *distance = distance.min(instance.distance(city, other));
        }
        record(&mut trace, instance, &tour);
    }
    trace
}

fn cheapest_insertion(instance: &Instance, start: CityId) -> Trace {
    let mut tour = vec![start];
    let mut remaining = unvisited(instance, start);
    let mut trace = Trace::new();
    record(&mut trace, instance, &tour);

    loop {
        let candidates = remaining
            .iter()
            .map(|&city| cheapest_position(instance, &tour, city));
        let mut best: Option<(usize, usize, f64)> = None;
        for (index, (position, cost)) in candidates.enumerate() {
            if best.is_none_or(|(_, _, incumbent)| cost < incumbent) {
                best = Some((index, position, cost));
            }
        }
        let Some((index, position, _)) = best else {
            break;
        };
        let city = remaining.remove(index);
        tour.insert(position, city);
        record(&mut trace, instance, &tour);
    }
    trace
}

/// Insertion index and cost of the cheapest edge of `tour` to break for
/// `city`.
///
/// Index `p + 1` splices `city` between `tour[p]` and its cyclic successor.
pub(crate) fn cheapest_position(instance: &Instance, tour: &[CityId], city: CityId) -> (usize, f64) {
    let successors = tour.iter().cycle().skip(1);
    let costs = tour
        .iter()
        .zip(successors)
        .map(|(&from, &to)| instance.insertion_cost(from, to, city));
    first_min(costs).map_or((tour.len(), 0.0), |(edge, cost)| (edge + 1, cost))
}

/// Position and value of the first strict minimum.
pub(crate) fn first_min(values: impl IntoIterator<Item = f64>) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, value) in values.into_iter().enumerate() {
        if best.is_none_or(|(_, incumbent)| value < incumbent) {
            best = Some((index, value));
        }
    }
    best
}

fn first_preferred(values: &[f64], selection: Selection) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in values.iter().enumerate() {
        if best.is_none_or(|(_, incumbent)| selection.prefers(value, incumbent)) {
            best = Some((index, value));
        }
    }
    best.map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tourkit_core::test_support::{explicit_instance, points_instance, random_instance, unit_square};
    use tourkit_core::Tour;

    fn assert_permutation(instance: &Instance, trace: &Trace) {
        let tour = Tour::from(trace.last_tour().map(<[_]>::to_vec).unwrap_or_default());
        assert_eq!(tour.validate(instance.dimension()), Ok(()));
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "assertions compare float lengths")]
    fn nearest_neighbour_walks_the_square() {
        let trace = Construction::NearestNeighbor
            .build(&unit_square(), 1)
            .expect("city 1 exists");
        assert_eq!(
            trace.tours(),
            &[vec![1], vec![1, 2], vec![1, 2, 3], vec![1, 2, 3, 4]]
        );
        let expected = [0.0, 2.0, 2.0 + 2.0_f64.sqrt(), 4.0];
        for (length, want) in trace.lengths().iter().zip(expected) {
            assert!((length - want).abs() < 1e-12, "{length} != {want}");
        }
    }

    #[rstest]
    fn nearest_neighbour_breaks_ties_by_lowest_id() {
        // Cities 2 and 3 are both at distance 1 from city 1.
        let instance = points_instance(&[(0.0, 0.0), (1.0, 0.0), (-1.0, 0.0)]);
        let trace = Construction::NearestNeighbor
            .build(&instance, 1)
            .expect("city 1 exists");
        assert_eq!(trace.last_tour(), Some(&[1, 2, 3][..]));
    }

    #[rstest]
    fn farthest_insertion_fixes_the_outline_first() {
        // City 4 sits in the middle of the triangle 1-2-3.
        let instance = points_instance(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0), (5.0, 3.0)]);
        let trace = Construction::FarthestInsertion
            .build(&instance, 1)
            .expect("city 1 exists");
        let added: Vec<CityId> = trace
            .tours()
            .windows(2)
            .filter_map(|pair| match pair {
                [before, after] => after.iter().find(|city| !before.contains(city)).copied(),
                _ => None,
            })
            .collect();
        assert_eq!(added.last(), Some(&4));
    }

    #[rstest]
    fn nearest_insertion_adds_closest_city_first() {
        let instance = points_instance(&[(0.0, 0.0), (10.0, 0.0), (1.0, 0.0), (5.0, 5.0)]);
        let trace = Construction::NearestInsertion
            .build(&instance, 1)
            .expect("city 1 exists");
        assert_eq!(trace.tours().get(1), Some(&vec![1, 3]));
    }

    #[rstest]
    fn cheapest_insertion_on_the_explicit_triangle() {
        let trace = Construction::CheapestInsertion
            .build(&explicit_instance(), 1)
            .expect("city 1 exists");
        assert_eq!(trace.tours().get(1), Some(&vec![1, 2]));
        assert_eq!(trace.last_length(), Some(12.0));
    }

    /// City 3 is nearer the tour `1 2` than city 4, but splicing city 4
    /// into the edge `1-2` costs 16 against 17.6 for city 3.
    fn splice_beats_proximity() -> Instance {
        points_instance(&[(0.0, 0.0), (10.0, 0.0), (10.0, 12.0), (5.0, 12.0)])
    }

    #[rstest]
    #[case(
        Construction::NearestInsertion,
        &[vec![1], vec![1, 2], vec![1, 3, 2], vec![1, 4, 3, 2]]
    )]
    #[case(
        Construction::CheapestInsertion,
        &[vec![1], vec![1, 2], vec![1, 4, 2], vec![1, 4, 3, 2]]
    )]
    fn cheapest_insertion_minimises_the_splice_not_the_distance(
        #[case] rule: Construction,
        #[case] expected: &[Vec<CityId>],
    ) {
        let trace = rule
            .build(&splice_beats_proximity(), 1)
            .expect("city 1 exists");
        assert_eq!(trace.tours(), expected);
    }

    #[rstest]
    fn insertion_rules_take_the_first_of_equal_candidates(
        #[values(
            Construction::NearestInsertion,
            Construction::FarthestInsertion,
            Construction::CheapestInsertion
        )]
        rule: Construction,
    ) {
        // Cities 2 and 3 tie on every measure from city 1, and both edges
        // of the tour `1 2` cost the same for city 3.
        let instance = points_instance(&[(0.0, 0.0), (1.0, 0.0), (-1.0, 0.0)]);
        let trace = rule.build(&instance, 1).expect("city 1 exists");
        assert_eq!(trace.tours(), &[vec![1], vec![1, 2], vec![1, 3, 2]]);
    }

    #[rstest]
    #[expect(clippy::float_arithmetic, reason = "assertions compare float lengths")]
    fn every_rule_builds_a_permutation(
        #[values(
            Construction::NearestNeighbor,
            Construction::NearestInsertion,
            Construction::FarthestInsertion,
            Construction::CheapestInsertion
        )]
        rule: Construction,
        #[values(1, 2, 3, 9, 25)] size: usize,
    ) {
        let instance = random_instance(size, 7);
        let trace = rule.build(&instance, size).expect("last city exists");
        assert_eq!(trace.len(), size);
        assert_eq!(trace.tours().first(), Some(&vec![size]));
        assert_permutation(&instance, &trace);
        let last = trace.last_length().expect("non-empty trace");
        let tour = trace.last_tour().expect("non-empty trace");
        assert!((instance.tour_length(tour) - last).abs() < 1e-9);
    }

    #[rstest]
    fn rejects_unknown_start_city() {
        let err = Construction::NearestInsertion
            .build(&unit_square(), 5)
            .expect_err("city 5 does not exist");
        assert_eq!(
            err,
            ConfigError::StartCityOutOfRange {
                city: 5,
                dimension: 4
            }
        );
    }

    #[rstest]
    fn names_round_trip() {
        for rule in Construction::ALL {
            assert_eq!(rule.name().parse::<Construction>(), Ok(rule));
        }
        assert_eq!(
            "warp_drive".parse::<Construction>(),
            Err(ConfigError::UnknownConstruction("warp_drive".to_owned()))
        );
    }

    #[rstest]
    fn solver_starts_from_city_one() {
        let trace = Construction::NearestNeighbor
            .solve(&unit_square())
            .expect("construction never fails");
        assert_eq!(trace.tours().first(), Some(&vec![1]));
        assert_eq!(trace.last_length(), Some(4.0));
    }
}
