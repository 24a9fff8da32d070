//! Best-improvement local search over three neighbourhoods.
//!
//! Each iteration evaluates every move in the neighbourhood, applies the
//! one with the most negative length change, and records the new tour. The
//! search stops at a local optimum or after
//! [`LocalSearchConfig::max_iterations`] moves, so recorded lengths never
//! increase.

use std::fmt;
use std::str::FromStr;

use tourkit_core::{CityId, Instance, SolveError, Solver, Tour, Trace};

use crate::{ConfigError, EPSILON};

/// Moves explored by [`LocalSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Neighbourhood {
    /// 2-opt: reverse the segment between two non-adjacent edges.
    PairwiseExchange,
    /// Move one city to another position.
    NodeInsertion,
    /// Move two consecutive cities, in either orientation, to another
    /// position.
    EdgeInsertion,
}

impl Neighbourhood {
    /// Every neighbourhood, in a stable order.
    pub const ALL: [Self; 3] = [
        Self::PairwiseExchange,
        Self::NodeInsertion,
        Self::EdgeInsertion,
    ];

    /// Snake-case name used by the engine dispatcher.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PairwiseExchange => "pairwise_exchange",
            Self::NodeInsertion => "node_insertion",
            Self::EdgeInsertion => "edge_insertion",
        }
    }

    fn best_move(self, instance: &Instance, tour: &[CityId]) -> Option<Move> {
        match self {
            Self::PairwiseExchange => best_reversal(instance, tour),
            Self::NodeInsertion => best_relocation(instance, tour, 1),
            Self::EdgeInsertion => best_relocation(instance, tour, 2),
        }
    }
}

impl fmt::Display for Neighbourhood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Neighbourhood {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|neighbourhood| neighbourhood.name() == s)
            .ok_or_else(|| ConfigError::UnknownNeighbourhood(s.to_owned()))
    }
}

/// Configuration for [`LocalSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalSearchConfig {
    /// Upper bound on applied moves.
    pub max_iterations: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
        }
    }
}

impl LocalSearchConfig {
    /// Check that the iteration cap is positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] when `max_iterations` is zero.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::NonPositive {
                name: "max_iterations",
            });
        }
        Ok(())
    }
}

/// A validated local search over one [`Neighbourhood`].
///
/// # Examples
/// ```
/// use tourkit_core::test_support::unit_square;
/// use tourkit_heuristics::{LocalSearch, LocalSearchConfig, Neighbourhood};
///
/// let search = LocalSearch::new(Neighbourhood::PairwiseExchange, LocalSearchConfig::default())?;
/// let trace = search.improve(&unit_square(), &[1, 3, 2, 4])?;
/// assert_eq!(trace.last_length(), Some(4.0));
/// # Ok::<(), tourkit_heuristics::ConfigError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LocalSearch {
    neighbourhood: Neighbourhood,
    config: LocalSearchConfig,
}

impl LocalSearch {
    /// Validate `config` and build a search.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositive`] for a zero iteration cap.
    pub fn new(neighbourhood: Neighbourhood, config: LocalSearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            neighbourhood,
            config,
        })
    }

    /// The neighbourhood this search explores.
    #[must_use]
    pub const fn neighbourhood(&self) -> Neighbourhood {
        self.neighbourhood
    }

    /// Improve `start` until no improving move remains.
    ///
    /// The trace begins with `start` and gains one entry per applied move.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStartTour`] when `start` is not a
    /// permutation of the instance's cities.
    pub fn improve(&self, instance: &Instance, start: &[CityId]) -> Result<Trace, ConfigError> {
        Tour::from(start.to_vec())
            .validate(instance.dimension())
            .map_err(ConfigError::InvalidStartTour)?;
        Ok(self.run(instance, start.to_vec()))
    }

    fn run(&self, instance: &Instance, mut tour: Vec<CityId>) -> Trace {
        let mut trace = Trace::new();
        trace.push(&tour, instance.tour_length(&tour));
        for _ in 0..self.config.max_iterations {
            let Some(best) = self.neighbourhood.best_move(instance, &tour) else {
                break;
            };
            log::trace!("{}: applying {best:?}", self.neighbourhood);
            tour = best.apply(&tour);
            trace.push(&tour, instance.tour_length(&tour));
        }
        log::debug!(
            "{}: {} improving moves, length {}",
            self.neighbourhood,
            trace.len().saturating_sub(1),
            trace.last_length().unwrap_or_default()
        );
        trace
    }
}

/// Improves the identity tour `1, 2, ..., N`.
impl Solver for LocalSearch {
    fn solve(&self, instance: &Instance) -> Result<Trace, SolveError> {
        Ok(self.run(instance, instance.cities().collect()))
    }
}

/// An improving move, described by positions in the current tour.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Move {
    /// Reverse `tour[from..=to]`.
    Reverse { from: usize, to: usize, delta: f64 },
    /// Remove `len` cities starting at `start` (wrapping) and re-insert them
    /// after `after` cities of what remains, reversed if `flip` is set.
    Relocate {
        start: usize,
        len: usize,
        after: usize,
        flip: bool,
        delta: f64,
    },
}

impl Move {
    const fn delta(&self) -> f64 {
        match *self {
            Self::Reverse { delta, .. } | Self::Relocate { delta, .. } => delta,
        }
    }

    fn apply(&self, tour: &[CityId]) -> Vec<CityId> {
        match *self {
            Self::Reverse { from, to, .. } => {
                let mut next = tour.to_vec();
                if let Some(segment) = next.get_mut(from..=to) {
                    segment.reverse();
                }
                next
            }
            Self::Relocate {
                start,
                len,
                after,
                flip,
                ..
            } => {
                let (mut segment, rest) = split_segment(tour, start, len);
                if flip {
                    segment.reverse();
                }
                let mut next = Vec::with_capacity(tour.len());
                next.extend(rest.iter().take(after));
                next.extend(segment);
                next.extend(rest.iter().skip(after));
                next
            }
        }
    }
}

/// Keep `candidate` if it improves on `best` by more than [`EPSILON`].
fn keep_better(best: &mut Option<Move>, candidate: Move) {
    let bar = best.map_or(-EPSILON, |incumbent| incumbent.delta());
    if candidate.delta() < bar {
        *best = Some(candidate);
    }
}

/// Best 2-opt move: break `(t[i], t[i+1])` and `(t[j], t[j+1])`, reconnect
/// as `(t[i], t[j])` and `(t[i+1], t[j+1])`.
#[expect(
    clippy::indexing_slicing,
    clippy::float_arithmetic,
    reason = "positions are bounded by the tour length; deltas are float sums"
)]
fn best_reversal(instance: &Instance, tour: &[CityId]) -> Option<Move> {
    let n = tour.len();
    let mut best = None;
    for i in 0..n.saturating_sub(2) {
        let (a, b) = (tour[i], tour[i + 1]);
        for j in i + 2..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let c = tour[j];
            let d = if j + 1 == n { tour[0] } else { tour[j + 1] };
            let delta = instance.distance(a, c) + instance.distance(b, d)
                - instance.distance(a, b)
                - instance.distance(c, d);
            keep_better(
                &mut best,
                Move::Reverse {
                    from: i + 1,
                    to: j,
                    delta,
                },
            );
        }
    }
    best
}

/// Best relocation of a block of `len` consecutive cities.
///
/// For each block, the remaining cities form a cycle that starts just after
/// the block; the block may be spliced into any of its edges, including the
/// one that closes the gap, in either orientation.
#[expect(
    clippy::float_arithmetic,
    reason = "relocation deltas are float sums"
)]
fn best_relocation(instance: &Instance, tour: &[CityId], len: usize) -> Option<Move> {
    let n = tour.len();
    if n < len + 2 {
        return None;
    }
    let mut best = None;
    for start in 0..n {
        let (segment, rest) = split_segment(tour, start, len);
        let (Some(&head), Some(&tail)) = (segment.first(), segment.last()) else {
            continue;
        };
        let (Some(&next), Some(&prev)) = (rest.first(), rest.last()) else {
            continue;
        };
        let removal = instance.distance(prev, head) + instance.distance(tail, next)
            - instance.distance(prev, next);
        let successors = rest.iter().cycle().skip(1);
        for (after, (&x, &y)) in rest.iter().zip(successors).enumerate() {
            let forward = instance.distance(x, head) + instance.distance(tail, y);
            let backward = instance.distance(x, tail) + instance.distance(head, y);
            let gap = instance.distance(x, y);
            let orientations = if len > 1 { 2 } else { 1 };
            for (flip, insertion) in [(false, forward), (true, backward)]
                .into_iter()
                .take(orientations)
            {
                keep_better(
                    &mut best,
                    Move::Relocate {
                        start,
                        len,
                        after: after + 1,
                        flip,
                        delta: insertion - gap - removal,
                    },
                );
            }
        }
    }
    best
}

/// Split the cycle into the `len` cities starting at `start` and the rest,
/// the rest beginning immediately after the block.
fn split_segment(tour: &[CityId], start: usize, len: usize) -> (Vec<CityId>, Vec<CityId>) {
    let mut rotated = tour.iter().copied().cycle().skip(start).take(tour.len());
    let segment: Vec<CityId> = rotated.by_ref().take(len).collect();
    (segment, rotated.collect())
}
