//! Integer-programming formulation of the symmetric TSP.
//!
//! One binary variable per unordered city pair, a degree-two row per city,
//! and a subtour-elimination row for every proper subset of at least two
//! cities. The subset rows grow as `2^N`, so models are only built up to
//! [`MAX_EXACT_CITIES`].

use tourkit_core::{CityId, Instance, SolveError};

/// Largest instance the exact formulation accepts.
pub const MAX_EXACT_CITIES: usize = 15;

/// Right-hand side of an [`EdgeConstraint`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The selected edges must number exactly this many.
    Exactly(u32),
    /// The selected edges must number at most this many.
    AtMost(u32),
}

/// A linear row over a set of edge variables, each with coefficient one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeConstraint {
    /// Indices into [`TourModel::edges`].
    pub edges: Vec<usize>,
    /// Bound on how many of those edges may be selected.
    pub bound: Bound,
}

/// A complete exact model, ready to hand to a
/// [`MilpBackend`](crate::MilpBackend).
///
/// # Examples
/// ```
/// use tourkit_core::test_support::unit_square;
/// use tourkit_solver_ilp::TourModel;
///
/// let model = TourModel::build(&unit_square())?;
/// assert_eq!(model.edges().len(), 6);
/// // Four degree rows plus every subset of size two or three.
/// assert_eq!(model.constraints().len(), 4 + 6 + 4);
/// # Ok::<(), tourkit_core::SolveError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TourModel {
    dimension: usize,
    edges: Vec<(CityId, CityId)>,
    costs: Vec<f64>,
    constraints: Vec<EdgeConstraint>,
}

impl TourModel {
    /// Formulate `instance`.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::ModelTooLarge`] when the instance has more than
    /// [`MAX_EXACT_CITIES`] cities.
    pub fn build(instance: &Instance) -> Result<Self, SolveError> {
        let dimension = instance.dimension();
        if dimension > MAX_EXACT_CITIES {
            return Err(SolveError::ModelTooLarge {
                dimension,
                max: MAX_EXACT_CITIES,
            });
        }

        let edges: Vec<(CityId, CityId)> = instance
            .cities()
            .flat_map(|i| (i + 1..=dimension).map(move |j| (i, j)))
            .collect();
        let costs = edges.iter().map(|&(i, j)| instance.distance(i, j)).collect();

        let mut constraints: Vec<EdgeConstraint> = instance
            .cities()
            .map(|city| EdgeConstraint {
                edges: edges_within(&edges, |a, b| a == city || b == city),
                bound: Bound::Exactly(2),
            })
            .collect();
        constraints.extend(subtour_rows(&edges, dimension));

        log::debug!(
            "exact model: {} edge variables, {} constraints",
            edges.len(),
            constraints.len()
        );
        Ok(Self {
            dimension,
            edges,
            costs,
            constraints,
        })
    }

    /// Number of cities in the formulated instance.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Edge variables as `(i, j)` city pairs with `i < j`, ordered
    /// lexicographically.
    #[must_use]
    pub fn edges(&self) -> &[(CityId, CityId)] {
        &self.edges
    }

    /// Objective coefficient of each edge variable.
    #[must_use]
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Degree rows, one per city, followed by the subtour rows.
    #[must_use]
    pub fn constraints(&self) -> &[EdgeConstraint] {
        &self.constraints
    }
}

fn edges_within(
    edges: &[(CityId, CityId)],
    keep: impl Fn(CityId, CityId) -> bool,
) -> Vec<usize> {
    edges
        .iter()
        .enumerate()
        .filter(|&(_, &(a, b))| keep(a, b))
        .map(|(index, _)| index)
        .collect()
}

/// For every subset `S` with `2 <= |S| < N`: at most `|S| - 1` selected
/// edges inside `S`.
fn subtour_rows(edges: &[(CityId, CityId)], dimension: usize) -> Vec<EdgeConstraint> {
    let contains = |mask: u32, city: CityId| mask & (1_u32 << (city - 1)) != 0;
    let full = (1_u32 << dimension) - 1;
    (1..full)
        .filter_map(|mask| {
            let size = (1..=dimension).filter(|&city| contains(mask, city)).count();
            let limit = u32::try_from(size).ok()?.checked_sub(1)?;
            (size >= 2).then(|| EdgeConstraint {
                edges: edges_within(edges, |a, b| contains(mask, a) && contains(mask, b)),
                bound: Bound::AtMost(limit),
            })
        })
        .collect()
}
