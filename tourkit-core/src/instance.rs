//! Problem instances: metadata, distances and optional coordinates.

use std::ops::RangeInclusive;

use geo::Coord;
use thiserror::Error;

use crate::{CityId, DistanceMatrix, EdgeWeightType, MAX_DIMENSION};

/// Header fields read from an instance, kept for display.
///
/// Every field except `dimension` is optional because TSPLIB headers may be
/// omitted. Values are stored verbatim (trimmed), except that a trailing
/// `.tsp` is stripped from `NAME`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceInfo {
    /// `NAME` header.
    pub name: Option<String>,
    /// `TYPE` header; always starts with `TSP` for loaded instances.
    pub problem_type: Option<String>,
    /// `COMMENT` header.
    pub comment: Option<String>,
    /// Number of cities.
    pub dimension: usize,
    /// `EDGE_WEIGHT_TYPE` header.
    pub edge_weight_type: Option<String>,
    /// `EDGE_WEIGHT_FORMAT` header.
    pub edge_weight_format: Option<String>,
    /// `EDGE_DATA_FORMAT` header.
    pub edge_data_format: Option<String>,
    /// `NODE_COORD_TYPE` header.
    pub node_coord_type: Option<String>,
    /// `DISPLAY_DATA_TYPE` header.
    pub display_data_type: Option<String>,
    /// Trailing text of the `FIXED_EDGES_SECTION` marker, if present.
    pub fixed_edges_section: Option<String>,
}

impl InstanceInfo {
    /// Header keys and values in TSPLIB order, skipping absent fields.
    ///
    /// # Examples
    /// ```
    /// use tourkit_core::InstanceInfo;
    ///
    /// let info = InstanceInfo {
    ///     name: Some("burma14".into()),
    ///     dimension: 14,
    ///     ..InstanceInfo::default()
    /// };
    /// assert_eq!(
    ///     info.entries(),
    ///     vec![("NAME", "burma14".to_owned()), ("DIMENSION", "14".to_owned())]
    /// );
    /// ```
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let optional = |key: &'static str, value: &Option<String>| {
            value.as_ref().map(|text| (key, text.clone()))
        };
        [
            optional("NAME", &self.name),
            optional("TYPE", &self.problem_type),
            optional("COMMENT", &self.comment),
            Some(("DIMENSION", self.dimension.to_string())),
            optional("EDGE_WEIGHT_TYPE", &self.edge_weight_type),
            optional("EDGE_WEIGHT_FORMAT", &self.edge_weight_format),
            optional("EDGE_DATA_FORMAT", &self.edge_data_format),
            optional("NODE_COORD_TYPE", &self.node_coord_type),
            optional("DISPLAY_DATA_TYPE", &self.display_data_type),
            optional("FIXED_EDGES_SECTION", &self.fixed_edges_section),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Errors returned by [`Instance::new`] and [`Instance::from_points`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstanceError {
    /// No cities were supplied.
    #[error("instance must contain at least one city")]
    Empty,
    /// More cities than [`MAX_DIMENSION`].
    #[error("instance has {dimension} cities; at most {max} are supported")]
    TooLarge {
        /// Requested number of cities.
        dimension: usize,
        /// Supported maximum.
        max: usize,
    },
    /// Metadata and matrix disagree on the number of cities.
    #[error("metadata declares {declared} cities but the matrix covers {matrix}")]
    DimensionMismatch {
        /// Dimension recorded in [`InstanceInfo`].
        declared: usize,
        /// Dimension of the [`DistanceMatrix`].
        matrix: usize,
    },
    /// Coordinate list length differs from the number of cities.
    #[error("expected {expected} coordinates, found {found}")]
    CoordinateCountMismatch {
        /// Number of cities.
        expected: usize,
        /// Number of coordinates supplied.
        found: usize,
    },
    /// Distances cannot be computed from coordinates for this type.
    #[error("edge weight type {0} does not derive distances from coordinates")]
    NotCoordinateType(EdgeWeightType),
}

/// A loaded, immutable travelling-salesman instance.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourkit_core::{EdgeWeightType, Instance};
///
/// let instance = Instance::from_points(
///     EdgeWeightType::Euc2d,
///     vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 3.0, y: 4.0 }],
/// )?;
/// assert_eq!(instance.dimension(), 2);
/// assert_eq!(instance.distance(1, 2), 5.0);
/// # Ok::<(), tourkit_core::InstanceError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    info: InstanceInfo,
    matrix: DistanceMatrix,
    coordinates: Option<Vec<Coord<f64>>>,
}

impl Instance {
    /// Validate and assemble an instance from its parts.
    ///
    /// `coordinates`, when present, holds the position of city `id` at index
    /// `id - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError`] when the matrix is empty or larger than
    /// [`MAX_DIMENSION`], or when `info` or `coordinates` disagree with it on
    /// the number of cities.
    pub fn new(
        info: InstanceInfo,
        matrix: DistanceMatrix,
        coordinates: Option<Vec<Coord<f64>>>,
    ) -> Result<Self, InstanceError> {
        let dimension = matrix.dimension();
        if dimension == 0 {
            return Err(InstanceError::Empty);
        }
        if dimension > MAX_DIMENSION {
            return Err(InstanceError::TooLarge {
                dimension,
                max: MAX_DIMENSION,
            });
        }
        if info.dimension != dimension {
            return Err(InstanceError::DimensionMismatch {
                declared: info.dimension,
                matrix: dimension,
            });
        }
        if let Some(points) = &coordinates
            && points.len() != dimension
        {
            return Err(InstanceError::CoordinateCountMismatch {
                expected: dimension,
                found: points.len(),
            });
        }
        Ok(Self {
            info,
            matrix,
            coordinates,
        })
    }

    /// Build an instance whose distances are derived from `points`.
    ///
    /// City `id` is placed at `points[id - 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`InstanceError::NotCoordinateType`] for `EXPLICIT`, and the
    /// size errors of [`Instance::new`].
    pub fn from_points(kind: EdgeWeightType, points: Vec<Coord<f64>>) -> Result<Self, InstanceError> {
        if !kind.uses_coordinates() {
            return Err(InstanceError::NotCoordinateType(kind));
        }
        let dimension = points.len();
        if dimension > MAX_DIMENSION {
            return Err(InstanceError::TooLarge {
                dimension,
                max: MAX_DIMENSION,
            });
        }
        let matrix = matrix_from_points(kind, &points);
        let info = InstanceInfo {
            problem_type: Some("TSP".to_owned()),
            dimension,
            edge_weight_type: Some(kind.as_str().to_owned()),
            ..InstanceInfo::default()
        };
        Self::new(info, matrix, Some(points))
    }

    /// Header metadata.
    #[must_use]
    pub const fn info(&self) -> &InstanceInfo {
        &self.info
    }

    /// Number of cities, `N`.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.matrix.dimension()
    }

    /// City ids `1..=N` in ascending order.
    #[must_use]
    pub fn cities(&self) -> RangeInclusive<CityId> {
        1..=self.dimension()
    }

    /// The full distance table.
    #[must_use]
    pub const fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    /// Distance between two cities.
    #[must_use]
    pub fn distance(&self, from: CityId, to: CityId) -> f64 {
        self.matrix.get(from, to)
    }

    /// Node positions indexed by `id - 1`, if the source supplied any.
    #[must_use]
    pub fn coordinates(&self) -> Option<&[Coord<f64>]> {
        self.coordinates.as_deref()
    }

    /// Position of a single city.
    #[must_use]
    pub fn coordinate(&self, city: CityId) -> Option<Coord<f64>> {
        let index = city.checked_sub(1)?;
        self.coordinates.as_ref()?.get(index).copied()
    }
}

/// Fill a matrix with `kind` distances between every pair of `points`.
pub(crate) fn matrix_from_points(kind: EdgeWeightType, points: &[Coord<f64>]) -> DistanceMatrix {
    let mut matrix = DistanceMatrix::zeroed(points.len());
    for (i, &from) in points.iter().enumerate() {
        for (j, &to) in points.iter().enumerate().skip(i + 1) {
            let d = kind.distance(from, to).unwrap_or(0.0);
            matrix.set(i + 1, j + 1, d);
        }
    }
    matrix
}
