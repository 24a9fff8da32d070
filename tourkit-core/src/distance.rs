//! Edge-weight functions for coordinate-based instances.
//!
//! Coordinates are read in file order, so for `GEO` instances `x` holds the
//! latitude and `y` the longitude, both in decimal degrees.

use std::fmt;
use std::str::FromStr;

use geo::Coord;
use thiserror::Error;

/// Approximate radius of the Earth used by `GEO` distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// How pairwise distances are derived for an instance.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use tourkit_core::EdgeWeightType;
///
/// let kind: EdgeWeightType = "EUC_2D".parse()?;
/// let d = kind.distance(Coord { x: 0.0, y: 0.0 }, Coord { x: 3.0, y: 4.0 });
/// assert_eq!(d, Some(5.0));
/// # Ok::<(), tourkit_core::tsplib::UnknownKeyword>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeWeightType {
    /// Euclidean distance in the plane.
    Euc2d,
    /// Euclidean distance in the plane.
    ///
    /// The name suggests rounding up, but distances are computed exactly as
    /// for [`EdgeWeightType::Euc2d`].
    Ceil2d,
    /// Euclidean distance rounded to the nearest integer.
    Att,
    /// Great-circle distance in kilometres between latitude/longitude pairs.
    Geo,
    /// Distances are listed in an `EDGE_WEIGHT_SECTION`.
    Explicit,
}

impl EdgeWeightType {
    /// TSPLIB keyword for this edge-weight type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Euc2d => "EUC_2D",
            Self::Ceil2d => "CEIL_2D",
            Self::Att => "ATT",
            Self::Geo => "GEO",
            Self::Explicit => "EXPLICIT",
        }
    }

    /// Whether distances are computed from node coordinates.
    #[must_use]
    pub const fn uses_coordinates(self) -> bool {
        !matches!(self, Self::Explicit)
    }

    /// Distance between two points, or `None` for [`EdgeWeightType::Explicit`].
    #[must_use]
    pub fn distance(self, from: Coord<f64>, to: Coord<f64>) -> Option<f64> {
        match self {
            Self::Euc2d | Self::Ceil2d => Some(euclidean(from, to)),
            Self::Att => Some(euclidean(from, to).round_ties_even()),
            Self::Geo => Some(haversine(from, to)),
            Self::Explicit => None,
        }
    }
}

impl fmt::Display for EdgeWeightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A TSPLIB keyword that this crate does not recognise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised keyword `{0}`")]
pub struct UnknownKeyword(pub String);

impl FromStr for EdgeWeightType {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "EUC_2D" => Ok(Self::Euc2d),
            "CEIL_2D" => Ok(Self::Ceil2d),
            "ATT" => Ok(Self::Att),
            "GEO" => Ok(Self::Geo),
            "EXPLICIT" => Ok(Self::Explicit),
            other => Err(UnknownKeyword(other.to_owned())),
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "planar distance is inherently floating point"
)]
fn euclidean(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let delta = from - to;
    delta.x.hypot(delta.y)
}

#[expect(
    clippy::float_arithmetic,
    reason = "the haversine formula is inherently floating point"
)]
fn haversine(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let hav = |angle: f64| (angle / 2.0).sin().powi(2);
    let (lat_a, lon_a) = (from.x.to_radians(), from.y.to_radians());
    let (lat_b, lon_b) = (to.x.to_radians(), to.y.to_radians());
    let a = hav(lat_b - lat_a) + lat_a.cos() * lat_b.cos() * hav(lon_b - lon_a);
    2.0 * a.sqrt().asin() * EARTH_RADIUS_KM
}
