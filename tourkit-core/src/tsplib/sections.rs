//! Readers for the data sections that follow a section marker.

use geo::Coord;

use super::cursor::{Cursor, Tokens, parse_number};
use super::{EdgeWeightFormat, ParseError, ParseErrorKind};
use crate::instance::matrix_from_points;
use crate::{DistanceMatrix, EdgeWeightType};

/// Read `EDGE_WEIGHT_SECTION` values into a symmetric matrix.
///
/// Later values overwrite earlier ones for the mirrored cell, so an
/// asymmetric `FULL_MATRIX` keeps its lower triangle.
pub(super) fn read_edge_weights(
    cursor: &mut Cursor<'_>,
    format: Option<&str>,
    dimension: Option<usize>,
) -> Result<DistanceMatrix, ParseError> {
    let n = dimension.ok_or_else(|| cursor.error(ParseErrorKind::MissingDimension))?;
    let layout = format
        .and_then(|text| text.parse::<EdgeWeightFormat>().ok())
        .ok_or_else(|| {
            cursor.error(ParseErrorKind::UnsupportedEdgeWeightFormat(
                format.map(str::to_owned),
            ))
        })?;

    let mut matrix = DistanceMatrix::zeroed(n);
    let mut tokens = Tokens::new(cursor);
    for row in 0..n {
        for col in layout.columns(row, n) {
            let value = tokens.next_number()?;
            matrix.set(row + 1, col + 1, value);
        }
    }
    log::debug!("read {} edge weights ({layout})", layout.value_count(n));
    Ok(matrix)
}

/// Read `NODE_COORD_SECTION` and derive distances from the coordinates.
pub(super) fn read_node_coords(
    cursor: &mut Cursor<'_>,
    edge_weight_type: Option<&str>,
    dimension: Option<usize>,
) -> Result<(Vec<Coord<f64>>, DistanceMatrix), ParseError> {
    let n = dimension.ok_or_else(|| cursor.error(ParseErrorKind::MissingDimension))?;
    let kind = edge_weight_type
        .and_then(|text| text.parse::<EdgeWeightType>().ok())
        .filter(|kind| kind.uses_coordinates())
        .ok_or_else(|| {
            cursor.error(ParseErrorKind::UnsupportedEdgeWeightType(
                edge_weight_type.map(str::to_owned),
            ))
        })?;
    let points = read_coordinates(cursor, Some(n))?;
    let matrix = matrix_from_points(kind, &points);
    log::debug!("read {} node coordinates ({kind})", points.len());
    Ok((points, matrix))
}

/// Read exactly `N` lines of `id x y`, in any id order.
pub(super) fn read_coordinates(
    cursor: &mut Cursor<'_>,
    dimension: Option<usize>,
) -> Result<Vec<Coord<f64>>, ParseError> {
    let n = dimension.ok_or_else(|| cursor.error(ParseErrorKind::MissingDimension))?;
    let mut slots: Vec<Option<Coord<f64>>> = vec![None; n];
    for _ in 0..n {
        let line = cursor.next_line().unwrap_or_default();
        let (city, point) = parse_coordinate_line(line, n).map_err(|kind| cursor.error(kind))?;
        let slot = slots
            .get_mut(city - 1)
            .ok_or_else(|| cursor.error(ParseErrorKind::DuplicateCity(city)))?;
        if slot.replace(point).is_some() {
            return Err(cursor.error(ParseErrorKind::DuplicateCity(city)));
        }
    }
    Ok(slots.into_iter().flatten().collect())
}

/// Parse one `id x y` line, returning a range-checked id.
fn parse_coordinate_line(line: &str, n: usize) -> Result<(usize, Coord<f64>), ParseErrorKind> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let [id_text, x, y] = fields.as_slice() else {
        return Err(ParseErrorKind::MalformedCoordinates(line.to_owned()));
    };
    let id: i64 = id_text
        .parse()
        .map_err(|_| ParseErrorKind::NonNumeric((*id_text).to_owned()))?;
    let city = usize::try_from(id)
        .ok()
        .filter(|city| (1..=n).contains(city))
        .ok_or(ParseErrorKind::CityOutOfRange {
            city: id,
            dimension: n,
        })?;
    let point = Coord {
        x: parse_number(x)?,
        y: parse_number(y)?,
    };
    Ok((city, point))
}

/// Skip a `FIXED_EDGES_SECTION` body up to its `-1` terminator.
///
/// The constraints it lists are not enforced.
pub(super) fn skip_fixed_edges(cursor: &mut Cursor<'_>) {
    let mut skipped = 0_usize;
    while let Some(line) = cursor.next_line() {
        if line == "-1" {
            break;
        }
        skipped += 1;
    }
    log::warn!("ignoring {skipped} fixed edge lines; fixed edges are not enforced");
}
