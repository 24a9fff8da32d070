//! Reader and writer for a subset of the TSPLIB exchange format.
//!
//! Supported instances are complete, symmetric and two-dimensional:
//!
//! - `NODE_COORD_SECTION` with `EDGE_WEIGHT_TYPE` of `EUC_2D`, `CEIL_2D`,
//!   `ATT` or `GEO`;
//! - `EDGE_WEIGHT_SECTION` with `EDGE_WEIGHT_FORMAT` of `FULL_MATRIX`,
//!   `UPPER_DIAG_ROW`, `LOWER_DIAG_ROW`, `UPPER_ROW` or `LOWER_ROW`;
//! - `DISPLAY_DATA_SECTION` for display-only coordinates.
//!
//! `FIXED_EDGES_SECTION` bodies are skipped and their constraints ignored.
//! Adjacency-list edge data and 3-D coordinates are rejected.

mod cursor;
mod error;
mod format;
mod sections;
mod writer;

use geo::Coord;

pub use crate::distance::UnknownKeyword;
pub use error::{ParseError, ParseErrorKind};
pub use format::EdgeWeightFormat;
pub use writer::write_full_matrix;

use crate::{DistanceMatrix, Instance, InstanceInfo, MAX_DIMENSION};
use cursor::Cursor;

/// Parse instance text into a validated [`Instance`].
///
/// Parsing stops at `EOF` or at the end of the text. Blank lines between
/// headers are ignored. An instance without node coordinates is accepted
/// with a warning; its display polylines will be empty.
///
/// # Errors
///
/// Returns [`ParseError`] carrying the offending line for unsupported or
/// malformed headers and sections, and for a missing `TYPE`, `DIMENSION`
/// or edge data at end of input.
///
/// # Examples
/// ```
/// use tourkit_core::tsplib;
///
/// let text = "\
/// TYPE: TSP
/// DIMENSION: 3
/// EDGE_WEIGHT_TYPE: EXPLICIT
/// EDGE_WEIGHT_FORMAT: UPPER_ROW
/// EDGE_WEIGHT_SECTION
/// 3 4
/// 5
/// EOF
/// ";
/// let instance = tsplib::parse(text)?;
/// assert_eq!(instance.dimension(), 3);
/// assert_eq!(instance.distance(3, 2), 5.0);
/// assert!(instance.coordinates().is_none());
/// # Ok::<(), tsplib::ParseError>(())
/// ```
pub fn parse(text: &str) -> Result<Instance, ParseError> {
    let mut cursor = Cursor::new(text);
    let mut state = ParseState::default();
    while let Some(line) = cursor.next_line() {
        if line.is_empty() {
            continue;
        }
        if state.apply(line, &mut cursor)? == Flow::Stop {
            break;
        }
    }
    state.finish(&cursor)
}

impl std::str::FromStr for Instance {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

#[derive(Debug, Default)]
struct ParseState {
    info: InstanceInfo,
    dimension: Option<usize>,
    matrix: Option<DistanceMatrix>,
    coordinates: Option<Vec<Coord<f64>>>,
}

impl ParseState {
    /// Handle one non-blank line, reading any section body that follows it.
    fn apply(&mut self, line: &str, cursor: &mut Cursor<'_>) -> Result<Flow, ParseError> {
        let (key, value) = split_keyword(line);
        let required = |name: &'static str| {
            value
                .filter(|text| !text.is_empty())
                .ok_or_else(|| cursor.error(ParseErrorKind::MissingValue(name)))
        };
        match key {
            "NAME" => {
                let name = value.unwrap_or_default();
                self.info.name = Some(name.strip_suffix(".tsp").unwrap_or(name).to_owned());
            }
            "TYPE" => {
                let problem_type = required("TYPE")?;
                if !problem_type.starts_with("TSP") {
                    return Err(cursor.error(ParseErrorKind::NotTsp(problem_type.to_owned())));
                }
                self.info.problem_type = Some(problem_type.to_owned());
            }
            "COMMENT" => self.info.comment = value.map(str::to_owned),
            "DIMENSION" => {
                let dimension = parse_dimension(required("DIMENSION")?)
                    .map_err(|kind| cursor.error(kind))?;
                self.info.dimension = dimension;
                self.dimension = Some(dimension);
            }
            "EDGE_WEIGHT_TYPE" => {
                self.info.edge_weight_type = Some(required("EDGE_WEIGHT_TYPE")?.to_owned());
            }
            "EDGE_WEIGHT_FORMAT" => {
                self.info.edge_weight_format = Some(required("EDGE_WEIGHT_FORMAT")?.to_owned());
            }
            "EDGE_DATA_FORMAT" => {
                let format = required("EDGE_DATA_FORMAT")?;
                if format != "EDGE_LIST" {
                    return Err(cursor.error(ParseErrorKind::UnsupportedEdgeDataFormat(
                        format.to_owned(),
                    )));
                }
                self.info.edge_data_format = Some(format.to_owned());
            }
            "NODE_COORD_TYPE" => self.info.node_coord_type = value.map(str::to_owned),
            "DISPLAY_DATA_TYPE" => self.info.display_data_type = value.map(str::to_owned),
            "FIXED_EDGES_SECTION" => {
                self.info.fixed_edges_section = Some(value.unwrap_or_default().to_owned());
                sections::skip_fixed_edges(cursor);
            }
            "EDGE_WEIGHT_SECTION" => {
                let matrix = sections::read_edge_weights(
                    cursor,
                    self.info.edge_weight_format.as_deref(),
                    self.dimension,
                )?;
                self.matrix = Some(matrix);
            }
            "NODE_COORD_SECTION" => {
                let (points, matrix) = sections::read_node_coords(
                    cursor,
                    self.info.edge_weight_type.as_deref(),
                    self.dimension,
                )?;
                self.coordinates = Some(points);
                self.matrix = Some(matrix);
            }
            "DISPLAY_DATA_SECTION" => {
                self.coordinates = Some(sections::read_coordinates(cursor, self.dimension)?);
            }
            "EOF" => return Ok(Flow::Stop),
            _ => {
                return Err(cursor.error(ParseErrorKind::UnexpectedInput(line.to_owned())));
            }
        }
        Ok(Flow::Continue)
    }

    fn finish(self, cursor: &Cursor<'_>) -> Result<Instance, ParseError> {
        if self.info.problem_type.is_none() {
            return Err(cursor.error(ParseErrorKind::MissingType));
        }
        if self.dimension.is_none() {
            return Err(cursor.error(ParseErrorKind::MissingDimension));
        }
        let matrix = self
            .matrix
            .ok_or_else(|| cursor.error(ParseErrorKind::MissingEdgeData))?;
        if self.coordinates.is_none() {
            log::warn!(
                "instance {} has no node coordinates; display output will be empty",
                self.info.name.as_deref().unwrap_or("<unnamed>")
            );
        }
        log::debug!(
            "parsed instance with {} cities in {} lines",
            matrix.dimension(),
            cursor.line()
        );
        Instance::new(self.info, matrix, self.coordinates)
            .map_err(|err| cursor.error(ParseErrorKind::Invalid(err)))
    }
}

/// Split `KEY : value` into its trimmed parts; lines without a colon are
/// bare keywords.
fn split_keyword(line: &str) -> (&str, Option<&str>) {
    line.split_once(':')
        .map_or((line, None), |(key, value)| (key.trim(), Some(value.trim())))
}

fn parse_dimension(text: &str) -> Result<usize, ParseErrorKind> {
    let dimension = text
        .parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| ParseErrorKind::InvalidDimension(text.to_owned()))?;
    if dimension > MAX_DIMENSION {
        return Err(ParseErrorKind::DimensionTooLarge {
            dimension,
            max: MAX_DIMENSION,
        });
    }
    Ok(dimension)
}
