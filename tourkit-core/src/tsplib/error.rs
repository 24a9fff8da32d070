use thiserror::Error;

use crate::InstanceError;

/// A failure to read instance text, tagged with the 1-based line number at
/// which it was detected.
///
/// # Examples
/// ```
/// use tourkit_core::tsplib::{self, ParseErrorKind};
///
/// let err = tsplib::parse("NAME : x\nTYPE : ATSP\n").unwrap_err();
/// assert_eq!(err.line, 2);
/// assert_eq!(err.kind, ParseErrorKind::NotTsp("ATSP".into()));
/// assert_eq!(err.to_string(), "line 2: problem type `ATSP` is not TSP");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// Line at which parsing stopped.
    pub line: usize,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

/// Reasons instance text is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// `TYPE` does not start with `TSP`.
    #[error("problem type `{0}` is not TSP")]
    NotTsp(String),
    /// A header that needs a value has none.
    #[error("`{0}` requires a value")]
    MissingValue(&'static str),
    /// `DIMENSION` is not a positive integer.
    #[error("dimension `{0}` is not a positive integer")]
    InvalidDimension(String),
    /// `DIMENSION` exceeds [`crate::MAX_DIMENSION`].
    #[error("dimension {dimension} exceeds the maximum of {max}")]
    DimensionTooLarge {
        /// Declared dimension.
        dimension: usize,
        /// Supported maximum.
        max: usize,
    },
    /// `EDGE_DATA_FORMAT` is anything but `EDGE_LIST`.
    #[error("edge data format `{0}` is not supported; only EDGE_LIST is")]
    UnsupportedEdgeDataFormat(String),
    /// Node coordinates were given for an edge-weight type without a
    /// coordinate metric.
    #[error("node coordinates cannot be used with edge weight type {0:?}")]
    UnsupportedEdgeWeightType(Option<String>),
    /// `EDGE_WEIGHT_SECTION` with a missing or unknown format.
    #[error("edge weight format {0:?} is not supported")]
    UnsupportedEdgeWeightFormat(Option<String>),
    /// A data section appeared before `DIMENSION`, or `DIMENSION` was never
    /// declared.
    #[error("DIMENSION must be declared before any data section")]
    MissingDimension,
    /// The edge weight stream ran out before the matrix was filled.
    #[error("edge weight section ended before all values were read")]
    IncompleteEdgeWeights,
    /// A token that should be a finite number is not.
    #[error("`{0}` is not a finite number")]
    NonNumeric(String),
    /// A coordinate line is not `id x y`.
    #[error("coordinate line `{0}` is not of the form `id x y`")]
    MalformedCoordinates(String),
    /// A coordinate line names a city outside `1..=N`.
    #[error("city {city} is outside 1..={dimension}")]
    CityOutOfRange {
        /// Id as written.
        city: i64,
        /// Declared dimension.
        dimension: usize,
    },
    /// A coordinate section lists the same city twice.
    #[error("city {0} appears more than once")]
    DuplicateCity(usize),
    /// A line that is neither a known header nor a section marker.
    #[error("unexpected input `{0}`")]
    UnexpectedInput(String),
    /// The text never declared `TYPE`.
    #[error("TYPE was never declared")]
    MissingType,
    /// Neither `NODE_COORD_SECTION` nor `EDGE_WEIGHT_SECTION` was present.
    #[error("no NODE_COORD_SECTION or EDGE_WEIGHT_SECTION was found")]
    MissingEdgeData,
    /// The assembled instance failed validation.
    #[error(transparent)]
    Invalid(#[from] InstanceError),
}
