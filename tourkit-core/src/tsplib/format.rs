use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::distance::UnknownKeyword;

/// Layout of the values in an `EDGE_WEIGHT_SECTION`.
///
/// Values are read row by row; [`EdgeWeightFormat::columns`] gives the
/// zero-based columns each row contributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeWeightFormat {
    /// Every row lists all `N` columns.
    FullMatrix,
    /// Row `i` lists columns `i..N`.
    UpperDiagRow,
    /// Row `i` lists columns `0..=i`.
    LowerDiagRow,
    /// Row `i` lists columns `i+1..N`.
    UpperRow,
    /// Row `i` lists columns `0..i`.
    LowerRow,
}

impl EdgeWeightFormat {
    /// TSPLIB keyword for this format.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullMatrix => "FULL_MATRIX",
            Self::UpperDiagRow => "UPPER_DIAG_ROW",
            Self::LowerDiagRow => "LOWER_DIAG_ROW",
            Self::UpperRow => "UPPER_ROW",
            Self::LowerRow => "LOWER_ROW",
        }
    }

    /// Zero-based columns listed for zero-based `row` of an `n`-city matrix.
    ///
    /// # Examples
    /// ```
    /// use tourkit_core::tsplib::EdgeWeightFormat;
    ///
    /// assert_eq!(EdgeWeightFormat::UpperDiagRow.columns(1, 4), 1..4);
    /// assert_eq!(EdgeWeightFormat::LowerRow.columns(0, 4), 0..0);
    /// ```
    #[must_use]
    pub const fn columns(self, row: usize, n: usize) -> Range<usize> {
        match self {
            Self::FullMatrix => 0..n,
            Self::UpperDiagRow => row..n,
            Self::LowerDiagRow => 0..row + 1,
            Self::UpperRow => row + 1..n,
            Self::LowerRow => 0..row,
        }
    }

    /// Total number of values an `n`-city section must contain.
    #[must_use]
    pub fn value_count(self, n: usize) -> usize {
        (0..n).map(|row| self.columns(row, n).len()).sum()
    }
}

impl fmt::Display for EdgeWeightFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeWeightFormat {
    type Err = UnknownKeyword;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "FULL_MATRIX" => Ok(Self::FullMatrix),
            "UPPER_DIAG_ROW" => Ok(Self::UpperDiagRow),
            "LOWER_DIAG_ROW" => Ok(Self::LowerDiagRow),
            "UPPER_ROW" => Ok(Self::UpperRow),
            "LOWER_ROW" => Ok(Self::LowerRow),
            other => Err(UnknownKeyword(other.to_owned())),
        }
    }
}
