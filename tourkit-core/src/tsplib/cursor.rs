use std::str::{Lines, SplitWhitespace};

use super::{ParseError, ParseErrorKind};

/// Line reader that tracks its own position.
///
/// Each parse owns its cursor, so line numbers never leak between calls.
pub(super) struct Cursor<'a> {
    lines: Lines<'a>,
    line: usize,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }

    /// Next line with surrounding whitespace removed.
    pub(super) fn next_line(&mut self) -> Option<&'a str> {
        let line = self.lines.next()?;
        self.line += 1;
        Some(line.trim())
    }

    /// Number of the line most recently returned.
    pub(super) const fn line(&self) -> usize {
        self.line
    }

    pub(super) const fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            line: self.line,
            kind,
        }
    }
}

/// Whitespace-separated numbers streamed across line boundaries.
pub(super) struct Tokens<'c, 'a> {
    cursor: &'c mut Cursor<'a>,
    pending: SplitWhitespace<'a>,
}

impl<'c, 'a> Tokens<'c, 'a> {
    pub(super) fn new(cursor: &'c mut Cursor<'a>) -> Self {
        Self {
            cursor,
            pending: "".split_whitespace(),
        }
    }

    /// The next number, pulling further lines as needed.
    ///
    /// A blank line or the end of input before a value is found means the
    /// section is incomplete.
    pub(super) fn next_number(&mut self) -> Result<f64, ParseError> {
        loop {
            if let Some(token) = self.pending.next() {
                return parse_number(token).map_err(|kind| self.cursor.error(kind));
            }
            let line = self
                .cursor
                .next_line()
                .filter(|line| !line.is_empty())
                .ok_or_else(|| self.cursor.error(ParseErrorKind::IncompleteEdgeWeights))?;
            self.pending = line.split_whitespace();
        }
    }
}

/// Parse a finite floating-point value.
pub(super) fn parse_number(token: &str) -> Result<f64, ParseErrorKind> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| ParseErrorKind::NonNumeric(token.to_owned()))
}
