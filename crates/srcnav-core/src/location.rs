//! Logical positions inside a displayed file.
//!
//! Lines and columns are 0-based here. Columns count UTF-16 code units, the
//! same unit the symbol index reports, so a surrogate pair spans two columns.
//! Code that talks to the symbol index converts to and from 1-based values at
//! the boundary.

use std::fmt;

use crate::file::SourceFile;

/// A `(line, column)` position, ordered line first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Builds a location from 1-based coordinates, saturating at zero.
    pub fn from_one_based(line: usize, column: usize) -> Self {
        Self::new(line.saturating_sub(1), column.saturating_sub(1))
    }

    /// Returns true if this location names an existing character of `file`
    /// (not past the end of its line, not past the last line).
    pub fn points_at_char(&self, file: &SourceFile) -> bool {
        self.line < file.line_count() && self.column < file.line_length(self.line)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// An end-exclusive span between two locations.
///
/// Ranges produced by the viewer never cross a line boundary. `start == end`
/// is the empty range; every empty range the viewer creates is `default()`,
/// so comparing ranges for equality also compares emptiness.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: Location,
    pub end: Location,
}

impl TextRange {
    pub fn new(start: Location, end: Location) -> Self {
        debug_assert!(start <= end, "range start {start} after end {end}");
        Self { start, end }
    }

    /// A range covering columns `[start, end)` of a single line.
    pub fn on_line(line: usize, start: usize, end: usize) -> Self {
        Self::new(Location::new(line, start), Location::new(line, end))
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `loc` lies in `[start, end)`.
    pub fn contains(&self, loc: Location) -> bool {
        self.start <= loc && loc < self.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
