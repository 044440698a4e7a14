//! Identifier boundaries for click-to-select.

use crate::file::{is_pair_at, SourceFile};
use crate::location::{Location, TextRange};

/// ASCII letters, digits and underscore.
pub fn is_identifier_unit(unit: u16) -> bool {
    u8::try_from(unit).is_ok_and(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// The word containing `loc`.
///
/// On an identifier character this is the maximal run of identifier
/// characters on that line; on any other character it is that single
/// character, which spans both halves of a surrogate pair. Locations that do
/// not name a character give the empty range.
pub fn find_word_at(file: &SourceFile, loc: Location) -> TextRange {
    if !loc.points_at_char(file) {
        return TextRange::default();
    }
    let content = file.line_content(loc.line);
    // A column on a low surrogate belongs to the pair before it.
    let column = if loc.column > 0 && is_pair_at(content, loc.column - 1) {
        loc.column - 1
    } else {
        loc.column
    };
    if !is_identifier_unit(content[column]) {
        let width = if is_pair_at(content, column) { 2 } else { 1 };
        return TextRange::on_line(loc.line, column, column + width);
    }
    let start = content[..column]
        .iter()
        .rposition(|u| !is_identifier_unit(*u))
        .map_or(0, |i| i + 1);
    let end = content[column..]
        .iter()
        .position(|u| !is_identifier_unit(*u))
        .map_or(content.len(), |i| column + i);
    TextRange::on_line(loc.line, start, end)
}
