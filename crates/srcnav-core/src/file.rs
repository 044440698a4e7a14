//! Immutable source file with a UTF-16 line index.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ropey::{Rope, RopeSlice};

use crate::encoding::{decode_bytes, detect_encoding, TextEncoding};

/// Start offset and length of one line, in UTF-16 code units.
/// The length excludes the line terminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub len: usize,
}

/// A file's text plus its derived line index.
///
/// Content offsets and columns are UTF-16 code units. A trailing line
/// terminator does not start an extra line, and empty content has no lines.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: Option<PathBuf>,
    text: String,
    units: Vec<u16>,
    lines: Vec<LineSpan>,
    encoding: TextEncoding,
}

impl SourceFile {
    /// Builds a file from in-memory text.
    pub fn from_text(path: Option<PathBuf>, text: impl Into<String>) -> Self {
        let text = text.into();
        let units: Vec<u16> = text.encode_utf16().collect();
        let lines = index_lines(&Rope::from_str(&text));
        Self {
            path,
            text,
            units,
            lines,
            encoding: TextEncoding::default(),
        }
    }

    /// Reads and decodes a file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read file: {}", path.display()))?;
        let encoding = detect_encoding(&bytes);
        let text = decode_bytes(&bytes, encoding)
            .with_context(|| format!("failed to decode file: {}", path.display()))?;

        let mut file = Self::from_text(Some(path.to_path_buf()), text);
        file.encoding = encoding;
        tracing::debug!(
            "opened {} ({encoding}, {} lines)",
            path.display(),
            file.line_count()
        );
        Ok(file)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// File name for titles; "Untitled" when there is no path.
    pub fn display_name(&self) -> String {
        self.path
            .as_deref()
            .and_then(Path::file_name)
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// The full text.
    pub fn content(&self) -> &str {
        &self.text
    }

    /// The full text as UTF-16 code units.
    pub fn units(&self) -> &[u16] {
        &self.units
    }

    pub fn len_units(&self) -> usize {
        self.units.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Content offset of the first unit of `line`; the content length past
    /// the last line.
    pub fn line_start(&self, line: usize) -> usize {
        self.lines.get(line).map_or(self.units.len(), |l| l.start)
    }

    /// Length of `line` without its terminator; 0 past the last line.
    pub fn line_length(&self, line: usize) -> usize {
        self.lines.get(line).map_or(0, |l| l.len)
    }

    /// The code units of `line` without its terminator.
    pub fn line_content(&self, line: usize) -> &[u16] {
        match self.lines.get(line) {
            Some(span) => &self.units[span.start..span.start + span.len],
            None => &[],
        }
    }

    /// The text of `line`, decoded for display.
    pub fn line_text(&self, line: usize) -> String {
        String::from_utf16_lossy(self.line_content(line))
    }

    /// Width of `line` in columns after expanding tabs to multiples of
    /// `tab_stop`. A surrogate pair counts as one column.
    pub fn expanded_columns(&self, line: usize, tab_stop: usize) -> usize {
        let tab_stop = tab_stop.max(1);
        let content = self.line_content(line);
        let mut pos = 0;
        let mut i = 0;
        while i < content.len() {
            let unit = content[i];
            if unit == u16::from(b'\t') {
                pos = (pos + tab_stop) / tab_stop * tab_stop;
            } else {
                pos += 1;
            }
            i += if is_pair_at(content, i) { 2 } else { 1 };
        }
        pos
    }

    /// The widest line in tab-expanded columns.
    pub fn max_expanded_columns(&self, tab_stop: usize) -> usize {
        (0..self.line_count())
            .map(|line| self.expanded_columns(line, tab_stop))
            .max()
            .unwrap_or(0)
    }
}

/// Returns true if `units[i]` starts a complete surrogate pair.
pub fn is_pair_at(units: &[u16], i: usize) -> bool {
    matches!(units.get(i), Some(0xD800..=0xDBFF))
        && matches!(units.get(i + 1), Some(0xDC00..=0xDFFF))
}

fn index_lines(rope: &Rope) -> Vec<LineSpan> {
    let mut lines = Vec::with_capacity(rope.len_lines());
    for (idx, line) in rope.lines().enumerate() {
        let start = rope.char_to_utf16_cu(rope.line_to_char(idx));
        let len = line.len_utf16_cu() - terminator_len(line);
        lines.push(LineSpan { start, len });
    }
    // The rope's last line never has a terminator; it is empty exactly when
    // the text is empty or ends with one.
    if lines.last().is_some_and(|last| last.len == 0) {
        lines.pop();
    }
    lines
}

/// UTF-16 length of the terminator at the end of `line`.
fn terminator_len(line: RopeSlice<'_>) -> usize {
    let n = line.len_chars();
    if n == 0 {
        return 0;
    }
    match line.char(n - 1) {
        '\n' if n >= 2 && line.char(n - 2) == '\r' => 2,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}' => 1,
        _ => 0,
    }
}
