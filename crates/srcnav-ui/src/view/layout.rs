//! Left-to-right walk over the visual characters of one line.
//!
//! Painting, hit testing and location lookup all drive this same cursor, so
//! pixel geometry and column arithmetic can never disagree.

use srcnav_config::Margins;
use srcnav_core::file::is_pair_at;
use srcnav_core::SourceFile;

use super::metrics::FontMetrics;

const TAB: u16 = b'\t' as u16;

/// Layout cursor for one line. Call [`advance_char`](Self::advance_char)
/// while [`has_more_chars`](Self::has_more_chars) holds; the accessors then
/// describe the character just reached.
pub struct LineLayout<'f> {
    content: &'f [u16],
    line_start: usize,
    left_margin: f32,
    line_top: f32,
    line_height: f32,
    text_inset: f32,
    tab_stop_px: f32,
    next: usize,
    column: usize,
    offset: f32,
    char_width: f32,
    char_text: String,
}

impl<'f> LineLayout<'f> {
    /// Starts a walk over 0-based `line`. Lines past the end are empty.
    pub fn new(
        file: &'f SourceFile,
        line: usize,
        margins: &Margins,
        tab_stop_size: usize,
        metrics: &mut FontMetrics<'_>,
    ) -> Self {
        let line_height = metrics.line_spacing();
        Self {
            content: file.line_content(line),
            line_start: file.line_start(line),
            left_margin: margins.left,
            line_top: margins.top + line as f32 * line_height,
            line_height,
            text_inset: metrics.text_inset(),
            tab_stop_px: metrics.tab_stop_px(tab_stop_size),
            next: 0,
            column: 0,
            offset: 0.0,
            char_width: 0.0,
            char_text: String::new(),
        }
    }

    pub fn has_more_chars(&self) -> bool {
        self.next < self.content.len()
    }

    /// Steps past the current character onto the next one.
    pub fn advance_char(&mut self, metrics: &mut FontMetrics<'_>) {
        self.offset += self.char_width;
        self.column = self.next;
        self.char_text.clear();

        let unit = self.content[self.column];
        if is_pair_at(self.content, self.column) {
            let pair = &self.content[self.column..self.column + 2];
            self.char_text
                .extend(char::decode_utf16(pair.iter().copied()).map(|c| c.unwrap_or('\u{FFFD}')));
            self.next = self.column + 2;
            self.char_width = metrics.width(&self.char_text);
        } else if unit == TAB {
            self.next = self.column + 1;
            self.char_width = self.tab_width();
        } else {
            self.char_text
                .push(char::from_u32(u32::from(unit)).unwrap_or('\u{FFFD}'));
            self.next = self.column + 1;
            self.char_width = metrics.width(&self.char_text);
        }
    }

    /// Distance from the cursor to the next tab stop.
    fn tab_width(&self) -> f32 {
        if self.tab_stop_px <= 0.0 {
            return 0.0;
        }
        ((self.offset + self.tab_stop_px) / self.tab_stop_px).floor() * self.tab_stop_px
            - self.offset
    }

    /// Column of the current character, in code units.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Content offset of the current character.
    pub fn file_offset(&self) -> usize {
        self.line_start + self.column
    }

    pub fn char_left(&self) -> f32 {
        self.left_margin + self.offset
    }

    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    pub fn char_right(&self) -> f32 {
        self.char_left() + self.char_width
    }

    /// Text to draw for the current character; empty for a tab.
    pub fn char_text(&self) -> &str {
        &self.char_text
    }

    pub fn line_top(&self) -> f32 {
        self.line_top
    }

    /// Where glyphs of this line are drawn.
    pub fn text_top(&self) -> f32 {
        self.line_top + self.text_inset
    }

    pub fn line_height(&self) -> f32 {
        self.line_height
    }
}
