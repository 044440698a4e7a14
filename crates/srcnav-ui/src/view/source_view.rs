//! The read-only source view: owns the displayed file, its color buffer and
//! the word selection, and answers painting, hit testing and pointer input.
//!
//! Everything here is in content coordinates (origin at the top-left of the
//! first line's margin box). The hosting widget translates screen positions
//! and clip rectangles by its scroll offset before calling in.

use std::ops::RangeInclusive;
use std::sync::Arc;

use egui::{pos2, vec2, Color32, Pos2, Rect, Vec2};
use srcnav_config::Margins;
use srcnav_core::{word, Lexer, Location, SourceFile, SymbolLocation, SymbolSource, TextRange};

use super::canvas::Canvas;
use super::coloring::ColorBuffer;
use super::layout::LineLayout;
use super::metrics::FontMetrics;
use super::theme::ViewTheme;

/// Lines painted above and below the clip rectangle to absorb partial-pixel
/// clipping.
const OVERSCAN_LINES: isize = 2;

pub const DEFAULT_TAB_STOP_SIZE: usize = 8;

/// Requests the view cannot satisfy itself. The host drains them with
/// [`SourceView::take_events`] after forwarding input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    GoBack,
    GoForward,
    CopyFilePath,
    RevealInSidebar,
    CrossReferences(String),
    /// A word was clicked without the pointer leaving it.
    WordActivated(TextRange),
    /// The clicked word resolved to exactly one definition.
    Navigate(SymbolLocation),
}

/// Whether the host's navigation history can move in each direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryAvailability {
    pub back: bool,
    pub forward: bool,
}

/// The menu to show for a context-menu trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextMenu {
    /// Nothing selected: history and file actions.
    General {
        back_enabled: bool,
        forward_enabled: bool,
    },
    /// A word is selected: the symbols referenced there. An empty list is
    /// shown as a disabled "No symbols found" entry.
    Symbols { symbols: Vec<String> },
}

/// An entry picked from a [`ContextMenu`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    Back,
    Forward,
    CopyFilePath,
    RevealInSidebar,
    CrossReferences(String),
}

pub struct SourceView {
    symbols: Arc<dyn SymbolSource>,
    lexer: Box<dyn Lexer>,
    theme: ViewTheme,
    margins: Margins,
    tab_stop_size: usize,
    file: Option<Arc<SourceFile>>,
    colors: ColorBuffer,
    max_line_columns: usize,
    selection: TextRange,
    events: Vec<ViewEvent>,
    scroll_request: Option<Rect>,
}

impl SourceView {
    pub fn new(symbols: Arc<dyn SymbolSource>, lexer: Box<dyn Lexer>) -> Self {
        Self {
            symbols,
            lexer,
            theme: ViewTheme::default(),
            margins: Margins::default(),
            tab_stop_size: DEFAULT_TAB_STOP_SIZE,
            file: None,
            colors: ColorBuffer::default(),
            max_line_columns: 0,
            selection: TextRange::default(),
            events: Vec::new(),
            scroll_request: None,
        }
    }

    // ── Configuration ───────────────────────────────────────────────

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    pub fn tab_stop_size(&self) -> usize {
        self.tab_stop_size
    }

    pub fn set_tab_stop_size(&mut self, size: usize) {
        let size = size.max(1);
        if size != self.tab_stop_size {
            self.tab_stop_size = size;
            self.max_line_columns = self
                .file
                .as_ref()
                .map_or(0, |f| f.max_expanded_columns(size));
        }
    }

    pub fn theme(&self) -> &ViewTheme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: ViewTheme) {
        if theme != self.theme {
            self.theme = theme;
            self.recolor();
        }
    }

    pub fn set_symbol_source(&mut self, symbols: Arc<dyn SymbolSource>) {
        self.symbols = symbols;
        self.recolor();
    }

    pub fn symbol_source(&self) -> &Arc<dyn SymbolSource> {
        &self.symbols
    }

    // ── Displayed file ──────────────────────────────────────────────

    pub fn displayed_file(&self) -> Option<&Arc<SourceFile>> {
        self.file.as_ref()
    }

    /// Replaces the displayed file. Selection is reset and the color buffer
    /// and longest-line width are recomputed. Setting the same file again is
    /// a no-op.
    pub fn set_displayed_file(&mut self, file: Option<Arc<SourceFile>>) {
        let same = match (&self.file, &file) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if same {
            return;
        }
        self.file = file;
        self.selection = TextRange::default();
        self.scroll_request = None;
        self.max_line_columns = self
            .file
            .as_ref()
            .map_or(0, |f| f.max_expanded_columns(self.tab_stop_size));
        self.recolor();
        if let Some(file) = &self.file {
            tracing::debug!(
                "displaying {} ({} lines, longest {} columns)",
                file.display_name(),
                file.line_count(),
                self.max_line_columns
            );
        }
    }

    fn recolor(&mut self) {
        self.colors = match &self.file {
            Some(file) => ColorBuffer::build(file, &*self.lexer, &*self.symbols, &self.theme),
            None => ColorBuffer::default(),
        };
    }

    pub fn colors(&self) -> &ColorBuffer {
        &self.colors
    }

    // ── Selection ───────────────────────────────────────────────────

    pub fn selection(&self) -> TextRange {
        self.selection
    }

    pub fn set_selection(&mut self, selection: TextRange) {
        self.selection = selection;
    }

    pub fn clear_selection(&mut self) {
        self.selection = TextRange::default();
    }

    // ── Geometry ────────────────────────────────────────────────────

    /// Preferred size: longest line by line count, plus margins.
    pub fn size_hint(&self, metrics: &mut FontMetrics<'_>) -> Vec2 {
        let margins = vec2(self.margins.horizontal(), self.margins.vertical());
        let Some(file) = &self.file else {
            return margins;
        };
        let width = self.max_line_columns as f32 * metrics.width(" ");
        let height = file.line_count() as f32 * metrics.line_spacing();
        vec2(width, height) + margins
    }

    /// Top-left of the line box at `loc`, clamped to existing text.
    pub fn location_to_point(&self, loc: Option<Location>, metrics: &mut FontMetrics<'_>) -> Pos2 {
        let origin = pos2(self.margins.left, self.margins.top);
        let (Some(loc), Some(file)) = (loc, &self.file) else {
            return origin;
        };
        if loc.line >= file.line_count() {
            let top = self.margins.top + file.line_count() as f32 * metrics.line_spacing();
            return pos2(self.margins.left, top);
        }

        let mut lay = LineLayout::new(file, loc.line, &self.margins, self.tab_stop_size, metrics);
        let mut right = self.margins.left;
        while lay.has_more_chars() {
            lay.advance_char(metrics);
            if lay.column() >= loc.column {
                return pos2(lay.char_left(), lay.line_top());
            }
            right = lay.char_right();
        }
        pos2(right, lay.line_top())
    }

    /// The location under `pos`. Above the text resolves to `(0, 0)`, below
    /// it to `(line_count, 0)`, and past a line's end to its length.
    pub fn hit_test(&self, pos: Pos2, metrics: &mut FontMetrics<'_>) -> Option<Location> {
        let file = self.file.as_ref()?;
        let spacing = metrics.line_spacing();
        if spacing <= 0.0 {
            return Some(Location::default());
        }
        let line = ((pos.y - self.margins.top) / spacing).floor();
        if line < 0.0 {
            return Some(Location::new(0, 0));
        }
        let line = line as usize;
        if line >= file.line_count() {
            return Some(Location::new(file.line_count(), 0));
        }

        let mut lay = LineLayout::new(file, line, &self.margins, self.tab_stop_size, metrics);
        while lay.has_more_chars() {
            lay.advance_char(metrics);
            if pos.x < lay.char_right() {
                return Some(Location::new(line, lay.column()));
            }
        }
        Some(Location::new(line, file.line_length(line)))
    }

    pub fn find_word_at_location(&self, loc: Location) -> TextRange {
        match &self.file {
            Some(file) => word::find_word_at(file, loc),
            None => TextRange::default(),
        }
    }

    pub fn find_word_at_point(&self, pos: Pos2, metrics: &mut FontMetrics<'_>) -> TextRange {
        self.hit_test(pos, metrics)
            .map(|loc| self.find_word_at_location(loc))
            .unwrap_or_default()
    }

    // ── Painting ────────────────────────────────────────────────────

    /// Paints the selection and the text intersecting `clip`.
    pub fn paint(&self, canvas: &mut dyn Canvas, clip: Rect, metrics: &mut FontMetrics<'_>) {
        let Some(file) = &self.file else {
            return;
        };
        let spacing = metrics.line_spacing();
        let Some(lines) = visible_line_range(clip, spacing, file.line_count()) else {
            return;
        };

        if !self.selection.is_empty() {
            let p1 = self.location_to_point(Some(self.selection.start), metrics);
            let p2 = self.location_to_point(Some(self.selection.end), metrics);
            let rect = Rect::from_min_max(p1, pos2(p2.x, p1.y + spacing));
            canvas.fill_rect(rect, self.theme.selection_background);
        }

        let mut pen: Option<Color32> = None;
        for line in lines {
            let mut lay = LineLayout::new(file, line, &self.margins, self.tab_stop_size, metrics);
            while lay.has_more_chars() {
                lay.advance_char(metrics);
                if lay.char_left() > clip.max.x {
                    break;
                }
                if lay.char_right() <= clip.min.x || lay.char_text().is_empty() {
                    continue;
                }
                let color = if self.selection.contains(Location::new(line, lay.column())) {
                    self.theme.selection_text
                } else {
                    self.colors
                        .color_at(lay.file_offset())
                        .unwrap_or(self.theme.text)
                };
                if pen != Some(color) {
                    canvas.set_pen(color);
                    pen = Some(color);
                }
                canvas.draw_text(pos2(lay.char_left(), lay.text_top()), lay.char_text());
            }
        }
    }

    // ── Pointer interaction ─────────────────────────────────────────

    pub fn pointer_pressed(&mut self, pos: Pos2, metrics: &mut FontMetrics<'_>) {
        self.selection = self.find_word_at_point(pos, metrics);
    }

    /// Dragging off the pressed word cancels it.
    pub fn pointer_moved(&mut self, pos: Pos2, metrics: &mut FontMetrics<'_>) {
        if self.selection.is_empty() {
            return;
        }
        if self.find_word_at_point(pos, metrics) != self.selection {
            self.clear_selection();
        }
    }

    /// Releasing on the pressed word activates it.
    pub fn pointer_released(&mut self, pos: Pos2, metrics: &mut FontMetrics<'_>) {
        if self.selection.is_empty() {
            return;
        }
        let pressed = self.selection;
        self.clear_selection();
        if self.find_word_at_point(pos, metrics) == pressed {
            self.activate_word(pressed);
        }
    }

    fn activate_word(&mut self, range: TextRange) {
        self.events.push(ViewEvent::WordActivated(range));
        let Some(file) = &self.file else {
            return;
        };
        let symbols = self.symbols.symbols_at_location(
            file,
            range.start.line + 1,
            range.start.column + 1,
        );
        match symbols.as_slice() {
            [] => tracing::debug!("no symbols at {}", range.start),
            [symbol] => match self.symbols.find_single_definition(symbol) {
                Some(definition) => {
                    tracing::debug!("{symbol} at {} defined at {definition}", range.start);
                    self.events.push(ViewEvent::Navigate(definition));
                }
                None => tracing::debug!("no single definition of {symbol}"),
            },
            many => tracing::debug!(
                "{} symbols at {}, not navigating: {}",
                many.len(),
                range.start,
                many.join(", ")
            ),
        }
    }

    // ── Context menu ────────────────────────────────────────────────

    /// Builds the menu for a trigger at `pos`, dropping a selection the
    /// pointer is no longer on.
    pub fn context_menu(
        &mut self,
        pos: Pos2,
        metrics: &mut FontMetrics<'_>,
        history: HistoryAvailability,
    ) -> ContextMenu {
        if !self.selection.is_empty() && self.find_word_at_point(pos, metrics) != self.selection {
            self.clear_selection();
        }
        match (&self.file, self.selection.is_empty()) {
            (Some(file), false) => ContextMenu::Symbols {
                symbols: self.symbols.symbols_at_location(
                    file,
                    self.selection.start.line + 1,
                    self.selection.start.column + 1,
                ),
            },
            _ => ContextMenu::General {
                back_enabled: history.back,
                forward_enabled: history.forward,
            },
        }
    }

    pub fn menu_action(&mut self, action: MenuAction) {
        let event = match action {
            MenuAction::Back => ViewEvent::GoBack,
            MenuAction::Forward => ViewEvent::GoForward,
            MenuAction::CopyFilePath => ViewEvent::CopyFilePath,
            MenuAction::RevealInSidebar => ViewEvent::RevealInSidebar,
            MenuAction::CrossReferences(symbol) => ViewEvent::CrossReferences(symbol),
        };
        self.events.push(event);
    }

    pub fn context_menu_closed(&mut self) {
        self.clear_selection();
    }

    // ── Host requests ───────────────────────────────────────────────

    /// Selects the word at a 1-based position and asks the host to scroll
    /// it into view.
    pub fn select_identifier(&mut self, line: usize, column: usize, metrics: &mut FontMetrics<'_>) {
        let range = self.find_word_at_location(Location::from_one_based(line, column));
        self.selection = range;
        let start = self.location_to_point(Some(range.start), metrics);
        let end = self.location_to_point(Some(range.end), metrics);
        let bottom = start.y + metrics.line_spacing();
        self.scroll_request = Some(Rect::from_min_max(start, pos2(end.x.max(start.x), bottom)));
    }

    /// The content rectangle the host should scroll into view, if any.
    pub fn take_scroll_request(&mut self) -> Option<Rect> {
        self.scroll_request.take()
    }

    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Lines `[clip.top / h - 2, clip.bottom / h + 2]`, clamped to the file.
pub fn visible_line_range(
    clip: Rect,
    line_spacing: f32,
    line_count: usize,
) -> Option<RangeInclusive<usize>> {
    if line_count == 0 || line_spacing <= 0.0 {
        return None;
    }
    let first = ((clip.min.y / line_spacing).floor() as isize - OVERSCAN_LINES).max(0);
    let last = ((clip.max.y / line_spacing).floor() as isize + OVERSCAN_LINES)
        .min(line_count as isize - 1);
    if first > last {
        return None;
    }
    Some(first as usize..=last as usize)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use egui::FontId;
    use srcnav_core::{MemoryIndex, NullSymbolSource, PlainLexer, SyntaxKind};

    use super::*;
    use crate::view::canvas::recording::RecordingCanvas;
    use crate::view::metrics::{FixedMeasurer, WidthCache};

    const TEXT: &str = "int  x;\n\treturn x;\n";

    const INDEX: &str = r#"{
        "symbols": [ { "name": "x", "category": "GlobalVariable",
                       "definition": { "path": "a.c", "line": 1, "column": 6 } } ],
        "refs": [ { "path": "a.c", "line": 1, "column": 6, "end_column": 7, "symbol": "x" },
                  { "path": "a.c", "line": 2, "column": 9, "end_column": 10, "symbol": "x" } ]
    }"#;

    struct Fixture {
        view: SourceView,
        cache: WidthCache,
        font: FontId,
        measurer: FixedMeasurer,
    }

    impl Fixture {
        fn new(text: &str, symbols: Arc<dyn SymbolSource>) -> Self {
            let mut view = SourceView::new(symbols, Box::new(PlainLexer));
            view.set_margins(Margins::new(4.0, 2.0, 4.0, 4.0));
            view.set_displayed_file(Some(Arc::new(SourceFile::from_text(
                Some(PathBuf::from("a.c")),
                text,
            ))));
            Self {
                view,
                cache: WidthCache::new(),
                font: FontId::monospace(12.0),
                measurer: FixedMeasurer::new(10.0, 20.0),
            }
        }

        fn indexed() -> Self {
            Self::new(TEXT, Arc::new(MemoryIndex::from_json(INDEX).unwrap()))
        }

        fn plain(text: &str) -> Self {
            Self::new(text, Arc::new(NullSymbolSource))
        }

        fn with<R>(&mut self, f: impl FnOnce(&mut SourceView, &mut FontMetrics<'_>) -> R) -> R {
            let mut metrics = self.cache.metrics(&self.font, &self.measurer);
            f(&mut self.view, &mut metrics)
        }

        fn hit(&mut self, x: f32, y: f32) -> Option<Location> {
            self.with(|v, m| v.hit_test(pos2(x, y), m))
        }

        fn point(&mut self, loc: Location) -> Pos2 {
            self.with(|v, m| v.location_to_point(Some(loc), m))
        }

        fn click(&mut self, x: f32, y: f32) -> Vec<ViewEvent> {
            self.with(|v, m| {
                v.pointer_pressed(pos2(x, y), m);
                v.pointer_released(pos2(x, y), m);
            });
            self.view.take_events()
        }

        fn paint(&mut self, clip: Rect) -> RecordingCanvas {
            let mut canvas = RecordingCanvas::default();
            self.with(|v, m| v.paint(&mut canvas, clip, m));
            canvas
        }
    }

    fn navigations(events: &[ViewEvent]) -> Vec<&SymbolLocation> {
        events
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Navigate(loc) => Some(loc),
                _ => None,
            })
            .collect()
    }

    // ── Hit testing and location lookup ──

    #[test]
    fn hit_test_resolves_characters_after_tabs() {
        let mut fx = Fixture::plain(TEXT);
        // Line 0: 'x' at column 5 spans [54, 64).
        assert_eq!(fx.hit(58.0, 12.0), Some(Location::new(0, 5)));
        assert_eq!(fx.hit(54.0, 12.0), Some(Location::new(0, 5)));
        assert_eq!(fx.hit(63.9, 12.0), Some(Location::new(0, 5)));
        // Line 1: tab [4, 84), "return " [84, 154), 'x' [154, 164).
        assert_eq!(fx.hit(10.0, 30.0), Some(Location::new(1, 0)));
        assert_eq!(fx.hit(83.0, 30.0), Some(Location::new(1, 0)));
        assert_eq!(fx.hit(158.0, 30.0), Some(Location::new(1, 8)));
    }

    #[test]
    fn hit_test_clamps_outside_the_text() {
        let mut fx = Fixture::plain(TEXT);
        assert_eq!(fx.hit(50.0, 0.0), Some(Location::new(0, 0)));
        assert_eq!(fx.hit(50.0, -40.0), Some(Location::new(0, 0)));
        assert_eq!(fx.hit(500.0, 12.0), Some(Location::new(0, 7)));
        assert_eq!(fx.hit(0.0, 12.0), Some(Location::new(0, 0)));
        assert_eq!(fx.hit(50.0, 500.0), Some(Location::new(2, 0)));
    }

    #[test]
    fn hit_test_without_file_is_none() {
        let mut fx = Fixture::plain(TEXT);
        fx.view.set_displayed_file(None);
        assert_eq!(fx.hit(10.0, 10.0), None);
        assert!(fx
            .with(|v, m| v.find_word_at_point(pos2(10.0, 10.0), m))
            .is_empty());
    }

    #[test]
    fn location_to_point_returns_char_left_and_line_top() {
        let mut fx = Fixture::plain(TEXT);
        assert_eq!(fx.point(Location::new(0, 5)), pos2(54.0, 2.0));
        assert_eq!(fx.point(Location::new(1, 8)), pos2(154.0, 22.0));
        assert_eq!(fx.point(Location::new(1, 0)), pos2(4.0, 22.0));
    }

    #[test]
    fn location_to_point_clamps() {
        let mut fx = Fixture::plain("ab\n\ncd");
        // Past the end of a line: just after its last character.
        assert_eq!(fx.point(Location::new(0, 9)), pos2(24.0, 2.0));
        // Empty line: its left margin.
        assert_eq!(fx.point(Location::new(1, 0)), pos2(4.0, 22.0));
        // Past the last line: top of line `line_count`.
        assert_eq!(fx.point(Location::new(7, 3)), pos2(4.0, 62.0));
        let origin = fx.with(|v, m| v.location_to_point(None, m));
        assert_eq!(origin, pos2(4.0, 2.0));
    }

    #[test]
    fn click_anywhere_in_a_char_maps_back_to_its_left_edge() {
        let mut fx = Fixture::plain("a\tb😀c\n");
        for x in [4.0, 9.0, 13.9, 14.0, 50.0, 84.0, 95.0, 100.0, 104.0, 109.0] {
            let loc = fx.hit(x, 5.0).unwrap();
            let left = fx.point(loc).x;
            let next = fx.point(Location::new(0, loc.column + 1)).x;
            assert!(left <= x && x < next.max(left + 10.0), "x={x} loc={loc}");
        }
    }

    #[test]
    fn surrogate_pair_columns() {
        let mut fx = Fixture::plain("a😀b");
        assert_eq!(fx.hit(18.0, 5.0), Some(Location::new(0, 1)));
        assert_eq!(fx.hit(28.0, 5.0), Some(Location::new(0, 3)));
        assert_eq!(fx.point(Location::new(0, 3)), pos2(24.0, 2.0));
        assert_eq!(fx.hit(99.0, 5.0), Some(Location::new(0, 4)));
    }

    // ── Sizing ──

    #[test]
    fn size_hint_uses_longest_expanded_line() {
        let mut fx = Fixture::plain(TEXT);
        // "\treturn x;" expands to 8 + 9 = 17 columns.
        let size = fx.with(|v, m| v.size_hint(m));
        assert_eq!(size, vec2(170.0 + 8.0, 40.0 + 6.0));
    }

    #[test]
    fn size_hint_without_file_is_margins() {
        let mut fx = Fixture::plain(TEXT);
        fx.view.set_displayed_file(None);
        assert_eq!(fx.with(|v, m| v.size_hint(m)), vec2(8.0, 6.0));
    }

    #[test]
    fn tab_stop_size_changes_size_hint() {
        let mut fx = Fixture::plain(TEXT);
        fx.view.set_tab_stop_size(4);
        assert_eq!(fx.with(|v, m| v.size_hint(m)).x, 130.0 + 8.0);
        assert_eq!(fx.point(Location::new(1, 1)), pos2(44.0, 22.0));
    }

    // ── Word selection and activation ──

    #[test]
    fn clicks_select_the_identifier_under_the_pointer() {
        let mut fx = Fixture::plain(TEXT);
        let word = fx.with(|v, m| v.find_word_at_point(pos2(58.0, 12.0), m));
        assert_eq!(word, TextRange::on_line(0, 5, 6));
        let word = fx.with(|v, m| v.find_word_at_point(pos2(158.0, 30.0), m));
        assert_eq!(word, TextRange::on_line(1, 8, 9));
        let word = fx.with(|v, m| v.find_word_at_point(pos2(100.0, 30.0), m));
        assert_eq!(word, TextRange::on_line(1, 1, 7));
    }

    #[test]
    fn clicking_either_reference_navigates_to_the_definition() {
        let mut fx = Fixture::indexed();
        let first = fx.click(58.0, 12.0);
        let second = fx.click(158.0, 30.0);

        assert_eq!(first[0], ViewEvent::WordActivated(TextRange::on_line(0, 5, 6)));
        assert_eq!(second[0], ViewEvent::WordActivated(TextRange::on_line(1, 8, 9)));
        let expected = SymbolLocation {
            path: PathBuf::from("a.c"),
            line: 1,
            column: 6,
        };
        assert_eq!(navigations(&first), vec![&expected]);
        assert_eq!(navigations(&second), vec![&expected]);
        assert!(fx.view.selection().is_empty());
    }

    #[test]
    fn click_on_whitespace_does_not_navigate() {
        let mut fx = Fixture::indexed();
        let events = fx.click(44.0, 12.0);
        assert!(navigations(&events).is_empty());
        assert_eq!(events, vec![ViewEvent::WordActivated(TextRange::on_line(0, 4, 5))]);
    }

    #[test]
    fn click_below_last_line_selects_nothing() {
        let mut fx = Fixture::indexed();
        assert_eq!(fx.hit(20.0, 300.0), Some(Location::new(2, 0)));
        let events = fx.click(20.0, 300.0);
        assert!(events.is_empty());
        assert!(fx.view.selection().is_empty());
    }

    #[test]
    fn press_selects_word_until_release() {
        let mut fx = Fixture::indexed();
        fx.with(|v, m| v.pointer_pressed(pos2(158.0, 30.0), m));
        assert_eq!(fx.view.selection(), TextRange::on_line(1, 8, 9));
        fx.with(|v, m| v.pointer_moved(pos2(160.0, 35.0), m));
        assert_eq!(fx.view.selection(), TextRange::on_line(1, 8, 9));
    }

    #[test]
    fn dragging_off_the_word_cancels_activation() {
        let mut fx = Fixture::indexed();
        fx.with(|v, m| {
            v.pointer_pressed(pos2(158.0, 30.0), m);
            v.pointer_moved(pos2(100.0, 30.0), m);
        });
        assert!(fx.view.selection().is_empty());
        fx.with(|v, m| v.pointer_released(pos2(158.0, 30.0), m));
        assert!(fx.view.take_events().is_empty());
    }

    #[test]
    fn releasing_elsewhere_only_clears() {
        let mut fx = Fixture::indexed();
        fx.with(|v, m| {
            v.pointer_pressed(pos2(158.0, 30.0), m);
            v.pointer_released(pos2(58.0, 12.0), m);
        });
        assert!(fx.view.selection().is_empty());
        assert!(fx.view.take_events().is_empty());
    }

    #[test]
    fn ambiguous_symbols_do_not_navigate() {
        let index = MemoryIndex::from_json(
            r#"{ "symbols": [ { "name": "a", "definition": { "path": "a.c", "line": 1, "column": 1 } },
                              { "name": "b", "definition": { "path": "a.c", "line": 1, "column": 1 } } ],
                 "refs": [ { "path": "a.c", "line": 1, "column": 1, "end_column": 4, "symbol": "a" },
                           { "path": "a.c", "line": 1, "column": 1, "end_column": 4, "symbol": "b" } ] }"#,
        )
        .unwrap();
        let mut fx = Fixture::new(TEXT, Arc::new(index));
        let events = fx.click(8.0, 12.0);
        assert_eq!(events, vec![ViewEvent::WordActivated(TextRange::on_line(0, 0, 3))]);
    }

    #[test]
    fn new_file_resets_selection() {
        let mut fx = Fixture::plain(TEXT);
        fx.view.set_selection(TextRange::on_line(0, 0, 3));
        fx.view
            .set_displayed_file(Some(Arc::new(SourceFile::from_text(None, "abc"))));
        assert!(fx.view.selection().is_empty());
    }

    #[test]
    fn same_file_keeps_selection() {
        let mut fx = Fixture::plain(TEXT);
        let file = fx.view.displayed_file().cloned();
        fx.view.set_selection(TextRange::on_line(0, 0, 3));
        fx.view.set_displayed_file(file);
        assert_eq!(fx.view.selection(), TextRange::on_line(0, 0, 3));
    }

    #[test]
    fn select_identifier_selects_and_requests_scroll() {
        let mut fx = Fixture::plain(TEXT);
        fx.with(|v, m| v.select_identifier(2, 9, m));
        assert_eq!(fx.view.selection(), TextRange::on_line(1, 8, 9));
        let rect = fx.view.take_scroll_request().unwrap();
        assert_eq!(rect, Rect::from_min_max(pos2(154.0, 22.0), pos2(164.0, 42.0)));
        assert!(fx.view.take_scroll_request().is_none());
    }

    #[test]
    fn select_identifier_past_end_selects_nothing() {
        let mut fx = Fixture::plain(TEXT);
        fx.with(|v, m| v.select_identifier(40, 1, m));
        assert!(fx.view.selection().is_empty());
    }

    // ── Context menu ──

    #[test]
    fn context_menu_without_selection_offers_history() {
        let mut fx = Fixture::indexed();
        let history = HistoryAvailability {
            back: true,
            forward: false,
        };
        let menu = fx.with(|v, m| v.context_menu(pos2(500.0, 12.0), m, history));
        assert_eq!(
            menu,
            ContextMenu::General {
                back_enabled: true,
                forward_enabled: false
            }
        );
    }

    #[test]
    fn context_menu_on_selected_word_lists_symbols() {
        let mut fx = Fixture::indexed();
        let menu = fx.with(|v, m| {
            v.pointer_pressed(pos2(58.0, 12.0), m);
            v.context_menu(pos2(58.0, 12.0), m, HistoryAvailability::default())
        });
        assert_eq!(
            menu,
            ContextMenu::Symbols {
                symbols: vec!["x".to_string()]
            }
        );
        fx.view.context_menu_closed();
        assert!(fx.view.selection().is_empty());
    }

    #[test]
    fn context_menu_off_the_selection_drops_it() {
        let mut fx = Fixture::indexed();
        fx.view.set_selection(TextRange::on_line(0, 5, 6));
        let menu = fx.with(|v, m| v.context_menu(pos2(158.0, 30.0), m, HistoryAvailability::default()));
        assert!(matches!(menu, ContextMenu::General { .. }));
        assert!(fx.view.selection().is_empty());
    }

    #[test]
    fn context_menu_on_unindexed_word_is_empty_list() {
        let mut fx = Fixture::indexed();
        let menu = fx.with(|v, m| {
            v.pointer_pressed(pos2(8.0, 12.0), m);
            v.context_menu(pos2(8.0, 12.0), m, HistoryAvailability::default())
        });
        assert_eq!(menu, ContextMenu::Symbols { symbols: vec![] });
    }

    #[test]
    fn menu_actions_become_events() {
        let mut fx = Fixture::plain(TEXT);
        fx.view.menu_action(MenuAction::Back);
        fx.view.menu_action(MenuAction::Forward);
        fx.view.menu_action(MenuAction::CopyFilePath);
        fx.view.menu_action(MenuAction::RevealInSidebar);
        fx.view.menu_action(MenuAction::CrossReferences("x".into()));
        assert_eq!(
            fx.view.take_events(),
            vec![
                ViewEvent::GoBack,
                ViewEvent::GoForward,
                ViewEvent::CopyFilePath,
                ViewEvent::RevealInSidebar,
                ViewEvent::CrossReferences("x".into()),
            ]
        );
        assert!(fx.view.take_events().is_empty());
    }

    // ── Painting ──

    #[test]
    fn visible_range_has_two_lines_of_overscan() {
        let clip = |top: f32, bottom: f32| Rect::from_min_max(pos2(0.0, top), pos2(100.0, bottom));
        assert_eq!(visible_line_range(clip(0.0, 40.0), 20.0, 100), Some(0..=4));
        assert_eq!(visible_line_range(clip(200.0, 260.0), 20.0, 100), Some(8..=15));
        assert_eq!(visible_line_range(clip(1900.0, 2100.0), 20.0, 100), Some(93..=99));
        assert_eq!(visible_line_range(clip(5000.0, 6000.0), 20.0, 100), None);
        assert_eq!(visible_line_range(clip(0.0, 40.0), 20.0, 0), None);
    }

    #[test]
    fn paint_draws_every_visible_glyph_but_not_tabs() {
        let mut fx = Fixture::plain(TEXT);
        let canvas = fx.paint(Rect::from_min_max(pos2(0.0, 0.0), pos2(1000.0, 1000.0)));
        let texts: String = canvas.texts().into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts, "int  x;return x;");
        let (pos, text) = &canvas.texts()[7];
        assert_eq!(text, "r");
        assert_eq!(*pos, pos2(84.0, 22.0));
    }

    #[test]
    fn paint_without_file_is_a_no_op() {
        let mut fx = Fixture::plain(TEXT);
        fx.view.set_displayed_file(None);
        let canvas = fx.paint(Rect::from_min_max(pos2(0.0, 0.0), pos2(1000.0, 1000.0)));
        assert!(canvas.ops.is_empty());
    }

    #[test]
    fn paint_skips_characters_outside_the_clip() {
        let mut fx = Fixture::plain("abcdefghij");
        // Characters span [4 + 10i, 14 + 10i).
        let canvas = fx.paint(Rect::from_min_max(pos2(34.0, 0.0), pos2(60.0, 20.0)));
        let texts: Vec<String> = canvas.texts().into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts, vec!["d", "e", "f"]);
    }

    #[test]
    fn paint_only_visits_lines_near_the_clip() {
        let text: String = (0..100).map(|i| format!("line{i}\n")).collect();
        let mut fx = Fixture::plain(&text);
        let canvas = fx.paint(Rect::from_min_max(pos2(0.0, 400.0), pos2(1000.0, 440.0)));
        let tops: Vec<f32> = canvas.texts().iter().map(|(p, _)| p.y).collect();
        let first = tops.iter().copied().fold(f32::MAX, f32::min);
        let last = tops.iter().copied().fold(f32::MIN, f32::max);
        assert_eq!(first, 2.0 + 18.0 * 20.0);
        assert_eq!(last, 2.0 + 24.0 * 20.0);
    }

    #[test]
    fn pen_changes_only_between_colors() {
        let keyword_then_plain = |file: &SourceFile| {
            let mut kinds = vec![SyntaxKind::Plain; file.len_units()];
            kinds[..3].fill(SyntaxKind::Keyword);
            kinds
        };
        let mut view = SourceView::new(Arc::new(NullSymbolSource), Box::new(keyword_then_plain));
        view.set_displayed_file(Some(Arc::new(SourceFile::from_text(None, "int abc"))));
        let measurer = FixedMeasurer::new(10.0, 20.0);
        let font = FontId::monospace(12.0);
        let mut cache = WidthCache::new();
        let mut canvas = RecordingCanvas::default();
        view.paint(
            &mut canvas,
            Rect::from_min_max(pos2(0.0, 0.0), pos2(500.0, 100.0)),
            &mut cache.metrics(&font, &measurer),
        );

        let theme = ViewTheme::light();
        assert_eq!(canvas.pen_changes(), 2);
        let colored = canvas.colored_texts();
        assert_eq!(colored[0], ("i".to_string(), theme.keyword));
        assert_eq!(colored[2], ("t".to_string(), theme.keyword));
        assert_eq!(colored[3], (" ".to_string(), theme.text));
        assert_eq!(colored[4], ("a".to_string(), theme.text));
    }

    #[test]
    fn selection_is_filled_then_drawn_in_selection_color() {
        let mut fx = Fixture::indexed();
        fx.view.set_selection(TextRange::on_line(1, 1, 7));
        let canvas = fx.paint(Rect::from_min_max(pos2(0.0, 0.0), pos2(1000.0, 1000.0)));

        let theme = ViewTheme::light();
        assert!(matches!(
            canvas.ops[0],
            crate::view::canvas::recording::Op::Fill(..)
        ));
        assert_eq!(
            canvas.fills(),
            vec![(
                Rect::from_min_max(pos2(84.0, 22.0), pos2(144.0, 42.0)),
                theme.selection_background
            )]
        );
        let colored = canvas.colored_texts();
        let selected: String = colored
            .iter()
            .filter(|(_, c)| *c == theme.selection_text)
            .map(|(t, _)| t.as_str())
            .collect();
        assert_eq!(selected, "return");
    }

    #[test]
    fn selection_over_emoji_covers_the_whole_glyph() {
        let mut fx = Fixture::plain("a\u{1F600}b\n");
        fx.with(|v, m| v.select_identifier(1, 3, m));
        assert_eq!(fx.view.selection(), TextRange::on_line(0, 1, 3));

        let canvas = fx.paint(Rect::from_min_max(pos2(0.0, 0.0), pos2(1000.0, 1000.0)));
        let theme = ViewTheme::light();
        let fills = canvas.fills();
        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].0, Rect::from_min_max(pos2(14.0, 2.0), pos2(24.0, 22.0)));
        assert!(fills[0].0.width() > 0.0);
        let selected: Vec<String> = canvas
            .colored_texts()
            .into_iter()
            .filter(|(_, c)| *c == theme.selection_text)
            .map(|(t, _)| t)
            .collect();
        assert_eq!(selected, vec!["\u{1F600}".to_string()]);
    }

    #[test]
    fn semantic_colors_reach_the_canvas() {
        let mut fx = Fixture::indexed();
        let canvas = fx.paint(Rect::from_min_max(pos2(0.0, 0.0), pos2(1000.0, 1000.0)));
        let global = ViewTheme::light().global_variable.unwrap();
        let xs: Vec<Color32> = canvas
            .colored_texts()
            .into_iter()
            .filter(|(t, _)| t == "x")
            .map(|(_, c)| c)
            .collect();
        assert_eq!(xs, vec![global, global]);
    }

    #[test]
    fn theme_change_recolors() {
        let mut fx = Fixture::indexed();
        fx.view.set_theme(ViewTheme::dark());
        let offset = fx.view.displayed_file().unwrap().line_start(0);
        assert_eq!(fx.view.colors().color_at(offset), Some(ViewTheme::dark().text));
    }
}
