//! Source view: measuring, laying out, coloring, painting and hit testing
//! source text, plus the egui widget hosting it.

mod canvas;
mod coloring;
mod gutter;
mod highlight;
mod layout;
mod metrics;
pub(crate) mod scrollbar;
mod source_view;
mod theme;
mod widget;

pub use canvas::{Canvas, PainterCanvas};
pub use coloring::{CategoryPalette, ColorBuffer};
pub use gutter::LineNumberGutter;
pub use highlight::SyntectLexer;
pub use layout::LineLayout;
pub use metrics::{EguiMeasurer, FixedMeasurer, FontMetrics, GlyphMeasurer, WidthCache};
pub use source_view::{
    visible_line_range, ContextMenu, HistoryAvailability, MenuAction, SourceView, ViewEvent,
    DEFAULT_TAB_STOP_SIZE,
};
pub use theme::ViewTheme;
pub use widget::{SourceWidget, DEFAULT_FONT_SIZE};
