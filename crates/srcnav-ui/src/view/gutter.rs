//! Line-number gutter painted beside the source view.

use egui::{pos2, vec2, Color32, Rect, Vec2};
use srcnav_config::Margins;

use super::canvas::Canvas;
use super::metrics::FontMetrics;
use super::source_view::visible_line_range;

#[derive(Debug, Clone)]
pub struct LineNumberGutter {
    margins: Margins,
    line_count: usize,
}

impl Default for LineNumberGutter {
    fn default() -> Self {
        Self::new(Margins::new(4.0, 5.0, 4.0, 4.0))
    }
}

impl LineNumberGutter {
    pub fn new(margins: Margins) -> Self {
        Self {
            margins,
            line_count: 0,
        }
    }

    pub fn margins(&self) -> Margins {
        self.margins
    }

    pub fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn set_line_count(&mut self, line_count: usize) {
        self.line_count = line_count;
    }

    /// Wide enough for the largest line number in digit widths; tall enough
    /// for every line, or one line for an empty file.
    pub fn size_hint(&self, metrics: &mut FontMetrics<'_>) -> Vec2 {
        let digits = digit_count(self.line_count);
        let width = metrics.width("9") * digits as f32;
        let height = metrics.line_spacing() * self.line_count.max(1) as f32;
        vec2(width, height) + vec2(self.margins.horizontal(), self.margins.vertical())
    }

    /// Paints 1-based line numbers right-aligned against `width`.
    pub fn paint(
        &self,
        canvas: &mut dyn Canvas,
        clip: Rect,
        width: f32,
        color: Color32,
        metrics: &mut FontMetrics<'_>,
    ) {
        let spacing = metrics.line_spacing();
        let Some(lines) = visible_line_range(clip, spacing, self.line_count) else {
            return;
        };
        canvas.set_pen(color);
        for line in lines {
            let label = (line + 1).to_string();
            let x = width - metrics.width(&label) - self.margins.right;
            let y = self.margins.top + line as f32 * spacing + metrics.text_inset();
            canvas.draw_text(pos2(x, y), &label);
        }
    }
}

fn digit_count(n: usize) -> usize {
    n.checked_ilog10().map_or(1, |d| d as usize + 1)
}
