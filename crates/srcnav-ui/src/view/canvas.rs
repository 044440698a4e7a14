//! Drawing surface the view paints onto.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Vec2};

/// Minimal drawing target in content coordinates.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, color: Color32);

    /// Sets the color used by subsequent [`draw_text`](Self::draw_text) calls.
    fn set_pen(&mut self, color: Color32);

    /// Draws `text` with its top-left corner at `pos`.
    fn draw_text(&mut self, pos: Pos2, text: &str);
}

/// Paints through an egui [`Painter`], shifting content coordinates by
/// `origin` (the screen position of content point `(0, 0)`).
pub struct PainterCanvas<'a> {
    painter: &'a Painter,
    origin: Vec2,
    font_id: FontId,
    pen: Color32,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a Painter, origin: Vec2, font_id: FontId) -> Self {
        Self {
            painter,
            origin,
            font_id,
            pen: Color32::BLACK,
        }
    }
}

impl Canvas for PainterCanvas<'_> {
    fn fill_rect(&mut self, rect: Rect, color: Color32) {
        self.painter.rect_filled(rect.translate(self.origin), 0.0, color);
    }

    fn set_pen(&mut self, color: Color32) {
        self.pen = color;
    }

    fn draw_text(&mut self, pos: Pos2, text: &str) {
        self.painter.text(
            pos + self.origin,
            Align2::LEFT_TOP,
            text,
            self.font_id.clone(),
            self.pen,
        );
    }
}
