//! Scrollbar rendering and interaction for the source widget.
//!
//! Handles vertical and horizontal scrollbar track/thumb geometry, drag
//! interaction, and click-to-jump behavior. Scroll positions are in pixels.

use egui::{Color32, Painter, Pos2, Rect, Response, Vec2, Visuals};

/// Scrollbar track width in logical pixels.
pub(crate) const SCROLLBAR_WIDTH: f32 = 14.0;
/// Minimum scrollbar thumb size in logical pixels.
pub(crate) const SCROLLBAR_MIN_THUMB: f32 = 20.0;

/// Which scrollbar, if any, owns the current drag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum ScrollbarDrag {
    #[default]
    None,
    Vertical,
    Horizontal,
}

/// Computes scroll position from a pointer coordinate along a scrollbar axis.
fn scroll_ratio_from_pointer(
    pointer_val: f32,
    track_start: f32,
    thumb_size: f32,
    thumb_travel: f32,
) -> f32 {
    let relative = pointer_val - track_start - thumb_size * 0.5;
    (relative / thumb_travel.max(1.0)).clamp(0.0, 1.0)
}

/// Geometry of one scrollbar for a given track, viewport and content extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ScrollbarAxis {
    track: Rect,
    vertical: bool,
    thumb_size: f32,
    thumb_travel: f32,
    max_scroll: f32,
}

impl ScrollbarAxis {
    pub(crate) fn vertical(track: Rect, viewport: f32, content: f32) -> Self {
        Self::new(track, true, viewport, content)
    }

    pub(crate) fn horizontal(track: Rect, viewport: f32, content: f32) -> Self {
        Self::new(track, false, viewport, content)
    }

    fn new(track: Rect, vertical: bool, viewport: f32, content: f32) -> Self {
        let track_len = if vertical { track.height() } else { track.width() };
        let visible = if content > 0.0 {
            (viewport / content).min(1.0)
        } else {
            1.0
        };
        let thumb_size = (track_len * visible).max(SCROLLBAR_MIN_THUMB).min(track_len);
        Self {
            track,
            vertical,
            thumb_size,
            thumb_travel: track_len - thumb_size,
            max_scroll: (content - viewport).max(0.0),
        }
    }

    pub(crate) fn track(&self) -> Rect {
        self.track
    }

    pub(crate) fn max_scroll(&self) -> f32 {
        self.max_scroll
    }

    pub(crate) fn thumb_rect(&self, scroll: f32) -> Rect {
        let ratio = if self.max_scroll > 0.0 {
            (scroll / self.max_scroll).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let along = ratio * self.thumb_travel;
        if self.vertical {
            Rect::from_min_size(
                Pos2::new(self.track.min.x + 2.0, self.track.min.y + along),
                Vec2::new(SCROLLBAR_WIDTH - 4.0, self.thumb_size),
            )
        } else {
            Rect::from_min_size(
                Pos2::new(self.track.min.x + along, self.track.min.y + 2.0),
                Vec2::new(self.thumb_size, SCROLLBAR_WIDTH - 4.0),
            )
        }
    }

    /// The scroll offset that centers the thumb on `pos`.
    pub(crate) fn scroll_for_pointer(&self, pos: Pos2) -> f32 {
        let (val, start) = if self.vertical {
            (pos.y, self.track.min.y)
        } else {
            (pos.x, self.track.min.x)
        };
        scroll_ratio_from_pointer(val, start, self.thumb_size, self.thumb_travel) * self.max_scroll
    }

    /// Paints the track and thumb.
    pub(crate) fn paint(
        &self,
        painter: &Painter,
        visuals: &Visuals,
        scroll: f32,
        is_dragging: bool,
        pointer_pos: Option<Pos2>,
    ) {
        painter.rect_filled(self.track, 0.0, visuals.extreme_bg_color);
        let thumb = self.thumb_rect(scroll);
        let is_hovering = pointer_pos.is_some_and(|p| thumb.contains(p));
        painter.rect_filled(thumb, 3.0, thumb_color(visuals, is_dragging, is_hovering));
    }

    /// Applies drag and click-to-jump input to `scroll`.
    pub(crate) fn interact(&self, response: &Response, is_dragging: bool, scroll: &mut f32) {
        if is_dragging && response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                *scroll = self.scroll_for_pointer(pos);
            }
        }
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if self.track.contains(pos) {
                    *scroll = self.scroll_for_pointer(pos);
                }
            }
        }
    }
}

/// Resolves the thumb color based on drag/hover state.
fn thumb_color(visuals: &Visuals, is_dragging: bool, is_hovering: bool) -> Color32 {
    if is_dragging {
        visuals.widgets.active.bg_fill
    } else if is_hovering {
        visuals.widgets.hovered.bg_fill
    } else {
        visuals.widgets.inactive.bg_fill
    }
}
