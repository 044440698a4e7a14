//! Source widget: layout, scrolling, painting and pointer interaction.
//!
//! `SourceWidget` hosts a [`SourceView`] and its line-number gutter inside a
//! painter covering the available space. It owns the scroll offset, the width
//! cache and the open context menu, and translates between screen and content
//! coordinates each frame.

use std::sync::Arc;

use egui::{
    pos2, vec2, Button, FontId, Pos2, Rect, Response, RichText, Sense, Stroke, Ui, Vec2,
};
use srcnav_config::Margins;
use srcnav_core::file::is_pair_at;
use srcnav_core::{Location, SourceFile, SymbolSource};

use super::canvas::PainterCanvas;
use super::gutter::LineNumberGutter;
use super::metrics::{EguiMeasurer, FontMetrics, WidthCache};
use super::scrollbar::{ScrollbarAxis, ScrollbarDrag, SCROLLBAR_WIDTH};
use super::source_view::{ContextMenu, HistoryAvailability, MenuAction, SourceView, ViewEvent};
use super::theme::ViewTheme;

/// Space kept around a target scrolled into view.
const ENSURE_VISIBLE_MARGIN: f32 = 50.0;

pub const DEFAULT_FONT_SIZE: f32 = 14.0;

/// Moves `scroll` along one axis just enough to show `[start, end)` with
/// `margin` around it, preferring the start when the target does not fit.
fn scroll_to_show(scroll: &mut f32, start: f32, end: f32, viewport: f32, margin: f32) {
    let margin = margin.min(viewport * 0.5).max(0.0);
    if start - margin < *scroll {
        *scroll = (start - margin).max(0.0);
    } else if end + margin > *scroll + viewport {
        *scroll = (end + margin - viewport).min(start - margin).max(0.0);
    }
}

/// Primary-button input for one frame, in screen coordinates.
#[derive(Debug, Clone, Copy, Default)]
struct PrimaryInput {
    pressed: bool,
    released: bool,
    pos: Option<Pos2>,
}

pub struct SourceWidget {
    view: SourceView,
    gutter: LineNumberGutter,
    widths: WidthCache,
    font_id: FontId,
    show_line_numbers: bool,
    scroll: Vec2,
    scrollbar_drag: ScrollbarDrag,
    pressing: bool,
    menu: Option<ContextMenu>,
    /// Screen position of content `(0, 0)` in the last frame.
    last_origin: Option<Vec2>,
}

impl SourceWidget {
    pub fn new(view: SourceView) -> Self {
        Self {
            view,
            gutter: LineNumberGutter::default(),
            widths: WidthCache::new(),
            font_id: FontId::monospace(DEFAULT_FONT_SIZE),
            show_line_numbers: true,
            scroll: Vec2::ZERO,
            scrollbar_drag: ScrollbarDrag::None,
            pressing: false,
            menu: None,
            last_origin: None,
        }
    }

    pub fn view(&self) -> &SourceView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut SourceView {
        &mut self.view
    }

    pub fn displayed_file(&self) -> Option<&Arc<SourceFile>> {
        self.view.displayed_file()
    }

    /// Shows `file`; a different file starts scrolled to the top.
    pub fn set_displayed_file(&mut self, file: Option<Arc<SourceFile>>) {
        let changed = match (self.view.displayed_file(), &file) {
            (Some(a), Some(b)) => !Arc::ptr_eq(a, b),
            (None, None) => false,
            _ => true,
        };
        self.gutter
            .set_line_count(file.as_ref().map_or(0, |f| f.line_count()));
        self.view.set_displayed_file(file);
        if changed {
            self.scroll.y = 0.0;
            self.pressing = false;
            self.menu = None;
        }
    }

    pub fn set_symbol_source(&mut self, symbols: Arc<dyn SymbolSource>) {
        self.view.set_symbol_source(symbols);
    }

    pub fn set_theme(&mut self, theme: ViewTheme) {
        self.view.set_theme(theme);
    }

    pub fn font_id(&self) -> &FontId {
        &self.font_id
    }

    /// Changes the font size, dropping cached widths of the old font.
    pub fn set_font_size(&mut self, size: f32) {
        let font_id = FontId::monospace(size);
        if font_id != self.font_id {
            self.widths.evict(&self.font_id);
            self.font_id = font_id;
        }
    }

    pub fn set_tab_stop_size(&mut self, size: usize) {
        self.view.set_tab_stop_size(size);
    }

    pub fn set_margins(&mut self, view: Margins, gutter: Margins) {
        self.view.set_margins(view);
        self.gutter.set_margins(gutter);
    }

    pub fn show_line_numbers(&self) -> bool {
        self.show_line_numbers
    }

    pub fn set_show_line_numbers(&mut self, show: bool) {
        self.show_line_numbers = show;
    }

    /// Scroll offset: the content point shown at the top-left of the text
    /// area.
    pub fn viewport_origin(&self) -> Vec2 {
        self.scroll
    }

    /// Clamped on the next frame.
    pub fn set_viewport_origin(&mut self, origin: Vec2) {
        self.scroll = origin.max(Vec2::ZERO);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll.y = 0.0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll.y = f32::INFINITY;
    }

    /// Selects the word at a 1-based position and scrolls it into view on the
    /// next frame.
    pub fn select_identifier(&mut self, ctx: &egui::Context, line: usize, column: usize) {
        let measurer = EguiMeasurer::new(ctx);
        let font_id = self.font_id.clone();
        let mut metrics = self.widths.metrics(&font_id, &measurer);
        self.view.select_identifier(line, column, &mut metrics);
    }

    pub fn take_events(&mut self) -> Vec<ViewEvent> {
        self.view.take_events()
    }

    /// Screen rectangle of the character at `loc` as of the last frame.
    /// `None` before the first frame or when `loc` names no character.
    pub fn char_rect(&mut self, ctx: &egui::Context, loc: Location) -> Option<Rect> {
        let origin = self.last_origin?;
        let file = self.view.displayed_file()?;
        if !loc.points_at_char(file) {
            return None;
        }
        let units = if is_pair_at(file.line_content(loc.line), loc.column) { 2 } else { 1 };
        let end = Location::new(loc.line, loc.column + units);

        let measurer = EguiMeasurer::new(ctx);
        let font_id = self.font_id.clone();
        let mut metrics = self.widths.metrics(&font_id, &measurer);
        let min = self.view.location_to_point(Some(loc), &mut metrics);
        let max = self.view.location_to_point(Some(end), &mut metrics);
        let rect = Rect::from_min_max(min, pos2(max.x, min.y + metrics.line_spacing()));
        Some(rect.translate(origin))
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu.is_some()
    }

    /// Lays out, handles input for and paints the widget over all available
    /// space.
    pub fn show(&mut self, ui: &mut Ui, history: HistoryAvailability) -> Response {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, Sense::click_and_drag());
        let rect = response.rect;

        let ctx = ui.ctx().clone();
        let measurer = EguiMeasurer::new(&ctx);
        let font_id = self.font_id.clone();
        let mut metrics = self.widths.metrics(&font_id, &measurer);
        let theme = self.view.theme().clone();

        let gutter_width = if self.show_line_numbers {
            self.gutter.size_hint(&mut metrics).x.ceil()
        } else {
            0.0
        };
        let content = self.view.size_hint(&mut metrics);

        // Scrollbars take space only when the content overflows.
        let inner_width = rect.width() - gutter_width;
        let inner_height = rect.height();
        let needs_vscroll = content.y > inner_height;
        let needs_hscroll =
            content.x > (inner_width - if needs_vscroll { SCROLLBAR_WIDTH } else { 0.0 });
        let needs_vscroll =
            needs_vscroll || (needs_hscroll && content.y > inner_height - SCROLLBAR_WIDTH);
        let vscroll_width = if needs_vscroll { SCROLLBAR_WIDTH } else { 0.0 };
        let hscroll_height = if needs_hscroll { SCROLLBAR_WIDTH } else { 0.0 };

        let text_area = Rect::from_min_max(
            pos2(rect.min.x + gutter_width, rect.min.y),
            pos2(rect.max.x - vscroll_width, rect.max.y - hscroll_height),
        );
        let gutter_rect = Rect::from_min_max(
            rect.min,
            pos2(rect.min.x + gutter_width, rect.max.y - hscroll_height),
        );
        let max_scroll = (content - text_area.size()).max(Vec2::ZERO);

        if let Some(target) = self.view.take_scroll_request() {
            scroll_to_show(
                &mut self.scroll.x,
                target.min.x,
                target.max.x,
                text_area.width(),
                ENSURE_VISIBLE_MARGIN,
            );
            scroll_to_show(
                &mut self.scroll.y,
                target.min.y,
                target.max.y,
                text_area.height(),
                ENSURE_VISIBLE_MARGIN,
            );
        }

        if response.hovered() {
            let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
            self.scroll -= scroll_delta;
        }

        // Scrollbar tracks, computed early so input can be routed.
        let vscroll = needs_vscroll.then(|| {
            ScrollbarAxis::vertical(
                Rect::from_min_max(
                    pos2(rect.max.x - SCROLLBAR_WIDTH, rect.min.y),
                    pos2(rect.max.x, rect.max.y - hscroll_height),
                ),
                text_area.height(),
                content.y,
            )
        });
        let hscroll = needs_hscroll.then(|| {
            ScrollbarAxis::horizontal(
                Rect::from_min_max(
                    pos2(rect.min.x, rect.max.y - SCROLLBAR_WIDTH),
                    pos2(rect.max.x - vscroll_width, rect.max.y),
                ),
                text_area.width(),
                content.x,
            )
        });

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                self.scrollbar_drag = if vscroll.is_some_and(|a| a.track().contains(pos)) {
                    ScrollbarDrag::Vertical
                } else if hscroll.is_some_and(|a| a.track().contains(pos)) {
                    ScrollbarDrag::Horizontal
                } else {
                    ScrollbarDrag::None
                };
            }
        }
        if response.drag_stopped() {
            self.scrollbar_drag = ScrollbarDrag::None;
        }
        if let Some(axis) = &vscroll {
            axis.interact(
                &response,
                self.scrollbar_drag == ScrollbarDrag::Vertical,
                &mut self.scroll.y,
            );
        }
        if let Some(axis) = &hscroll {
            axis.interact(
                &response,
                self.scrollbar_drag == ScrollbarDrag::Horizontal,
                &mut self.scroll.x,
            );
        }
        self.scroll = self.scroll.clamp(Vec2::ZERO, max_scroll);

        // Screen position -> content position.
        let origin = text_area.min.to_vec2() - self.scroll;
        let to_content = |pos: Pos2| pos - origin;
        self.last_origin = Some(origin);

        // ── Pointer input ──
        let input = ui.input(|i| PrimaryInput {
            pressed: i.pointer.primary_pressed(),
            released: i.pointer.primary_released(),
            pos: i.pointer.interact_pos(),
        });
        let can_start = input.pos.is_some_and(|p| text_area.contains(p))
            && response.hovered()
            && self.scrollbar_drag == ScrollbarDrag::None;
        route_primary(
            &mut self.view,
            &mut self.pressing,
            input,
            can_start,
            origin,
            &mut metrics,
        );

        if response.secondary_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if text_area.contains(pos) {
                    let content_pos = to_content(pos);
                    self.view.pointer_pressed(content_pos, &mut metrics);
                    self.menu = Some(self.view.context_menu(content_pos, &mut metrics, history));
                }
            }
        }

        // ── Painting ──
        painter.rect_filled(text_area, 0.0, theme.background);

        let text_painter = painter.with_clip_rect(text_area);
        let mut canvas = PainterCanvas::new(&text_painter, origin, font_id.clone());
        let clip = Rect::from_min_size(self.scroll.to_pos2(), text_area.size());
        self.view.paint(&mut canvas, clip, &mut metrics);

        if self.show_line_numbers {
            painter.rect_filled(gutter_rect, 0.0, theme.gutter_background);
            painter.line_segment(
                [
                    pos2(gutter_rect.max.x, gutter_rect.min.y),
                    pos2(gutter_rect.max.x, gutter_rect.max.y),
                ],
                Stroke::new(1.0, theme.gutter_separator),
            );
            let gutter_painter = painter.with_clip_rect(gutter_rect);
            let gutter_origin = vec2(gutter_rect.min.x, gutter_rect.min.y - self.scroll.y);
            let mut canvas = PainterCanvas::new(&gutter_painter, gutter_origin, font_id.clone());
            let clip = Rect::from_min_size(pos2(0.0, self.scroll.y), gutter_rect.size());
            self.gutter.paint(
                &mut canvas,
                clip,
                gutter_width,
                theme.line_number,
                &mut metrics,
            );
        }

        let hover_pos = ui.input(|i| i.pointer.hover_pos());
        if let Some(axis) = &vscroll {
            axis.paint(
                &painter,
                ui.visuals(),
                self.scroll.y,
                self.scrollbar_drag == ScrollbarDrag::Vertical,
                hover_pos,
            );
        }
        if let Some(axis) = &hscroll {
            axis.paint(
                &painter,
                ui.visuals(),
                self.scroll.x,
                self.scrollbar_drag == ScrollbarDrag::Horizontal,
                hover_pos,
            );
        }
        if needs_vscroll && needs_hscroll {
            let corner = Rect::from_min_max(
                pos2(rect.max.x - SCROLLBAR_WIDTH, rect.max.y - SCROLLBAR_WIDTH),
                rect.max,
            );
            painter.rect_filled(corner, 0.0, ui.visuals().extreme_bg_color);
        }

        // ── Context menu ──
        let mut action = None;
        let menu_open = match &self.menu {
            Some(menu) => response
                .context_menu(|ui| {
                    action = show_menu(ui, menu);
                    if action.is_some() {
                        ui.close();
                    }
                })
                .is_some(),
            None => false,
        };
        let picked = action.is_some();
        if let Some(action) = action {
            self.view.menu_action(action);
        }
        if self.menu.is_some() && (!menu_open || picked) {
            self.menu = None;
            self.view.context_menu_closed();
        }

        response
    }
}

/// Feeds one frame of primary-button input to `view`. A release with no
/// known position drops the pressed word.
fn route_primary(
    view: &mut SourceView,
    pressing: &mut bool,
    input: PrimaryInput,
    can_start: bool,
    origin: Vec2,
    metrics: &mut FontMetrics<'_>,
) {
    if input.pressed && can_start {
        if let Some(pos) = input.pos {
            view.pointer_pressed(pos - origin, metrics);
            *pressing = true;
        }
    }
    if !*pressing {
        return;
    }
    match (input.pos, input.released) {
        (Some(pos), true) => view.pointer_released(pos - origin, metrics),
        (Some(pos), false) => view.pointer_moved(pos - origin, metrics),
        (None, true) => view.clear_selection(),
        (None, false) => {}
    }
    if input.released {
        *pressing = false;
    }
}

/// Renders `menu` and returns the picked action.
fn show_menu(ui: &mut Ui, menu: &ContextMenu) -> Option<MenuAction> {
    let mut action = None;
    match menu {
        ContextMenu::General {
            back_enabled,
            forward_enabled,
        } => {
            if ui.add_enabled(*back_enabled, Button::new("Back")).clicked() {
                action = Some(MenuAction::Back);
            }
            if ui.add_enabled(*forward_enabled, Button::new("Forward")).clicked() {
                action = Some(MenuAction::Forward);
            }
            ui.separator();
            if ui.button("Copy File Path").clicked() {
                action = Some(MenuAction::CopyFilePath);
            }
            if ui.button("Reveal in Sidebar").clicked() {
                action = Some(MenuAction::RevealInSidebar);
            }
        }
        ContextMenu::Symbols { symbols } if symbols.is_empty() => {
            ui.add_enabled(false, Button::new("No symbols found"));
        }
        ContextMenu::Symbols { symbols } => {
            for (i, symbol) in symbols.iter().enumerate() {
                if i > 0 {
                    ui.separator();
                }
                ui.add_enabled(false, Button::new(RichText::new(symbol).strong()));
                if ui.button("Cross-references...").clicked() {
                    action = Some(MenuAction::CrossReferences(symbol.clone()));
                }
            }
        }
    }
    action
}
