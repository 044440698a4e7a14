//! Glyph measurement and the per-font width cache.
//!
//! Layout asks for the width of one visual character at a time, and the same
//! few dozen glyphs repeat on every line, so widths are memoized per font.
//! The cache is owned by whoever composes the view; there is no process-wide
//! table.

use std::collections::HashMap;

use egui::{text::LayoutJob, FontFamily, FontId, TextFormat};

/// Font measurement oracle.
pub trait GlyphMeasurer {
    /// Advance width of `text` rendered in `font`.
    fn text_width(&self, font: &FontId, text: &str) -> f32;

    /// Distance between the tops of consecutive lines.
    fn line_spacing(&self, font: &FontId) -> f32;

    /// Vertical offset from a line's top to where its glyphs are drawn.
    fn text_inset(&self, font: &FontId) -> f32;
}

/// Measures with egui's font system.
pub struct EguiMeasurer<'a> {
    ctx: &'a egui::Context,
}

impl<'a> EguiMeasurer<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl GlyphMeasurer for EguiMeasurer<'_> {
    fn text_width(&self, font: &FontId, text: &str) -> f32 {
        let mut job = LayoutJob::default();
        job.append(
            text,
            0.0,
            TextFormat {
                font_id: font.clone(),
                ..Default::default()
            },
        );
        let galley = self.ctx.fonts_mut(|f| f.layout_job(job));
        galley.rect.width()
    }

    fn line_spacing(&self, font: &FontId) -> f32 {
        // Whole pixels keep line tops on the pixel grid.
        (font.size * 1.4).round()
    }

    fn text_inset(&self, font: &FontId) -> f32 {
        self.line_spacing(font) * 0.15
    }
}

/// Fixed-pitch measurer: every visual character has the same advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMeasurer {
    pub char_width: f32,
    pub line_spacing: f32,
    pub text_inset: f32,
}

impl FixedMeasurer {
    pub fn new(char_width: f32, line_spacing: f32) -> Self {
        Self {
            char_width,
            line_spacing,
            text_inset: 0.0,
        }
    }
}

impl GlyphMeasurer for FixedMeasurer {
    fn text_width(&self, _font: &FontId, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }

    fn line_spacing(&self, _font: &FontId) -> f32 {
        self.line_spacing
    }

    fn text_inset(&self, _font: &FontId) -> f32 {
        self.text_inset
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FontKey {
    family: FontFamily,
    size_bits: u32,
}

impl From<&FontId> for FontKey {
    fn from(font: &FontId) -> Self {
        Self {
            family: font.family.clone(),
            size_bits: font.size.to_bits(),
        }
    }
}

#[derive(Debug, Default)]
struct FontWidths {
    widths: HashMap<String, f32>,
}

/// Width memo table keyed by font.
#[derive(Debug, Default)]
pub struct WidthCache {
    fonts: HashMap<FontKey, FontWidths>,
}

impl WidthCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics for `font`, measuring through `measurer` on cache misses.
    pub fn metrics<'a>(
        &'a mut self,
        font: &'a FontId,
        measurer: &'a dyn GlyphMeasurer,
    ) -> FontMetrics<'a> {
        let entry = self.fonts.entry(FontKey::from(font)).or_default();
        FontMetrics {
            font,
            measurer,
            widths: &mut entry.widths,
            line_spacing: measurer.line_spacing(font),
            text_inset: measurer.text_inset(font),
        }
    }

    /// Drops everything cached for `font`.
    pub fn evict(&mut self, font: &FontId) {
        if self.fonts.remove(&FontKey::from(font)).is_some() {
            tracing::debug!("evicted width cache for {font:?}");
        }
    }

    pub fn clear(&mut self) {
        self.fonts.clear();
    }

    /// Number of cached widths for `font`.
    pub fn cached_len(&self, font: &FontId) -> usize {
        self.fonts
            .get(&FontKey::from(font))
            .map_or(0, |entry| entry.widths.len())
    }
}

/// Measurements for one font, backed by the cache.
pub struct FontMetrics<'a> {
    font: &'a FontId,
    measurer: &'a dyn GlyphMeasurer,
    widths: &'a mut HashMap<String, f32>,
    line_spacing: f32,
    text_inset: f32,
}

impl FontMetrics<'_> {
    pub fn font(&self) -> &FontId {
        self.font
    }

    pub fn width(&mut self, text: &str) -> f32 {
        if let Some(width) = self.widths.get(text) {
            return *width;
        }
        let width = self.measurer.text_width(self.font, text);
        self.widths.insert(text.to_owned(), width);
        width
    }

    pub fn line_spacing(&self) -> f32 {
        self.line_spacing
    }

    pub fn text_inset(&self) -> f32 {
        self.text_inset
    }

    /// Pixel width of a tab stop: `tab_stop_size` spaces.
    pub fn tab_stop_px(&mut self, tab_stop_size: usize) -> f32 {
        self.width(" ") * tab_stop_size as f32
    }
}
