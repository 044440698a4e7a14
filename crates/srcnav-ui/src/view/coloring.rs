//! Per-code-unit color buffer: lexical colors overlaid with symbol colors.

use std::collections::HashMap;

use egui::Color32;
use srcnav_core::symbols::Ref;
use srcnav_core::{Lexer, SourceFile, SymbolCategory, SymbolSource};

use super::theme::ViewTheme;

/// Category colors for one symbol source. Categories the source does not
/// know, or the theme leaves uncolored, have no entry.
#[derive(Debug, Default)]
pub struct CategoryPalette {
    colors: HashMap<SymbolCategory, Color32>,
}

impl CategoryPalette {
    pub fn new(symbols: &dyn SymbolSource, theme: &ViewTheme) -> Self {
        let colors = SymbolCategory::ALL
            .into_iter()
            .filter(|c| symbols.has_category(*c))
            .filter_map(|c| Some((c, theme.category_color(c)?)))
            .collect();
        Self { colors }
    }

    /// The override color for `r`, if its symbol's category has one.
    pub fn color(&self, symbols: &dyn SymbolSource, r: &Ref) -> Option<Color32> {
        let category = symbols.symbol_category(r.symbol)?;
        self.colors.get(&category).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// One color per code unit of the displayed file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ColorBuffer {
    colors: Vec<Color32>,
}

impl ColorBuffer {
    /// Colors `file`: lexical pass first, then every reference with a mapped
    /// category overwrites its span.
    pub fn build(
        file: &SourceFile,
        lexer: &dyn Lexer,
        symbols: &dyn SymbolSource,
        theme: &ViewTheme,
    ) -> Self {
        let len = file.len_units();
        let mut kinds = lexer.highlight(file);
        if kinds.len() != len {
            tracing::warn!(
                "lexer returned {} kinds for {} code units in {}",
                kinds.len(),
                len,
                file.display_name()
            );
            kinds.resize(len, Default::default());
        }
        let mut colors: Vec<Color32> = kinds.into_iter().map(|k| theme.syntax_color(k)).collect();

        let palette = CategoryPalette::new(symbols, theme);
        if !palette.is_empty() {
            let mut skipped = 0usize;
            symbols.query_file_refs(file, &mut |r| {
                let Some(color) = palette.color(symbols, r) else {
                    return;
                };
                let span = r.span();
                if span.line >= file.line_count() {
                    skipped += 1;
                    return;
                }
                let start = file.line_start(span.line);
                let line_len = file.line_length(span.line);
                let columns = span.columns.start.min(line_len)..span.columns.end.min(line_len);
                colors[start + columns.start..start + columns.end].fill(color);
            });
            if skipped > 0 {
                tracing::warn!(
                    "{skipped} references past the end of {} ignored",
                    file.display_name()
                );
            }
        }

        Self { colors }
    }

    pub fn color_at(&self, offset: usize) -> Option<Color32> {
        self.colors.get(offset).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
