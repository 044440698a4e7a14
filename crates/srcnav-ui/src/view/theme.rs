//! Source view theme.
//!
//! Resolves a configured [`ThemeDefinition`] into egui colors for the text
//! area, the gutter, each syntax kind and each highlighted symbol category.

use egui::Color32;
use srcnav_config::theme::{builtin_dark, builtin_light};
use srcnav_config::{HexColor, ThemeDefinition};
use srcnav_core::{SymbolCategory, SyntaxKind};

/// Converts a `HexColor` to egui `Color32`.
fn hex_to_color32(c: HexColor) -> Color32 {
    Color32::from_rgba_premultiplied(c.r, c.g, c.b, c.a)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewTheme {
    pub dark_mode: bool,
    pub background: Color32,
    pub text: Color32,
    pub selection_background: Color32,
    pub selection_text: Color32,
    pub line_number: Color32,
    pub gutter_background: Color32,
    pub gutter_separator: Color32,
    pub comment: Color32,
    pub quoted: Color32,
    pub number: Color32,
    pub directive: Color32,
    pub keyword: Color32,
    pub global_variable: Option<Color32>,
    pub field: Option<Color32>,
    pub namespace: Option<Color32>,
    pub struct_type: Option<Color32>,
    pub class: Option<Color32>,
    pub union_type: Option<Color32>,
    pub enum_type: Option<Color32>,
    pub typedef: Option<Color32>,
}

impl Default for ViewTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl ViewTheme {
    pub fn light() -> Self {
        Self::from_config(&builtin_light())
    }

    pub fn dark() -> Self {
        Self::from_config(&builtin_dark())
    }

    pub fn from_config(def: &ThemeDefinition) -> Self {
        let symbol = |c: Option<HexColor>| c.map(hex_to_color32);
        Self {
            dark_mode: def.dark_mode,
            background: hex_to_color32(def.view.background),
            text: hex_to_color32(def.syntax.plain),
            selection_background: hex_to_color32(def.view.selection_background),
            selection_text: hex_to_color32(def.view.selection_text),
            line_number: hex_to_color32(def.view.line_number),
            gutter_background: hex_to_color32(def.view.gutter_background),
            gutter_separator: hex_to_color32(def.view.gutter_separator),
            comment: hex_to_color32(def.syntax.comment),
            quoted: hex_to_color32(def.syntax.quoted),
            number: hex_to_color32(def.syntax.number),
            directive: hex_to_color32(def.syntax.directive),
            keyword: hex_to_color32(def.syntax.keyword),
            global_variable: symbol(def.symbols.global_variable),
            field: symbol(def.symbols.field),
            namespace: symbol(def.symbols.namespace),
            struct_type: symbol(def.symbols.r#struct),
            class: symbol(def.symbols.class),
            union_type: symbol(def.symbols.union),
            enum_type: symbol(def.symbols.r#enum),
            typedef: symbol(def.symbols.typedef),
        }
    }

    pub fn syntax_color(&self, kind: SyntaxKind) -> Color32 {
        match kind {
            SyntaxKind::Comment => self.comment,
            SyntaxKind::Quoted => self.quoted,
            SyntaxKind::Number => self.number,
            SyntaxKind::Directive => self.directive,
            SyntaxKind::Keyword => self.keyword,
            SyntaxKind::Plain => self.text,
        }
    }

    /// Highlight color for symbols of `category`; `None` leaves them in
    /// their lexical color.
    pub fn category_color(&self, category: SymbolCategory) -> Option<Color32> {
        match category {
            SymbolCategory::GlobalVariable => self.global_variable,
            SymbolCategory::Field => self.field,
            SymbolCategory::Namespace => self.namespace,
            SymbolCategory::Struct => self.struct_type,
            SymbolCategory::Class => self.class,
            SymbolCategory::Union => self.union_type,
            SymbolCategory::Enum => self.enum_type,
            SymbolCategory::Typedef => self.typedef,
            SymbolCategory::Function
            | SymbolCategory::Method
            | SymbolCategory::LocalVariable
            | SymbolCategory::Parameter
            | SymbolCategory::EnumConstant
            | SymbolCategory::Macro => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_theme_uses_classic_palette() {
        let theme = ViewTheme::light();
        assert_eq!(theme.syntax_color(SyntaxKind::Comment), Color32::from_rgb(0, 128, 0));
        assert_eq!(theme.syntax_color(SyntaxKind::Quoted), Color32::from_rgb(0, 128, 0));
        assert_eq!(theme.syntax_color(SyntaxKind::Number), Color32::from_rgb(0, 0, 128));
        assert_eq!(theme.syntax_color(SyntaxKind::Directive), Color32::from_rgb(0, 0, 128));
        assert_eq!(theme.syntax_color(SyntaxKind::Keyword), Color32::from_rgb(128, 128, 0));
        assert_eq!(theme.syntax_color(SyntaxKind::Plain), Color32::BLACK);
    }

    #[test]
    fn category_colors() {
        let theme = ViewTheme::light();
        let magenta = Some(Color32::from_rgb(128, 0, 128));
        assert_eq!(
            theme.category_color(SymbolCategory::GlobalVariable),
            Some(Color32::from_rgb(0, 128, 128))
        );
        assert_eq!(
            theme.category_color(SymbolCategory::Field),
            Some(Color32::from_rgb(128, 0, 0))
        );
        for category in [
            SymbolCategory::Namespace,
            SymbolCategory::Struct,
            SymbolCategory::Class,
            SymbolCategory::Union,
            SymbolCategory::Enum,
            SymbolCategory::Typedef,
        ] {
            assert_eq!(theme.category_color(category), magenta);
        }
        assert_eq!(theme.category_color(SymbolCategory::Function), None);
        assert_eq!(theme.category_color(SymbolCategory::LocalVariable), None);
    }

    #[test]
    fn from_config_honors_missing_symbol_colors() {
        let mut def = builtin_light();
        def.symbols.field = None;
        let theme = ViewTheme::from_config(&def);
        assert_eq!(theme.category_color(SymbolCategory::Field), None);
    }

    #[test]
    fn dark_theme_has_dark_background() {
        let theme = ViewTheme::dark();
        assert!(theme.dark_mode);
        assert!(theme.background.r() < 64);
        assert!(!ViewTheme::light().dark_mode);
    }
}
