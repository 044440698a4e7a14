/// Theme definitions: view colors, syntax colors, symbol colors, and built-in presets.
use serde::{Deserialize, Serialize};

use crate::color::HexColor;

/// Colors for the source view and its line-number gutter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewColors {
    pub background: HexColor,
    pub text: HexColor,
    pub selection_background: HexColor,
    pub selection_text: HexColor,
    pub line_number: HexColor,
    pub gutter_background: HexColor,
    pub gutter_separator: HexColor,
}

impl Default for ViewColors {
    fn default() -> Self {
        Self {
            background: HexColor::WHITE,
            text: HexColor::BLACK,
            selection_background: HexColor::rgb(48, 140, 198),
            selection_text: HexColor::WHITE,
            line_number: HexColor::rgb(128, 128, 128),
            gutter_background: HexColor::rgb(240, 240, 240),
            gutter_separator: HexColor::rgb(200, 200, 200),
        }
    }
}

/// Foreground color per lexical class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxColors {
    pub plain: HexColor,
    pub comment: HexColor,
    pub quoted: HexColor,
    pub number: HexColor,
    pub directive: HexColor,
    pub keyword: HexColor,
}

impl Default for SyntaxColors {
    fn default() -> Self {
        Self {
            plain: HexColor::BLACK,
            comment: HexColor::rgb(0, 128, 0),
            quoted: HexColor::rgb(0, 128, 0),
            number: HexColor::rgb(0, 0, 128),
            directive: HexColor::rgb(0, 0, 128),
            keyword: HexColor::rgb(128, 128, 0),
        }
    }
}

/// Foreground color per symbol category. A `null` entry leaves that
/// category in its lexical color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolColors {
    pub global_variable: Option<HexColor>,
    pub field: Option<HexColor>,
    pub namespace: Option<HexColor>,
    pub r#struct: Option<HexColor>,
    pub class: Option<HexColor>,
    pub union: Option<HexColor>,
    pub r#enum: Option<HexColor>,
    pub typedef: Option<HexColor>,
}

impl Default for SymbolColors {
    fn default() -> Self {
        let type_like = Some(HexColor::rgb(128, 0, 128));
        Self {
            global_variable: Some(HexColor::rgb(0, 128, 128)),
            field: Some(HexColor::rgb(128, 0, 0)),
            namespace: type_like,
            r#struct: type_like,
            class: type_like,
            union: type_like,
            r#enum: type_like,
            typedef: type_like,
        }
    }
}

/// A complete theme definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeDefinition {
    pub name: String,
    pub dark_mode: bool,
    #[serde(default)]
    pub view: ViewColors,
    #[serde(default)]
    pub syntax: SyntaxColors,
    #[serde(default)]
    pub symbols: SymbolColors,
}

/// Built-in light theme.
pub fn builtin_light() -> ThemeDefinition {
    ThemeDefinition {
        name: "Light".to_string(),
        dark_mode: false,
        view: ViewColors::default(),
        syntax: SyntaxColors::default(),
        symbols: SymbolColors::default(),
    }
}

/// Built-in dark theme.
pub fn builtin_dark() -> ThemeDefinition {
    let type_like = Some(HexColor::rgb(197, 134, 192));
    ThemeDefinition {
        name: "Dark".to_string(),
        dark_mode: true,
        view: ViewColors {
            background: HexColor::rgb(30, 30, 30),
            text: HexColor::rgb(212, 212, 212),
            selection_background: HexColor::rgb(38, 79, 120),
            selection_text: HexColor::WHITE,
            line_number: HexColor::rgb(120, 120, 120),
            gutter_background: HexColor::rgb(37, 37, 37),
            gutter_separator: HexColor::rgb(60, 60, 60),
        },
        syntax: SyntaxColors {
            plain: HexColor::rgb(212, 212, 212),
            comment: HexColor::rgb(106, 153, 85),
            quoted: HexColor::rgb(106, 153, 85),
            number: HexColor::rgb(120, 160, 230),
            directive: HexColor::rgb(120, 160, 230),
            keyword: HexColor::rgb(220, 200, 110),
        },
        symbols: SymbolColors {
            global_variable: Some(HexColor::rgb(78, 201, 176)),
            field: Some(HexColor::rgb(230, 120, 110)),
            namespace: type_like,
            r#struct: type_like,
            class: type_like,
            union: type_like,
            r#enum: type_like,
            typedef: type_like,
        },
    }
}
