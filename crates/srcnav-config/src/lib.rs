pub mod color;
pub mod config;
pub mod theme;

pub use color::HexColor;
pub use config::{AppConfig, Margins};
pub use theme::{SymbolColors, SyntaxColors, ThemeDefinition, ViewColors};
