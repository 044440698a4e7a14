/// Application configuration: load, save, merge, and sanitize.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::theme::{builtin_dark, builtin_light, ThemeDefinition};

const CONFIG_FILE: &str = "srcnav.json";

/// Blank space around painted content, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Margins {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn same(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    fn clamp(&mut self, max: f32) {
        for side in [&mut self.left, &mut self.top, &mut self.right, &mut self.bottom] {
            *side = if side.is_finite() { (*side).clamp(0.0, max) } else { 0.0 };
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::same(4.0)
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub current_theme: String,
    pub font_size: f32,
    /// Columns between tab stops.
    pub tab_stop_size: usize,
    pub show_line_numbers: bool,
    pub view_margins: Margins,
    pub gutter_margins: Margins,
    /// Index opened when none is given on the command line. Empty = none.
    pub last_index_path: String,
    pub themes: Vec<ThemeDefinition>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            current_theme: "System".to_string(),
            font_size: 14.0,
            tab_stop_size: 8,
            show_line_numbers: true,
            view_margins: Margins::default(),
            gutter_margins: Margins::new(4.0, 5.0, 4.0, 4.0),
            last_index_path: String::new(),
            themes: vec![builtin_light(), builtin_dark()],
        }
    }
}

impl AppConfig {
    /// Returns the config file path: `<config dir>/srcnav/srcnav.json`, or
    /// the executable's directory when there is no config dir.
    pub fn config_path() -> PathBuf {
        if let Some(dir) = dirs::config_dir() {
            return dir.join("srcnav").join(CONFIG_FILE);
        }
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|d| d.join(CONFIG_FILE)))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (missing file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(contents) => match serde_json::from_str::<AppConfig>(&contents) {
                    Ok(mut config) => {
                        config.with_builtins_merged();
                        config.sanitize();
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {}: {e}", path.display());
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {}: {e}", path.display());
                }
            }
            // Leave the broken file alone
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config at {}: {e}", path.display());
            }
            config
        }
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Ensures built-in Light and Dark themes are always present.
    /// User-defined themes with matching names take priority over built-ins.
    pub fn with_builtins_merged(&mut self) {
        if !self.themes.iter().any(|t| t.name == "Light") {
            self.themes.insert(0, builtin_light());
        }
        if !self.themes.iter().any(|t| t.name == "Dark") {
            let insert_at = 1.min(self.themes.len());
            self.themes.insert(insert_at, builtin_dark());
        }
    }

    pub fn find_theme(&self, name: &str) -> Option<&ThemeDefinition> {
        self.themes.iter().find(|t| t.name == name)
    }

    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.iter().map(|t| t.name.as_str()).collect()
    }

    /// The configured index path, if any.
    pub fn index_path(&self) -> Option<PathBuf> {
        (!self.last_index_path.is_empty()).then(|| PathBuf::from(&self.last_index_path))
    }

    /// Clamps values to valid ranges and resets invalid fields.
    pub fn sanitize(&mut self) {
        self.font_size = if self.font_size.is_finite() {
            self.font_size.clamp(6.0, 72.0)
        } else {
            Self::default().font_size
        };
        self.tab_stop_size = self.tab_stop_size.clamp(1, 32);
        self.view_margins.clamp(64.0);
        self.gutter_margins.clamp(64.0);

        if self.current_theme != "System" && self.find_theme(&self.current_theme).is_none() {
            self.current_theme = "System".to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HexColor;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.current_theme, "System");
        assert_eq!(config.tab_stop_size, 8);
        assert!(config.show_line_numbers);
        assert_eq!(config.view_margins, Margins::same(4.0));
        assert_eq!(config.gutter_margins, Margins::new(4.0, 5.0, 4.0, 4.0));
        assert!(config.index_path().is_none());
        assert_eq!(config.theme_names(), vec!["Light", "Dark"]);
    }

    #[test]
    fn test_margins_sums() {
        let m = Margins::new(4.0, 5.0, 6.0, 7.0);
        assert!((m.horizontal() - 10.0).abs() < f32::EPSILON);
        assert!((m.vertical() - 12.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitize_clamps_font_size() {
        let mut config = AppConfig::default();
        config.font_size = 2.0;
        config.sanitize();
        assert!((config.font_size - 6.0).abs() < f32::EPSILON);

        config.font_size = 100.0;
        config.sanitize();
        assert!((config.font_size - 72.0).abs() < f32::EPSILON);

        config.font_size = f32::NAN;
        config.sanitize();
        assert!((config.font_size - 14.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_sanitize_clamps_tab_stop() {
        let mut config = AppConfig::default();
        config.tab_stop_size = 0;
        config.sanitize();
        assert_eq!(config.tab_stop_size, 1);

        config.tab_stop_size = 100;
        config.sanitize();
        assert_eq!(config.tab_stop_size, 32);
    }

    #[test]
    fn test_sanitize_clamps_margins() {
        let mut config = AppConfig::default();
        config.view_margins = Margins::new(-3.0, 100.0, f32::INFINITY, 10.0);
        config.sanitize();
        assert_eq!(config.view_margins, Margins::new(0.0, 64.0, 0.0, 10.0));
    }

    #[test]
    fn test_sanitize_resets_unknown_theme() {
        let mut config = AppConfig::default();
        config.current_theme = "NonExistent".to_string();
        config.sanitize();
        assert_eq!(config.current_theme, "System");
    }

    #[test]
    fn test_sanitize_allows_custom_theme_name() {
        let mut custom = builtin_dark();
        custom.name = "Midnight".to_string();
        let mut config = AppConfig::default();
        config.themes.push(custom);
        config.current_theme = "Midnight".to_string();
        config.sanitize();
        assert_eq!(config.current_theme, "Midnight");
    }

    #[test]
    fn test_with_builtins_merged_adds_missing() {
        let mut config = AppConfig::default();
        config.themes.clear();
        config.with_builtins_merged();
        assert_eq!(config.theme_names(), vec!["Light", "Dark"]);
    }

    #[test]
    fn test_with_builtins_merged_preserves_custom() {
        let mut custom_light = builtin_light();
        custom_light.view.background = HexColor::rgb(255, 0, 0);

        let mut config = AppConfig::default();
        config.themes = vec![custom_light];
        config.with_builtins_merged();

        let light = config.find_theme("Light").unwrap();
        assert_eq!(light.view.background, HexColor::rgb(255, 0, 0));
        assert!(config.find_theme("Dark").is_some());
    }

    #[test]
    fn test_index_path() {
        let mut config = AppConfig::default();
        config.last_index_path = "/work/index.json".to_string();
        assert_eq!(config.index_path(), Some(PathBuf::from("/work/index.json")));
    }

    #[test]
    fn test_missing_fields_get_defaults() {
        let json = r#"{"current_theme": "Dark", "view_margins": {"left": 10.0}}"#;
        let parsed: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.current_theme, "Dark");
        assert_eq!(parsed.tab_stop_size, 8);
        assert_eq!(parsed.view_margins, Margins::new(10.0, 4.0, 4.0, 4.0));
    }

    #[test]
    fn test_config_path_file_name() {
        assert_eq!(
            AppConfig::config_path().file_name().and_then(|n| n.to_str()),
            Some(CONFIG_FILE)
        );
    }
}
