//! Top-level application tying together the source widget, navigation
//! history, menus, status bar and cross-reference report.

mod history;
mod menu_bar;
mod status_bar;
mod xref;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use eframe::egui;
use egui::{Color32, Key, Modifiers};

use srcnav_config::{AppConfig, Margins, ThemeDefinition};
use srcnav_core::{MemoryIndex, NullSymbolSource, SourceFile, SymbolLocation, SymbolSource};

use crate::view::{SourceView, SourceWidget, SyntectLexer, ViewEvent, ViewTheme};

pub use history::{HistoryEntry, NavigationHistory};
pub use xref::CrossReferenceReport;

/// Smallest and largest font size reachable from the View menu.
const FONT_SIZE_RANGE: (f32, f32) = (6.0, 72.0);

/// Arguments passed from the command line to the application.
#[derive(Debug, Clone, Default)]
pub struct StartupArgs {
    /// File to display on startup.
    pub file: Option<PathBuf>,
    /// Symbol index to load instead of the configured one.
    pub index: Option<PathBuf>,
    /// 1-based line of the identifier to select once the file is shown.
    pub line: Option<usize>,
    /// 1-based column of the identifier to select. Defaults to 1.
    pub column: Option<usize>,
}

/// Which color theme to use.
///
/// Wraps a string name. Special values: `"System"`, `"Dark"`, `"Light"`.
/// Any other value refers to a custom theme name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeMode(pub String);

impl Default for ThemeMode {
    fn default() -> Self {
        Self::system()
    }
}

impl ThemeMode {
    pub fn system() -> Self {
        Self("System".to_string())
    }

    pub fn dark() -> Self {
        Self("Dark".to_string())
    }

    pub fn light() -> Self {
        Self("Light".to_string())
    }

    /// Returns true if this is the "System" mode.
    pub fn is_system(&self) -> bool {
        self.0 == "System"
    }

    /// Resolves "System" to a concrete theme name using the OS preference.
    /// Non-system modes return their own name.
    pub fn resolve(&self) -> &str {
        if self.is_system() {
            match dark_light::detect() {
                Ok(dark_light::Mode::Light) => "Light",
                _ => "Dark",
            }
        } else {
            &self.0
        }
    }
}

/// The main application state.
pub struct App {
    pub widget: SourceWidget,
    pub theme_mode: ThemeMode,
    pub available_themes: Vec<ThemeDefinition>,
    pub font_size: f32,
    pub tab_stop_size: usize,
    pub show_line_numbers: bool,
    view_margins: Margins,
    gutter_margins: Margins,
    pub history: NavigationHistory,
    files: HashMap<PathBuf, Arc<SourceFile>>,
    index_path: Option<PathBuf>,
    /// Last navigation or error message, shown in the status bar.
    pub status_message: String,
    xref: Option<CrossReferenceReport>,
    /// Identifier selection deferred until fonts exist on the first frame.
    pending_selection: Option<(usize, usize)>,
    config_path: PathBuf,
    clipboard: Option<arboard::Clipboard>,
    last_window_title: String,
}

impl App {
    /// Creates a new application instance from the user's config file.
    pub fn new(cc: &eframe::CreationContext<'_>, args: StartupArgs) -> Self {
        let config_path = AppConfig::config_path();
        let config = AppConfig::load_or_create(&config_path);
        Self::with_config(&cc.egui_ctx, config, config_path, args)
    }

    /// Creates an application from an already loaded config. Preferences are
    /// written back to `config_path` on exit.
    pub fn with_config(
        ctx: &egui::Context,
        config: AppConfig,
        config_path: PathBuf,
        args: StartupArgs,
    ) -> Self {
        let mut theme_mode = ThemeMode(config.current_theme.clone());
        let resolved_name = theme_mode.resolve().to_string();

        // Resolve theme definition; fall back to System if the theme doesn't exist
        let theme_def = match config.find_theme(&resolved_name).cloned() {
            Some(def) => def,
            None => {
                tracing::warn!(
                    "Theme '{}' not found, falling back to System",
                    resolved_name
                );
                theme_mode = ThemeMode::system();
                let fallback_name = theme_mode.resolve().to_string();
                config
                    .find_theme(&fallback_name)
                    .cloned()
                    .unwrap_or_else(srcnav_config::theme::builtin_dark)
            }
        };
        Self::apply_theme_visuals(ctx, theme_def.dark_mode);

        let view = SourceView::new(Arc::new(NullSymbolSource), Box::new(SyntectLexer::new()));
        let mut widget = SourceWidget::new(view);
        widget.set_theme(ViewTheme::from_config(&theme_def));
        widget.set_font_size(config.font_size);
        widget.set_tab_stop_size(config.tab_stop_size);
        widget.set_margins(config.view_margins, config.gutter_margins);
        widget.set_show_line_numbers(config.show_line_numbers);

        let index_path = args.index.clone().or_else(|| config.index_path());

        let mut app = Self {
            widget,
            theme_mode,
            available_themes: config.themes,
            font_size: config.font_size,
            tab_stop_size: config.tab_stop_size,
            show_line_numbers: config.show_line_numbers,
            view_margins: config.view_margins,
            gutter_margins: config.gutter_margins,
            history: NavigationHistory::new(),
            files: HashMap::new(),
            index_path: None,
            status_message: String::new(),
            xref: None,
            pending_selection: None,
            config_path,
            clipboard: arboard::Clipboard::new().ok(),
            last_window_title: String::new(),
        };

        if let Some(path) = index_path {
            app.load_index_or_report(&path);
        }

        if let Some(path) = &args.file {
            match app.show_file(path) {
                Ok(()) => {
                    if let Some(line) = args.line {
                        app.pending_selection = Some((line, args.column.unwrap_or(1)));
                    }
                }
                Err(e) => app.report_error("Failed to open file", &e),
            }
        }

        app
    }

    /// Applies egui visuals for a light or dark theme.
    fn apply_theme_visuals(ctx: &egui::Context, dark_mode: bool) {
        let mut visuals = if dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        // Widget rounding: consistent 4px on all states
        let widget_rounding = egui::CornerRadius::same(4);
        visuals.widgets.noninteractive.corner_radius = widget_rounding;
        visuals.widgets.inactive.corner_radius = widget_rounding;
        visuals.widgets.hovered.corner_radius = widget_rounding;
        visuals.widgets.active.corner_radius = widget_rounding;
        visuals.widgets.open.corner_radius = widget_rounding;

        visuals.window_corner_radius = egui::CornerRadius::same(6);
        visuals.menu_corner_radius = egui::CornerRadius::same(4);

        visuals.widgets.noninteractive.bg_stroke.width = 0.0;
        visuals.window_stroke.width = 1.0;

        visuals.popup_shadow = egui::Shadow {
            offset: [0, 2],
            blur: 8,
            spread: 0,
            color: Color32::from_black_alpha(40),
        };

        ctx.set_visuals(visuals);

        ctx.style_mut(|style| {
            style.spacing.item_spacing = egui::Vec2::new(8.0, 6.0);
            style.spacing.button_padding = egui::Vec2::new(8.0, 4.0);
            style.spacing.window_margin = egui::Margin::same(12);
        });
    }

    /// Switches to a new theme mode and applies all theme changes.
    pub fn set_theme_mode(&mut self, mode: ThemeMode, ctx: &egui::Context) {
        self.theme_mode = mode;
        let resolved_name = self.theme_mode.resolve().to_string();

        let theme_def = match self
            .available_themes
            .iter()
            .find(|t| t.name == resolved_name)
            .cloned()
        {
            Some(def) => def,
            None => {
                tracing::warn!(
                    "Theme '{}' not found, falling back to System",
                    resolved_name
                );
                self.theme_mode = ThemeMode::system();
                let fallback_name = self.theme_mode.resolve().to_string();
                self.available_themes
                    .iter()
                    .find(|t| t.name == fallback_name)
                    .cloned()
                    .unwrap_or_else(srcnav_config::theme::builtin_dark)
            }
        };

        self.widget.set_theme(ViewTheme::from_config(&theme_def));
        Self::apply_theme_visuals(ctx, theme_def.dark_mode);
    }

    pub fn set_font_size(&mut self, size: f32) {
        let (min, max) = FONT_SIZE_RANGE;
        self.font_size = size.clamp(min, max);
        self.widget.set_font_size(self.font_size);
    }

    pub fn set_show_line_numbers(&mut self, show: bool) {
        self.show_line_numbers = show;
        self.widget.set_show_line_numbers(show);
    }

    pub fn index_path(&self) -> Option<&Path> {
        self.index_path.as_deref()
    }

    pub fn cross_references(&self) -> Option<&CrossReferenceReport> {
        self.xref.as_ref()
    }

    /// Loads a symbol index and hands it to the view.
    ///
    /// # Errors
    ///
    /// Returns an error if the index cannot be read or parsed. The current
    /// symbol source stays in place.
    pub fn load_index(&mut self, path: &Path) -> Result<()> {
        let index = MemoryIndex::load(path)?;
        self.status_message = format!(
            "Loaded index with {} symbols",
            index.symbol_count()
        );
        let symbols: Arc<dyn SymbolSource> = Arc::new(index);
        self.widget.set_symbol_source(symbols);
        self.index_path = Some(path.to_path_buf());
        Ok(())
    }

    fn load_index_or_report(&mut self, path: &Path) {
        if let Err(e) = self.load_index(path) {
            self.report_error("Failed to load index", &e);
        }
    }

    fn report_error(&mut self, what: &str, e: &anyhow::Error) {
        tracing::error!("{what}: {e:#}");
        self.status_message = format!("{what}: {e}");
    }

    /// Returns the file at `path`, reading it on first use. Later calls hand
    /// back the same `Arc`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn open_file(&mut self, path: &Path) -> Result<Arc<SourceFile>> {
        let key = normalize_path(path);
        if let Some(file) = self.files.get(&key) {
            return Ok(Arc::clone(file));
        }
        let file = Arc::new(SourceFile::open(&key)?);
        self.files.insert(key, Arc::clone(&file));
        Ok(file)
    }

    /// Displays the file at `path` without touching history.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn show_file(&mut self, path: &Path) -> Result<()> {
        let file = self.open_file(path)?;
        self.widget.set_displayed_file(Some(file));
        Ok(())
    }

    /// Opens a file as a fresh starting point, recording where we were.
    pub fn open_and_show(&mut self, path: &Path) {
        let current = self.current_entry();
        match self.show_file(path) {
            Ok(()) => {
                if let Some(entry) = current {
                    self.history.push(entry);
                }
                self.status_message.clear();
            }
            Err(e) => self.report_error("Failed to open file", &e),
        }
    }

    fn current_entry(&self) -> Option<HistoryEntry> {
        let path = self.widget.displayed_file()?.path()?;
        Some(HistoryEntry::new(path, self.widget.viewport_origin()))
    }

    /// Shows `target`'s file and selects the identifier there, pushing the
    /// current place onto the history.
    pub fn navigate_to(&mut self, ctx: &egui::Context, target: &SymbolLocation) {
        let file = match self.open_file(&target.path) {
            Ok(file) => file,
            Err(e) => {
                self.report_error("Failed to open definition", &e);
                return;
            }
        };
        if let Some(entry) = self.current_entry() {
            self.history.push(entry);
        }
        self.widget.set_displayed_file(Some(file));
        self.widget.select_identifier(ctx, target.line, target.column);
        tracing::debug!("navigated to {target}");
        self.status_message = format!("Navigated to {target}");
    }

    pub fn go_back(&mut self) {
        let Some(current) = self.current_entry() else {
            return;
        };
        let Some(target) = self.history.peek_back().cloned() else {
            return;
        };
        match self.restore(&target) {
            Ok(()) => {
                self.history.go_back(current);
            }
            Err(e) => self.report_error("Failed to reopen file", &e),
        }
    }

    pub fn go_forward(&mut self) {
        let Some(current) = self.current_entry() else {
            return;
        };
        let Some(target) = self.history.peek_forward().cloned() else {
            return;
        };
        match self.restore(&target) {
            Ok(()) => {
                self.history.go_forward(current);
            }
            Err(e) => self.report_error("Failed to reopen file", &e),
        }
    }

    /// Shows `entry`; history is left to the caller.
    fn restore(&mut self, entry: &HistoryEntry) -> Result<()> {
        let file = self.open_file(&entry.path)?;
        self.widget.set_displayed_file(Some(file));
        self.widget.set_viewport_origin(entry.origin);
        self.status_message.clear();
        Ok(())
    }

    fn displayed_path(&self) -> Option<PathBuf> {
        self.widget
            .displayed_file()
            .and_then(|f| f.path())
            .map(Path::to_path_buf)
    }

    fn copy_file_path(&mut self) {
        let Some(path) = self.displayed_path() else {
            return;
        };
        let text = path.display().to_string();
        match self.clipboard.as_mut() {
            Some(clipboard) => match clipboard.set_text(text) {
                Ok(()) => self.status_message = "Copied file path".to_string(),
                Err(e) => tracing::warn!("Failed to copy file path: {e}"),
            },
            None => tracing::warn!("Clipboard unavailable"),
        }
    }

    fn reveal_in_sidebar(&mut self) {
        let Some(path) = self.displayed_path() else {
            return;
        };
        if let Err(e) = opener::reveal(&path) {
            tracing::warn!("Failed to reveal {}: {e}", path.display());
            self.status_message = format!("Failed to reveal file: {e}");
        }
    }

    /// Opens the cross-reference report for `symbol`.
    pub fn show_cross_references(&mut self, symbol: String) {
        let references = self.widget.view().symbol_source().references_to(&symbol);
        tracing::debug!("{} references to {symbol}", references.len());
        self.xref = Some(CrossReferenceReport::new(symbol, references));
    }

    /// Acts on everything the view reported this frame.
    pub fn handle_view_events(&mut self, ctx: &egui::Context) {
        for event in self.widget.take_events() {
            match event {
                ViewEvent::GoBack => self.go_back(),
                ViewEvent::GoForward => self.go_forward(),
                ViewEvent::CopyFilePath => self.copy_file_path(),
                ViewEvent::RevealInSidebar => self.reveal_in_sidebar(),
                ViewEvent::CrossReferences(symbol) => self.show_cross_references(symbol),
                ViewEvent::WordActivated(range) => {
                    self.status_message = if range.is_empty() {
                        String::new()
                    } else {
                        format!("Selected {}", range.start)
                    };
                }
                ViewEvent::Navigate(target) => self.navigate_to(ctx, &target),
            }
        }
    }

    /// Home/End scroll, Alt+Left/Right step through history.
    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        if ctx.wants_keyboard_input() || self.widget.is_menu_open() {
            return;
        }
        let (home, end, back, forward) = ctx.input_mut(|i| {
            (
                i.consume_key(Modifiers::NONE, Key::Home),
                i.consume_key(Modifiers::NONE, Key::End),
                i.consume_key(Modifiers::ALT, Key::ArrowLeft),
                i.consume_key(Modifiers::ALT, Key::ArrowRight),
            )
        });
        if home {
            self.widget.scroll_to_top();
        }
        if end {
            self.widget.scroll_to_bottom();
        }
        if back {
            self.go_back();
        }
        if forward {
            self.go_forward();
        }
    }

    /// Updates the OS window title to show the displayed file name.
    ///
    /// Only sends the viewport command when the title actually changes,
    /// to avoid triggering unnecessary repaints.
    fn update_window_title(&mut self, ctx: &egui::Context) {
        let title = match self.widget.displayed_file() {
            Some(file) => format!("{} - srcnav", file.display_name()),
            None => "srcnav".to_string(),
        };
        if title != self.last_window_title {
            self.last_window_title.clone_from(&title);
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title));
        }
    }

    fn show_cross_reference_window(&mut self, ctx: &egui::Context) {
        let mut picked = None;
        if let Some(report) = self.xref.as_mut() {
            picked = report.show(ctx);
            if !report.is_open() {
                self.xref = None;
            }
        }
        if let Some(target) = picked {
            self.navigate_to(ctx, &target);
        }
    }

    /// Preferences as they should be written back to disk.
    pub fn to_config(&self) -> AppConfig {
        AppConfig {
            current_theme: self.theme_mode.0.clone(),
            font_size: self.font_size,
            tab_stop_size: self.tab_stop_size,
            show_line_numbers: self.show_line_numbers,
            view_margins: self.view_margins,
            gutter_margins: self.gutter_margins,
            last_index_path: self
                .index_path
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            themes: self.available_themes.clone(),
        }
    }
}

/// Absolute, symlink-free form of `path` used as the file cache key.
fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    })
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some((line, column)) = self.pending_selection.take() {
            self.widget.select_identifier(ctx, line, column);
        }

        self.handle_shortcuts(ctx);
        self.update_window_title(ctx);

        let panel_fill = ctx.style().visuals.panel_fill;
        let extreme_bg = ctx.style().visuals.extreme_bg_color;

        egui::TopBottomPanel::top("menu_bar")
            .frame(
                egui::Frame::new()
                    .fill(panel_fill)
                    .inner_margin(egui::Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                self.show_menu_bar(ui, ctx);
            });

        egui::TopBottomPanel::bottom("status_bar")
            .max_height(24.0)
            .frame(
                egui::Frame::new()
                    .fill(extreme_bg)
                    .inner_margin(egui::Margin::symmetric(8, 3)),
            )
            .show(ctx, |ui| {
                self.show_status_bar(ui);
            });

        let background = self.widget.view().theme().background;
        let availability = self.history.availability();
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(background))
            .show(ctx, |ui| {
                self.widget.show(ui, availability);
            });

        self.handle_view_events(ctx);
        self.show_cross_reference_window(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.to_config().save(&self.config_path) {
            tracing::warn!("Failed to save config on exit: {e}");
        }
    }
}
