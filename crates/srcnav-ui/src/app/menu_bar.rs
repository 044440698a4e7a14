//! Menu bar rendering for the viewer application.
//!
//! Contains the File, Go and View menus.

use eframe::egui;

use super::{App, ThemeMode};
use crate::view::DEFAULT_FONT_SIZE;

impl App {
    /// Renders the menu bar with File, Go and View menus.
    pub(crate) fn show_menu_bar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open...").clicked() {
                    self.open_file_dialog();
                    ui.close();
                }
                if ui.button("Open Index...").clicked() {
                    self.open_index_dialog();
                    ui.close();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    ui.close();
                }
            });

            ui.menu_button("Go", |ui| {
                let history = self.history.availability();
                if ui
                    .add_enabled(history.back, egui::Button::new("Back        Alt+Left"))
                    .clicked()
                {
                    self.go_back();
                    ui.close();
                }
                if ui
                    .add_enabled(history.forward, egui::Button::new("Forward     Alt+Right"))
                    .clicked()
                {
                    self.go_forward();
                    ui.close();
                }
                ui.separator();
                if ui.button("Top         Home").clicked() {
                    self.widget.scroll_to_top();
                    ui.close();
                }
                if ui.button("Bottom      End").clicked() {
                    self.widget.scroll_to_bottom();
                    ui.close();
                }
            });

            ui.menu_button("View", |ui| {
                let mut show = self.show_line_numbers;
                if ui.checkbox(&mut show, "Line Numbers").changed() {
                    self.set_show_line_numbers(show);
                    ui.close();
                }
                ui.separator();

                ui.menu_button("Font Size", |ui| {
                    if ui.button("Larger").clicked() {
                        self.set_font_size(self.font_size + 1.0);
                        ui.close();
                    }
                    if ui.button("Smaller").clicked() {
                        self.set_font_size(self.font_size - 1.0);
                        ui.close();
                    }
                    if ui.button("Reset").clicked() {
                        self.set_font_size(DEFAULT_FONT_SIZE);
                        ui.close();
                    }
                });

                ui.menu_button("Theme", |ui| {
                    if ui
                        .radio(self.theme_mode.is_system(), "System")
                        .clicked()
                    {
                        self.set_theme_mode(ThemeMode::system(), ctx);
                        ui.close();
                    }
                    let names: Vec<String> =
                        self.available_themes.iter().map(|t| t.name.clone()).collect();
                    for name in names {
                        let selected = self.theme_mode.0 == name;
                        if ui.radio(selected, name.as_str()).clicked() {
                            self.set_theme_mode(ThemeMode(name), ctx);
                            ui.close();
                        }
                    }
                });
            });
        });
    }

    /// Opens a file dialog and displays the selected file.
    pub(crate) fn open_file_dialog(&mut self) {
        let mut dialog = rfd::FileDialog::new().set_title("Open File");
        if let Some(dir) = self.dialog_directory() {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.pick_file() {
            self.open_and_show(&path);
        }
    }

    /// Opens a file dialog and loads the selected symbol index.
    pub(crate) fn open_index_dialog(&mut self) {
        let dialog = rfd::FileDialog::new()
            .set_title("Open Symbol Index")
            .add_filter("Symbol index", &["json"]);
        if let Some(path) = dialog.pick_file() {
            self.load_index_or_report(&path);
        }
    }

    /// The displayed file's directory, so dialogs open next to it.
    fn dialog_directory(&self) -> Option<std::path::PathBuf> {
        self.widget
            .displayed_file()
            .and_then(|f| f.path())
            .and_then(|p| p.parent())
            .map(|p| p.to_path_buf())
    }
}
