//! Status bar rendering for the viewer application.
//!
//! Shows the encoding, line count and last message on the left, the
//! displayed file path on the right.

use eframe::egui;
use egui::{Color32, RichText};

use super::App;

impl App {
    /// Renders the status bar at the bottom of the window.
    pub(crate) fn show_status_bar(&mut self, ui: &mut egui::Ui) {
        let file = self.widget.displayed_file().cloned();
        ui.horizontal(|ui| {
            match &file {
                Some(file) => {
                    ui.add(egui::Label::new(file.encoding().to_string()).selectable(false));
                    ui.separator();
                    ui.add(
                        egui::Label::new(format!("{} lines", file.line_count())).selectable(false),
                    );
                }
                None => {
                    ui.add(egui::Label::new("No file").selectable(false));
                }
            }

            if !self.status_message.is_empty() {
                ui.separator();
                ui.add(egui::Label::new(self.status_message.as_str()).selectable(false));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(path) = file.as_ref().and_then(|f| f.path()) {
                    ui.add(
                        egui::Label::new(
                            RichText::new(path.display().to_string())
                                .small()
                                .color(Color32::GRAY),
                        )
                        .selectable(false),
                    );
                }
                if let Some(index) = &self.index_path {
                    if file.is_some() {
                        ui.separator();
                    }
                    let name = index
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| index.display().to_string());
                    ui.add(
                        egui::Label::new(
                            RichText::new(format!("Index: {name}"))
                                .small()
                                .color(Color32::GRAY),
                        )
                        .selectable(false),
                    );
                }
            });
        });
    }
}
