//! Cross-reference report window.

use eframe::egui;
use srcnav_core::SymbolLocation;

/// Every known reference of one symbol, shown in a floating window.
#[derive(Debug, Clone)]
pub struct CrossReferenceReport {
    symbol: String,
    references: Vec<SymbolLocation>,
    open: bool,
}

impl CrossReferenceReport {
    pub fn new(symbol: impl Into<String>, references: Vec<SymbolLocation>) -> Self {
        Self {
            symbol: symbol.into(),
            references,
            open: true,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn references(&self) -> &[SymbolLocation] {
        &self.references
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn title(&self) -> String {
        format!("Cross-references: {}", self.symbol)
    }

    /// Shows the window. Returns the reference the user clicked, which also
    /// closes the window.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SymbolLocation> {
        let mut picked = None;
        let mut open = self.open;
        egui::Window::new(self.title())
            .id(egui::Id::new("cross_references"))
            .open(&mut open)
            .collapsible(false)
            .resizable(true)
            .default_width(420.0)
            .show(ctx, |ui| {
                if self.references.is_empty() {
                    ui.label("No references found");
                    return;
                }
                ui.label(format!("{} references", self.references.len()));
                ui.separator();
                egui::ScrollArea::vertical()
                    .max_height(320.0)
                    .show(ui, |ui| {
                        for location in &self.references {
                            if ui.link(location.to_string()).clicked() {
                                picked = Some(location.clone());
                            }
                        }
                    });
            });
        self.open = open && picked.is_none();
        picked
    }
}
