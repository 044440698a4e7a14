#![allow(dead_code)]

use std::path::{Path, PathBuf};

use egui_kittest::Harness;
use srcnav_config::AppConfig;
use srcnav_ui::{App, StartupArgs};
use tempfile::TempDir;

pub const A_C: &str = "int x;\nvoid f() { x = 1; }\n";
pub const B_C: &str = "extern int x;\nint g() { return x; }\n";

pub const INDEX: &str = r#"{
    "symbols": [
        { "name": "x", "category": "GlobalVariable",
          "definition": { "path": "a.c", "line": 1, "column": 5 } },
        { "name": "f", "category": "Function",
          "definition": { "path": "a.c", "line": 2, "column": 6 } }
    ],
    "refs": [
        { "path": "a.c", "line": 1, "column": 5, "end_column": 6, "symbol": "x" },
        { "path": "a.c", "line": 2, "column": 6, "end_column": 7, "symbol": "f" },
        { "path": "a.c", "line": 2, "column": 12, "end_column": 13, "symbol": "x" },
        { "path": "b.c", "line": 1, "column": 12, "end_column": 13, "symbol": "x" },
        { "path": "b.c", "line": 2, "column": 18, "end_column": 19, "symbol": "x" }
    ]
}"#;

/// Writes `a.c`, `b.c` and `index.json` into a fresh directory.
pub fn write_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.c"), A_C).unwrap();
    std::fs::write(dir.path().join("b.c"), B_C).unwrap();
    std::fs::write(dir.path().join("index.json"), INDEX).unwrap();
    dir
}

pub fn project_file(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

/// Creates a 1024x768 harness whose config lives in `dir`.
pub fn create_harness_in(dir: &Path, args: StartupArgs) -> Harness<'static, App> {
    let config_path = dir.join("srcnav.json");
    let config = AppConfig {
        current_theme: "Light".to_string(),
        ..AppConfig::default()
    };
    Harness::builder()
        .with_size(egui::Vec2::new(1024.0, 768.0))
        .build_eframe(move |cc| App::with_config(&cc.egui_ctx, config, config_path, args))
}

/// Creates a harness with no file, no index and a throwaway config dir.
pub fn create_harness() -> (Harness<'static, App>, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let harness = create_harness_in(dir.path(), StartupArgs::default());
    (harness, dir)
}

/// Creates a harness showing `file` from a fresh project with its index
/// loaded.
pub fn create_project_harness(file: &str) -> (Harness<'static, App>, TempDir) {
    let dir = write_project();
    let args = StartupArgs {
        file: Some(project_file(&dir, file)),
        index: Some(project_file(&dir, "index.json")),
        ..StartupArgs::default()
    };
    let harness = create_harness_in(dir.path(), args);
    (harness, dir)
}
