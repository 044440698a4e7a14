#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

/// A read-only source navigator with syntax and symbol-aware coloring.
#[derive(Parser, Debug)]
#[command(name = "srcnav", version, about)]
struct Cli {
    /// Source file to display on startup.
    file: Option<PathBuf>,

    /// Symbol index (JSON) to load instead of the last used one.
    #[arg(long)]
    index: Option<PathBuf>,

    /// 1-based line of the identifier to select.
    #[arg(long, requires = "file")]
    line: Option<usize>,

    /// 1-based column of the identifier to select.
    #[arg(long, requires = "line")]
    column: Option<usize>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Starting srcnav");

    let startup_args = srcnav_ui::StartupArgs {
        file: cli.file,
        index: cli.index,
        line: cli.line,
        column: cli.column,
    };

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };

    eframe::run_native(
        "srcnav",
        native_options,
        Box::new(move |cc| Ok(Box::new(srcnav_ui::App::new(cc, startup_args)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
