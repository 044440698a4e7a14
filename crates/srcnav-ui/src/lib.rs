//! egui front end of the source navigator.

pub mod app;
pub mod view;

pub use app::{App, StartupArgs, ThemeMode};
