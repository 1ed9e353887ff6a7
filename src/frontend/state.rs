//! Action types for the frontend
//!
//! Toolbar and menu code returns `AppAction`s instead of mutating the app
//! directly; [`SunburstApp::handle_action`](super::SunburstApp::handle_action)
//! applies them in one place.

use std::path::PathBuf;

use crate::render::ColorScheme;

/// Actions that UI panels can emit
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Load a data file and make it the current dataset
    OpenFile(PathBuf),
    /// Re-read the current data file from disk
    ReloadFile,
    /// Write the current chart as an SVG document
    ExportSvg(PathBuf),
    SetColorScheme(ColorScheme),
    SetShowLabels(bool),
    SetDarkMode(bool),
    ClearRecentFiles,
}
