//! Configuration module for sunburst-rs
//!
//! This module handles:
//! - Application state persistence (recent data files, last opened file)
//! - Chart settings ([`ChartConfig`]) stored as TOML
//!
//! # App Data Location
//!
//! Application data is stored in the platform-appropriate location:
//! - **Linux**: `~/.local/share/dev.hxyulin.sunburst-rs/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.sunburst-rs/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.sunburst-rs\`
//!
//! # Files
//!
//! - `app_state.json` - Recent data files and UI preferences
//! - `chart.toml` - Chart geometry and presentation settings
//!
//! # Example
//!
//! ```ignore
//! use sunburst_rs::config::{AppState, ChartConfig};
//!
//! let mut state = AppState::load_or_default();
//! let chart = ChartConfig::load_or_default();
//!
//! state.add_recent_file("data/data.json");
//! state.save()?;
//! ```

pub mod chart;

pub use chart::*;

use crate::error::{Result, SunburstError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Application identifier for data directories
pub const APP_ID: &str = "dev.hxyulin.sunburst-rs";

/// App state filename
pub const APP_STATE_FILE: &str = "app_state.json";

/// Maximum number of recent data files to remember
pub const MAX_RECENT_FILES: usize = 10;

// ==================== App Data Directory ====================

/// Get the application data directory path
pub fn app_data_dir() -> Option<PathBuf> {
    dirs_next::data_dir().map(|p| p.join(APP_ID))
}

/// Ensure the app data directory exists
pub fn ensure_app_data_dir() -> Result<PathBuf> {
    let dir = app_data_dir().ok_or_else(|| {
        SunburstError::Config("Could not determine app data directory".to_string())
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| {
            SunburstError::Config(format!("Failed to create app data directory: {}", e))
        })?;
    }

    Ok(dir)
}

/// Get the path to the app state file
pub fn app_state_path() -> Option<PathBuf> {
    app_data_dir().map(|p| p.join(APP_STATE_FILE))
}

// ==================== Recent File Entry ====================

/// A recently opened data file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentFile {
    pub path: PathBuf,

    /// Root node name at the time the file was opened
    #[serde(default)]
    pub root_name: Option<String>,

    /// Last opened timestamp (Unix seconds)
    pub last_opened: u64,
}

impl RecentFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        Self {
            path: path.into(),
            root_name: None,
            last_opened: now,
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Menu label: root name if known, else the file name
    pub fn display_name(&self) -> String {
        match &self.root_name {
            Some(name) => format!("{} ({})", name, self.path.display()),
            None => self.path.display().to_string(),
        }
    }
}

// ==================== App State ====================

/// Persistent application state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppState {
    /// Version for future migration support
    #[serde(default = "default_app_state_version")]
    pub version: u32,

    #[serde(default)]
    pub recent_files: Vec<RecentFile>,

    /// Data file shown when the viewer was last closed
    #[serde(default)]
    pub last_file: Option<PathBuf>,

    #[serde(default)]
    pub ui_preferences: UiPreferences,
}

fn default_app_state_version() -> u32 {
    1
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            version: 1,
            recent_files: Vec::new(),
            last_file: None,
            ui_preferences: UiPreferences::default(),
        }
    }
}

impl AppState {
    /// Load app state from the default location
    pub fn load() -> Result<Self> {
        let path = app_state_path().ok_or_else(|| {
            SunburstError::Config("Could not determine app state path".to_string())
        })?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load app state from an explicit path
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SunburstError::Config(format!("Failed to read app state: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| SunburstError::Config(format!("Failed to parse app state: {}", e)))
    }

    /// Load app state, returning defaults on any error
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load app state, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save app state to the default location
    pub fn save(&self) -> Result<()> {
        let dir = ensure_app_data_dir()?;
        self.save_to(dir.join(APP_STATE_FILE))
    }

    /// Save app state to an explicit path
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SunburstError::Config(format!("Failed to serialize app state: {}", e)))?;

        std::fs::write(path.as_ref(), content)
            .map_err(|e| SunburstError::Config(format!("Failed to write app state: {}", e)))
    }

    /// Add or refresh a recent file and make it the last file
    pub fn add_recent_file(&mut self, path: impl AsRef<Path>, root_name: Option<&str>) {
        let path = path.as_ref().to_path_buf();

        self.recent_files.retain(|f| f.path != path);

        let mut entry = RecentFile::new(path.clone());
        entry.root_name = root_name.map(|s| s.to_string());
        self.recent_files.insert(0, entry);

        self.recent_files.truncate(MAX_RECENT_FILES);

        self.last_file = Some(path);
    }

    pub fn remove_recent_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        self.recent_files.retain(|f| f.path != path);

        if self.last_file.as_deref() == Some(path) {
            self.last_file = None;
        }
    }

    /// Drop recent files that no longer exist
    pub fn cleanup_missing_files(&mut self) {
        self.recent_files.retain(|f| f.exists());

        if let Some(ref last) = self.last_file {
            if !last.exists() {
                self.last_file = None;
            }
        }
    }

    /// The last file, if it still exists
    pub fn get_last_file(&self) -> Option<&Path> {
        self.last_file
            .as_ref()
            .filter(|p| p.exists())
            .map(|p| p.as_path())
    }
}

/// UI preferences that persist across data files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiPreferences {
    #[serde(default = "default_true")]
    pub dark_mode: bool,

    /// Show text labels on wedges
    #[serde(default = "default_true")]
    pub show_labels: bool,
}

fn default_true() -> bool {
    true
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            show_labels: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_default() {
        let state = AppState::default();
        assert!(state.recent_files.is_empty());
        assert!(state.last_file.is_none());
        assert_eq!(state.version, 1);
        assert!(state.ui_preferences.show_labels);
    }

    #[test]
    fn test_add_recent_file() {
        let mut state = AppState::default();

        state.add_recent_file("/data/a.json", Some("flare"));
        assert_eq!(state.recent_files.len(), 1);
        assert_eq!(state.recent_files[0].root_name.as_deref(), Some("flare"));

        state.add_recent_file("/data/b.json", None);
        assert_eq!(state.recent_files.len(), 2);
        assert_eq!(state.recent_files[0].path, PathBuf::from("/data/b.json"));

        // Re-adding moves to the front without duplicating
        state.add_recent_file("/data/a.json", Some("flare"));
        assert_eq!(state.recent_files.len(), 2);
        assert_eq!(state.recent_files[0].path, PathBuf::from("/data/a.json"));
        assert_eq!(state.last_file, Some(PathBuf::from("/data/a.json")));
    }

    #[test]
    fn test_recent_files_max_limit() {
        let mut state = AppState::default();
        for i in 0..15 {
            state.add_recent_file(format!("/data/{}.json", i), None);
        }
        assert_eq!(state.recent_files.len(), MAX_RECENT_FILES);
        assert_eq!(state.recent_files[0].path, PathBuf::from("/data/14.json"));
    }

    #[test]
    fn test_remove_recent_file_clears_last() {
        let mut state = AppState::default();
        state.add_recent_file("/data/a.json", None);
        state.remove_recent_file("/data/a.json");
        assert!(state.recent_files.is_empty());
        assert!(state.last_file.is_none());
    }

    #[test]
    fn test_app_state_roundtrip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(APP_STATE_FILE);

        let mut state = AppState::default();
        state.add_recent_file("/data/a.json", Some("root"));
        state.ui_preferences.dark_mode = false;
        state.save_to(&path).unwrap();

        let loaded = AppState::load_from(&path).unwrap();
        assert_eq!(loaded.recent_files.len(), 1);
        assert!(!loaded.ui_preferences.dark_mode);
    }

    #[test]
    fn test_app_state_missing_fields_use_defaults() {
        let state: AppState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.version, 1);
        assert!(state.ui_preferences.dark_mode);
    }
}
