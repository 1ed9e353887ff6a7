//! Viewer entry types
//!
//! `main.rs` only needs [`SunburstApp`] to open a window; the action enum is
//! re-exported for callers that drive the viewer programmatically.

pub use crate::frontend::SunburstApp;

pub use crate::frontend::AppAction;
