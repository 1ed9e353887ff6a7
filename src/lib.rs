//! # sunburst-rs: Radial partition chart viewer
//!
//! Loads a hierarchical JSON dataset, computes a sunburst (radial partition)
//! layout and draws it as wedges and labels, either into an interactive
//! egui window or into a standalone SVG document.
//!
//! ## Architecture
//!
//! - **Types**: the input dataset, nested ([`TreeNode`]) or flat ([`NodeTable`])
//! - **Hierarchy**: validated arena form; rejects cycles, negative values and empty trees
//! - **Layout**: [`RadialLayoutEngine`], a pure function from hierarchy to angles and radii
//! - **Render**: [`Scene`] construction and the [`SunburstRenderer`] that draws
//!   it onto a [`DrawSurface`] (SVG or the egui canvas)
//! - **Frontend**: the eframe/egui viewer with hover tooltips
//!
//! ## Configuration
//!
//! Application state (recent files, preferences) and chart settings are
//! stored in the platform-appropriate data directory under
//! `dev.hxyulin.sunburst-rs`:
//!
//! - **Linux**: `~/.local/share/dev.hxyulin.sunburst-rs/`
//! - **macOS**: `~/Library/Application Support/dev.hxyulin.sunburst-rs/`
//! - **Windows**: `%APPDATA%\dev.hxyulin.sunburst-rs\`
//!
//! ## Example
//!
//! ```
//! use sunburst_rs::{Hierarchy, LayoutConfig, RadialLayoutEngine, TreeNode};
//!
//! let tree = TreeNode::branch(
//!     "root",
//!     vec![TreeNode::leaf("A", 30.0), TreeNode::leaf("B", 10.0)],
//! );
//! let hierarchy = Hierarchy::from_tree(&tree).unwrap();
//! let layout = RadialLayoutEngine::new(LayoutConfig::default())
//!     .layout(&hierarchy)
//!     .unwrap();
//!
//! let a = layout.iter().nth(1).unwrap();
//! assert!((a.angle_width() - 1.5 * std::f64::consts::PI).abs() < 1e-9);
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod frontend;
pub mod hierarchy;
pub mod layout;
pub mod render;
pub mod types;

// Re-export commonly used types
pub use app::SunburstApp;
pub use config::{AppState, ChartConfig};
pub use error::{Result, SunburstError};
pub use hierarchy::{Hierarchy, NodeId};
pub use layout::{LayoutConfig, LayoutNode, RadialLayout, RadialLayoutEngine};
pub use render::{DrawSurface, Label, RenderConfig, Scene, SunburstRenderer, SvgSurface, Wedge};
pub use types::{Dataset, NodeTable, TableRecord, TreeNode};
