//! Frontend module for the egui viewer
//!
//! The viewer is a single window: a toolbar on top, the chart in the
//! central panel and a status bar at the bottom.
//!
//! # Redraw model
//!
//! The current dataset is held as an `Arc<Dataset>`. Every frame the app
//! hands that reference to its [`SunburstRenderer`]; the renderer only does
//! work when the reference differs from the one it drew last. Opening or
//! reloading a file creates a new `Arc`, which is what triggers a redraw.
//!
//! # Main Types
//!
//! - [`SunburstApp`] - Application state implementing [`eframe::App`]
//! - [`ChartCanvas`] - Retained egui drawing surface with hover tooltips
//! - [`AppAction`] - Actions emitted by panels

pub mod chart_view;
pub mod state;
mod status_bar;
mod toolbar;

pub use chart_view::{ChartCanvas, ChartTransform};
pub use state::AppAction;

use status_bar::{render_status_bar, StatusBarContext};
use toolbar::{render_toolbar, ToolbarContext};

use crate::config::{AppState, ChartConfig};
use crate::error::Result;
use crate::render::svg::export_svg;
use crate::render::SunburstRenderer;
use crate::types::Dataset;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Main application state for the sunburst viewer
pub struct SunburstApp {
    app_state: AppState,
    chart_config: ChartConfig,
    renderer: SunburstRenderer<ChartCanvas>,
    dataset: Option<Arc<Dataset>>,
    data_path: Option<PathBuf>,
    /// Load/export errors; validation errors come from the renderer
    last_error: Option<String>,
    /// Overrides the app data location for `app_state.json`
    state_file: Option<PathBuf>,
}

impl SunburstApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        app_state: AppState,
        chart_config: ChartConfig,
        initial_file: Option<PathBuf>,
    ) -> Self {
        Self::apply_visuals(&cc.egui_ctx, app_state.ui_preferences.dark_mode);
        Self::with_state(app_state, chart_config, initial_file)
    }

    /// Build the app without an egui context.
    pub fn with_state(
        app_state: AppState,
        chart_config: ChartConfig,
        initial_file: Option<PathBuf>,
    ) -> Self {
        let canvas = ChartCanvas::new(chart_config.width, chart_config.font_size);
        let renderer = SunburstRenderer::new(canvas, chart_config.layout(), chart_config.render());

        let mut app = Self {
            app_state,
            chart_config,
            renderer,
            dataset: None,
            data_path: None,
            last_error: None,
            state_file: None,
        };

        if let Some(path) = initial_file {
            app.handle_action(AppAction::OpenFile(path));
        }

        app
    }

    /// Persist app state to `path` instead of the app data directory.
    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = Some(path.into());
        self
    }

    fn apply_visuals(ctx: &egui::Context, dark_mode: bool) {
        if dark_mode {
            ctx.set_visuals(egui::Visuals::dark());
        } else {
            ctx.set_visuals(egui::Visuals::light());
        }
    }

    pub fn dataset(&self) -> Option<&Arc<Dataset>> {
        self.dataset.as_ref()
    }

    pub fn renderer(&self) -> &SunburstRenderer<ChartCanvas> {
        &self.renderer
    }

    pub fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Error to show in the status bar, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.last_error
            .as_deref()
            .or_else(|| self.renderer.last_error())
    }

    /// Apply a UI action.
    pub fn handle_action(&mut self, action: AppAction) {
        tracing::debug!("Handling action {:?}", action);
        match action {
            AppAction::OpenFile(path) => self.open_file(path),
            AppAction::ReloadFile => {
                if let Some(path) = self.data_path.clone() {
                    self.open_file(path);
                }
            }
            AppAction::ExportSvg(path) => {
                if let Err(e) = self.export_svg(&path) {
                    tracing::warn!("SVG export failed: {}", e);
                    self.last_error = Some(e.to_string());
                }
            }
            AppAction::SetColorScheme(scheme) => {
                self.chart_config.color_scheme = scheme;
                self.reconfigure();
                if let Err(e) = self.chart_config.save_default_location() {
                    tracing::warn!("Failed to save chart config: {}", e);
                }
            }
            AppAction::SetShowLabels(show) => {
                self.app_state.ui_preferences.show_labels = show;
                self.save_state();
            }
            AppAction::SetDarkMode(dark) => {
                self.app_state.ui_preferences.dark_mode = dark;
                self.save_state();
            }
            AppAction::ClearRecentFiles => {
                self.app_state.recent_files.clear();
                self.save_state();
            }
        }
    }

    fn open_file(&mut self, path: PathBuf) {
        match Dataset::load(&path) {
            Ok(dataset) => {
                self.app_state
                    .add_recent_file(&path, Some(dataset.root_name()));
                self.save_state();
                self.dataset = Some(Arc::new(dataset));
                self.data_path = Some(path);
                self.last_error = None;
                self.sync_renderer();
            }
            Err(e) => {
                tracing::warn!("Failed to open {:?}: {}", path, e);
                if self.app_state.recent_files.iter().any(|f| f.path == path) {
                    self.app_state.remove_recent_file(&path);
                    self.save_state();
                }
                self.dataset = None;
                self.data_path = None;
                self.last_error = Some(e.to_string());
                self.renderer.reset();
            }
        }
    }

    /// Hand the current dataset to the renderer; redraws only on a new reference.
    fn sync_renderer(&mut self) {
        if let Some(dataset) = &self.dataset {
            if let Err(e) = self.renderer.render(dataset) {
                tracing::debug!("Renderer rejected dataset: {}", e);
            }
        }
    }

    fn reconfigure(&mut self) {
        let layout = self.chart_config.layout();
        let render = self.chart_config.render();
        if let Err(e) = self.renderer.reconfigure(layout, render) {
            tracing::warn!("Redraw after configuration change failed: {}", e);
        }
    }

    fn export_svg(&self, path: &Path) -> Result<()> {
        let Some(dataset) = &self.dataset else {
            return Ok(());
        };
        export_svg(dataset, &self.chart_config, path)
    }

    fn save_state(&self) {
        let result = match &self.state_file {
            Some(path) => self.app_state.save_to(path),
            None => self.app_state.save(),
        };
        if let Err(e) = result {
            tracing::warn!("Failed to save app state: {}", e);
        }
    }
}

impl eframe::App for SunburstApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_renderer();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let actions = render_toolbar(
                ui,
                &ToolbarContext {
                    data_path: self.data_path.as_deref(),
                    recent_files: &self.app_state.recent_files,
                    chart_config: &self.chart_config,
                    preferences: &self.app_state.ui_preferences,
                    has_chart: self.renderer.scene().is_some(),
                },
            );
            for action in actions {
                if let AppAction::SetDarkMode(dark) = action {
                    Self::apply_visuals(ctx, dark);
                }
                self.handle_action(action);
            }
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            render_status_bar(
                ui,
                &StatusBarContext {
                    data_path: self.data_path.as_deref(),
                    scene: self.renderer.scene(),
                    last_error: self.error_message(),
                },
            );
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.dataset.is_none() {
                ui.centered_and_justified(|ui| {
                    ui.label("Open a JSON data file to draw a chart.");
                });
                return;
            }
            self.renderer
                .surface()
                .show(ui, self.app_state.ui_preferences.show_labels);
        });
    }

    fn save(&mut self, _storage: &mut dyn eframe::Storage) {
        self.save_state();
    }
}
