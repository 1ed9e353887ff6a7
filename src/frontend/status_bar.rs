//! Status bar panel: bottom bar showing the data file, chart stats and errors.

use egui::{Color32, RichText, Ui};
use std::path::Path;

use crate::render::Scene;

/// Context needed to render the status bar.
pub struct StatusBarContext<'a> {
    pub data_path: Option<&'a Path>,
    pub scene: Option<&'a Scene>,
    pub last_error: Option<&'a str>,
}

/// Render the status bar.
pub fn render_status_bar(ui: &mut Ui, ctx: &StatusBarContext<'_>) {
    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let file = ctx
            .data_path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "No data file".to_string());
        ui.label(RichText::new(file).small());

        if let Some(scene) = ctx.scene {
            ui.separator();
            ui.label(RichText::new(format!("Wedges: {}", scene.wedges.len())).small());
            ui.separator();
            ui.label(RichText::new(format!("Labels: {}", scene.labels.len())).small());
        }

        if let Some(error) = ctx.last_error {
            ui.separator();
            ui.colored_label(Color32::from_rgb(255, 99, 71), RichText::new(error).small());
        }
    });
}
