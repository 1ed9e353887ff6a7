//! Toolbar panel: file actions on the left, display options on the right.

use egui::{RichText, Ui};
use std::path::Path;

use crate::config::{ChartConfig, RecentFile, UiPreferences};
use crate::frontend::state::AppAction;
use crate::render::ColorScheme;

/// Context needed to render the toolbar.
pub struct ToolbarContext<'a> {
    pub data_path: Option<&'a Path>,
    pub recent_files: &'a [RecentFile],
    pub chart_config: &'a ChartConfig,
    pub preferences: &'a UiPreferences,
    pub has_chart: bool,
}

/// Render the main toolbar and return the actions the user triggered.
pub fn render_toolbar(ui: &mut Ui, ctx: &ToolbarContext<'_>) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        render_file_group(ui, ctx, &mut actions);

        ui.separator();

        render_display_group(ui, ctx, &mut actions);
    });

    actions
}

fn render_file_group(ui: &mut Ui, ctx: &ToolbarContext<'_>, actions: &mut Vec<AppAction>) {
    if ui
        .button("Open…")
        .on_hover_text("Open a hierarchical JSON data file")
        .clicked()
    {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Open Data File")
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            actions.push(AppAction::OpenFile(path));
        }
    }

    ui.add_enabled_ui(!ctx.recent_files.is_empty(), |ui| {
        ui.menu_button("Recent", |ui| {
            for recent in ctx.recent_files {
                if ui.button(recent.display_name()).clicked() {
                    actions.push(AppAction::OpenFile(recent.path.clone()));
                    ui.close();
                }
            }
            ui.separator();
            if ui.button("Clear Recent").clicked() {
                actions.push(AppAction::ClearRecentFiles);
                ui.close();
            }
        });
    });

    if ui
        .add_enabled(ctx.data_path.is_some(), egui::Button::new("Reload"))
        .on_hover_text("Re-read the data file from disk")
        .clicked()
    {
        actions.push(AppAction::ReloadFile);
    }

    if ui
        .add_enabled(ctx.has_chart, egui::Button::new("Export SVG…"))
        .on_hover_text("Save the chart as a vector image")
        .clicked()
    {
        let file_name = ctx
            .data_path
            .and_then(|p| p.file_stem())
            .map(|s| format!("{}.svg", s.to_string_lossy()))
            .unwrap_or_else(|| "sunburst.svg".to_string());
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Export SVG")
            .add_filter("SVG", &["svg"])
            .set_file_name(file_name)
            .save_file()
        {
            actions.push(AppAction::ExportSvg(path));
        }
    }
}

fn render_display_group(ui: &mut Ui, ctx: &ToolbarContext<'_>, actions: &mut Vec<AppAction>) {
    ui.label(RichText::new("Colors:").small());
    let current = ctx.chart_config.color_scheme;
    egui::ComboBox::from_id_salt("color_scheme")
        .selected_text(current.display_name())
        .show_ui(ui, |ui| {
            for scheme in ColorScheme::all() {
                if ui
                    .selectable_label(*scheme == current, scheme.display_name())
                    .clicked()
                    && *scheme != current
                {
                    actions.push(AppAction::SetColorScheme(*scheme));
                }
            }
        });

    let mut show_labels = ctx.preferences.show_labels;
    if ui.checkbox(&mut show_labels, "Labels").changed() {
        actions.push(AppAction::SetShowLabels(show_labels));
    }

    let mut dark_mode = ctx.preferences.dark_mode;
    if ui.checkbox(&mut dark_mode, "Dark").changed() {
        actions.push(AppAction::SetDarkMode(dark_mode));
    }
}
