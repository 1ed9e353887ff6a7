//! Sunburst viewer - Main Entry Point
//!
//! ```text
//! sunburst-rs [DATA_FILE] [--config CHART_TOML] [--export-svg OUT_SVG]
//! ```
//!
//! With `--export-svg` the chart is written to disk and no window is opened.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use sunburst_rs::{
    config::{AppState, ChartConfig},
    frontend::SunburstApp,
    render::svg::export_svg,
    types::Dataset,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Data file shown when nothing else is requested
const BUNDLED_DATA: &str = "data/data.json";

#[derive(Debug, Default, PartialEq, Parser)]
#[command(name = "sunburst-rs")]
#[command(about = "Radial partition (sunburst) chart viewer for hierarchical JSON data")]
struct CliArgs {
    /// JSON data file (nested tree or node table)
    data_file: Option<PathBuf>,

    /// Chart settings TOML, instead of chart.toml in the app data directory
    #[arg(long, value_name = "CHART_TOML")]
    config: Option<PathBuf>,

    /// Write the chart as SVG and exit without opening a window
    #[arg(long, value_name = "OUT_SVG")]
    export_svg: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sunburst_rs=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let chart_config = match &args.config {
        Some(path) => ChartConfig::load(path)?,
        None => ChartConfig::load_or_default(),
    };

    if let Some(out) = &args.export_svg {
        let data_file = args
            .data_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(BUNDLED_DATA));
        let dataset = Arc::new(Dataset::load(&data_file)?);
        export_svg(&dataset, &chart_config, out)?;
        return Ok(());
    }

    tracing::info!("Starting sunburst viewer");

    let mut app_state = AppState::load_or_default();
    app_state.cleanup_missing_files();

    let initial_file = args
        .data_file
        .or_else(|| app_state.get_last_file().map(|p| p.to_path_buf()))
        .or_else(|| {
            let bundled = PathBuf::from(BUNDLED_DATA);
            bundled.exists().then_some(bundled)
        });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 1020.0])
            .with_min_inner_size([400.0, 400.0])
            .with_title("Sunburst"),
        ..Default::default()
    };

    eframe::run_native(
        "Sunburst",
        native_options,
        Box::new(|cc| {
            Ok(Box::new(SunburstApp::new(
                cc,
                app_state,
                chart_config,
                initial_file,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {}", e))?;

    tracing::info!("Shutting down...");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let parsed =
            CliArgs::try_parse_from(["sunburst-rs", "tree.json", "--export-svg", "out.svg"]).unwrap();
        assert_eq!(parsed.data_file, Some(PathBuf::from("tree.json")));
        assert_eq!(parsed.export_svg, Some(PathBuf::from("out.svg")));
        assert!(parsed.config.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(CliArgs::try_parse_from(["sunburst-rs", "--export-svg"]).is_err());
        assert!(CliArgs::try_parse_from(["sunburst-rs", "--verbose"]).is_err());
        assert!(CliArgs::try_parse_from(["sunburst-rs", "a.json", "b.json"]).is_err());
        assert_eq!(
            CliArgs::try_parse_from(["sunburst-rs"]).unwrap(),
            CliArgs::default()
        );
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        CliArgs::command().debug_assert();
    }
}
