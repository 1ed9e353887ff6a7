//! End-to-end tests: data file -> hierarchy -> layout -> scene -> surface

mod common;

use common::builders::{cyclic_table, TreeBuilder};
use std::f64::consts::PI;
use std::sync::Arc;
use sunburst_rs::render::svg::{export_svg, render_svg};
use sunburst_rs::{
    ChartConfig, Dataset, LayoutConfig, RenderConfig, Scene, SunburstError,
    SunburstRenderer, SvgSurface,
};

#[test]
fn test_sample_data_renders() {
    let dataset = Arc::new(Dataset::load(common::sample_data_path()).unwrap());
    let surface = render_svg(&dataset, &ChartConfig::default()).unwrap();

    assert!(surface.path_count() > 50);
    assert!(surface.text_count() > 0);
    let doc = surface.to_document();
    assert!(doc.starts_with("<svg"));
    assert!(doc.contains("<title>flare/analytics/cluster/MergeEdge\n743</title>"));
}

#[test]
fn test_load_nested_file_and_export() {
    let (dir, path) = common::write_temp_json(
        r#"{"name":"root","children":[{"name":"A","value":30},{"name":"B","value":10}]}"#,
    );
    let dataset = Arc::new(Dataset::load(&path).unwrap());
    let out = dir.path().join("chart.svg");
    export_svg(&dataset, &ChartConfig::default(), &out).unwrap();

    let doc = std::fs::read_to_string(&out).unwrap();
    assert_eq!(doc.matches("<path").count(), 2);
    assert!(doc.contains("<title>root/A\n30</title>"));
    assert!(doc.contains("<title>root/B\n10</title>"));
}

#[test]
fn test_load_table_file() {
    let (_dir, path) = common::write_temp_json(
        r#"{
            "root": "r",
            "nodes": [
                {"id": "r", "name": "root", "children": ["x", "y"]},
                {"id": "x", "name": "X", "value": 1},
                {"id": "y", "name": "Y", "value": 3}
            ]
        }"#,
    );
    let dataset = Dataset::load(&path).unwrap();
    let scene =
        Scene::from_dataset(&dataset, &LayoutConfig::default(), &RenderConfig::default()).unwrap();
    let widths: Vec<f64> = scene
        .wedges
        .iter()
        .map(|w| w.end_angle - w.start_angle)
        .collect();
    // Y (3/4) is drawn first, padding removed from both
    assert!(widths[0] > widths[1]);
    assert!((widths[0] - (1.5 * PI - 0.005)).abs() < 1e-9);
}

#[test]
fn test_missing_file_is_io_error_with_context() {
    let dir = tempfile::tempdir().unwrap();
    let err = Dataset::load(dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
    assert!(!err.is_validation());
}

#[test]
fn test_cyclic_input_leaves_surface_empty() {
    let dataset = Arc::new(Dataset::Table(cyclic_table("a")));

    // Pre-populate so the test proves the surface is cleared
    let good = Arc::new(Dataset::Nested(
        TreeBuilder::new("root").leaf("A", 1.0).build(),
    ));
    let mut renderer = SunburstRenderer::new(
        SvgSurface::default(),
        LayoutConfig::default(),
        RenderConfig::default(),
    );
    renderer.render(&good).unwrap();
    assert!(!renderer.surface().is_empty());

    let err = renderer.render(&dataset).unwrap_err();
    assert!(matches!(err, SunburstError::MalformedTree(_)));
    assert!(renderer.surface().is_empty());
    assert!(renderer.scene().is_none());

    let err = render_svg(&dataset, &ChartConfig::default()).unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_empty_tree_renders_nothing() {
    let (_dir, path) = common::write_temp_json(r#"{"name":"root","children":[]}"#);
    let dataset = Arc::new(Dataset::load(&path).unwrap());
    let err = render_svg(&dataset, &ChartConfig::default()).unwrap_err();
    assert!(matches!(err, SunburstError::EmptyTree(_)));
}

#[test]
fn test_redraw_on_reload() {
    let (_dir, path) = common::write_temp_json(
        r#"{"name":"root","children":[{"name":"A","value":1}]}"#,
    );
    let mut renderer = SunburstRenderer::new(
        SvgSurface::default(),
        LayoutConfig::default(),
        RenderConfig::default(),
    );

    let first = Arc::new(Dataset::load(&path).unwrap());
    assert!(renderer.render(&first).unwrap());
    assert_eq!(renderer.surface().path_count(), 1);

    std::fs::write(
        &path,
        r#"{"name":"root","children":[{"name":"A","value":1},{"name":"B","value":2}]}"#,
    )
    .unwrap();
    assert!(!renderer.render(&first).unwrap());

    let reloaded = Arc::new(Dataset::load(&path).unwrap());
    assert!(renderer.render(&reloaded).unwrap());
    assert_eq!(renderer.surface().path_count(), 2);
}

#[test]
fn test_color_is_shared_within_branch() {
    let tree = TreeBuilder::new("root")
        .child(TreeBuilder::new("left").leaf("l1", 5.0).leaf("l2", 5.0).build())
        .child(TreeBuilder::new("right").leaf("r1", 3.0).build())
        .build();
    let scene = Scene::from_dataset(
        &Dataset::Nested(tree),
        &LayoutConfig::default(),
        &RenderConfig::default(),
    )
    .unwrap();

    let by_tooltip = |prefix: &str| {
        scene
            .wedges
            .iter()
            .filter(|w| w.tooltip.starts_with(prefix))
            .map(|w| w.fill)
            .collect::<Vec<_>>()
    };
    let left = by_tooltip("root/left");
    assert_eq!(left.len(), 3);
    assert!(left.iter().all(|c| *c == left[0]));
    let right = by_tooltip("root/right");
    assert!(right.iter().all(|c| *c == right[0]));
}

#[test]
fn test_overflowing_values_fail_closed() {
    let tree = TreeBuilder::new("root")
        .child(TreeBuilder::new("A").leaf("x", 1e308).leaf("y", 1e308).build())
        .leaf("B", 1.0)
        .build();
    let mut renderer = SunburstRenderer::new(
        SvgSurface::default(),
        LayoutConfig::default(),
        RenderConfig::default(),
    );

    let err = renderer.render(&Arc::new(Dataset::Nested(tree))).unwrap_err();
    assert!(matches!(err, SunburstError::InvalidValue { .. }));
    assert!(renderer.surface().is_empty());
    assert!(!renderer.surface().to_document().contains("NaN"));
}

