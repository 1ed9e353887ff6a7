//! Scene construction and drawing.
//!
//! A [`Scene`] is the list of drawable primitives derived from a
//! [`RadialLayout`]: one [`Wedge`] per non-root node and a [`Label`] for every
//! wedge large enough to hold text. Scenes are drawn onto a [`DrawSurface`].
//!
//! [`SunburstRenderer`] owns a surface and re-runs the whole pipeline
//! (validate, lay out, build scene, clear, draw) whenever it is handed a
//! different dataset reference. Passing the same `Arc` again is a no-op.
//! On any failure the surface is cleared and stays empty.
//!
//! # Coordinates
//!
//! Chart space is centred on the origin with the y axis pointing down.
//! Angle 0 points up and angles grow clockwise, so a point at radius `r`
//! and angle `a` sits at `(r·sin a, -r·cos a)`.

pub mod format;
pub mod palette;
pub mod svg;

pub use palette::{ColorScheme, Palette};
pub use svg::SvgSurface;

use crate::error::Result;
use crate::hierarchy::{Hierarchy, NodeId};
use crate::layout::{LayoutConfig, RadialLayout, RadialLayoutEngine};
use crate::types::Dataset;
use egui::Color32;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use std::sync::Arc;

/// Presentation parameters for a render pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Labels are placed only where `mid_radius * angle_width` exceeds this
    pub min_label_area: f64,
    pub fill_opacity: f32,
    pub font_size: f32,
    pub color_scheme: ColorScheme,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            min_label_area: 10.0,
            fill_opacity: 0.6,
            font_size: 10.0,
            color_scheme: ColorScheme::default(),
        }
    }
}

/// A filled annular sector.
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub node: NodeId,
    pub depth: u32,
    /// Padded start angle
    pub start_angle: f64,
    /// Padded end angle
    pub end_angle: f64,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub fill: Color32,
    pub fill_opacity: f32,
    pub tooltip: String,
}

impl Wedge {
    pub fn angle_width(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// True if the chart-space point lies inside this wedge.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        if self.angle_width() <= 0.0 {
            return false;
        }
        let r = x.hypot(y);
        if r < self.inner_radius || r >= self.outer_radius {
            return false;
        }
        let angle = point_angle(x, y);
        angle >= self.start_angle && angle < self.end_angle
    }
}

/// Text placed along a wedge's mid-angle.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub node: NodeId,
    pub text: String,
    /// Unpadded mid-angle in radians
    pub mid_angle: f64,
    pub mid_radius: f64,
    /// Text is turned 180° to stay upright on the left half
    pub flipped: bool,
}

impl Label {
    fn new(node: NodeId, text: String, mid_angle: f64, mid_radius: f64) -> Self {
        Self {
            node,
            text,
            mid_angle,
            mid_radius,
            flipped: mid_angle >= PI,
        }
    }

    /// Anchor point in chart space.
    pub fn anchor(&self) -> (f64, f64) {
        polar_to_cartesian(self.mid_radius, self.mid_angle)
    }

    /// Total text rotation in degrees, clockwise from the x axis.
    pub fn rotation_deg(&self) -> f64 {
        let base = self.mid_angle.to_degrees() - 90.0;
        if self.flipped {
            base + 180.0
        } else {
            base
        }
    }
}

/// Drawable primitives for one dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub wedges: Vec<Wedge>,
    pub labels: Vec<Label>,
}

impl Scene {
    /// Map a layout onto wedges and labels.
    pub fn build(hierarchy: &Hierarchy, layout: &RadialLayout, config: &RenderConfig) -> Self {
        let palette = Palette::new(config.color_scheme, layout.color_domain());
        let mut scene = Scene::default();

        for node in layout.iter().filter(|n| n.depth > 0) {
            let (start_angle, end_angle) = node.padded_angles();
            scene.wedges.push(Wedge {
                node: node.id,
                depth: node.depth,
                start_angle,
                end_angle,
                inner_radius: node.radius_inner,
                outer_radius: node.radius_outer,
                fill: palette.color(&node.color_key),
                fill_opacity: config.fill_opacity,
                tooltip: format::tooltip(hierarchy, node.id, node.total_value),
            });

            if node.approx_area() > config.min_label_area {
                let name = hierarchy
                    .get(node.id)
                    .map(|n| n.name.clone())
                    .unwrap_or_default();
                scene
                    .labels
                    .push(Label::new(node.id, name, node.mid_angle(), node.mid_radius()));
            }
        }

        scene
    }

    /// Validate, lay out and build in one step.
    pub fn from_dataset(
        dataset: &Dataset,
        layout_config: &LayoutConfig,
        render_config: &RenderConfig,
    ) -> Result<Self> {
        let hierarchy = Hierarchy::from_dataset(dataset)?;
        let layout = RadialLayoutEngine::new(*layout_config).layout(&hierarchy)?;
        Ok(Self::build(&hierarchy, &layout, render_config))
    }

    pub fn is_empty(&self) -> bool {
        self.wedges.is_empty()
    }

    /// Wedge under a chart-space point.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&Wedge> {
        self.wedges.iter().find(|w| w.contains(x, y))
    }

    /// Draw every primitive onto a cleared surface.
    pub fn draw_onto(&self, surface: &mut dyn DrawSurface) {
        surface.clear();
        for wedge in &self.wedges {
            surface.draw_wedge(wedge);
        }
        for label in &self.labels {
            surface.draw_label(label);
        }
    }
}

/// Target of a render pass.
#[cfg_attr(test, mockall::automock)]
pub trait DrawSurface {
    /// Remove everything drawn so far.
    fn clear(&mut self);

    fn draw_wedge(&mut self, wedge: &Wedge);

    fn draw_label(&mut self, label: &Label);
}

/// Owns a surface and redraws it when the dataset reference changes.
pub struct SunburstRenderer<S: DrawSurface> {
    surface: S,
    layout_config: LayoutConfig,
    render_config: RenderConfig,
    current: Option<Arc<Dataset>>,
    scene: Option<Scene>,
    last_error: Option<String>,
}

impl<S: DrawSurface> SunburstRenderer<S> {
    pub fn new(surface: S, layout_config: LayoutConfig, render_config: RenderConfig) -> Self {
        Self {
            surface,
            layout_config,
            render_config,
            current: None,
            scene: None,
            last_error: None,
        }
    }

    /// Draw `dataset` unless it is the reference drawn last time.
    ///
    /// Returns `Ok(true)` when a redraw happened and `Ok(false)` when the
    /// reference was unchanged. On error the surface is left cleared.
    pub fn render(&mut self, dataset: &Arc<Dataset>) -> Result<bool> {
        if self
            .current
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, dataset))
        {
            return Ok(false);
        }

        self.current = Some(Arc::clone(dataset));
        self.redraw().map(|_| true)
    }

    /// Change configuration and redraw the current dataset.
    pub fn reconfigure(&mut self, layout_config: LayoutConfig, render_config: RenderConfig) -> Result<()> {
        self.layout_config = layout_config;
        self.render_config = render_config;
        self.redraw()
    }

    fn redraw(&mut self) -> Result<()> {
        self.scene = None;
        self.last_error = None;

        let Some(dataset) = self.current.as_ref() else {
            self.surface.clear();
            return Ok(());
        };

        match Scene::from_dataset(dataset, &self.layout_config, &self.render_config) {
            Ok(scene) => {
                scene.draw_onto(&mut self.surface);
                tracing::debug!(
                    "Drew {} wedges and {} labels",
                    scene.wedges.len(),
                    scene.labels.len()
                );
                self.scene = Some(scene);
                Ok(())
            }
            Err(e) => {
                self.surface.clear();
                tracing::warn!("Not drawing '{}': {}", dataset.root_name(), e);
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Drop the current dataset and clear the surface.
    pub fn reset(&mut self) {
        self.current = None;
        self.scene = None;
        self.last_error = None;
        self.surface.clear();
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Message of the error from the last redraw, if it failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout_config
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render_config
    }
}

/// Chart-space position of a polar coordinate.
pub fn polar_to_cartesian(radius: f64, angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.sin_cos();
    (radius * sin, -radius * cos)
}

/// Angle of a chart-space point in `[0, 2π)`.
pub fn point_angle(x: f64, y: f64) -> f64 {
    let angle = x.atan2(-y);
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}
