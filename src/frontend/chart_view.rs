//! Interactive chart canvas
//!
//! [`ChartCanvas`] is the egui-side [`DrawSurface`]: the renderer draws into
//! it once per dataset change, and every frame [`ChartCanvas::show`] paints
//! the retained primitives scaled to the available space and shows the
//! hovered wedge's tooltip.

use crate::render::{DrawSurface, Label, Scene, Wedge};
use egui::epaint::TextShape;
use egui::emath::Rot2;
use egui::{Color32, FontId, Mesh, Pos2, Rect, Sense, Shape, Stroke, Ui, Vec2};
use std::f64::consts::PI;

/// Angular step used when tessellating arcs (2 degrees).
const ARC_STEP: f64 = PI / 90.0;

/// Maps chart space (origin at centre, `width` units across) onto a screen rect.
#[derive(Debug, Clone, Copy)]
pub struct ChartTransform {
    center: Pos2,
    scale: f32,
}

impl ChartTransform {
    pub fn fit(rect: Rect, width: f64) -> Self {
        let side = rect.width().min(rect.height());
        Self {
            center: rect.center(),
            scale: side / width as f32,
        }
    }

    pub fn to_screen(&self, x: f64, y: f64) -> Pos2 {
        self.center + Vec2::new(x as f32, y as f32) * self.scale
    }

    pub fn to_chart(&self, pos: Pos2) -> (f64, f64) {
        let v = (pos - self.center) / self.scale;
        (f64::from(v.x), f64::from(v.y))
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

/// Retained copy of the last drawn scene
#[derive(Debug, Clone)]
pub struct ChartCanvas {
    width: f64,
    font_size: f32,
    scene: Scene,
}

impl ChartCanvas {
    pub fn new(width: f64, font_size: f32) -> Self {
        Self {
            width,
            font_size,
            scene: Scene::default(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Paint the chart into the remaining space of `ui`.
    pub fn show(&self, ui: &mut Ui, show_labels: bool) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let transform = ChartTransform::fit(response.rect, self.width);

        let hovered = response
            .hover_pos()
            .map(|pos| transform.to_chart(pos))
            .and_then(|(x, y)| self.scene.hit_test(x, y));

        for wedge in &self.scene.wedges {
            let is_hovered = hovered.is_some_and(|h| h.node == wedge.node);
            painter.add(wedge_mesh(wedge, &transform, is_hovered));
        }

        if let Some(wedge) = hovered {
            painter.add(wedge_outline(wedge, &transform, ui.visuals().strong_text_color()));
        }

        if show_labels {
            let text_color = ui.visuals().strong_text_color();
            let font = FontId::proportional(self.font_size * transform.scale());
            for label in &self.scene.labels {
                paint_label(&painter, label, &transform, font.clone(), text_color);
            }
        }

        if let Some(wedge) = hovered {
            response.on_hover_text_at_pointer(wedge.tooltip.as_str());
        }
    }
}

impl DrawSurface for ChartCanvas {
    fn clear(&mut self) {
        self.scene = Scene::default();
    }

    fn draw_wedge(&mut self, wedge: &Wedge) {
        self.scene.wedges.push(wedge.clone());
    }

    fn draw_label(&mut self, label: &Label) {
        self.scene.labels.push(label.clone());
    }
}

/// Points along an arc from `start` to `end` at `radius`, in screen space.
fn arc_points(transform: &ChartTransform, radius: f64, start: f64, end: f64) -> Vec<Pos2> {
    let steps = (((end - start) / ARC_STEP).ceil() as usize).max(1);
    (0..=steps)
        .map(|i| {
            let angle = start + (end - start) * i as f64 / steps as f64;
            let (x, y) = crate::render::polar_to_cartesian(radius, angle);
            transform.to_screen(x, y)
        })
        .collect()
}

fn wedge_mesh(wedge: &Wedge, transform: &ChartTransform, highlighted: bool) -> Shape {
    let mut mesh = Mesh::default();
    if wedge.angle_width() <= 0.0 {
        return Shape::mesh(mesh);
    }

    let opacity = if highlighted {
        1.0
    } else {
        wedge.fill_opacity
    };
    let color = Color32::from_rgba_unmultiplied(
        wedge.fill.r(),
        wedge.fill.g(),
        wedge.fill.b(),
        (opacity * 255.0).round() as u8,
    );

    let outer = arc_points(transform, wedge.outer_radius, wedge.start_angle, wedge.end_angle);
    let inner = arc_points(transform, wedge.inner_radius, wedge.start_angle, wedge.end_angle);

    for (o, i) in outer.iter().zip(&inner) {
        mesh.colored_vertex(*o, color);
        mesh.colored_vertex(*i, color);
    }
    for seg in 0..(outer.len() as u32 - 1) {
        let base = seg * 2;
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base + 1, base + 3, base + 2);
    }

    Shape::mesh(mesh)
}

fn wedge_outline(wedge: &Wedge, transform: &ChartTransform, color: Color32) -> Shape {
    let mut points = arc_points(transform, wedge.outer_radius, wedge.start_angle, wedge.end_angle);
    let mut inner = arc_points(transform, wedge.inner_radius, wedge.start_angle, wedge.end_angle);
    inner.reverse();
    points.extend(inner);
    Shape::closed_line(points, Stroke::new(1.5, color))
}

fn paint_label(
    painter: &egui::Painter,
    label: &Label,
    transform: &ChartTransform,
    font: FontId,
    color: Color32,
) {
    let galley = painter.layout_no_wrap(label.text.clone(), font, color);
    let (x, y) = label.anchor();
    let anchor = transform.to_screen(x, y);
    let angle = label.rotation_deg().to_radians() as f32;

    let pos = rotated_text_origin(anchor, galley.size(), angle);
    painter.add(TextShape::new(pos, galley, color).with_angle(angle));
}

/// Top-left corner for a galley of `size` rotated by `angle` around that
/// corner (as `TextShape` does) so that it ends up centred on `anchor`.
fn rotated_text_origin(anchor: Pos2, size: Vec2, angle: f32) -> Pos2 {
    anchor - Rot2::from_angle(angle) * (size / 2.0)
}
