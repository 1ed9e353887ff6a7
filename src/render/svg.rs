//! SVG output surface
//!
//! Produces a standalone document with a centred viewBox
//! (`-w/2 -w/2 w w`), one `<path>` per wedge carrying a `<title>` tooltip,
//! and one rotated `<text>` per label.

use super::palette::to_hex;
use super::{polar_to_cartesian, DrawSurface, Label, SunburstRenderer, Wedge};
use crate::config::ChartConfig;
use crate::error::{Result, ResultExt, SunburstError};
use crate::layout::DEFAULT_WIDTH;
use crate::types::Dataset;
use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::Arc;

/// Retained SVG document builder
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    font_size: f32,
    fill_opacity: f32,
    paths: Vec<String>,
    texts: Vec<String>,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, 10.0, 0.6)
    }
}

impl SvgSurface {
    pub fn new(width: f64, font_size: f32, fill_opacity: f32) -> Self {
        Self {
            width,
            font_size,
            fill_opacity,
            paths: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Number of wedge paths currently on the surface.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.texts.is_empty()
    }

    /// Serialize the current contents.
    pub fn to_document(&self) -> String {
        let half = self.width / 2.0;
        let mut svg = String::new();

        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"{} {} {} {}\" width=\"100%\" height=\"100%\" style=\"max-width: {}px; margin: auto; display: block; font: {}px sans-serif\">\n",
            num(-half),
            num(-half),
            num(self.width),
            num(self.width),
            num(self.width),
            self.font_size
        ));

        svg.push_str(&format!("<g fill-opacity=\"{}\">\n", self.fill_opacity));
        for path in &self.paths {
            svg.push_str(path);
        }
        svg.push_str("</g>\n");

        svg.push_str(&format!(
            "<g pointer-events=\"none\" text-anchor=\"middle\" font-size=\"{}\" font-family=\"sans-serif\">\n",
            self.font_size
        ));
        for text in &self.texts {
            svg.push_str(text);
        }
        svg.push_str("</g>\n</svg>\n");
        svg
    }

    /// Write the document to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_document())
            .map_err(SunburstError::from)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Exported SVG to {:?}", path);
        Ok(())
    }
}

impl DrawSurface for SvgSurface {
    fn clear(&mut self) {
        self.paths.clear();
        self.texts.clear();
    }

    fn draw_wedge(&mut self, wedge: &Wedge) {
        let Some(d) = arc_path(wedge) else {
            return;
        };
        let fill_rule = if wedge.angle_width() >= TAU - ARC_EPSILON && wedge.inner_radius > 0.0 {
            " fill-rule=\"evenodd\""
        } else {
            ""
        };
        self.paths.push(format!(
            "<path fill=\"{}\"{} d=\"{}\"><title>{}</title></path>\n",
            to_hex(wedge.fill),
            fill_rule,
            d,
            escape_xml(&wedge.tooltip)
        ));
    }

    fn draw_label(&mut self, label: &Label) {
        let mid_deg = label.mid_angle.to_degrees();
        self.texts.push(format!(
            "<text transform=\"rotate({}) translate({},0) rotate({})\" dy=\"0.35em\">{}</text>\n",
            num(mid_deg - 90.0),
            num(label.mid_radius),
            if label.flipped { 180 } else { 0 },
            escape_xml(&label.text)
        ));
    }
}

/// Render `dataset` with `config` into a fresh SVG surface.
///
/// Fails without producing a document if the dataset does not validate.
pub fn render_svg(dataset: &Arc<Dataset>, config: &ChartConfig) -> Result<SvgSurface> {
    let render = config.render();
    let surface = SvgSurface::new(config.width, render.font_size, render.fill_opacity);
    let mut renderer = SunburstRenderer::new(surface, config.layout(), render);
    renderer.render(dataset)?;
    Ok(renderer.into_surface())
}

/// Render `dataset` with `config` and write it to `path`.
pub fn export_svg(dataset: &Arc<Dataset>, config: &ChartConfig, path: &Path) -> Result<()> {
    render_svg(dataset, config)?.save(path)
}

const ARC_EPSILON: f64 = 1e-12;

/// SVG path data for an annular sector, or `None` for a zero-width wedge.
pub fn arc_path(wedge: &Wedge) -> Option<String> {
    let width = wedge.angle_width();
    if width <= ARC_EPSILON || wedge.outer_radius <= wedge.inner_radius {
        return None;
    }

    let (r0, r1) = (wedge.inner_radius, wedge.outer_radius);
    let mut d = String::new();

    if width >= TAU - ARC_EPSILON {
        // Full ring: two half circles per edge, inner ring cut out via evenodd.
        let _ = write!(
            d,
            "M0,{}A{},{},0,1,1,0,{}A{},{},0,1,1,0,{}Z",
            num(-r1),
            num(r1),
            num(r1),
            num(r1),
            num(r1),
            num(r1),
            num(-r1)
        );
        if r0 > 0.0 {
            let _ = write!(
                d,
                "M0,{}A{},{},0,1,0,0,{}A{},{},0,1,0,0,{}Z",
                num(-r0),
                num(r0),
                num(r0),
                num(r0),
                num(r0),
                num(r0),
                num(-r0)
            );
        }
        return Some(d);
    }

    let large_arc = u8::from(width > PI);
    let (sx1, sy1) = polar_to_cartesian(r1, wedge.start_angle);
    let (ex1, ey1) = polar_to_cartesian(r1, wedge.end_angle);
    let _ = write!(
        d,
        "M{},{}A{},{},0,{},1,{},{}",
        num(sx1),
        num(sy1),
        num(r1),
        num(r1),
        large_arc,
        num(ex1),
        num(ey1)
    );

    if r0 > 0.0 {
        let (ex0, ey0) = polar_to_cartesian(r0, wedge.end_angle);
        let (sx0, sy0) = polar_to_cartesian(r0, wedge.start_angle);
        let _ = write!(
            d,
            "L{},{}A{},{},0,{},0,{},{}Z",
            num(ex0),
            num(ey0),
            num(r0),
            num(r0),
            large_arc,
            num(sx0),
            num(sy0)
        );
    } else {
        d.push_str("L0,0Z");
    }

    Some(d)
}

/// Fixed three-decimal number with trailing zeros trimmed.
fn num(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        _ => s.to_string(),
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::NodeId;
    use egui::Color32;

    fn wedge(start: f64, end: f64, inner: f64, outer: f64) -> Wedge {
        Wedge {
            node: NodeId(1),
            depth: 1,
            start_angle: start,
            end_angle: end,
            inner_radius: inner,
            outer_radius: outer,
            fill: Color32::from_rgb(110, 64, 170),
            fill_opacity: 0.6,
            tooltip: "root/A & B\n1,000".to_string(),
        }
    }

    #[test]
    fn test_num() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(-466.0), "-466");
        assert_eq!(num(0.12345), "0.123");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(100.0), "100");
    }

    #[test]
    fn test_quarter_arc_path() {
        let d = arc_path(&wedge(0.0, PI / 2.0, 50.0, 100.0)).unwrap();
        assert_eq!(d, "M0,-100A100,100,0,0,1,100,0L50,0A50,50,0,0,0,0,-50Z");
    }

    #[test]
    fn test_large_arc_flag_and_center() {
        let d = arc_path(&wedge(0.0, 1.5 * PI, 0.0, 10.0)).unwrap();
        assert!(d.contains("A10,10,0,1,1"));
        assert!(d.ends_with("L0,0Z"));
    }

    #[test]
    fn test_zero_width_has_no_path() {
        assert!(arc_path(&wedge(1.0, 1.0, 10.0, 20.0)).is_none());
    }

    #[test]
    fn test_full_ring() {
        let d = arc_path(&wedge(0.0, TAU, 10.0, 20.0)).unwrap();
        assert_eq!(d.matches('M').count(), 2);
    }

    #[test]
    fn test_surface_document() {
        let mut surface = SvgSurface::default();
        surface.draw_wedge(&wedge(0.0, PI, 100.0, 200.0));
        surface.draw_label(&Label {
            node: NodeId(1),
            text: "A<1>".into(),
            mid_angle: 1.5 * PI,
            mid_radius: 150.0,
            flipped: true,
        });
        let doc = surface.to_document();
        assert!(doc.contains("viewBox=\"-466 -466 932 932\""));
        assert!(doc.contains("fill=\"#6e40aa\""));
        assert!(doc.contains("<title>root/A &amp; B\n1,000</title>"));
        assert!(doc.contains("rotate(180) translate(150,0) rotate(180)"));
        assert!(doc.contains("A&lt;1&gt;"));

        surface.clear();
        assert!(surface.is_empty());
        assert!(!surface.to_document().contains("<path"));
    }
}
