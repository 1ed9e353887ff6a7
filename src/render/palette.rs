//! Color palette for wedge fills
//!
//! The palette is a quantized rainbow with one more entry than there are
//! depth-1 branches. Each color key maps to one entry, so a branch and all
//! of its descendants share a color.
//!
//! Two mapping schemes are available:
//!
//! - [`ColorScheme::Hashed`] hashes the key (FNV-1a) into the palette. The
//!   color of a branch does not depend on the other branches' order.
//! - [`ColorScheme::Ordinal`] assigns entries in draw order of the depth-1
//!   nodes, the way an ordinal scale fed in that order would.

use egui::Color32;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How color keys are mapped onto palette entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Hashed,
    Ordinal,
}

impl ColorScheme {
    pub fn display_name(&self) -> &'static str {
        match self {
            ColorScheme::Hashed => "Hashed",
            ColorScheme::Ordinal => "Ordinal",
        }
    }

    pub fn all() -> &'static [ColorScheme] {
        &[ColorScheme::Hashed, ColorScheme::Ordinal]
    }
}

/// Key-to-color mapping for one render pass
#[derive(Debug, Clone)]
pub struct Palette {
    colors: Vec<Color32>,
    scheme: ColorScheme,
    ordinal: HashMap<String, usize>,
}

impl Palette {
    /// Build a palette for the given depth-1 keys.
    pub fn new<'a>(scheme: ColorScheme, domain: impl IntoIterator<Item = &'a str>) -> Self {
        let mut ordinal = HashMap::new();
        for key in domain {
            let next = ordinal.len();
            ordinal.entry(key.to_string()).or_insert(next);
        }
        Self {
            colors: quantize(ordinal.len() + 1),
            scheme,
            ordinal,
        }
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn color(&self, key: &str) -> Color32 {
        let index = match self.scheme {
            ColorScheme::Ordinal => self
                .ordinal
                .get(key)
                .copied()
                .unwrap_or_else(|| hash_index(key, self.colors.len())),
            ColorScheme::Hashed => hash_index(key, self.colors.len()),
        };
        self.colors[index]
    }
}

fn hash_index(key: &str, len: usize) -> usize {
    (fnv1a(key.as_bytes()) % len as u64) as usize
}

/// 64-bit FNV-1a; stable across platforms and releases.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET, |hash, b| (hash ^ u64::from(*b)).wrapping_mul(PRIME))
}

/// `n` evenly spaced samples of [`rainbow`] over `[0, 1]`.
pub fn quantize(n: usize) -> Vec<Color32> {
    match n {
        0 => Vec::new(),
        1 => vec![rainbow(0.0)],
        _ => (0..n)
            .map(|i| rainbow(i as f64 / (n - 1) as f64))
            .collect(),
    }
}

/// Cyclical rainbow color scale built on the cubehelix color space.
pub fn rainbow(t: f64) -> Color32 {
    let t = if (0.0..=1.0).contains(&t) { t } else { t - t.floor() };
    let ts = (t - 0.5).abs();
    cubehelix(360.0 * t - 100.0, 1.5 - 1.5 * ts, 0.8 - 0.9 * ts)
}

fn cubehelix(hue_deg: f64, saturation: f64, lightness: f64) -> Color32 {
    const A: f64 = -0.14861;
    const B: f64 = 1.78277;
    const C: f64 = -0.29227;
    const D: f64 = -0.90649;
    const E: f64 = 1.97294;

    let h = (hue_deg + 120.0).to_radians();
    let l = lightness;
    let a = saturation * l * (1.0 - l);
    let (sin_h, cos_h) = h.sin_cos();

    let channel = |v: f64| (255.0 * v).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(
        channel(l + a * (A * cos_h + B * sin_h)),
        channel(l + a * (C * cos_h + D * sin_h)),
        channel(l + a * (E * cos_h)),
    )
}

/// `#rrggbb` form used in SVG output.
pub fn to_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
