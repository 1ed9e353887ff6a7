//! Tooltip text formatting

use crate::hierarchy::{Hierarchy, NodeId};

/// Maximum number of fraction digits shown for a value.
const MAX_FRACTION_DIGITS: usize = 3;

/// Format a value with thousands separators and at most three fraction
/// digits, trailing zeros trimmed (`1234.5` -> `"1,234.5"`).
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let negative = value < 0.0 && (grouped != "0" || !frac_part.is_empty());
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// `root/.../node` path followed by the formatted value on a second line.
pub fn tooltip(hierarchy: &Hierarchy, id: NodeId, total_value: f64) -> String {
    format!("{}\n{}", hierarchy.path(id).join("/"), format_value(total_value))
}
