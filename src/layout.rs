//! Radial partition layout.
//!
//! Turns a validated [`Hierarchy`] into one [`LayoutNode`] per node:
//!
//! - **Angle** is proportional to the node's share of its parent's total
//!   value. The root spans the full circle `[0, 2π]`, angle 0 points up and
//!   angles grow clockwise.
//! - **Radius** is a pure depth indicator. Every depth gets a band of the
//!   same thickness `max_radius / (max_depth + 1)`; the root owns the
//!   innermost band.
//! - **Color key** is the name of the depth-1 ancestor, so a whole branch
//!   shares one palette entry.
//!
//! Children are ordered by descending total value (stable for ties) before
//! angles are assigned. Stored angles are pre-padding, so siblings tile the
//! parent's arc exactly; [`LayoutNode::padded_angles`] applies the visual
//! gap.

use crate::error::{Result, SunburstError};
use crate::hierarchy::{Hierarchy, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::f64::consts::TAU;

/// Default logical canvas width in design units.
pub const DEFAULT_WIDTH: f64 = 932.0;

/// Default inter-sibling padding in radians.
pub const DEFAULT_PAD_ANGLE: f64 = 0.005;

/// Geometry parameters for a layout pass
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Outer radius of the deepest band
    pub max_radius: f64,
    /// Upper bound of the angular gap removed from each wedge
    pub pad_angle: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_radius: DEFAULT_WIDTH / 2.0,
            pad_angle: DEFAULT_PAD_ANGLE,
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.max_radius.is_finite() || self.max_radius <= 0.0 {
            return Err(SunburstError::Config(format!(
                "max_radius must be positive, got {}",
                self.max_radius
            )));
        }
        if !self.pad_angle.is_finite() || self.pad_angle < 0.0 {
            return Err(SunburstError::Config(format!(
                "pad_angle must be non-negative, got {}",
                self.pad_angle
            )));
        }
        Ok(())
    }
}

/// Layout result for a single node.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    pub id: NodeId,
    /// Navigation link only (`NodeId::INVALID` for the root).
    pub parent: NodeId,
    /// Children sorted by descending total value.
    pub children: Vec<NodeId>,
    pub depth: u32,
    pub angle_start: f64,
    pub angle_end: f64,
    /// Total gap removed from this wedge, half at each end.
    pub pad_angle: f64,
    pub radius_inner: f64,
    pub radius_outer: f64,
    /// Sum of descendant leaf values.
    pub total_value: f64,
    pub color_key: String,
}

impl LayoutNode {
    #[inline]
    pub fn angle_width(&self) -> f64 {
        self.angle_end - self.angle_start
    }

    /// Start and end angle with the padding removed symmetrically.
    pub fn padded_angles(&self) -> (f64, f64) {
        let half = self.pad_angle / 2.0;
        (self.angle_start + half, self.angle_end - half)
    }

    #[inline]
    pub fn mid_angle(&self) -> f64 {
        (self.angle_start + self.angle_end) / 2.0
    }

    #[inline]
    pub fn mid_radius(&self) -> f64 {
        (self.radius_inner + self.radius_outer) / 2.0
    }

    /// Approximate on-screen area used to decide whether a label fits.
    pub fn approx_area(&self) -> f64 {
        self.mid_radius() * self.angle_width()
    }
}

/// Complete layout of a hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialLayout {
    nodes: Vec<LayoutNode>,
    /// Breadth-first order over sorted children, root first.
    order: Vec<NodeId>,
    max_depth: u32,
}

impl RadialLayout {
    pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id.index())
    }

    pub fn root(&self) -> &LayoutNode {
        &self.nodes[0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Nodes in draw order (breadth-first, root first).
    pub fn iter(&self) -> impl Iterator<Item = &LayoutNode> {
        self.order.iter().map(move |id| &self.nodes[id.index()])
    }

    /// Names of the depth-1 nodes in draw order; the color domain.
    pub fn color_domain(&self) -> Vec<&str> {
        self.root()
            .children
            .iter()
            .map(|id| self.nodes[id.index()].color_key.as_str())
            .collect()
    }
}

/// Computes [`RadialLayout`]s with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct RadialLayoutEngine {
    config: LayoutConfig,
}

impl RadialLayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lay out a validated hierarchy.
    pub fn layout(&self, hierarchy: &Hierarchy) -> Result<RadialLayout> {
        self.config.validate()?;

        let totals = sum_values(hierarchy)?;
        let max_depth = hierarchy.max_depth();
        let band = self.config.max_radius / f64::from(max_depth + 1);

        let mut nodes: Vec<LayoutNode> = hierarchy
            .iter()
            .map(|node| {
                let mut children = node.children.clone();
                // sort_by is stable, so equal totals keep input order
                children.sort_by(|a, b| totals[b.index()].total_cmp(&totals[a.index()]));
                LayoutNode {
                    id: node.id,
                    parent: node.parent,
                    children,
                    depth: node.depth,
                    angle_start: 0.0,
                    angle_end: 0.0,
                    pad_angle: 0.0,
                    radius_inner: f64::from(node.depth) * band,
                    radius_outer: f64::from(node.depth + 1) * band,
                    total_value: totals[node.id.index()],
                    color_key: String::new(),
                }
            })
            .collect();

        nodes[0].angle_end = TAU;
        nodes[0].color_key = hierarchy.root().name.clone();

        let mut order = Vec::with_capacity(nodes.len());
        let mut queue = VecDeque::from([NodeId::ROOT]);

        while let Some(id) = queue.pop_front() {
            order.push(id);

            let (x0, x1, total, key) = {
                let node = &mut nodes[id.index()];
                node.pad_angle = (node.angle_width() / 2.0).min(self.config.pad_angle);
                (
                    node.angle_start,
                    node.angle_end,
                    node.total_value,
                    node.color_key.clone(),
                )
            };
            let scale = if total > 0.0 { (x1 - x0) / total } else { 0.0 };

            let mut x = x0;
            for i in 0..nodes[id.index()].children.len() {
                let child_id = nodes[id.index()].children[i];
                let child = &mut nodes[child_id.index()];
                child.angle_start = x;
                x += child.total_value * scale;
                child.angle_end = x;
                child.color_key = if child.depth <= 1 {
                    hierarchy
                        .get(child_id)
                        .map(|n| n.name.clone())
                        .unwrap_or_default()
                } else {
                    key.clone()
                };
                queue.push_back(child_id);
            }
        }

        tracing::debug!(
            "Laid out {} nodes, max depth {}, total value {}",
            nodes.len(),
            max_depth,
            nodes[0].total_value
        );

        Ok(RadialLayout {
            nodes,
            order,
            max_depth,
        })
    }
}

/// Effective value of every node, indexed by `NodeId`.
///
/// Children always have a higher index than their parent, so a single
/// reverse sweep sees every child before its parent. A sum that overflows
/// to infinity cannot be partitioned and is reported as `InvalidValue`.
fn sum_values(hierarchy: &Hierarchy) -> Result<Vec<f64>> {
    let mut totals = vec![0.0; hierarchy.len()];
    let nodes: Vec<_> = hierarchy.iter().collect();
    for node in nodes.into_iter().rev() {
        let total: f64 = if node.is_leaf() {
            node.value.unwrap_or(0.0)
        } else {
            node.children.iter().map(|c| totals[c.index()]).sum()
        };
        if !total.is_finite() {
            return Err(SunburstError::InvalidValue {
                node: node.name.clone(),
                value: total,
            });
        }
        totals[node.id.index()] = total;
    }
    Ok(totals)
}
