//! Validated arena form of a dataset.
//!
//! Both input shapes are flattened into a `Vec` indexed by [`NodeId`], with
//! parent links and depth filled in. Nodes are stored in pre-order, children
//! in input order:
//!
//! ```text
//! root          NodeId(0), depth 0
//! +-- A         NodeId(1), depth 1
//! |   +-- A.x   NodeId(2), depth 2
//! +-- B         NodeId(3), depth 1
//! ```
//!
//! All input validation happens here so that layout never sees a cyclic,
//! negative-valued or empty tree.

pub mod id;

pub use id::NodeId;

use crate::error::{Result, SunburstError};
use crate::types::{Dataset, NodeTable, TreeNode};
use std::collections::HashMap;

/// A single validated node.
#[derive(Debug, Clone, PartialEq)]
pub struct HierarchyNode {
    pub id: NodeId,
    pub name: String,
    /// Own value as given in the input; only meaningful on leaves.
    pub value: Option<f64>,
    /// Parent node (`NodeId::INVALID` for the root).
    pub parent: NodeId,
    /// Children in input order.
    pub children: Vec<NodeId>,
    /// Depth in the tree (0 for the root).
    pub depth: u32,
}

impl HierarchyNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Flat-storage validated tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
}

impl Hierarchy {
    /// Validate and flatten a dataset.
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        match dataset {
            Dataset::Nested(root) => Self::from_tree(root),
            Dataset::Table(table) => Self::from_table(table),
        }
    }

    /// Flatten a nested tree.
    ///
    /// Nested input cannot contain cycles, so only values and emptiness are
    /// checked.
    pub fn from_tree(root: &TreeNode) -> Result<Self> {
        let mut builder = Builder::default();
        let mut stack: Vec<(&TreeNode, NodeId, u32)> = vec![(root, NodeId::INVALID, 0)];

        while let Some((node, parent, depth)) = stack.pop() {
            let id = builder.push(&node.name, node.value, parent, depth)?;
            for child in node.children().iter().rev() {
                stack.push((child, id, depth + 1));
            }
        }

        builder.finish()
    }

    /// Flatten an id-referenced node table.
    ///
    /// Every record reachable from the root must be reached exactly once;
    /// revisits (cycles or shared subtrees), dangling child ids and duplicate
    /// ids are rejected with [`SunburstError::MalformedTree`].
    pub fn from_table(table: &NodeTable) -> Result<Self> {
        let mut index: HashMap<&str, usize> = HashMap::with_capacity(table.nodes.len());
        for (i, record) in table.nodes.iter().enumerate() {
            if index.insert(record.id.as_str(), i).is_some() {
                return Err(SunburstError::MalformedTree(format!(
                    "duplicate node id '{}'",
                    record.id
                )));
            }
        }

        let root = *index.get(table.root.as_str()).ok_or_else(|| {
            SunburstError::MalformedTree(format!("root id '{}' not found", table.root))
        })?;

        let mut builder = Builder::default();
        // Record index -> arena id, for every record already placed.
        let mut placed: Vec<NodeId> = vec![NodeId::INVALID; table.nodes.len()];
        let mut stack: Vec<(usize, NodeId, u32)> = vec![(root, NodeId::INVALID, 0)];

        while let Some((record_idx, parent, depth)) = stack.pop() {
            let record = &table.nodes[record_idx];

            if placed[record_idx].is_valid() {
                let kind = if builder.is_ancestor(placed[record_idx], parent) {
                    "cycle"
                } else {
                    "node reached twice"
                };
                return Err(SunburstError::MalformedTree(format!(
                    "{} at '{}' (id '{}')",
                    kind, record.name, record.id
                )));
            }

            let id = builder.push(&record.name, record.value, parent, depth)?;
            placed[record_idx] = id;

            for child_id in record.children.iter().rev() {
                let child_idx = *index.get(child_id.as_str()).ok_or_else(|| {
                    SunburstError::MalformedTree(format!(
                        "node '{}' references unknown child id '{}'",
                        record.id, child_id
                    ))
                })?;
                stack.push((child_idx, id, depth + 1));
            }
        }

        let unreachable = placed.iter().filter(|id| !id.is_valid()).count();
        if unreachable > 0 {
            tracing::debug!("{} table records are unreachable from the root", unreachable);
        }

        builder.finish()
    }

    pub fn root(&self) -> &HierarchyNode {
        &self.nodes[0]
    }

    pub fn get(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false for a constructed hierarchy; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &HierarchyNode> {
        self.nodes.iter()
    }

    pub fn max_depth(&self) -> u32 {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Iterate from `id` up to the root (inclusive on both ends).
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            hierarchy: self,
            next: id,
        }
    }

    /// Names from the root down to `id`.
    pub fn path(&self, id: NodeId) -> Vec<&str> {
        let mut names: Vec<&str> = self.ancestors(id).map(|n| n.name.as_str()).collect();
        names.reverse();
        names
    }
}

/// Iterator over a node and its ancestors, nearest first.
pub struct Ancestors<'a> {
    hierarchy: &'a Hierarchy,
    next: NodeId,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a HierarchyNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.hierarchy.get(self.next)?;
        self.next = node.parent;
        Some(node)
    }
}

#[derive(Default)]
struct Builder {
    nodes: Vec<HierarchyNode>,
}

impl Builder {
    fn push(&mut self, name: &str, value: Option<f64>, parent: NodeId, depth: u32) -> Result<NodeId> {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                return Err(SunburstError::InvalidValue {
                    node: name.to_string(),
                    value: v,
                });
            }
        }

        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(HierarchyNode {
            id,
            name: name.to_string(),
            value,
            parent,
            children: Vec::new(),
            depth,
        });
        if parent.is_valid() {
            self.nodes[parent.index()].children.push(id);
        }
        Ok(id)
    }

    /// True if `candidate` is `node` or one of its ancestors.
    fn is_ancestor(&self, candidate: NodeId, mut node: NodeId) -> bool {
        while node.is_valid() {
            if node == candidate {
                return true;
            }
            node = self.nodes[node.index()].parent;
        }
        false
    }

    fn finish(self) -> Result<Hierarchy> {
        let root = &self.nodes[0];
        if root.children.is_empty() && root.value.is_none() {
            return Err(SunburstError::EmptyTree(root.name.clone()));
        }
        Ok(Hierarchy { nodes: self.nodes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TableRecord;

    fn sample() -> TreeNode {
        TreeNode::branch(
            "root",
            vec![
                TreeNode::branch("A", vec![TreeNode::leaf("x", 1.0), TreeNode::leaf("y", 2.0)]),
                TreeNode::leaf("B", 3.0),
            ],
        )
    }

    #[test]
    fn test_preorder_layout() {
        let h = Hierarchy::from_tree(&sample()).unwrap();
        let names: Vec<_> = h.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["root", "A", "x", "y", "B"]);
        assert_eq!(h.root().children, vec![NodeId(1), NodeId(4)]);
        assert_eq!(h.get(NodeId(2)).unwrap().parent, NodeId(1));
        assert_eq!(h.max_depth(), 2);
    }

    #[test]
    fn test_path() {
        let h = Hierarchy::from_tree(&sample()).unwrap();
        assert_eq!(h.path(NodeId(3)), ["root", "A", "y"]);
        assert_eq!(h.path(NodeId::ROOT), ["root"]);
    }

    #[test]
    fn test_negative_value_rejected() {
        let tree = TreeNode::branch("root", vec![TreeNode::leaf("bad", -1.0)]);
        let err = Hierarchy::from_tree(&tree).unwrap_err();
        assert!(matches!(err, SunburstError::InvalidValue { ref node, .. } if node == "bad"));
    }

    #[test]
    fn test_nan_value_rejected() {
        let tree = TreeNode::branch("root", vec![TreeNode::leaf("nan", f64::NAN)]);
        assert!(matches!(
            Hierarchy::from_tree(&tree),
            Err(SunburstError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_empty_root_rejected() {
        let tree = TreeNode {
            name: "root".into(),
            children: Some(Vec::new()),
            value: None,
        };
        assert!(matches!(
            Hierarchy::from_tree(&tree),
            Err(SunburstError::EmptyTree(_))
        ));
    }

    #[test]
    fn test_root_with_value_only_is_valid() {
        let h = Hierarchy::from_tree(&TreeNode::leaf("root", 4.0)).unwrap();
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn test_table_matches_nested() {
        let table = NodeTable {
            root: "r".into(),
            nodes: vec![
                TableRecord::new("r", "root").with_children(["a", "b"]),
                TableRecord::new("a", "A").with_children(["x", "y"]),
                TableRecord::new("x", "x").with_value(1.0),
                TableRecord::new("y", "y").with_value(2.0),
                TableRecord::new("b", "B").with_value(3.0),
            ],
        };
        let from_table = Hierarchy::from_table(&table).unwrap();
        let from_tree = Hierarchy::from_tree(&sample()).unwrap();
        assert_eq!(from_table, from_tree);
    }

    #[test]
    fn test_table_cycle_rejected() {
        let table = NodeTable {
            root: "r".into(),
            nodes: vec![
                TableRecord::new("r", "root").with_children(["a"]),
                TableRecord::new("a", "A").with_children(["b"]),
                TableRecord::new("b", "B").with_children(["r"]),
            ],
        };
        let err = Hierarchy::from_table(&table).unwrap_err();
        assert!(matches!(err, SunburstError::MalformedTree(ref msg) if msg.starts_with("cycle")));
    }

    #[test]
    fn test_table_shared_node_rejected() {
        let table = NodeTable {
            root: "r".into(),
            nodes: vec![
                TableRecord::new("r", "root").with_children(["a", "b"]),
                TableRecord::new("a", "A").with_children(["s"]),
                TableRecord::new("b", "B").with_children(["s"]),
                TableRecord::new("s", "S").with_value(1.0),
            ],
        };
        let err = Hierarchy::from_table(&table).unwrap_err();
        assert!(matches!(err, SunburstError::MalformedTree(ref msg) if msg.contains("twice")));
    }

    #[test]
    fn test_table_dangling_and_duplicate_ids() {
        let dangling = NodeTable {
            root: "r".into(),
            nodes: vec![TableRecord::new("r", "root").with_children(["missing"])],
        };
        assert!(matches!(
            Hierarchy::from_table(&dangling),
            Err(SunburstError::MalformedTree(_))
        ));

        let duplicate = NodeTable {
            root: "r".into(),
            nodes: vec![
                TableRecord::new("r", "root").with_value(1.0),
                TableRecord::new("r", "again").with_value(1.0),
            ],
        };
        assert!(matches!(
            Hierarchy::from_table(&duplicate),
            Err(SunburstError::MalformedTree(_))
        ));

        let no_root = NodeTable {
            root: "nope".into(),
            nodes: vec![TableRecord::new("r", "root").with_value(1.0)],
        };
        assert!(matches!(
            Hierarchy::from_table(&no_root),
            Err(SunburstError::MalformedTree(_))
        ));
    }
}
