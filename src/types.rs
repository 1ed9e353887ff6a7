//! Input data types for sunburst-rs
//!
//! A dataset is read once from a JSON document and never mutated afterwards.
//! Two shapes are accepted:
//!
//! - **Nested** ([`TreeNode`]): `{ "name": "root", "children": [ ... ] }`,
//!   leaves carry a `value`.
//! - **Table** ([`NodeTable`]): a flat list of records whose `children`
//!   reference other records by id. This form can describe shared nodes and
//!   cycles, which are rejected when the [`Hierarchy`](crate::hierarchy::Hierarchy)
//!   is built.
//!
//! # Example
//!
//! ```
//! use sunburst_rs::types::{Dataset, TreeNode};
//!
//! let data = Dataset::from_json_str(
//!     r#"{ "name": "root", "children": [{ "name": "A", "value": 30 }] }"#,
//! ).unwrap();
//! assert_eq!(data.root_name(), "root");
//! ```

use crate::error::{Result, ResultExt, SunburstError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A node of the nested input tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Display label; at depth 1 also the color-grouping key
    pub name: String,

    /// Ordered children; absent or empty marks a leaf
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<TreeNode>>,

    /// Leaf value; ignored on nodes that have children
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

impl TreeNode {
    /// Create a leaf node
    pub fn leaf(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            children: None,
            value: Some(value),
        }
    }

    /// Create an internal node
    pub fn branch(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self {
            name: name.into(),
            children: Some(children),
            value: None,
        }
    }

    /// Children as a slice (empty for leaves)
    pub fn children(&self) -> &[TreeNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }
}

/// One record of a flat node table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Ids of child records, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl TableRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            value: None,
            children: Vec::new(),
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }
}

/// Flat, id-referenced form of a hierarchy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTable {
    /// Id of the root record
    pub root: String,
    pub nodes: Vec<TableRecord>,
}

/// A loaded dataset in either accepted shape
#[derive(Debug, Clone, PartialEq)]
pub enum Dataset {
    Nested(TreeNode),
    Table(NodeTable),
}

impl Dataset {
    /// Parse a JSON document.
    ///
    /// Objects with a `nodes` array and a string `root` are read as a
    /// [`NodeTable`], everything else as a nested [`TreeNode`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let is_table = value.get("nodes").is_some_and(|n| n.is_array())
            && value.get("root").is_some_and(|r| r.is_string());
        if is_table {
            Ok(Dataset::Table(serde_json::from_value(value)?))
        } else {
            Ok(Dataset::Nested(serde_json::from_value(value)?))
        }
    }

    /// Read and parse a JSON data file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(SunburstError::from)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let dataset = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded dataset '{}' from {:?}", dataset.root_name(), path);
        Ok(dataset)
    }

    /// Name of the root node, or the root id if a table root is missing
    pub fn root_name(&self) -> &str {
        match self {
            Dataset::Nested(root) => &root.name,
            Dataset::Table(table) => table
                .nodes
                .iter()
                .find(|r| r.id == table.root)
                .map(|r| r.name.as_str())
                .unwrap_or(table.root.as_str()),
        }
    }
}

impl From<TreeNode> for Dataset {
    fn from(root: TreeNode) -> Self {
        Dataset::Nested(root)
    }
}

impl From<NodeTable> for Dataset {
    fn from(table: NodeTable) -> Self {
        Dataset::Table(table)
    }
}
