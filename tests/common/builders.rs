//! Test data builders for creating test trees

use proptest::prelude::*;
use sunburst_rs::{NodeTable, TableRecord, TreeNode};

/// Builder for nested test trees
pub struct TreeBuilder {
    name: String,
    children: Vec<TreeNode>,
}

impl TreeBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn leaf(mut self, name: &str, value: f64) -> Self {
        self.children.push(TreeNode::leaf(name, value));
        self
    }

    pub fn child(mut self, child: TreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn build(self) -> TreeNode {
        TreeNode::branch(self.name, self.children)
    }
}

/// A table whose last record points back at `back_to`
pub fn cyclic_table(back_to: &str) -> NodeTable {
    NodeTable {
        root: "root".into(),
        nodes: vec![
            TableRecord::new("root", "root").with_children(["a"]),
            TableRecord::new("a", "A").with_children(["b"]),
            TableRecord::new("b", "B").with_children([back_to]),
        ],
    }
}

/// Arbitrary tree with integer leaf values (some zero) and a branch root
pub fn arb_tree() -> impl Strategy<Value = TreeNode> {
    let leaf = (0u32..1000, any::<u8>())
        .prop_map(|(v, tag)| TreeNode::leaf(format!("leaf{}", tag), f64::from(v)));
    let node = leaf.prop_recursive(4, 64, 6, |inner| {
        (prop::collection::vec(inner, 1..6), any::<u8>())
            .prop_map(|(children, tag)| TreeNode::branch(format!("node{}", tag), children))
    });
    prop::collection::vec(node, 1..6).prop_map(|children| TreeNode::branch("root", children))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_builder() {
        let tree = TreeBuilder::new("root")
            .leaf("a", 1.0)
            .child(TreeBuilder::new("b").leaf("c", 2.0).build())
            .build();

        assert_eq!(tree.name, "root");
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.children()[1].children()[0], TreeNode::leaf("c", 2.0));
    }
}
