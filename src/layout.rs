//! Tree layout for diagram rendering
//!
//! Leaves take consecutive horizontal slots in depth-first order and every
//! parent sits midway between its outermost children. A renderer draws a
//! node at `(position_x * x_spacing, level * y_spacing)`.

use serde::Serialize;

use crate::models::Node;

/// Assign `level` and `position_x` to every node in the tree.
pub fn layout(root: &mut Node) {
    let mut next_slot = 0.0;
    assign(root, 0, &mut next_slot);
}

fn assign(node: &mut Node, level: usize, next_slot: &mut f64) {
    node.level = level;

    if node.children.is_empty() {
        node.position_x = *next_slot;
        *next_slot += 1.0;
        return;
    }

    for child in &mut node.children {
        assign(child, level + 1, next_slot);
    }

    let (min, max) = node
        .children
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
            (lo.min(c.position_x), hi.max(c.position_x))
        });
    node.position_x = (min + max) / 2.0;
}

/// Bounds of a laid-out tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutExtent {
    pub max_x: f64,
    pub max_level: usize,
}

impl LayoutExtent {
    /// Horizontal slots spanned, i.e. the number of leaves.
    pub fn columns(&self) -> usize {
        self.max_x as usize + 1
    }

    pub fn rows(&self) -> usize {
        self.max_level + 1
    }
}

/// Largest `position_x` and `level` in the tree.
pub fn extent(root: &Node) -> LayoutExtent {
    root.iter().fold(
        LayoutExtent {
            max_x: root.position_x,
            max_level: root.level,
        },
        |acc, n| LayoutExtent {
            max_x: acc.max_x.max(n.position_x),
            max_level: acc.max_level.max(n.level),
        },
    )
}
