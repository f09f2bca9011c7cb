//! Data models for recipes and resolved production trees

use std::collections::HashMap;

use serde::Serialize;

/// One way to produce an item: a machine runs `time` seconds per batch,
/// consuming `inputs` and yielding `output_count` units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recipe {
    pub machine: String,
    pub time: u64,
    pub inputs: Vec<(String, u64)>, // (item, count per batch)
    pub output_count: u64,
}

impl Recipe {
    /// Raw-harvest recipes consume nothing.
    pub fn is_extraction(&self) -> bool {
        self.inputs.is_empty()
    }
}

/// Recipes indexed by output item name.
///
/// Each item keeps its recipes in the order they were encountered while
/// parsing. Built once and only read afterwards; rebuild it wholesale when
/// the source text changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    recipes: HashMap<String, Vec<Recipe>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a recipe for `output`, after any already known.
    pub fn insert(&mut self, output: impl Into<String>, recipe: Recipe) {
        self.recipes.entry(output.into()).or_default().push(recipe);
    }

    /// All recipes producing `item`, in encounter order.
    pub fn recipes_for(&self, item: &str) -> &[Recipe] {
        self.recipes.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, item: &str) -> bool {
        !self.recipes_for(item).is_empty()
    }

    /// True if `item` is produced or consumed by any recipe.
    pub fn mentions(&self, item: &str) -> bool {
        self.contains(item)
            || self
                .recipes
                .values()
                .flatten()
                .any(|r| r.inputs.iter().any(|(name, _)| name == item))
    }

    /// Producible item names, sorted.
    pub fn items(&self) -> Vec<&str> {
        let mut items: Vec<&str> = self.recipes.keys().map(String::as_str).collect();
        items.sort_unstable();
        items
    }

    /// Number of distinct producible items
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Total number of recipes across all items
    pub fn recipe_count(&self) -> usize {
        self.recipes.values().map(Vec::len).sum()
    }
}

/// Why a node ended up with or without a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeSource {
    /// Produced by the attached recipe.
    Recipe,
    /// No recipe was available; treated as a raw material.
    Unresolved,
    /// The item already appears on the path from the root.
    CycleTruncated,
    /// The chain ran deeper than the resolver follows.
    DepthLimited,
}

/// One vertex of a resolved production tree: produce `amount` units of `name`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub name: String,
    pub amount: u64,
    pub recipe: Option<Recipe>,
    pub source: NodeSource,
    pub children: Vec<Node>,
    pub batches: u64,
    pub total_time: u64,

    // Filled in by layout
    pub level: usize,
    pub position_x: f64,
}

impl Node {
    /// A node without a recipe: one batch, no time, no children.
    pub fn leaf(name: impl Into<String>, amount: u64, source: NodeSource) -> Self {
        Self {
            name: name.into(),
            amount,
            recipe: None,
            source,
            children: Vec::new(),
            batches: 1,
            total_time: 0,
            level: 0,
            position_x: 0.0,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Machine running this node's recipe, if any.
    pub fn machine(&self) -> Option<&str> {
        self.recipe.as_ref().map(|r| r.machine.as_str())
    }

    /// Total nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Edges on the longest path down from this node.
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Pre-order traversal of the subtree.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}
