//! Production tree resolution

use std::num::NonZeroU64;

use tracing::debug;

use crate::layout;
use crate::models::{Catalog, Node, NodeSource, Recipe};

/// Deepest level the resolver expands. Every tree walk recurses once per
/// level, so this also bounds stack use in layout, summaries and drop.
pub const MAX_DEPTH: usize = 256;

/// Picks which of an item's recipes the resolver expands.
pub trait RecipeSelector {
    /// `candidates` is never empty. Returning `None` leaves the item unresolved.
    fn select<'c>(&self, item: &str, candidates: &'c [Recipe]) -> Option<&'c Recipe>;
}

/// Always takes the first recipe listed for an item.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstRecipe;

impl RecipeSelector for FirstRecipe {
    fn select<'c>(&self, _item: &str, candidates: &'c [Recipe]) -> Option<&'c Recipe> {
        candidates.first()
    }
}

/// Expands a target item into a production tree against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'c, S = FirstRecipe> {
    catalog: &'c Catalog,
    selector: S,
}

impl<'c> Resolver<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self::with_selector(catalog, FirstRecipe)
    }
}

impl<'c, S: RecipeSelector> Resolver<'c, S> {
    pub fn with_selector(catalog: &'c Catalog, selector: S) -> Self {
        Self { catalog, selector }
    }

    /// Build the tree needed to produce `quantity` units of `item`.
    ///
    /// Never fails: items without a recipe, items that reappear on their
    /// own ancestor path, and items deeper than `MAX_DEPTH` become leaves with no
    /// recipe.
    pub fn resolve(&self, item: &str, quantity: NonZeroU64) -> Node {
        let mut path = Vec::new();
        self.resolve_node(item, quantity.get(), &mut path)
    }

    fn resolve_node<'a>(&self, name: &'a str, amount: u64, path: &mut Vec<&'a str>) -> Node
    where
        'c: 'a,
    {
        // Only the root-to-here path counts; siblings never see each other
        if path.contains(&name) {
            debug!(item = name, depth = path.len(), "cycle truncated");
            return Node::leaf(name, amount, NodeSource::CycleTruncated);
        }

        let candidates = self.catalog.recipes_for(name);
        if candidates.is_empty() {
            return Node::leaf(name, amount, NodeSource::Unresolved);
        }
        if path.len() >= MAX_DEPTH {
            debug!(item = name, "depth limit reached");
            return Node::leaf(name, amount, NodeSource::DepthLimited);
        }
        let Some(recipe) = self.selector.select(name, candidates) else {
            return Node::leaf(name, amount, NodeSource::Unresolved);
        };

        let batches = amount.div_ceil(recipe.output_count.max(1));

        path.push(name);
        let children: Vec<Node> = recipe
            .inputs
            .iter()
            .map(|(input, per_batch)| {
                self.resolve_node(input, per_batch.saturating_mul(batches), path)
            })
            .collect();
        path.pop();

        // Inputs are produced on parallel lines, so only the slowest one adds up
        let slowest = children.iter().map(|c| c.total_time).max().unwrap_or(0);
        let total_time = recipe.time.saturating_mul(batches).saturating_add(slowest);

        Node {
            name: name.to_string(),
            amount,
            recipe: Some(recipe.clone()),
            source: NodeSource::Recipe,
            children,
            batches,
            total_time,
            level: 0,
            position_x: 0.0,
        }
    }
}

/// Resolve `item` with the first-recipe policy.
pub fn resolve(catalog: &Catalog, item: &str, quantity: NonZeroU64) -> Node {
    Resolver::new(catalog).resolve(item, quantity)
}

/// Resolve `item` and lay the tree out for drawing.
pub fn plan(catalog: &Catalog, item: &str, quantity: NonZeroU64) -> Node {
    let mut root = resolve(catalog, item, quantity);
    layout::layout(&mut root);
    root
}
