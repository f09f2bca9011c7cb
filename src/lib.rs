//! Endfield production planner
//!
//! Parses recipe sheets into a [`Catalog`], expands a target item into a
//! production tree of [`Node`]s and lays that tree out for drawing.
//!
//! ```
//! use std::num::NonZeroU64;
//! use endfield_planner::{parse_catalog, plan};
//!
//! let catalog = parse_catalog("Smelting\nSmelter 12s | IronOre x2 + Coal x1 -> IronIngot x3");
//! let tree = plan(&catalog, "IronIngot", NonZeroU64::new(7).unwrap());
//!
//! assert_eq!(tree.batches, 3);
//! assert_eq!(tree.children[0].amount, 6);
//! assert_eq!(tree.node_count(), 3);
//! ```

pub mod calculator;
pub mod error;
pub mod layout;
pub mod loader;
pub mod models;
pub mod parser;
pub mod summary;

pub use calculator::{FirstRecipe, MAX_DEPTH, RecipeSelector, Resolver, plan, resolve};
pub use error::PlannerError;
pub use layout::{LayoutExtent, extent, layout};
pub use models::{Catalog, Node, NodeSource, Recipe};
pub use parser::{parse_catalog, parse_catalog_with_report};
pub use summary::{ChainSummary, summarize};
