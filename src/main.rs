//! Endfield Production Planner
//!
//! Works out the machines and raw materials needed to build an item.

use std::num::NonZeroU64;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use endfield_planner::error::PlannerError;
use endfield_planner::loader::{self, LoadedCatalog};
use endfield_planner::summary::format_production_chain;
use endfield_planner::{Catalog, LayoutExtent, Node, extent, plan, summarize};

#[derive(Parser)]
#[command(name = "endfield-planner")]
#[command(about = "Production chain planner for Endfield recipe sheets")]
struct Cli {
    /// Recipe sheet, or a directory of *.txt sheets. Uses the bundled sample when omitted
    #[arg(short, long, env = "ENDFIELD_RECIPES", global = true)]
    recipes: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every producible item
    Items,

    /// Show all recipes for an item
    Recipes {
        /// Item name, e.g. "Ferrium Part"
        item: String,
    },

    /// Calculate what it takes to produce an item
    Calc {
        /// Target item
        item: String,

        /// Number of units to produce
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=100))]
        quantity: u64,

        /// Show the full production tree
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the laid-out production tree
    Tree {
        /// Target item
        item: String,

        /// Number of units to produce
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..=100))]
        quantity: u64,

        /// Emit JSON for a renderer instead of text
        #[arg(long)]
        json: bool,
    },

    /// Report recipe lines that could not be parsed
    Check,
}

/// JSON document handed to renderers
#[derive(Serialize)]
struct TreeDocument<'a> {
    extent: LayoutExtent,
    root: &'a Node,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("endfield_planner=warn")),
        )
        .init();

    let cli = Cli::parse();

    let loaded = match &cli.recipes {
        Some(path) => loader::load_catalog(path)
            .with_context(|| format!("Failed to load recipes from {}", path.display()))?,
        None => loader::load_sample(),
    };

    match cli.command {
        Commands::Items => {
            let items = loaded.catalog.items();
            if items.is_empty() {
                println!("No recipes loaded. Check the sheet with 'check'.");
            } else {
                println!("Producible items:");
                for item in items {
                    println!("  {}", item);
                }
            }
        }

        Commands::Recipes { item } => {
            let recipes = loaded.catalog.recipes_for(&item);
            if recipes.is_empty() {
                println!("No recipe produces '{}'", item);
            } else {
                println!("{}:", item);
                for (i, r) in recipes.iter().enumerate() {
                    let inputs = if r.inputs.is_empty() {
                        "(nothing)".to_string()
                    } else {
                        r.inputs
                            .iter()
                            .map(|(name, count)| format!("{} x{}", name, count))
                            .collect::<Vec<_>>()
                            .join(" + ")
                    };
                    let marker = if i == 0 { "*" } else { " " };
                    println!(
                        "  {} {} {}s | {} -> {} x{}",
                        marker, r.machine, r.time, inputs, item, r.output_count
                    );
                }
            }
        }

        Commands::Calc {
            item,
            quantity,
            verbose,
        } => {
            let chain = build(&loaded.catalog, &item, quantity)?;

            if verbose {
                println!("Production chain:\n");
                println!("{}", format_production_chain(&chain, 0));
            }

            println!("{}", summarize(&chain));
        }

        Commands::Tree {
            item,
            quantity,
            json,
        } => {
            let chain = build(&loaded.catalog, &item, quantity)?;

            if json {
                let doc = TreeDocument {
                    extent: extent(&chain),
                    root: &chain,
                };
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print!("{}", format_production_chain(&chain, 0));
            }
        }

        Commands::Check => print_check(&loaded),
    }

    Ok(())
}

fn build(catalog: &Catalog, item: &str, quantity: u64) -> Result<Node> {
    if !catalog.mentions(item) {
        return Err(PlannerError::UnknownItem(item.to_string()).into());
    }
    let quantity = NonZeroU64::new(quantity).context("quantity must be at least 1")?;
    Ok(plan(catalog, item, quantity))
}

fn print_check(loaded: &LoadedCatalog) {
    println!("{}", loaded.stats);
    println!("Blocks: {}", loaded.report.blocks);

    if loaded.report.skipped.is_empty() {
        println!("All recipe lines parsed.");
        return;
    }

    println!("\nSkipped lines:");
    for skipped in &loaded.report.skipped {
        println!(
            "  line {:>4}: {} ({})",
            skipped.line_no, skipped.text, skipped.reason
        );
    }
}
