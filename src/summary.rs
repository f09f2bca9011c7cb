//! Chain summaries and text rendering

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::models::{Node, NodeSource};

/// Work done by one kind of machine across the whole tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MachineUsage {
    pub batches: u64,
    /// Sum of `time * batches` over every node using the machine
    pub busy_time: u64,
}

/// Totals over a resolved production tree
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainSummary {
    pub target: String,
    pub quantity: u64,
    pub batches: u64,
    pub total_time: u64,
    pub steps: usize,
    pub machines: Vec<(String, MachineUsage)>,
    pub raw_materials: Vec<(String, u64)>,
    pub cycles: Vec<(String, u64)>,
    pub depth_limited: Vec<(String, u64)>,
}

/// Summarize the tree rooted at `root`.
pub fn summarize(root: &Node) -> ChainSummary {
    let mut machines: HashMap<String, MachineUsage> = HashMap::new();
    let mut raw: HashMap<String, u64> = HashMap::new();
    let mut cycles: HashMap<String, u64> = HashMap::new();
    let mut depth_limited: HashMap<String, u64> = HashMap::new();

    for node in root.iter() {
        if let Some(recipe) = &node.recipe {
            let usage = machines.entry(recipe.machine.clone()).or_default();
            usage.batches = usage.batches.saturating_add(node.batches);
            usage.busy_time = usage
                .busy_time
                .saturating_add(recipe.time.saturating_mul(node.batches));
        }

        if !node.is_leaf() {
            continue;
        }
        let bucket = match node.source {
            NodeSource::CycleTruncated => &mut cycles,
            NodeSource::DepthLimited => &mut depth_limited,
            NodeSource::Recipe | NodeSource::Unresolved => &mut raw,
        };
        let total = bucket.entry(node.name.clone()).or_default();
        *total = total.saturating_add(node.amount);
    }

    ChainSummary {
        target: root.name.clone(),
        quantity: root.amount,
        batches: root.batches,
        total_time: root.total_time,
        steps: root.node_count(),
        machines: sorted(machines),
        raw_materials: sorted(raw),
        cycles: sorted(cycles),
        depth_limited: sorted(depth_limited),
    }
}

fn sorted<V>(map: HashMap<String, V>) -> Vec<(String, V)> {
    let mut list: Vec<_> = map.into_iter().collect();
    list.sort_by(|a, b| a.0.cmp(&b.0));
    list
}

impl fmt::Display for ChainSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Production Summary ===")?;
        writeln!(f, "Target: {}x {}", self.quantity, self.target)?;
        writeln!(
            f,
            "Time: {}s   Batches: {}   Steps: {}",
            self.total_time, self.batches, self.steps
        )?;
        writeln!(f)?;

        writeln!(f, "Machines:")?;
        if self.machines.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for (machine, usage) in &self.machines {
            writeln!(
                f,
                "  {:<24} {:>6} batches {:>8}s",
                machine, usage.batches, usage.busy_time
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Raw materials:")?;
        for (item, amount) in &self.raw_materials {
            writeln!(f, "  {}x {}", amount, item)?;
        }

        if !self.cycles.is_empty() {
            writeln!(f)?;
            writeln!(f, "Cut cycles (fed back from the chain):")?;
            for (item, amount) in &self.cycles {
                writeln!(f, "  {}x {}", amount, item)?;
            }
        }

        if !self.depth_limited.is_empty() {
            writeln!(f)?;
            writeln!(f, "Not expanded (chain too deep):")?;
            for (item, amount) in &self.depth_limited {
                writeln!(f, "  {}x {}", amount, item)?;
            }
        }

        Ok(())
    }
}

/// Render a tree as indented text, one node per line.
pub fn format_production_chain(node: &Node, indent: usize) -> String {
    let mut output = String::new();
    let prefix = "  ".repeat(indent);

    let detail = match (&node.recipe, node.source) {
        (Some(recipe), _) => format!(
            "{} x{} batches, {}s",
            recipe.machine, node.batches, node.total_time
        ),
        (None, NodeSource::CycleTruncated) => "cycle".to_string(),
        (None, NodeSource::DepthLimited) => "too deep".to_string(),
        (None, _) => "raw".to_string(),
    };
    output.push_str(&format!(
        "{}{}x {} ({}) @ L{} X{}\n",
        prefix, node.amount, node.name, detail, node.level, node.position_x
    ));

    for child in &node.children {
        output.push_str(&format_production_chain(child, indent + 1));
    }

    output
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU64;

    use super::*;
    use crate::calculator::plan;
    use crate::parser::parse_catalog;

    const SHEET: &str = "\
Smelting
Smelter 4s | IronOre x2 + Coal -> IronIngot
Smelter 6s | CopperOre -> CopperIngot

Parts
Assembler 10s | IronIngot x2 + CopperIngot -> Motor
Assembler 3s | Motor + Catalyst -> Catalyst x2
";

    fn chain(item: &str, n: u64) -> Node {
        plan(&parse_catalog(SHEET), item, NonZeroU64::new(n).unwrap())
    }

    #[test]
    fn aggregates_machines_and_raw_materials() {
        let summary = summarize(&chain("Motor", 2));

        assert_eq!(summary.target, "Motor");
        assert_eq!(summary.quantity, 2);
        assert_eq!(summary.batches, 2);
        assert_eq!(summary.steps, 6);
        assert_eq!(summary.total_time, 20 + 16);

        let names: Vec<&str> = summary.machines.iter().map(|(m, _)| m.as_str()).collect();
        assert_eq!(names, vec!["Assembler", "Smelter"]);
        assert_eq!(summary.machines[0].1, MachineUsage { batches: 2, busy_time: 20 });
        assert_eq!(summary.machines[1].1, MachineUsage { batches: 6, busy_time: 28 });

        assert_eq!(
            summary.raw_materials,
            vec![
                ("Coal".to_string(), 4),
                ("CopperOre".to_string(), 2),
                ("IronOre".to_string(), 8),
            ]
        );
        assert!(summary.cycles.is_empty());
        assert!(summary.depth_limited.is_empty());
    }

    #[test]
    fn cycles_are_listed_apart() {
        let summary = summarize(&chain("Catalyst", 1));

        assert_eq!(summary.cycles, vec![("Catalyst".to_string(), 1)]);
        assert!(!summary.raw_materials.iter().any(|(n, _)| n == "Catalyst"));
        assert!(summary.to_string().contains("Cut cycles"));
    }

    #[test]
    fn tree_text_is_indented() {
        let text = format_production_chain(&chain("IronIngot", 1), 0);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("1x IronIngot (Smelter x1 batches, 4s)"));
        assert!(lines[1].starts_with("  2x IronOre (raw)"));
        assert!(lines[2].starts_with("  1x Coal (raw)"));
    }
}
