//! Recipe sheet parsing
//!
//! A sheet is plain text split into blocks by blank lines. The first line of
//! each block is a heading and carries no data; every following line is one
//! recipe:
//!
//! ```text
//! Smelter 12s | IronOre x2 + Coal x1 -> IronIngot x3
//! ```
//!
//! Malformed lines are skipped so one bad entry never invalidates the sheet.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::models::{Catalog, Recipe};

/// Duration token at the end of the machine section, e.g. `12s`
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)s$").expect("time pattern is valid"));

/// `Name x3`, `Namex3`, or bare `Name`. A trailing ` x<junk>` is dropped and
/// counts as 1; junk glued to the name (`Orex2abc`, `Ingotx`) stays in it.
static TERM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.*?)(?:\s*x\s*(?P<count>\d+)|\s+x\S*)?$")
        .expect("term pattern is valid")
});

/// Why a recipe line was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    #[error("missing '|' between machine and formula")]
    MissingPipe,

    #[error("expected '<machine> <time>s' before '|'")]
    MissingMachine,

    #[error("invalid duration '{0}', expected e.g. '12s'")]
    InvalidTime(String),

    #[error("expected exactly one '->' in formula")]
    MalformedFormula,
}

/// A line dropped while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based, counted after line endings are normalized
    pub line_no: usize,
    pub text: String,
    pub reason: LineError,
}

/// What `parse_catalog_with_report` left out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub blocks: usize,
    pub recipes: usize,
    pub skipped: Vec<SkippedLine>,
}

/// Parse a recipe sheet into a catalog. Never fails.
pub fn parse_catalog(text: &str) -> Catalog {
    parse_catalog_with_report(text).0
}

/// Parse a recipe sheet, also reporting every skipped line.
pub fn parse_catalog_with_report(text: &str) -> (Catalog, ParseReport) {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut catalog = Catalog::new();
    let mut report = ParseReport::default();

    for block in blocks(&normalized) {
        // Headings are ignored; a block needs at least one line after it
        let Some((_heading, entries)) = block.split_first() else {
            continue;
        };
        if entries.is_empty() {
            continue;
        }
        report.blocks += 1;

        for &(line_no, line) in entries {
            match parse_recipe_line(line) {
                Ok((output, recipe)) => {
                    catalog.insert(output, recipe);
                    report.recipes += 1;
                }
                Err(reason) => {
                    debug!(line_no, line, %reason, "skipping recipe line");
                    report.skipped.push(SkippedLine {
                        line_no,
                        text: line.to_string(),
                        reason,
                    });
                }
            }
        }
    }

    (catalog, report)
}

/// Group trimmed, non-empty lines into blocks. An empty line ends a block;
/// a line holding only whitespace does not.
fn blocks(text: &str) -> Vec<Vec<(usize, &str)>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for (idx, raw) in text.split('\n').enumerate() {
        if raw.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }
        let line = raw.trim();
        if !line.is_empty() {
            current.push((idx + 1, line));
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Parse one recipe line into its output item and recipe.
pub fn parse_recipe_line(line: &str) -> Result<(String, Recipe), LineError> {
    let (left, right) = line.split_once('|').ok_or(LineError::MissingPipe)?;

    let tokens: Vec<&str> = left.split_whitespace().collect();
    let Some((time_token, machine_tokens)) = tokens.split_last() else {
        return Err(LineError::MissingMachine);
    };
    if machine_tokens.is_empty() {
        return Err(LineError::MissingMachine);
    }
    let time = TIME_RE
        .captures(time_token)
        .and_then(|cap| cap[1].parse::<u64>().ok())
        .ok_or_else(|| LineError::InvalidTime(time_token.to_string()))?;
    let machine = machine_tokens.join(" ");

    let parts: Vec<&str> = right.split("->").collect();
    let [input_expr, output_expr] = parts.as_slice() else {
        return Err(LineError::MalformedFormula);
    };

    // Empty names are kept as written; they resolve as unknown items
    let inputs: Vec<(String, u64)> = input_expr
        .split('+')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(parse_term)
        .collect();

    let (output, output_count) = parse_term(output_expr.trim());

    Ok((
        output,
        Recipe {
            machine,
            time,
            inputs,
            output_count,
        },
    ))
}

/// Split `Name x3` into its name and count. Missing, zero or unparsable
/// counts become 1.
fn parse_term(term: &str) -> (String, u64) {
    let Some(cap) = TERM_RE.captures(term) else {
        return (term.trim().to_string(), 1);
    };
    let name = cap["name"].trim().to_string();
    let count = cap
        .name("count")
        .and_then(|m| m.as_str().parse::<u64>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(1);
    (name, count)
}
