//! Recipe sheet sourcing
//!
//! Reads a single sheet, or every `*.txt` sheet below a directory, and parses
//! the combined text into a catalog.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use walkdir::WalkDir;

use crate::error::{PlannerError, Result};
use crate::models::Catalog;
use crate::parser::{ParseReport, parse_catalog_with_report};

/// Sample sheet shipped with the binary
pub const SAMPLE_RECIPES: &str = include_str!("../data/recipes.txt");

/// A parsed catalog together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub report: ParseReport,
    pub stats: LoadStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub files: usize,
    pub items: usize,
    pub recipes: usize,
    pub skipped: usize,
}

impl fmt::Display for LoadStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Loaded {} items ({} recipes) from {} file(s). Skipped lines: {}",
            self.items, self.recipes, self.files, self.skipped
        )
    }
}

/// Find all recipe sheets below `dir`, sorted by path
pub fn find_recipe_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    files
}

/// Load a sheet file, or every sheet in a directory.
///
/// Unreadable files inside a directory are logged and skipped; an unreadable
/// single file is an error.
pub fn load_catalog(path: &Path) -> Result<LoadedCatalog> {
    let (text, files) = if path.is_dir() {
        let mut sheets = Vec::new();
        for file in find_recipe_files(path) {
            match read_sheet(&file) {
                Ok(text) => sheets.push(text),
                Err(e) => warn!(error = %e, "skipping recipe sheet"),
            }
        }
        if sheets.is_empty() {
            return Err(PlannerError::NoRecipeFiles(path.to_path_buf()));
        }
        let count = sheets.len();
        // Blank line keeps blocks from merging across files
        (sheets.join("\n\n"), count)
    } else {
        (read_sheet(path)?, 1)
    };

    let loaded = load_text(&text, files);
    info!(path = %path.display(), "{}", loaded.stats);
    Ok(loaded)
}

/// Load the sample sheet shipped with the binary
pub fn load_sample() -> LoadedCatalog {
    load_text(SAMPLE_RECIPES, 1)
}

fn load_text(text: &str, files: usize) -> LoadedCatalog {
    let (catalog, report) = parse_catalog_with_report(text);
    let stats = LoadStats {
        files,
        items: catalog.len(),
        recipes: catalog.recipe_count(),
        skipped: report.skipped.len(),
    };
    LoadedCatalog {
        catalog,
        report,
        stats,
    }
}

fn read_sheet(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| PlannerError::Io {
        path: path.to_path_buf(),
        source,
    })
}
