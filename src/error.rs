//! Errors raised while sourcing recipe sheets

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no recipe sheets (*.txt) found under {}", .0.display())]
    NoRecipeFiles(PathBuf),

    #[error("'{0}' is not produced or consumed by any recipe")]
    UnknownItem(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
