use std::path::PathBuf;

use super::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Validation failed: {0}")]
    Invalid(#[from] ValidationErrors),

    #[error("Failed to write {kind} artifact {}: {source}", .path.display())]
    Io {
        kind: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Unexpected(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
