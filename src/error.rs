use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

// Clone is load-bearing: loaders memoize failed loads and replay them to
// later callers, so every variant must be cloneable. Non-Clone sources are
// shared behind Arc.
#[derive(Debug, Clone, Error)]
pub enum FigstackError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: Arc<std::io::Error>,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: Arc<dyn std::error::Error + Send + Sync>,
    },

    #[error("Required setting '{0}' not set")]
    RequiredNotSet(String),

    #[error("Invalid value '{value}' for '{key}': {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Invalid configuration: {0}")]
    Validation(String),
}
