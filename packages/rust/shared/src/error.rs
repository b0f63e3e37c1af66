//! Error types for the tagging guide builder.
//!
//! Library crates use [`TagGuideError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

use crate::types::FieldKind;

/// Top-level error type for all tagging guide operations.
#[derive(Debug, thiserror::Error)]
pub enum TagGuideError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A source file could not be parsed into a schema or appendix document.
    #[error("load error in {path:?}: {message}")]
    Load { path: PathBuf, message: String },

    /// A feature field holds a value that is neither empty, a single value,
    /// nor a flat list of values.
    #[error("unsupported shape for field `{field}` ({kind}) of feature `{feature}`")]
    UnsupportedShape {
        feature: String,
        field: &'static str,
        kind: FieldKind,
    },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The generated document differs from the one on disk.
    #[error("{path:?} is out of date; rerun `tagguide build`")]
    OutOfDate { path: PathBuf },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TagGuideError>;

impl TagGuideError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a load error for a source file.
    pub fn load(path: impl Into<PathBuf>, msg: impl Into<String>) -> Self {
        Self::Load {
            path: path.into(),
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
