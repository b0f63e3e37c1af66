//! Shared types, error model, and configuration for the tagging guide builder.
//!
//! This crate is the foundation depended on by all other tagguide crates.
//! It provides:
//! - [`TagGuideError`]: the unified error type
//! - Domain types ([`PolyField`], [`Feature`], [`SchemaDocument`], [`Section`], [`Toc`])
//! - Configuration ([`AppConfig`], [`BuildConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, BuildConfig, CONFIG_FILE_NAME, DocumentConfig, PHOTO_ID_PLACEHOLDER, PhotoConfig,
    SourcesConfig, config_file_path, init_config, load_config, load_config_from, validate_config,
};
pub use error::{Result, TagGuideError};
pub use types::{
    AppendixDocument, Feature, FieldKind, PolyField, SchemaDocument, Section, Toc, TocEntry,
};
