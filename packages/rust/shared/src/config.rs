//! Application configuration for the tagging guide builder.
//!
//! Project config lives at `./tagguide.toml` next to the schema directory.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TagGuideError};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "tagguide.toml";

/// Placeholder substituted with the photo identifier in URL templates.
pub const PHOTO_ID_PLACEHOLDER: &str = "{id}";

// ---------------------------------------------------------------------------
// Config structs (matching tagguide.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Output document settings.
    #[serde(default)]
    pub document: DocumentConfig,

    /// Where schema and appendix files are read from.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Photo link templates.
    #[serde(default)]
    pub photos: PhotoConfig,
}

/// `[document]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Top-level heading of the generated document.
    #[serde(default = "default_title")]
    pub title: String,

    /// Path of the generated document.
    #[serde(default = "default_output")]
    pub output: String,

    /// File whose contents replace the built-in reference-link footer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer_path: Option<String>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            output: default_output(),
            footer_path: None,
        }
    }
}

fn default_title() -> String {
    "OSM Bike Ottawa Tagging Guide".into()
}
fn default_output() -> String {
    "README.md".into()
}

/// `[sources]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Directory holding schema and appendix files.
    #[serde(default = "default_source_dir")]
    pub dir: String,

    /// Extension of structured schema files.
    #[serde(default = "default_schema_extension")]
    pub schema_extension: String,

    /// Extension of free-form appendix files.
    #[serde(default = "default_appendix_extension")]
    pub appendix_extension: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            dir: default_source_dir(),
            schema_extension: default_schema_extension(),
            appendix_extension: default_appendix_extension(),
        }
    }
}

fn default_source_dir() -> String {
    "schema".into()
}
fn default_schema_extension() -> String {
    "yml".into()
}
fn default_appendix_extension() -> String {
    "md".into()
}

/// `[photos]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoConfig {
    /// Page the thumbnail links to. `{id}` is replaced by the photo key.
    #[serde(default = "default_viewer_url")]
    pub viewer_url: String,

    /// Thumbnail image source. `{id}` is replaced by the photo key.
    #[serde(default = "default_thumbnail_url")]
    pub thumbnail_url: String,

    /// Fixed thumbnail width in pixels.
    #[serde(default = "default_thumbnail_width")]
    pub thumbnail_width: u32,
}

impl Default for PhotoConfig {
    fn default() -> Self {
        Self {
            viewer_url: default_viewer_url(),
            thumbnail_url: default_thumbnail_url(),
            thumbnail_width: default_thumbnail_width(),
        }
    }
}

fn default_viewer_url() -> String {
    "https://www.mapillary.com/app/?focus=photo&pKey={id}".into()
}
fn default_thumbnail_url() -> String {
    "https://d1cuyjsrcm0gby.cloudfront.net/{id}/thumb-1024.jpg".into()
}
fn default_thumbnail_width() -> u32 {
    300
}

// ---------------------------------------------------------------------------
// Build config (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime build configuration: merged from config file + CLI flags.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Directory holding schema and appendix files.
    pub source_dir: PathBuf,
    /// Schema file extension (without the dot).
    pub schema_extension: String,
    /// Appendix file extension (without the dot).
    pub appendix_extension: String,
    /// Path of the generated document.
    pub output: PathBuf,
    /// Document heading.
    pub title: String,
    /// Optional footer override file.
    pub footer_path: Option<PathBuf>,
    /// Photo link templates.
    pub photos: PhotoConfig,
}

impl From<&AppConfig> for BuildConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            source_dir: PathBuf::from(&config.sources.dir),
            schema_extension: config.sources.schema_extension.clone(),
            appendix_extension: config.sources.appendix_extension.clone(),
            output: PathBuf::from(&config.document.output),
            title: config.document.title.clone(),
            footer_path: config.document.footer_path.as_ref().map(PathBuf::from),
            photos: config.photos.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Path of the config file in the current working directory.
pub fn config_file_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| TagGuideError::io(".", e))?;
    Ok(cwd.join(CONFIG_FILE_NAME))
}

/// Load the project config. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the project config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TagGuideError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        TagGuideError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    validate_config(&config)?;
    Ok(config)
}

/// Write a default config file into `dir`. Returns the path to the created file.
pub fn init_config(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() {
        return Err(TagGuideError::config(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&AppConfig::default())
        .map_err(|e| TagGuideError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| TagGuideError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Reject configs whose photo templates cannot carry the photo key.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let photos = &config.photos;
    for (name, template) in [
        ("viewer_url", &photos.viewer_url),
        ("thumbnail_url", &photos.thumbnail_url),
    ] {
        if !template.contains(PHOTO_ID_PLACEHOLDER) {
            return Err(TagGuideError::config(format!(
                "photos.{name} must contain the {PHOTO_ID_PLACEHOLDER} placeholder"
            )));
        }
    }
    if photos.thumbnail_width == 0 {
        return Err(TagGuideError::config("photos.thumbnail_width must be positive"));
    }
    Ok(())
}
