//! End-to-end build pipeline: sources → sections → document → output file.

use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, instrument};

use tagguide_discovery::{Sources, load_sources};
use tagguide_markdown::{
    FieldFormatter, PhotoLinkBuilder, render_appendix_section, render_schema_section,
};
use tagguide_shared::{BuildConfig, Result, TagGuideError};

use crate::assembler::{self, AssembleConfig, DEFAULT_FOOTER};
use crate::toc;

/// Result of a successful build.
#[derive(Debug)]
pub struct BuildResult {
    /// Path the document was written to (or checked against).
    pub output: PathBuf,
    /// Number of schema tables rendered.
    pub schema_count: usize,
    /// Number of appendix sections rendered.
    pub appendix_count: usize,
    /// Size of the generated document in bytes.
    pub bytes: usize,
    /// Total elapsed time.
    pub elapsed: std::time::Duration,
}

/// A fully rendered document, not yet written anywhere.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub content: String,
    pub schema_count: usize,
    pub appendix_count: usize,
}

/// Render already-loaded sources into the final document.
pub fn render_document(
    sources: &Sources,
    config: &AssembleConfig,
    formatter: &FieldFormatter,
) -> String {
    let titles = sources
        .schemas
        .iter()
        .map(|s| s.title.as_str())
        .chain(sources.appendices.iter().map(|a| a.title.as_str()));
    let toc = toc::build_toc(titles);

    let schema_sections: Vec<_> = sources
        .schemas
        .iter()
        .map(|doc| render_schema_section(doc, formatter))
        .collect();
    let appendix_sections: Vec<_> = sources
        .appendices
        .iter()
        .map(render_appendix_section)
        .collect();

    assembler::assemble(config, &schema_sections, &appendix_sections, &toc)
}

/// Load sources from disk and render them, without writing output.
#[instrument(skip_all, fields(source_dir = %config.source_dir.display()))]
pub fn render(config: &BuildConfig) -> Result<RenderedDocument> {
    let sources = load_sources(
        &config.source_dir,
        &config.schema_extension,
        &config.appendix_extension,
    )?;

    let footer = match &config.footer_path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| TagGuideError::io(path, e))?,
        None => DEFAULT_FOOTER.to_string(),
    };
    let assemble_config = AssembleConfig {
        title: config.title.clone(),
        footer,
    };
    let formatter = FieldFormatter::new(PhotoLinkBuilder::new(config.photos.clone()));

    Ok(RenderedDocument {
        content: render_document(&sources, &assemble_config, &formatter),
        schema_count: sources.schemas.len(),
        appendix_count: sources.appendices.len(),
    })
}

/// Render the document and write it to the configured output path.
///
/// On any error nothing is written.
#[instrument(skip_all, fields(output = %config.output.display()))]
pub fn build(config: &BuildConfig) -> Result<BuildResult> {
    let start = Instant::now();

    let rendered = render(config)?;
    assembler::write_document(&config.output, &rendered.content)?;

    let result = finish(config, &rendered, start);
    info!(
        schemas = result.schema_count,
        appendices = result.appendix_count,
        bytes = result.bytes,
        "build complete"
    );
    Ok(result)
}

/// Render the document and verify the output file already matches it.
#[instrument(skip_all, fields(output = %config.output.display()))]
pub fn check(config: &BuildConfig) -> Result<BuildResult> {
    let start = Instant::now();

    let rendered = render(config)?;
    assembler::check_document(&config.output, &rendered.content)?;

    Ok(finish(config, &rendered, start))
}

fn finish(config: &BuildConfig, rendered: &RenderedDocument, start: Instant) -> BuildResult {
    BuildResult {
        output: config.output.clone(),
        schema_count: rendered.schema_count,
        appendix_count: rendered.appendix_count,
        bytes: rendered.content.len(),
        elapsed: start.elapsed(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
