//! Document assembler.
//!
//! Concatenates the preamble, table of contents, rendered sections, and
//! footer into the final document, then hands it to the writer. Nothing
//! touches the output path until the whole document exists in memory.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use tagguide_shared::{Result, Section, TagGuideError, Toc};

use crate::toc::render_toc;

/// Reference-link definitions appended after the last section.
pub const DEFAULT_FOOTER: &str = r#"
[highway_cycleway]: http://wiki.openstreetmap.org/wiki/Tag:highway=cycleway
[cycleway]: http://wiki.openstreetmap.org/wiki/Key:cycleway
[highway]: http://wiki.openstreetmap.org/wiki/Key:highway
[path]: http://wiki.openstreetmap.org/wiki/Tag:highway=path
[bicycle]: http://wiki.openstreetmap.org/wiki/Key:bicycle
[surface]: https://wiki.openstreetmap.org/wiki/Key:surface
[fine_gravel]: https://wiki.openstreetmap.org/wiki/tag:surface=fine_gravel
[asphalt]: https://wiki.openstreetmap.org/wiki/tag:surface=asphalt
[smoothness]: https://wiki.openstreetmap.org/wiki/Key:smoothness
[access:conditional]: http://wiki.openstreetmap.org/wiki/Conditional_restrictions
[flood_prone]: http://wiki.openstreetmap.org/wiki/Key:flood_prone
[width]: http://wiki.openstreetmap.org/wiki/Key:width
[desire]: http://wiki.openstreetmap.org/wiki/Tag:path=desire
[hgv]: http://wiki.openstreetmap.org/wiki/Key:hgv
[barrier]: http://wiki.openstreetmap.org/wiki/Key:barrier
[cycle_barrier]: http://wiki.openstreetmap.org/wiki/Tag:barrier=cycle_barrier
[block]: https://wiki.openstreetmap.org/wiki/Tag:barrier=block
[buffer]: http://wiki.openstreetmap.org/wiki/Proposed_features/Buffered_bike_lane
[boardwalk]:http://wiki.openstreetmap.org/wiki/Tag:bridge=boardwalk
[ramp]:http://wiki.openstreetmap.org/wiki/Key:ramp
[steps]:http://wiki.openstreetmap.org/wiki/Tag:highway=steps
[shoulder]:http://wiki.openstreetmap.org/wiki/Key:shoulder
[share_busway]:http://wiki.openstreetmap.org/wiki/Tag:cycleway=share_busway
[parking:lane]:http://wiki.openstreetmap.org/wiki/Key:parking:lane
[seasonal]:http://wiki.openstreetmap.org/wiki/Key:seasonal
[segregated]:http://wiki.openstreetmap.org/wiki/Key:segregated
[bollard]: https://wiki.openstreetmap.org/wiki/Tag:barrier=bollard
[dismount]: http://wiki.openstreetmap.org/wiki/Key:access
[asl]: http://wiki.openstreetmap.org/wiki/Tag:cycleway=asl
[foot]: https://wiki.openstreetmap.org/wiki/Key:foot
[oneway]: http://wiki.openstreetmap.org/wiki/Key:oneway
[sharrows]: http://wiki.openstreetmap.org/wiki/Proposed_features/shared_lane
[bridge]: https://wiki.openstreetmap.org/wiki/Key:bridge
[traffic_sign]: https://wiki.openstreetmap.org/wiki/Key:traffic_sign
[lanes]: https://wiki.openstreetmap.org/wiki/Key:lanes
[maxspeed]: https://wiki.openstreetmap.org/wiki/Key:maxspeed
[access]: https://wiki.openstreetmap.org/wiki/Key:access
[parking]: https://wiki.openstreetmap.org/wiki/Key:parking
[swing_gate]: https://wiki.openstreetmap.org/wiki/Tag:barrier=swing_gate
[node]: /img/node.png "Node"
[way]: /img/way.png "Way"
[area]: /img/area.png "Area"
[relation]: /img/relation.png "Relation"
"#;

/// Configuration for document assembly.
#[derive(Debug, Clone)]
pub struct AssembleConfig {
    /// Top-level heading.
    pub title: String,
    /// Block emitted verbatim after all sections.
    pub footer: String,
}

impl Default for AssembleConfig {
    fn default() -> Self {
        Self {
            title: "OSM Bike Ottawa Tagging Guide".into(),
            footer: DEFAULT_FOOTER.into(),
        }
    }
}

/// Assemble the complete document.
///
/// Order is fixed: title, TOC, schema sections, appendix sections, footer.
/// Sections are emitted exactly as supplied.
#[instrument(skip_all, fields(schemas = schema_sections.len(), appendices = appendix_sections.len()))]
pub fn assemble(
    config: &AssembleConfig,
    schema_sections: &[Section],
    appendix_sections: &[Section],
    toc: &Toc,
) -> String {
    let mut out = format!("# {}\n\n", config.title);
    out.push_str(&render_toc(toc));

    for section in schema_sections.iter().chain(appendix_sections) {
        out.push_str(&section.to_string());
    }

    out.push_str(&config.footer);

    debug!(len = out.len(), "document assembled");
    out
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Write the document atomically: write a sibling temp file, then rename.
#[instrument(skip(content), fields(len = content.len()))]
pub fn write_document(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| TagGuideError::io(parent, e))?;
    }

    let temp = temp_path(path);
    std::fs::write(&temp, content).map_err(|e| TagGuideError::io(&temp, e))?;
    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(TagGuideError::io(path, e));
    }

    info!(path = %path.display(), "document written");
    Ok(())
}

/// Verify the document on disk matches `content`.
pub fn check_document(path: &Path, content: &str) -> Result<()> {
    let existing = match std::fs::read_to_string(path) {
        Ok(existing) => existing,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(TagGuideError::OutOfDate { path: path.into() });
        }
        Err(e) => return Err(TagGuideError::io(path, e)),
    };

    if existing != content {
        return Err(TagGuideError::OutOfDate { path: path.into() });
    }

    debug!(path = %path.display(), "document is up to date");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
