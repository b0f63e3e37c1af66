//! Source discovery and loading.
//!
//! Schema files (`*.yml`) and appendix files (`*.md`) live side by side in a
//! single source directory. Each kind is listed in lexicographic file-name
//! order, which becomes the order of sections in the generated document.

mod parser;

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use tagguide_shared::{AppendixDocument, Result, SchemaDocument, TagGuideError};

/// Everything the renderer needs, in document order.
#[derive(Debug, Clone, Default)]
pub struct Sources {
    pub schemas: Vec<SchemaDocument>,
    pub appendices: Vec<AppendixDocument>,
}

// ---------------------------------------------------------------------------
// Main entry point
// ---------------------------------------------------------------------------

/// Load all schema and appendix documents from `dir`.
#[instrument(skip_all, fields(dir = %dir.display()))]
pub fn load_sources(dir: &Path, schema_extension: &str, appendix_extension: &str) -> Result<Sources> {
    let schemas = list_files(dir, schema_extension)?
        .iter()
        .map(|path| load_schema(path))
        .collect::<Result<Vec<_>>>()?;

    let appendices = list_files(dir, appendix_extension)?
        .iter()
        .map(|path| load_appendix(path))
        .collect::<Result<Vec<_>>>()?;

    info!(
        schemas = schemas.len(),
        appendices = appendices.len(),
        "sources loaded"
    );

    Ok(Sources {
        schemas,
        appendices,
    })
}

/// List regular files in `dir` with the given extension, sorted by file name.
/// Hidden files (leading `.`) are skipped.
pub fn list_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| TagGuideError::io(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| TagGuideError::io(dir, e))?.path();
        if path.is_file()
            && !is_hidden(&path)
            && path.extension().is_some_and(|ext| ext == extension)
        {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    debug!(extension, count = files.len(), "listed source files");
    Ok(files)
}

/// Load one schema file.
pub fn load_schema(path: &Path) -> Result<SchemaDocument> {
    let content = std::fs::read_to_string(path).map_err(|e| TagGuideError::io(path, e))?;
    let doc = parser::parse_schema(path, &content, &file_stem(path))?;
    debug!(path = %path.display(), title = %doc.title, features = doc.features.len(), "loaded schema");
    Ok(doc)
}

/// Load one appendix file. The title is the file name without extension.
pub fn load_appendix(path: &Path) -> Result<AppendixDocument> {
    let body = std::fs::read_to_string(path).map_err(|e| TagGuideError::io(path, e))?;
    debug!(path = %path.display(), len = body.len(), "loaded appendix");
    Ok(AppendixDocument {
        title: file_stem(path),
        body,
    })
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tg-discovery-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn files_sorted_by_name_and_filtered_by_extension() {
        let dir = temp_dir();
        for name in ["b.yml", "a.yml", "c.md", "notes.txt", "10-x.yml", ".hidden.yml", ".draft.yml"] {
            std::fs::write(dir.join(name), "features: []\n").unwrap();
        }
        std::fs::create_dir_all(dir.join("nested.yml")).unwrap();

        let files = list_files(&dir, "yml").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["10-x.yml", "a.yml", "b.yml"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_sources_orders_both_kinds() {
        let dir = temp_dir();
        std::fs::write(dir.join("2-paths.yml"), "title: Paths\nfeatures: []\n").unwrap();
        std::fs::write(dir.join("1-lanes.yml"), "features: []\n").unwrap();
        std::fs::write(dir.join("Notes.md"), "Hello").unwrap();
        std::fs::write(dir.join("Credits.md"), "Thanks\n").unwrap();
        std::fs::write(dir.join(".old.md"), "stale").unwrap();
        std::fs::write(dir.join(".draft.yml"), "title: Draft\nfeatures: []\n").unwrap();

        let sources = load_sources(&dir, "yml", "md").unwrap();

        let schema_titles: Vec<_> = sources.schemas.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(schema_titles, vec!["1-lanes", "Paths"]);

        let appendix_titles: Vec<_> = sources.appendices.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(appendix_titles, vec!["Credits", "Notes"]);
        assert_eq!(sources.appendices[1].body, "Hello");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_directory_is_io_error() {
        let dir = std::env::temp_dir().join(format!("tg-missing-{}", uuid::Uuid::now_v7()));
        let err = load_sources(&dir, "yml", "md").unwrap_err();
        assert!(matches!(err, TagGuideError::Io { .. }));
    }

    #[test]
    fn bad_schema_aborts_loading() {
        let dir = temp_dir();
        std::fs::write(dir.join("ok.yml"), "features: []\n").unwrap();
        std::fs::write(
            dir.join("zz-bad.yml"),
            "features:\n  - feature: X\n    description: {a: b}\n",
        )
        .unwrap();

        let err = load_sources(&dir, "yml", "md").unwrap_err();
        assert!(matches!(err, TagGuideError::UnsupportedShape { .. }));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
