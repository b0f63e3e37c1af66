//! Markdown rendering of schema tables and appendix sections.
//!
//! Schema documents become one anchored heading plus a fixed four-column
//! table. Appendix documents are passed through under their heading.

mod format;

use tracing::{debug, instrument};

use tagguide_shared::{AppendixDocument, Feature, FieldKind, SchemaDocument, Section};

pub use format::{FieldFormatter, LINE_BREAK, PhotoLinkBuilder, separator};

/// Header and alignment rows shared by every schema table.
pub const TABLE_HEADER: &str = "\
| Feature             | Description         | OSM Schema          | Photos              |
|---------------------|---------------------|---------------------|---------------------|
";

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Anchored second-level heading. The title is used verbatim as the id.
pub fn heading(title: &str) -> String {
    format!("<h2 id=\"{title}\">{title}</h2>")
}

/// Render a schema category as a heading, optional introduction, and table.
#[instrument(skip_all, fields(title = %doc.title, features = doc.features.len()))]
pub fn render_schema_section(doc: &SchemaDocument, formatter: &FieldFormatter) -> Section {
    let mut body = String::new();

    if let Some(intro) = doc.introduction.as_deref().filter(|s| !s.is_empty()) {
        body.push_str(intro);
        body.push('\n');
    }

    body.push_str(TABLE_HEADER);
    for feature in &doc.features {
        body.push_str(&render_row(feature, formatter));
        body.push('\n');
    }
    body.push('\n');

    debug!(len = body.len(), "schema section rendered");

    Section {
        anchor: doc.title.clone(),
        heading: heading(&doc.title),
        body,
    }
}

/// Render one table row. Element glyphs sit above the OSM tags in the same
/// cell; the two lists are not paired positionally.
pub fn render_row(feature: &Feature, formatter: &FieldFormatter) -> String {
    let description = formatter.format(&feature.description, FieldKind::Text);
    let elements = formatter.format(&feature.elements, FieldKind::Reference);
    let osm = formatter.format(&feature.osm, FieldKind::Text);
    let photos = formatter.format(&feature.photos, FieldKind::Photo);

    format!(
        "|**{name}**|{description}|{elements}{LINE_BREAK}{osm}|{photos}|",
        name = feature.name
    )
}

/// Render a free-form document verbatim under its heading.
pub fn render_appendix_section(doc: &AppendixDocument) -> Section {
    Section {
        anchor: doc.title.clone(),
        heading: heading(&doc.title),
        body: format!("{}\n", doc.body),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
