//! Field normalization: one formatter for every table column.
//!
//! A column's display rule is fully described by its [`FieldKind`]: the
//! transform applied to each value and the separator used to join lists.

use tagguide_shared::{FieldKind, PHOTO_ID_PLACEHOLDER, PhotoConfig, PolyField};

/// Inline line break used inside table cells.
pub const LINE_BREAK: &str = "<br>";

// ---------------------------------------------------------------------------
// PhotoLinkBuilder
// ---------------------------------------------------------------------------

/// Builds clickable thumbnail snippets from opaque photo identifiers.
#[derive(Debug, Clone, Default)]
pub struct PhotoLinkBuilder {
    config: PhotoConfig,
}

impl PhotoLinkBuilder {
    pub fn new(config: PhotoConfig) -> Self {
        Self { config }
    }

    /// Anchor to the photo viewer wrapping a fixed-width thumbnail.
    pub fn build_link(&self, photo_id: &str) -> String {
        let href = self.config.viewer_url.replace(PHOTO_ID_PLACEHOLDER, photo_id);
        let src = self.config.thumbnail_url.replace(PHOTO_ID_PLACEHOLDER, photo_id);
        let width = self.config.thumbnail_width;
        let style = format!("min-width:{width}px;max-width:{width}px");
        format!("<a href='{href}'><img style='{style}' src='{src}'></a>")
    }
}

// ---------------------------------------------------------------------------
// FieldFormatter
// ---------------------------------------------------------------------------

/// Normalizes [`PolyField`] values into table cell text.
#[derive(Debug, Clone, Default)]
pub struct FieldFormatter {
    photos: PhotoLinkBuilder,
}

impl FieldFormatter {
    pub fn new(photos: PhotoLinkBuilder) -> Self {
        Self { photos }
    }

    /// Render a field for the given column kind.
    pub fn format(&self, value: &PolyField, kind: FieldKind) -> String {
        match value {
            PolyField::Empty => String::new(),
            PolyField::Single(s) => self.format_one(s, kind),
            PolyField::Many(items) => items
                .iter()
                .map(|s| self.format_one(s, kind))
                .collect::<Vec<_>>()
                .join(separator(kind)),
        }
    }

    fn format_one(&self, value: &str, kind: FieldKind) -> String {
        match kind {
            FieldKind::Text => value.replace('\n', LINE_BREAK),
            FieldKind::Reference => format!("![{value}]"),
            FieldKind::Photo => self.photos.build_link(value),
        }
    }
}

/// List separator for a column kind.
pub fn separator(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Text | FieldKind::Photo => LINE_BREAK,
        FieldKind::Reference => " ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KINDS: [FieldKind; 3] = [FieldKind::Text, FieldKind::Reference, FieldKind::Photo];

    fn formatter() -> FieldFormatter {
        FieldFormatter::default()
    }

    #[test]
    fn empty_is_blank_for_every_kind() {
        for kind in KINDS {
            assert_eq!(formatter().format(&PolyField::Empty, kind), "");
        }
    }

    #[test]
    fn single_text_passthrough() {
        let out = formatter().format(&"Painted buffer".into(), FieldKind::Text);
        assert_eq!(out, "Painted buffer");
    }

    #[test]
    fn single_text_replaces_newlines() {
        let out = formatter().format(&"line one\nline two\n".into(), FieldKind::Text);
        assert!(!out.contains('\n'));
        assert_eq!(out, "line one<br>line two<br>");
    }

    #[test]
    fn single_reference_marker() {
        assert_eq!(formatter().format(&"way".into(), FieldKind::Reference), "![way]");
    }

    #[test]
    fn many_references_joined_by_space() {
        let value = PolyField::from(vec!["node", "way", "area"]);
        assert_eq!(
            formatter().format(&value, FieldKind::Reference),
            "![node] ![way] ![area]"
        );
    }

    #[test]
    fn many_splits_back_into_element_transforms() {
        let items = vec!["highway=cycleway", "surface=asphalt", "abc"];
        let value = PolyField::from(items.clone());
        let f = formatter();
        for kind in KINDS {
            let out = f.format(&value, kind);
            let parts: Vec<&str> = out.split(separator(kind)).collect();
            assert_eq!(parts.len(), items.len(), "kind {kind}");
            for (part, item) in parts.iter().zip(&items) {
                assert_eq!(*part, f.format(&PolyField::from(*item), kind));
            }
        }
    }

    #[test]
    fn many_text_lines_replace_newlines_per_element() {
        let value = PolyField::from(vec!["a\nb", "c"]);
        assert_eq!(formatter().format(&value, FieldKind::Text), "a<br>b<br>c");
    }

    #[test]
    fn photo_link_exact_snippet() {
        let link = PhotoLinkBuilder::default().build_link("abc123");
        assert_eq!(
            link,
            "<a href='https://www.mapillary.com/app/?focus=photo&pKey=abc123'>\
             <img style='min-width:300px;max-width:300px' \
             src='https://d1cuyjsrcm0gby.cloudfront.net/abc123/thumb-1024.jpg'></a>"
        );
    }

    #[test]
    fn photo_link_mentions_id_twice() {
        let links = PhotoLinkBuilder::default();
        for id in ["abc123", "Zx9_-k", "q"] {
            assert_eq!(links.build_link(id).matches(id).count(), 2, "id {id}");
        }
    }

    #[test]
    fn photo_link_is_deterministic() {
        let links = PhotoLinkBuilder::default();
        assert_eq!(links.build_link("k1"), links.build_link("k1"));
    }

    #[test]
    fn photo_link_uses_configured_templates() {
        let links = PhotoLinkBuilder::new(PhotoConfig {
            viewer_url: "https://photos.example/{id}".into(),
            thumbnail_url: "https://cdn.example/{id}.jpg".into(),
            thumbnail_width: 120,
        });
        assert_eq!(
            links.build_link("p7"),
            "<a href='https://photos.example/p7'>\
             <img style='min-width:120px;max-width:120px' src='https://cdn.example/p7.jpg'></a>"
        );
    }

    #[test]
    fn many_photos_joined_by_line_break() {
        let value = PolyField::from(vec!["a1", "b2"]);
        let out = formatter().format(&value, FieldKind::Photo);
        assert_eq!(out.matches("<a href=").count(), 2);
        assert!(out.contains("</a><br><a href="));
    }
}
