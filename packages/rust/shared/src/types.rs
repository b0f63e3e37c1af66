//! Core domain types for the tagging guide.

use std::fmt;

use serde_yaml::Value;

// ---------------------------------------------------------------------------
// FieldKind
// ---------------------------------------------------------------------------

/// How a feature field is displayed. Each kind carries its own per-value
/// transform and list separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free text; newlines become `<br>`.
    Text,
    /// Image reference marker, e.g. `![way]`.
    Reference,
    /// Photo identifier rendered as a clickable thumbnail.
    Photo,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Reference => "reference",
            Self::Photo => "photo",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// PolyField
// ---------------------------------------------------------------------------

/// A field that may be absent, hold one value, or hold an ordered list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PolyField {
    #[default]
    Empty,
    Single(String),
    /// Always non-empty.
    Many(Vec<String>),
}

impl PolyField {
    /// Convert a raw YAML value.
    ///
    /// Returns `None` for shapes this field cannot hold: mappings, nested
    /// lists, tagged values, and `null` list elements. Numbers and booleans
    /// are taken in their textual form.
    pub fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Empty),
            Value::Sequence(items) if items.is_empty() => Some(Self::Empty),
            Value::Sequence(items) => items
                .iter()
                .map(scalar_text)
                .collect::<Option<Vec<_>>>()
                .map(Self::Many),
            other => scalar_text(other).map(|s| {
                if s.is_empty() {
                    Self::Empty
                } else {
                    Self::Single(s)
                }
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl From<&str> for PolyField {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Self::Empty
        } else {
            Self::Single(s.to_string())
        }
    }
}

impl From<Vec<&str>> for PolyField {
    fn from(items: Vec<&str>) -> Self {
        if items.is_empty() {
            Self::Empty
        } else {
            Self::Many(items.into_iter().map(String::from).collect())
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Documents
// ---------------------------------------------------------------------------

/// One row of tagging guidance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feature {
    pub name: String,
    pub description: PolyField,
    pub osm: PolyField,
    pub elements: PolyField,
    pub photos: PolyField,
}

/// A schema category loaded from one structured source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaDocument {
    /// Section title; also used verbatim as the anchor.
    pub title: String,
    /// Optional paragraph shown above the table.
    pub introduction: Option<String>,
    /// Table rows in source order.
    pub features: Vec<Feature>,
}

/// A free-form document appended after the schema tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendixDocument {
    pub title: String,
    /// Raw text, emitted unmodified.
    pub body: String,
}

/// One rendered, anchored block of the final document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub anchor: String,
    /// The rendered heading line, carrying the anchor id.
    pub heading: String,
    pub body: String,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.heading, self.body)
    }
}

// ---------------------------------------------------------------------------
// Toc
// ---------------------------------------------------------------------------

/// A single table of contents entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Display title.
    pub title: String,
    /// Fragment the entry links to (without the leading `#`).
    pub anchor: String,
}

/// Ordered table of contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Toc {
    pub entries: Vec<TocEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(src: &str) -> Value {
        serde_yaml::from_str(src).unwrap()
    }

    #[test]
    fn empty_shapes() {
        assert_eq!(PolyField::from_yaml(&yaml("~")), Some(PolyField::Empty));
        assert_eq!(PolyField::from_yaml(&yaml("[]")), Some(PolyField::Empty));
        assert_eq!(PolyField::from_yaml(&yaml("''")), Some(PolyField::Empty));
    }

    #[test]
    fn single_and_many() {
        assert_eq!(
            PolyField::from_yaml(&yaml("way")),
            Some(PolyField::Single("way".into()))
        );
        assert_eq!(
            PolyField::from_yaml(&yaml("[highway=cycleway, surface=asphalt]")),
            Some(PolyField::Many(vec![
                "highway=cycleway".into(),
                "surface=asphalt".into()
            ]))
        );
    }

    #[test]
    fn scalars_become_text() {
        assert_eq!(
            PolyField::from_yaml(&yaml("42")),
            Some(PolyField::Single("42".into()))
        );
        assert_eq!(
            PolyField::from_yaml(&yaml("[1, true]")),
            Some(PolyField::Many(vec!["1".into(), "true".into()]))
        );
    }

    #[test]
    fn nested_shapes_rejected() {
        assert_eq!(PolyField::from_yaml(&yaml("{key: value}")), None);
        assert_eq!(PolyField::from_yaml(&yaml("[[a, b]]")), None);
        assert_eq!(PolyField::from_yaml(&yaml("[a, ~]")), None);
        assert_eq!(PolyField::from_yaml(&yaml("[{k: v}]")), None);
    }

    #[test]
    fn section_display_joins_heading_and_body() {
        let section = Section {
            anchor: "Notes".into(),
            heading: "<h2 id=\"Notes\">Notes</h2>".into(),
            body: "Hello\n".into(),
        };
        assert_eq!(section.to_string(), "<h2 id=\"Notes\">Notes</h2>\n\nHello\n");
    }

    #[test]
    fn field_kind_display() {
        assert_eq!(FieldKind::Reference.to_string(), "reference");
        assert_eq!(FieldKind::Photo.to_string(), "photo");
    }
}
