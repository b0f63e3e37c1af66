//! Schema file parser.
//!
//! A schema file is a YAML mapping:
//! - `title`: optional, falls back to the file name
//! - `introduction`: optional paragraph
//! - `features`: list of rows with `feature`, `description`, `osm`,
//!   `elements`, and `mapillary` (or `photos`) keys
//!
//! Every row field other than `feature` may be absent, a scalar, or a flat
//! list. Anything else is rejected here, before rendering starts.

use std::path::Path;

use serde::Deserialize;
use serde_yaml::Value;

use tagguide_shared::{Feature, FieldKind, PolyField, Result, SchemaDocument, TagGuideError};

// ---------------------------------------------------------------------------
// Raw YAML shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RawSchema {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    introduction: Option<String>,
    #[serde(default)]
    features: Option<Vec<RawFeature>>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    #[serde(rename = "feature", default)]
    name: String,
    #[serde(default)]
    description: Value,
    #[serde(default)]
    osm: Value,
    #[serde(default)]
    elements: Value,
    #[serde(rename = "mapillary", alias = "photos", default)]
    photos: Value,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse one schema file's contents.
///
/// `fallback_title` is used when the file has no (or an empty) `title`.
pub(crate) fn parse_schema(
    path: &Path,
    content: &str,
    fallback_title: &str,
) -> Result<SchemaDocument> {
    if content.trim().is_empty() {
        return Err(TagGuideError::load(path, "schema file is empty"));
    }

    let raw: RawSchema =
        serde_yaml::from_str(content).map_err(|e| TagGuideError::load(path, e.to_string()))?;

    let features = raw
        .features
        .unwrap_or_default()
        .into_iter()
        .map(convert_feature)
        .collect::<Result<Vec<_>>>()?;

    Ok(SchemaDocument {
        title: raw
            .title
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| fallback_title.to_string()),
        introduction: raw.introduction,
        features,
    })
}

fn convert_feature(raw: RawFeature) -> Result<Feature> {
    let description = field(&raw.name, "description", &raw.description, FieldKind::Text)?;
    let osm = field(&raw.name, "osm", &raw.osm, FieldKind::Text)?;
    let elements = field(&raw.name, "elements", &raw.elements, FieldKind::Reference)?;
    let photos = field(&raw.name, "mapillary", &raw.photos, FieldKind::Photo)?;

    Ok(Feature {
        name: raw.name,
        description,
        osm,
        elements,
        photos,
    })
}

fn field(feature: &str, name: &'static str, value: &Value, kind: FieldKind) -> Result<PolyField> {
    PolyField::from_yaml(value).ok_or_else(|| TagGuideError::UnsupportedShape {
        feature: feature.to_string(),
        field: name,
        kind,
    })
}
