use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::converter::format_number;

/// Options for GeoJSON to GPX conversion.
///
/// Every field is optional. Values of the wrong JSON type are treated as
/// absent instead of failing the whole conversion.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConversionOptions {
    /// Value of the root `creator` attribute (default: the library name)
    #[serde(deserialize_with = "string_or_none")]
    pub creator: Option<String>,

    /// Content of the `<metadata>` element; no element when absent
    #[serde(deserialize_with = "object_or_none")]
    pub metadata: Option<MetaData>,
}

/// Document-level metadata, rendered as `<metadata>`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetaData {
    #[serde(deserialize_with = "string_or_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub desc: Option<String>,
    #[serde(deserialize_with = "object_or_none")]
    pub author: Option<Person>,
    #[serde(deserialize_with = "object_or_none")]
    pub copyright: Option<Copyright>,
    #[serde(deserialize_with = "object_or_none")]
    pub link: Option<Link>,
    #[serde(deserialize_with = "string_or_none")]
    pub time: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub keywords: Option<String>,
    /// Accepted for completeness; not written to the document.
    #[serde(deserialize_with = "object_or_none")]
    pub bounds: Option<Bounds>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Person {
    #[serde(deserialize_with = "string_or_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub email: Option<String>,
    #[serde(deserialize_with = "object_or_none")]
    pub link: Option<Link>,
}

/// Copyright notice. `author` becomes an attribute, not a child element.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Copyright {
    #[serde(deserialize_with = "string_or_none")]
    pub author: Option<String>,
    #[serde(deserialize_with = "scalar_or_none")]
    pub year: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub license: Option<String>,
}

/// A `<link>`; only rendered when `href` is non-empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Link {
    #[serde(deserialize_with = "string_or_none")]
    pub href: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub text: Option<String>,
    #[serde(rename = "type", deserialize_with = "string_or_none")]
    pub link_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Bounds {
    pub minlat: Option<f64>,
    pub minlon: Option<f64>,
    pub maxlat: Option<f64>,
    pub maxlon: Option<f64>,
}

impl ConversionOptions {
    pub fn with_creator(creator: impl Into<String>) -> Self {
        Self {
            creator: Some(creator.into()),
            metadata: None,
        }
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Some(s),
        _ => None,
    })
}

fn scalar_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match JsonValue::deserialize(deserializer)? {
        JsonValue::String(s) => Some(s),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Some(i.to_string()),
            None => n.as_f64().map(format_number),
        },
        _ => None,
    })
}

fn object_or_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = JsonValue::deserialize(deserializer)?;
    if !value.is_object() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_object_is_default() {
        let opts: ConversionOptions = serde_json::from_value(json!({})).unwrap();
        assert!(opts.creator.is_none());
        assert!(opts.metadata.is_none());
    }

    #[test]
    fn test_full_metadata() {
        let opts: ConversionOptions = serde_json::from_value(json!({
            "creator": "me",
            "metadata": {
                "name": "Trip",
                "author": { "name": "Ada", "link": { "href": "https://a.example", "type": "text/html" } },
                "copyright": { "author": "Ada", "year": 2024 },
                "bounds": { "minlat": 1.0, "minlon": 2.0, "maxlat": 3.0, "maxlon": 4.0 }
            }
        }))
        .unwrap();

        assert_eq!(opts.creator.as_deref(), Some("me"));
        let meta = opts.metadata.unwrap();
        assert_eq!(meta.name.as_deref(), Some("Trip"));
        let author = meta.author.unwrap();
        let link = author.link.unwrap();
        assert_eq!(link.href.as_deref(), Some("https://a.example"));
        assert_eq!(link.link_type.as_deref(), Some("text/html"));
        assert_eq!(meta.copyright.unwrap().year.as_deref(), Some("2024"));
        assert_eq!(meta.bounds.unwrap().maxlon, Some(4.0));
    }

    #[test]
    fn test_wrong_types_become_absent() {
        let opts: ConversionOptions = serde_json::from_value(json!({
            "creator": 42,
            "metadata": {
                "name": ["not", "a", "string"],
                "author": "Ada",
                "copyright": null,
                "link": true,
                "time": 1700000000
            }
        }))
        .unwrap();

        assert!(opts.creator.is_none());
        let meta = opts.metadata.unwrap();
        assert!(meta.name.is_none());
        assert!(meta.author.is_none());
        assert!(meta.copyright.is_none());
        assert!(meta.link.is_none());
        assert!(meta.time.is_none());
    }

    #[test]
    fn test_metadata_not_object() {
        let opts: ConversionOptions =
            serde_json::from_value(json!({ "metadata": "yes please" })).unwrap();
        assert!(opts.metadata.is_none());
    }
}
