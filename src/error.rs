use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors raised around the conversion: reading input and writing XML.
///
/// Building the GPX tree itself never fails.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] geojson::Error),

    #[error("Invalid options: {0}")]
    Options(String),

    #[error("XML write error: {0}")]
    Xml(String),
}

impl ConvertError {
    pub fn options(message: impl Into<String>) -> Self {
        Self::Options(message.into())
    }

    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml(message.into())
    }
}

impl From<ConvertError> for JsValue {
    fn from(e: ConvertError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
