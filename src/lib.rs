pub mod converter;
pub mod document;
pub mod error;
pub mod options;
pub mod writer;

use geojson::GeoJson;
use wasm_bindgen::prelude::*;

use crate::error::ConvertError;
use crate::options::ConversionOptions;

pub use crate::converter::{DEFAULT_CREATOR, to_gpx};
pub use crate::document::{Document, Element};

/// Convert a GeoJSON object to a GPX 1.1 XML string.
#[wasm_bindgen(js_name = geoJsonToGpx)]
pub fn geojson_to_gpx(geojson: JsValue, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    let value: serde_json::Value = serde_wasm_bindgen::from_value(geojson)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let input = GeoJson::from_json_value(value).map_err(ConvertError::from)?;
    let doc = converter::to_gpx(&input, &opts);
    Ok(writer::to_xml_string(&doc)?)
}

/// Convert a GeoJSON string to a GPX 1.1 XML string.
#[wasm_bindgen(js_name = geoJsonStringToGpx)]
pub fn geojson_string_to_gpx(geojson_string: &str, options: JsValue) -> Result<String, JsValue> {
    console_error_panic_hook::set_once();

    let opts = parse_options(options)?;
    Ok(convert_str(geojson_string, &opts)?)
}

/// Parse GeoJSON text and serialize the resulting GPX document.
pub fn convert_str(geojson_string: &str, opts: &ConversionOptions) -> Result<String, ConvertError> {
    let input = geojson_string.parse::<GeoJson>()?;
    let doc = converter::to_gpx(&input, opts);
    writer::to_xml_string(&doc)
}

fn parse_options(options: JsValue) -> Result<ConversionOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        Ok(ConversionOptions::default())
    } else if !options.is_object() {
        Err(ConvertError::options("expected an object").into())
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| ConvertError::options(e.to_string()).into())
    }
}
