use geojson::{Feature, GeoJson, Geometry, JsonObject, Value};
use serde_json::Value as JsonValue;
use tracing::{debug, trace, warn};

use crate::document::{Document, Element, GPX_NAMESPACE};
use crate::options::{ConversionOptions, Copyright, Link, MetaData, Person};

/// `creator` attribute used when the caller does not supply one.
pub const DEFAULT_CREATOR: &str = "geojson2gpx-wasm";

pub const GPX_VERSION: &str = "1.1";

/// Feature property keys copied onto `wpt` and `trk`, in output order.
const FEATURE_PROPERTY_KEYS: [&str; 4] = ["name", "desc", "src", "type"];

/// Convert GeoJSON into a GPX 1.1 document tree.
///
/// Only Point, MultiPoint, LineString and MultiLineString geometries produce
/// output; every other geometry is dropped without error.
pub fn to_gpx(geojson: &GeoJson, opts: &ConversionOptions) -> Document {
    let mut doc = new_document(opts.creator.as_deref());
    let metadata = opts.metadata.as_ref().map(create_metadata);

    let mut collector = Collector::default();
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            debug!(features = fc.features.len(), "converting feature collection");
            for feature in &fc.features {
                collector.add_feature(feature);
            }
        }
        GeoJson::Feature(feature) => collector.add_feature(feature),
        GeoJson::Geometry(geometry) => collector.add_geometry(geometry, None),
    }

    collector.finish(doc.root_mut(), metadata);
    doc
}

fn new_document(creator: Option<&str>) -> Document {
    let creator = creator.filter(|c| !c.is_empty()).unwrap_or(DEFAULT_CREATOR);

    let mut root = Element::new("gpx");
    root.set_attribute("version", GPX_VERSION);
    root.set_attribute("creator", creator);
    Document::new(GPX_NAMESPACE, root)
}

/// Buffers waypoints and tracks separately so the root receives them in
/// schema order (metadata, wpt*, trk*) whatever the feature order was.
#[derive(Debug, Default)]
struct Collector {
    waypoints: Vec<Element>,
    tracks: Vec<Element>,
}

impl Collector {
    fn add_feature(&mut self, feature: &Feature) {
        match &feature.geometry {
            Some(geometry) => self.add_geometry(geometry, feature.properties.as_ref()),
            None => trace!("skipping feature without geometry"),
        }
    }

    fn add_geometry(&mut self, geometry: &Geometry, props: Option<&JsonObject>) {
        match &geometry.value {
            Value::Point(position) => {
                self.waypoints.extend(create_pt("wpt", position, props));
            }
            Value::MultiPoint(positions) => {
                self.waypoints.extend(
                    positions
                        .iter()
                        .filter_map(|position| create_pt("wpt", position, props)),
                );
            }
            Value::LineString(positions) => {
                let mut trk = create_trk(props);
                trk.append_child(create_trkseg(positions));
                self.tracks.push(trk);
            }
            Value::MultiLineString(lines) => {
                let mut trk = create_trk(props);
                for positions in lines {
                    trk.append_child(create_trkseg(positions));
                }
                self.tracks.push(trk);
            }
            Value::Polygon(_) => trace!(geometry = "Polygon", "skipping unsupported geometry"),
            Value::MultiPolygon(_) => {
                trace!(geometry = "MultiPolygon", "skipping unsupported geometry")
            }
            Value::GeometryCollection(_) => {
                trace!(geometry = "GeometryCollection", "skipping unsupported geometry")
            }
        }
    }

    fn finish(self, root: &mut Element, metadata: Option<Element>) {
        debug!(
            waypoints = self.waypoints.len(),
            tracks = self.tracks.len(),
            "assembling GPX document"
        );

        if let Some(metadata) = metadata {
            root.append_child(metadata);
        }
        for wpt in self.waypoints {
            root.append_child(wpt);
        }
        for trk in self.tracks {
            root.append_child(trk);
        }
    }
}

/// Build a `wpt` or `trkpt` from a `[lon, lat, ele?, time?]` position.
/// Returns `None` for positions without both coordinates.
fn create_pt(tag: &str, position: &[f64], props: Option<&JsonObject>) -> Option<Element> {
    let [lon, lat, rest @ ..] = position else {
        warn!(tag, len = position.len(), "skipping position without lon/lat");
        return None;
    };

    let mut pt = Element::new(tag);
    pt.set_attribute("lat", format_number(*lat));
    pt.set_attribute("lon", format_number(*lon));

    if let Some(ele) = rest.first() {
        pt.append_child(Element::leaf("ele", format_number(*ele)));
    }
    if let Some(time) = rest.get(1) {
        pt.append_child(Element::leaf("time", format_number(*time)));
    }

    copy_properties(&mut pt, props);
    Some(pt)
}

fn create_trk(props: Option<&JsonObject>) -> Element {
    let mut trk = Element::new("trk");
    copy_properties(&mut trk, props);
    trk
}

fn create_trkseg(positions: &[Vec<f64>]) -> Element {
    let mut trkseg = Element::new("trkseg");
    for position in positions {
        if let Some(trkpt) = create_pt("trkpt", position, None) {
            trkseg.append_child(trkpt);
        }
    }
    trkseg
}

/// Copy whitelisted, string-valued properties as leaf elements.
fn copy_properties(element: &mut Element, props: Option<&JsonObject>) {
    let Some(props) = props else {
        return;
    };

    for key in FEATURE_PROPERTY_KEYS {
        if let Some(JsonValue::String(value)) = props.get(key) {
            element.append_child(Element::leaf(key, value.as_str()));
        }
    }
}

fn create_link(link: &Link) -> Option<Element> {
    let href = link.href.as_deref().filter(|href| !href.is_empty())?;

    let mut el = Element::new("link");
    el.set_attribute("href", href);
    append_leaf(&mut el, "text", &link.text);
    append_leaf(&mut el, "type", &link.link_type);
    Some(el)
}

fn create_metadata(meta: &MetaData) -> Element {
    let mut el = Element::new("metadata");

    append_leaf(&mut el, "name", &meta.name);
    append_leaf(&mut el, "desc", &meta.desc);
    if let Some(author) = &meta.author {
        el.append_child(create_author(author));
    }
    if let Some(copyright) = &meta.copyright {
        el.append_child(create_copyright(copyright));
    }
    if let Some(link) = meta.link.as_ref().and_then(create_link) {
        el.append_child(link);
    }
    append_leaf(&mut el, "time", &meta.time);
    append_leaf(&mut el, "keywords", &meta.keywords);

    el
}

fn create_author(person: &Person) -> Element {
    let mut el = Element::new("author");
    append_leaf(&mut el, "name", &person.name);
    append_leaf(&mut el, "email", &person.email);
    if let Some(link) = person.link.as_ref().and_then(create_link) {
        el.append_child(link);
    }
    el
}

fn create_copyright(copyright: &Copyright) -> Element {
    let mut el = Element::new("copyright");
    if let Some(author) = &copyright.author {
        el.set_attribute("author", author.as_str());
    }
    append_leaf(&mut el, "year", &copyright.year);
    append_leaf(&mut el, "license", &copyright.license);
    el
}

fn append_leaf(parent: &mut Element, tag: &str, value: &Option<String>) {
    if let Some(v) = value {
        parent.append_child(Element::leaf(tag, v.as_str()));
    }
}

/// Format a coordinate as a plain decimal: shortest round-trip digits,
/// no exponent, no trailing zeros, and no negative zero.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
