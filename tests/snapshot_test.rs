use geojson::GeoJson;
use geojson2gpx_wasm::converter::to_gpx;
use geojson2gpx_wasm::options::ConversionOptions;
use geojson2gpx_wasm::writer::to_xml_string;
use serde_json::json;
use std::path::Path;

fn load_fixture(path: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{path}")).unwrap()
}

fn convert_with_opts(geojson: &str, opts: &ConversionOptions) -> String {
    let input: GeoJson = geojson.parse().unwrap();
    let doc = to_gpx(&input, opts);
    to_xml_string(&doc).unwrap()
}

/// Compare actual GPX output against the expected snapshot file.
/// When `UPDATE_SNAPSHOTS=1` is set, write/overwrite the expected file instead.
fn assert_snapshot(actual: &str, expected_path: &str) {
    let path = format!("tests/fixtures/expected/{expected_path}");

    if matches!(std::env::var("UPDATE_SNAPSHOTS").as_deref(), Ok("1")) {
        let dir = Path::new(&path).parent().unwrap();
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(&path, format!("{actual}\n").as_bytes()).unwrap();
        eprintln!("Updated snapshot: {path}");
        return;
    }

    let expected = std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Expected file not found: {path}. Run with UPDATE_SNAPSHOTS=1 to generate."));

    assert_eq!(
        actual,
        expected.trim_end(),
        "Snapshot mismatch for {path}.\nRun with UPDATE_SNAPSHOTS=1 to update."
    );
}

/// Convert a fixture with default options and compare against the expected snapshot.
fn assert_snapshot_default(fixture: &str, expected: &str) {
    let geojson = load_fixture(fixture);
    let actual = convert_with_opts(&geojson, &ConversionOptions::default());
    assert_snapshot(&actual, expected);
}

// ---- basic/ ----

#[test]
fn snapshot_01_point() {
    assert_snapshot_default("basic/01_point.geojson", "basic/01_point.gpx");
}

#[test]
fn snapshot_04_multilinestring() {
    assert_snapshot_default(
        "basic/04_multilinestring.geojson",
        "basic/04_multilinestring.gpx",
    );
}

#[test]
fn snapshot_05_mixed_collection() {
    let geojson = load_fixture("basic/05_mixed_collection.geojson");
    let actual = convert_with_opts(&geojson, &ConversionOptions::with_creator("test"));
    assert_snapshot(&actual, "basic/05_mixed_collection.gpx");
}

#[test]
fn snapshot_05_mixed_collection_metadata() {
    let geojson = load_fixture("basic/05_mixed_collection.geojson");
    let opts: ConversionOptions = serde_json::from_value(json!({
        "creator": "test",
        "metadata": {
            "name": "Weekend",
            "desc": "Two days in the hills",
            "author": {
                "name": "Ada",
                "email": "ada@example.com",
                "link": { "href": "https://example.com/ada", "text": "Home page" }
            },
            "copyright": {
                "author": "Ada",
                "year": 2024,
                "license": "https://creativecommons.org/licenses/by/4.0/"
            },
            "link": { "href": "https://example.com/trip", "text": "Trip report", "type": "text/html" },
            "time": "2024-06-01T08:00:00Z",
            "keywords": "hiking, camping",
            "bounds": { "minlat": 46.1, "minlon": -109.5, "maxlat": 46.9, "maxlon": 1.0 }
        }
    }))
    .unwrap();

    let actual = convert_with_opts(&geojson, &opts);
    assert_snapshot(&actual, "basic/05_mixed_collection_metadata.gpx");
}

// ---- edge_cases/ ----

#[test]
fn snapshot_06_unsupported() {
    assert_snapshot_default(
        "edge_cases/06_unsupported.geojson",
        "edge_cases/06_unsupported.gpx",
    );
}

#[test]
fn snapshot_08_special_chars() {
    assert_snapshot_default(
        "edge_cases/08_special_chars.geojson",
        "edge_cases/08_special_chars.gpx",
    );
}
