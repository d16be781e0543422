//! GeoJSON feature collection for scored nodes.
//!
//! The collection is built in memory as a [`serde_json::Value`]; writing it
//! anywhere is the caller's business.

use serde_json::{Map, Value, json};

use crate::connectivity::ConnectivityRecord;

/// Point features with `node_id`, `normalized` and `connectivity` properties.
///
/// When `crs` is given it is attached as a named CRS member, unchanged.
/// Non-finite scores are written as `null` because JSON has no infinity.
#[must_use]
pub fn to_feature_collection(records: &[ConnectivityRecord], crs: Option<&str>) -> Value {
    let features: Vec<Value> = records
        .iter()
        .map(|r| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [r.geometry.x(), r.geometry.y()],
                },
                "properties": {
                    "node_id": r.node_id,
                    "normalized": r.normalized,
                    "connectivity": r.connectivity,
                },
            })
        })
        .collect();

    let mut collection = Map::new();
    collection.insert("type".into(), Value::from("FeatureCollection"));
    if let Some(name) = crs {
        collection.insert(
            "crs".into(),
            json!({ "type": "name", "properties": { "name": name } }),
        );
    }
    collection.insert("features".into(), Value::Array(features));
    Value::Object(collection)
}
