//! GeoJSON line-layer decoding.
//!
//! Accepts a `FeatureCollection`, a single `Feature`, or a bare
//! `LineString` / `MultiLineString` geometry. Features with a `null`
//! geometry become `None` slots so the scorer can skip them; any other
//! geometry type is an input error.

use std::path::Path;

use anyhow::Context;
use geo::{LineString, MultiLineString};
use roadnet_core::{LineGeometry, RoadnetError};
use serde_json::Value;
use tracing::debug;

/// A decoded line layer.
#[derive(Debug)]
pub struct LineLayer {
    pub lines: Vec<Option<LineGeometry>>,
    /// Named CRS carried by the source, passed through untouched.
    pub crs: Option<String>,
}

/// Read and decode a GeoJSON file.
pub fn read_layer(path: &Path) -> anyhow::Result<LineLayer> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let layer = parse_layer(&text)?;
    debug!(lines = layer.lines.len(), path = %path.display(), "decoded line layer");
    Ok(layer)
}

/// Decode a GeoJSON document into a [`LineLayer`].
pub fn parse_layer(text: &str) -> Result<LineLayer, RoadnetError> {
    let doc: Value = serde_json::from_str(text)
        .map_err(|e| RoadnetError::InputFormat(format!("not valid JSON: {e}")))?;

    let crs = doc
        .pointer("/crs/properties/name")
        .and_then(Value::as_str)
        .map(str::to_string);

    let lines = match type_of(&doc)? {
        "FeatureCollection" => doc
            .get("features")
            .and_then(Value::as_array)
            .ok_or_else(|| invalid("FeatureCollection without a features array"))?
            .iter()
            .enumerate()
            .map(|(i, feature)| {
                feature_geometry(feature).map_err(|e| match e {
                    RoadnetError::InputFormat(msg) => invalid(&format!("feature {i}: {msg}")),
                    other => other,
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        "Feature" => vec![feature_geometry(&doc)?],
        _ => vec![Some(parse_geometry(&doc)?)],
    };

    Ok(LineLayer { lines, crs })
}

fn feature_geometry(feature: &Value) -> Result<Option<LineGeometry>, RoadnetError> {
    if type_of(feature)? != "Feature" {
        return Err(invalid("expected a Feature"));
    }
    match feature.get("geometry") {
        None | Some(Value::Null) => Ok(None),
        Some(geometry) => parse_geometry(geometry).map(Some),
    }
}

fn parse_geometry(geometry: &Value) -> Result<LineGeometry, RoadnetError> {
    let coords = geometry
        .get("coordinates")
        .ok_or_else(|| invalid("geometry without coordinates"))?;

    match type_of(geometry)? {
        "LineString" => Ok(LineGeometry::Single(parse_path(coords)?)),
        "MultiLineString" => {
            let parts = coords
                .as_array()
                .ok_or_else(|| invalid("MultiLineString coordinates must be an array"))?
                .iter()
                .map(parse_path)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(LineGeometry::Multi(MultiLineString::new(parts)))
        }
        other => Err(invalid(&format!(
            "unsupported geometry type {other}; expected LineString or MultiLineString"
        ))),
    }
}

fn parse_path(coords: &Value) -> Result<LineString<f64>, RoadnetError> {
    let positions = coords
        .as_array()
        .ok_or_else(|| invalid("line coordinates must be an array"))?;

    positions
        .iter()
        .map(|position| {
            let xy = position.as_array().filter(|p| p.len() >= 2);
            match xy.map(|p| (p[0].as_f64(), p[1].as_f64())) {
                Some((Some(x), Some(y))) => Ok((x, y)),
                _ => Err(invalid("positions must hold at least two numbers")),
            }
        })
        .collect::<Result<Vec<(f64, f64)>, _>>()
        .map(LineString::from)
}

fn type_of(value: &Value) -> Result<&str, RoadnetError> {
    value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| invalid("object without a type member"))
}

fn invalid(msg: &str) -> RoadnetError {
    RoadnetError::InputFormat(msg.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_collection_with_null_geometry() {
        let layer = parse_layer(
            r#"{
                "type": "FeatureCollection",
                "crs": {"type": "name", "properties": {"name": "EPSG:27700"}},
                "features": [
                    {"type": "Feature", "properties": {}, "geometry":
                        {"type": "LineString", "coordinates": [[0, 0], [1, 0]]}},
                    {"type": "Feature", "properties": {}, "geometry": null},
                    {"type": "Feature", "properties": {}, "geometry":
                        {"type": "MultiLineString", "coordinates": [[[1, 0], [2, 0]], [[2, 0], [2, 1, 9]]]}}
                ]
            }"#,
        )
        .expect("parse");

        assert_eq!(layer.crs.as_deref(), Some("EPSG:27700"));
        assert_eq!(layer.lines.len(), 3);
        assert!(layer.lines[1].is_none());
        assert!(matches!(layer.lines[2], Some(LineGeometry::Multi(ref m)) if m.0.len() == 2));
    }

    #[test]
    fn bare_geometry_is_one_line() {
        let layer =
            parse_layer(r#"{"type": "LineString", "coordinates": [[0, 0], [1, 1]]}"#).expect("parse");
        assert_eq!(layer.lines.len(), 1);
        assert!(layer.crs.is_none());
    }

    #[test]
    fn points_are_rejected() {
        let err = parse_layer(r#"{"type": "Point", "coordinates": [0, 0]}"#).unwrap_err();
        assert!(matches!(err, RoadnetError::InputFormat(ref m) if m.contains("Point")));
    }

    #[test]
    fn bad_feature_reports_its_index() {
        let err = parse_layer(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "geometry": {"type": "LineString", "coordinates": [[0, "x"]]}}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, RoadnetError::InputFormat(ref m) if m.starts_with("feature 0:")));
    }

    #[test]
    fn malformed_json_is_input_error() {
        assert!(matches!(
            parse_layer("{not json").unwrap_err(),
            RoadnetError::InputFormat(_)
        ));
    }
}
