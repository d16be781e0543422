//! Endpoint deduplication into topological nodes.
//!
//! Every path of every line contributes its first and last coordinate.
//! Endpoints are snapped to a [`CoordinateKey`]; the first endpoint seen for
//! a key becomes the node's representative point and the node takes the next
//! free id. Iteration follows input order only, so ids are deterministic.

use std::collections::HashMap;

use geo::{Coord, Point};
use tracing::{debug, instrument, warn};

use crate::config::SnapConfig;
use crate::error::RoadnetError;
use crate::geometry::{CoordinateKey, LineGeometry, Node};

/// Counters describing what the resolver skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Input slots, including null geometries.
    pub lines_seen: usize,
    /// Null or empty geometries.
    pub null_lines: usize,
    /// Paths with fewer than two coordinates.
    pub degenerate_paths: usize,
    /// Endpoints whose coordinates could not be snapped (NaN, infinite).
    pub unsnappable_endpoints: usize,
}

/// The deduplicated node set and its key index.
#[derive(Debug, Clone)]
pub struct NodeSet {
    nodes: Vec<Node>,
    index: HashMap<CoordinateKey, usize>,
    precision: u32,
    stats: ResolveStats,
}

impl NodeSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in id order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    #[must_use]
    pub fn node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Node id for an already-snapped key.
    #[must_use]
    pub fn id_for_key(&self, key: CoordinateKey) -> Option<usize> {
        self.index.get(&key).copied()
    }

    /// Snap `coord` with this set's precision and look up its node id.
    #[must_use]
    pub fn id_for_coord(&self, coord: Coord<f64>) -> Option<usize> {
        CoordinateKey::new(coord, self.precision).and_then(|key| self.id_for_key(key))
    }

    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    #[must_use]
    pub const fn stats(&self) -> ResolveStats {
        self.stats
    }

    pub(crate) fn into_nodes(self) -> (Vec<Node>, HashMap<CoordinateKey, usize>, u32) {
        (self.nodes, self.index, self.precision)
    }
}

/// Deduplicate the endpoints of `lines` into a [`NodeSet`].
///
/// # Errors
///
/// Returns [`RoadnetError::EmptyInput`] if no line contributes an endpoint.
#[instrument(skip(lines), fields(lines = lines.len()))]
pub fn resolve_nodes(
    lines: &[Option<LineGeometry>],
    snap: &SnapConfig,
) -> Result<NodeSet, RoadnetError> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut index: HashMap<CoordinateKey, usize> = HashMap::new();
    let mut stats = ResolveStats {
        lines_seen: lines.len(),
        ..ResolveStats::default()
    };

    for line in lines {
        let Some(line) = line.as_ref().filter(|line| !line.is_empty()) else {
            stats.null_lines += 1;
            continue;
        };
        stats.degenerate_paths += line.degenerate_path_count();

        for (first, last) in line.endpoint_pairs() {
            for coord in [first, last] {
                let Some(key) = CoordinateKey::new(coord, snap.precision) else {
                    stats.unsnappable_endpoints += 1;
                    continue;
                };
                index.entry(key).or_insert_with(|| {
                    let id = nodes.len();
                    nodes.push(Node {
                        id,
                        point: Point::from(coord),
                    });
                    id
                });
            }
        }
    }

    if stats.degenerate_paths > 0 || stats.unsnappable_endpoints > 0 {
        warn!(
            degenerate_paths = stats.degenerate_paths,
            unsnappable_endpoints = stats.unsnappable_endpoints,
            "skipped malformed line parts"
        );
    }

    if nodes.is_empty() {
        return Err(RoadnetError::EmptyInput);
    }

    debug!(nodes = nodes.len(), null_lines = stats.null_lines, "resolved nodes");

    Ok(NodeSet {
        nodes,
        index,
        precision: snap.precision,
        stats,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(lines: &[Option<LineGeometry>]) -> Result<NodeSet, RoadnetError> {
        resolve_nodes(lines, &SnapConfig::default())
    }

    #[test]
    fn no_lines_is_empty_input() {
        assert_eq!(resolve(&[]).unwrap_err(), RoadnetError::EmptyInput);
    }

    #[test]
    fn only_null_geometries_is_empty_input() {
        let lines = vec![None, None, Some(LineGeometry::multi(&[]))];
        assert_eq!(resolve(&lines).unwrap_err(), RoadnetError::EmptyInput);
    }

    #[test]
    fn only_degenerate_parts_is_empty_input() {
        let lines = vec![Some(LineGeometry::single(&[(1.0, 1.0)]))];
        assert_eq!(resolve(&lines).unwrap_err(), RoadnetError::EmptyInput);
    }

    #[test]
    fn ids_follow_first_encounter_order() {
        let lines = vec![
            Some(LineGeometry::single(&[(5.0, 5.0), (0.0, 0.0)])),
            Some(LineGeometry::single(&[(0.0, 0.0), (2.0, 2.0)])),
        ];
        let set = resolve(&lines).expect("resolve");

        assert_eq!(set.len(), 3);
        assert_eq!(set.id_for_coord(Coord { x: 5.0, y: 5.0 }), Some(0));
        assert_eq!(set.id_for_coord(Coord { x: 0.0, y: 0.0 }), Some(1));
        assert_eq!(set.id_for_coord(Coord { x: 2.0, y: 2.0 }), Some(2));
        for (expected, node) in set.nodes().iter().enumerate() {
            assert_eq!(node.id, expected);
        }
    }

    #[test]
    fn interior_vertices_are_not_nodes() {
        let lines = vec![Some(LineGeometry::single(&[
            (0.0, 0.0),
            (0.5, 0.1),
            (0.7, 0.3),
            (1.0, 1.0),
        ]))];
        let set = resolve(&lines).expect("resolve");
        assert_eq!(set.len(), 2);
        assert!(set.id_for_coord(Coord { x: 0.5, y: 0.1 }).is_none());
    }

    #[test]
    fn first_seen_coordinate_is_representative() {
        let lines = vec![
            Some(LineGeometry::single(&[(0.123_456_1, 5.0), (1.0, 1.0)])),
            Some(LineGeometry::single(&[(0.123_456_4, 5.0), (2.0, 2.0)])),
        ];
        let set = resolve(&lines).expect("resolve");

        assert_eq!(set.len(), 3);
        let node = set.node(0).expect("node 0");
        assert!((node.point.x() - 0.123_456_1).abs() < f64::EPSILON);
        assert_eq!(
            set.id_for_coord(Coord { x: 0.123_456_4, y: 5.0 }),
            Some(0),
            "sub-precision endpoint must collapse onto node 0"
        );
    }

    #[test]
    fn multi_part_lines_contribute_every_part() {
        let lines = vec![Some(LineGeometry::multi(&[
            &[(0.0, 0.0), (1.0, 0.0)],
            &[(3.0, 0.0), (4.0, 0.0)],
        ]))];
        let set = resolve(&lines).expect("resolve");
        assert_eq!(set.len(), 4);
        assert_eq!(set.id_for_coord(Coord { x: 3.0, y: 0.0 }), Some(2));
    }

    #[test]
    fn stats_count_skipped_input() {
        let lines = vec![
            None,
            Some(LineGeometry::multi(&[&[(7.0, 7.0)], &[(0.0, 0.0), (1.0, 0.0)]])),
            Some(LineGeometry::single(&[(f64::NAN, 0.0), (2.0, 0.0)])),
        ];
        let set = resolve(&lines).expect("resolve");
        let stats = set.stats();

        assert_eq!(stats.lines_seen, 3);
        assert_eq!(stats.null_lines, 1);
        assert_eq!(stats.degenerate_paths, 1);
        assert_eq!(stats.unsnappable_endpoints, 1);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn precision_is_configurable() {
        let lines = vec![
            Some(LineGeometry::single(&[(0.0, 0.0), (1.04, 0.0)])),
            Some(LineGeometry::single(&[(1.01, 0.0), (2.0, 0.0)])),
        ];
        let coarse = resolve_nodes(&lines, &SnapConfig { precision: 1 }).expect("resolve");
        assert_eq!(coarse.len(), 3);
        assert_eq!(coarse.precision(), 1);

        let fine = resolve(&lines).expect("resolve");
        assert_eq!(fine.len(), 4);
    }
}
