//! Undirected road graph construction.
//!
//! # Overview
//!
//! Each line joins the node of its first coordinate to the node of its last
//! coordinate. Multi-part lines are flattened first, so only the very first
//! and very last coordinate of the whole line matter here; intermediate part
//! boundaries become nodes (via the resolver) but not edges. Parts with fewer
//! than two coordinates are dropped before flattening, so a line made only of
//! such parts is skipped.
//!
//! ## Edges
//!
//! The graph is a petgraph [`UnGraph`] whose node indices equal node ids.
//! Duplicate edges are not added. A line whose ends snap to the same key
//! yields a self-loop, which never shortens a path.
//!
//! ## Content Hash
//!
//! The graph is associated with a BLAKE3 hash of its sorted edge list and
//! node count. Identical inputs always produce identical hashes.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, instrument};

use crate::geometry::{CoordinateKey, LineGeometry, Node};
use crate::graph::nodes::NodeSet;

// ---------------------------------------------------------------------------
// RoadGraph
// ---------------------------------------------------------------------------

/// An undirected topology graph over snapped line endpoints.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    /// Undirected graph: node weights are node ids, edges are road lines.
    pub graph: UnGraph<usize, ()>,
    /// Nodes in id order; `nodes[i]` sits at `NodeIndex::new(i)`.
    pub nodes: Vec<Node>,
    /// Snapping key index carried over from the resolver.
    pub key_index: HashMap<CoordinateKey, usize>,
    /// Decimal precision the keys were snapped at.
    pub precision: u32,
    /// Lines skipped because they had no usable path or an end had no node.
    pub skipped_lines: usize,
    /// BLAKE3 content hash of the edge set.
    pub content_hash: String,
}

impl RoadGraph {
    /// Build the graph for `lines` over the nodes resolved from them.
    #[must_use]
    #[instrument(skip(lines, nodes), fields(lines = lines.len(), nodes = nodes.len()))]
    pub fn build(lines: &[Option<LineGeometry>], nodes: NodeSet) -> Self {
        let (nodes, key_index, precision) = nodes.into_nodes();

        let mut graph = UnGraph::<usize, ()>::with_capacity(nodes.len(), lines.len());
        for node in &nodes {
            graph.add_node(node.id);
        }

        let mut skipped_lines = 0;
        for line in lines {
            let Some(line) = line else {
                continue;
            };

            let Some((a, b)) = line_end_nodes(line, &key_index, precision) else {
                skipped_lines += 1;
                continue;
            };

            let (a, b) = (NodeIndex::new(a), NodeIndex::new(b));
            // Avoid duplicate edges (petgraph allows them by default).
            if !graph.contains_edge(a, b) {
                graph.add_edge(a, b, ());
            }
        }

        let content_hash = compute_edge_hash(&graph);
        debug!(
            edges = graph.edge_count(),
            skipped_lines, "built road graph"
        );

        Self {
            graph,
            nodes,
            key_index,
            precision,
            skipped_lines,
            content_hash,
        }
    }

    /// Return the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of distinct edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Whether an edge joins node ids `a` and `b`.
    #[must_use]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        a < self.node_count()
            && b < self.node_count()
            && self.graph.contains_edge(NodeIndex::new(a), NodeIndex::new(b))
    }

    /// Neighbor ids of node `id`, self-loops excluded.
    pub fn neighbors(&self, id: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph
            .neighbors(NodeIndex::new(id))
            .map(NodeIndex::index)
            .filter(move |&other| other != id)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Node ids for the first and last coordinate of the flattened line.
fn line_end_nodes(
    line: &LineGeometry,
    key_index: &HashMap<CoordinateKey, usize>,
    precision: u32,
) -> Option<(usize, usize)> {
    let coords = line.flattened();
    let lookup = |coord| {
        CoordinateKey::new(coord, precision).and_then(|key| key_index.get(&key).copied())
    };
    Some((lookup(*coords.first()?)?, lookup(*coords.last()?)?))
}

/// Compute a BLAKE3 hash of the sorted undirected edge list.
fn compute_edge_hash(graph: &UnGraph<usize, ()>) -> String {
    let mut edges: Vec<(usize, usize)> = graph
        .edge_indices()
        .filter_map(|e| graph.edge_endpoints(e))
        .map(|(a, b)| {
            let (a, b) = (a.index(), b.index());
            (a.min(b), a.max(b))
        })
        .collect();
    edges.sort_unstable();

    let mut hasher = blake3::Hasher::new();
    hasher.update(&(graph.node_count() as u64).to_le_bytes());
    for (a, b) in edges {
        hasher.update(&(a as u64).to_le_bytes());
        hasher.update(&(b as u64).to_le_bytes());
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
