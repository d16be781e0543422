//! Basic statistics for a road graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: size of the topology.
//! - **density**: `2 * edges / (nodes * (nodes - 1))` for an undirected
//!   graph, self-loops excluded. Zero for graphs with 0 or 1 node.
//! - **component_count**: number of connected components. More than one
//!   means some node pairs are mutually unreachable.
//! - **isolated_node_count**: nodes with no neighbor other than themselves.
//! - **self_loop_count**: closed lines whose ends snapped together.
//! - **max_degree**: largest number of distinct neighbors of any node.

use petgraph::algo::connected_components;
use petgraph::visit::EdgeRef;
use serde::Serialize;

use crate::graph::build::RoadGraph;

/// Summary statistics for a [`RoadGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub component_count: usize,
    pub isolated_node_count: usize,
    pub self_loop_count: usize,
    pub max_degree: usize,
    /// Lines the builder could not turn into an edge.
    pub skipped_lines: usize,
    pub content_hash: String,
}

impl GraphStats {
    /// Compute statistics from a built [`RoadGraph`].
    #[must_use]
    pub fn from_graph(rg: &RoadGraph) -> Self {
        let node_count = rg.node_count();
        let edge_count = rg.edge_count();

        let self_loop_count = rg
            .graph
            .edge_references()
            .filter(|e| e.source() == e.target())
            .count();

        let degrees: Vec<usize> = (0..node_count).map(|id| rg.neighbors(id).count()).collect();

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count - self_loop_count),
            component_count: connected_components(&rg.graph),
            isolated_node_count: degrees.iter().filter(|&&d| d == 0).count(),
            self_loop_count,
            max_degree: degrees.iter().copied().max().unwrap_or(0),
            skipped_lines: rg.skipped_lines,
            content_hash: rg.content_hash.clone(),
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let possible = node_count * (node_count - 1) / 2;
    edge_count as f64 / possible as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SnapConfig;
    use crate::geometry::LineGeometry;
    use crate::graph::nodes::resolve_nodes;

    fn stats_for(segments: &[[(f64, f64); 2]]) -> GraphStats {
        let lines: Vec<Option<LineGeometry>> = segments
            .iter()
            .map(|seg| Some(LineGeometry::single(seg)))
            .collect();
        let nodes = resolve_nodes(&lines, &SnapConfig::default()).expect("resolve");
        GraphStats::from_graph(&RoadGraph::build(&lines, nodes))
    }

    #[test]
    fn path_of_three_nodes() {
        let s = stats_for(&[[(0.0, 0.0), (1.0, 0.0)], [(1.0, 0.0), (2.0, 0.0)]]);
        assert_eq!(s.node_count, 3);
        assert_eq!(s.edge_count, 2);
        assert_eq!(s.component_count, 1);
        assert_eq!(s.max_degree, 2);
        assert_eq!(s.isolated_node_count, 0);
        assert!((s.density - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn disjoint_segments_are_two_components() {
        let s = stats_for(&[[(0.0, 0.0), (1.0, 0.0)], [(5.0, 5.0), (6.0, 5.0)]]);
        assert_eq!(s.node_count, 4);
        assert_eq!(s.component_count, 2);
        assert_eq!(s.max_degree, 1);
    }

    #[test]
    fn self_loop_counts_but_isolates() {
        let s = stats_for(&[[(0.0, 0.0), (0.0, 0.0)], [(1.0, 0.0), (2.0, 0.0)]]);
        assert_eq!(s.node_count, 3);
        assert_eq!(s.self_loop_count, 1);
        assert_eq!(s.isolated_node_count, 1);
        assert_eq!(s.component_count, 2);
        assert!((s.density - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn single_node_density_is_zero() {
        assert!((compute_density(1, 0)).abs() < f64::EPSILON);
        assert!((compute_density(0, 0)).abs() < f64::EPSILON);
    }
}
