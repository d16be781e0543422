//! End-to-end scoring: line geometries in, connectivity records out.

use roadnet_core::{GraphStats, LineGeometry, RoadGraph, RoadnetConfig, RoadnetError, resolve_nodes};
use serde::Serialize;
use tracing::{info, instrument};

use crate::connectivity::{ConnectivityRecord, score};
use crate::summary::ConnectivitySummary;

/// Everything one scoring run produces.
#[derive(Debug, Clone, Serialize)]
pub struct ConnectivityReport {
    /// One record per node, in node id order.
    pub records: Vec<ConnectivityRecord>,
    pub graph: GraphStats,
    pub summary: ConnectivitySummary,
}

/// Resolve nodes, build the topology and score every node.
///
/// # Errors
///
/// - [`RoadnetError::Config`] if `config` fails validation.
/// - [`RoadnetError::EmptyInput`] if no line yields a node; no graph or
///   matrix is built in that case.
#[instrument(skip(lines, config), fields(lines = lines.len()))]
pub fn compute_connectivity(
    lines: &[Option<LineGeometry>],
    config: &RoadnetConfig,
) -> Result<ConnectivityReport, RoadnetError> {
    config.validate()?;

    let nodes = resolve_nodes(lines, &config.snap)?;
    let graph = RoadGraph::build(lines, nodes);
    let stats = GraphStats::from_graph(&graph);

    let records = score(&graph, &config.scoring);
    let summary = ConnectivitySummary::from_records(&records);

    info!(
        nodes = stats.node_count,
        edges = stats.edge_count,
        components = stats.component_count,
        "connectivity computed"
    );

    Ok(ConnectivityReport {
        records,
        graph: stats,
        summary,
    })
}
