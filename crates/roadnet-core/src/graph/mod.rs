//! Road topology construction.
//!
//! # Overview
//!
//! This module turns raw line geometries into an undirected petgraph graph
//! whose nodes are snapped line endpoints. The graph feeds the all-pairs
//! distance matrix and connectivity scoring in `roadnet-score`.
//!
//! ## Pipeline
//!
//! ```text
//! [Option<LineGeometry>]
//!        ↓  nodes::resolve_nodes()
//! NodeSet (dense ids + CoordinateKey → id map)
//!        ↓  build::RoadGraph::build()
//! RoadGraph (UnGraph, one edge per distinct endpoint pair)
//!        ↓  stats::GraphStats::from_graph()
//! GraphStats (density, component count, isolated nodes, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use roadnet_core::graph::{GraphStats, RoadGraph, resolve_nodes};
//! use roadnet_core::SnapConfig;
//!
//! let lines: Vec<Option<LineGeometry>> = /* decoded layer */;
//! let nodes = resolve_nodes(&lines, &SnapConfig::default())?;
//! let graph = RoadGraph::build(&lines, nodes);
//! let stats = GraphStats::from_graph(&graph);
//!
//! println!("nodes={} edges={} components={}",
//!     stats.node_count, stats.edge_count, stats.component_count);
//! ```

pub mod build;
pub mod nodes;
pub mod stats;

pub use build::RoadGraph;
pub use nodes::{NodeSet, ResolveStats, resolve_nodes};
pub use stats::GraphStats;
