#![forbid(unsafe_code)]
//! roadnet-core library.
//!
//! Data model and topology construction for road-network connectivity
//! scoring: line geometries go in, a snapped node set and an undirected
//! [`graph::RoadGraph`] come out.
//!
//! # Conventions
//!
//! - **Errors**: [`error::RoadnetError`] for domain failures, `anyhow::Result`
//!   where file I/O is involved.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod geometry;
pub mod graph;

pub use config::{RoadnetConfig, ScoringConfig, SnapConfig, UnreachablePolicy};
pub use error::RoadnetError;
pub use geometry::{CoordinateKey, LineGeometry, Node};
pub use graph::{GraphStats, NodeSet, RoadGraph, resolve_nodes};
