#![forbid(unsafe_code)]
//! roadnet-score library.
//!
//! Hop-count distance matrices and per-node connectivity scores over a
//! [`roadnet_core::RoadGraph`], plus the in-memory helpers an output layer
//! needs (summary statistics, GeoJSON feature collection).
//!
//! # Conventions
//!
//! - **Errors**: [`roadnet_core::RoadnetError`]; scoring itself cannot fail.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod connectivity;
pub mod distance;
pub mod export;
pub mod pipeline;
pub mod summary;

pub use connectivity::{ConnectivityRecord, ConnectivityScores, score};
pub use distance::DistanceMatrix;
pub use pipeline::{ConnectivityReport, compute_connectivity};
pub use summary::ConnectivitySummary;
