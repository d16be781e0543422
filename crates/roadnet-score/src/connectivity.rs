//! Column-normalized hop-distance connectivity.
//!
//! # Overview
//!
//! A node's connectivity is high when it is, on average, few hops away from
//! the rest of the network, with each destination weighted by how far it is
//! from everything else.
//!
//! # Algorithm
//!
//! Given the hop-count matrix `D`:
//!
//! 1. Column sums `S[j] = Σ_i D[i][j]`, with `S[j] = 0` replaced by 1.
//! 2. Relative matrix `R[i][j] = D[i][j] / S[j]`.
//! 3. `normalized[i] = Σ_j R[i][j]`, with an exact 0 replaced by
//!    `f64::EPSILON`.
//! 4. `connectivity[i] = 1 / normalized[i]`.
//!
//! Unreachable pairs follow [`UnreachablePolicy`]: `Exclude` leaves them out
//! of both sums (each component is scored on its own), `Penalty` counts them
//! as `N` hops.

use geo::Point;
use roadnet_core::{RoadGraph, ScoringConfig, UnreachablePolicy};
use serde::Serialize;
use tracing::instrument;

use crate::distance::DistanceMatrix;

/// One scored node, ready for an output layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectivityRecord {
    pub node_id: usize,
    pub geometry: Point<f64>,
    pub normalized: f64,
    pub connectivity: f64,
}

/// Per-node score vectors, indexed by node id.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectivityScores {
    pub normalized: Vec<f64>,
    pub connectivity: Vec<f64>,
}

impl ConnectivityScores {
    /// Score a distance matrix under `policy`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_matrix(d: &DistanceMatrix, policy: UnreachablePolicy) -> Self {
        let n = d.len();
        let penalty = n as f64;
        let hops = |h: Option<u32>| match (h, policy) {
            (Some(h), _) => Some(f64::from(h)),
            (None, UnreachablePolicy::Exclude) => None,
            (None, UnreachablePolicy::Penalty) => Some(penalty),
        };

        let mut col_sums = vec![0.0; n];
        for row in d.rows() {
            for (sum, &h) in col_sums.iter_mut().zip(row) {
                *sum += hops(h).unwrap_or(0.0);
            }
        }
        for sum in &mut col_sums {
            if *sum == 0.0 {
                *sum = 1.0;
            }
        }

        let normalized: Vec<f64> = d
            .rows()
            .map(|row| {
                let total: f64 = row
                    .iter()
                    .zip(&col_sums)
                    .filter_map(|(&h, &s)| hops(h).map(|h| h / s))
                    .sum();
                if total == 0.0 { f64::EPSILON } else { total }
            })
            .collect();

        let connectivity = normalized.iter().map(|v| 1.0 / v).collect();

        Self {
            normalized,
            connectivity,
        }
    }
}

/// Score every node of `rg`, in node id order.
#[must_use]
#[instrument(skip(rg, config), fields(nodes = rg.node_count()))]
pub fn score(rg: &RoadGraph, config: &ScoringConfig) -> Vec<ConnectivityRecord> {
    let matrix = DistanceMatrix::from_graph(rg, config.parallel);
    let scores = ConnectivityScores::from_matrix(&matrix, config.unreachable);

    rg.nodes
        .iter()
        .zip(scores.normalized.iter().zip(&scores.connectivity))
        .map(|(node, (&normalized, &connectivity))| ConnectivityRecord {
            node_id: node.id,
            geometry: node.point,
            normalized,
            connectivity,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    fn matrix(rows: &[&[Option<u32>]]) -> DistanceMatrix {
        DistanceMatrix::from_rows(rows.iter().map(|r| r.to_vec()).collect())
    }

    #[test]
    fn path_of_three_centre_is_most_connected() {
        // A - B - C: D = [[0,1,2],[1,0,1],[2,1,0]], S = [3,2,3]
        let d = matrix(&[
            &[Some(0), Some(1), Some(2)],
            &[Some(1), Some(0), Some(1)],
            &[Some(2), Some(1), Some(0)],
        ]);
        let s = ConnectivityScores::from_matrix(&d, UnreachablePolicy::Exclude);

        assert!((s.normalized[0] - (1.0 / 2.0 + 2.0 / 3.0)).abs() < TOL);
        assert!((s.normalized[1] - 2.0 / 3.0).abs() < TOL);
        assert!((s.connectivity[1] - 1.5).abs() < TOL);
        assert!((s.connectivity[0] - 6.0 / 7.0).abs() < TOL);
        assert!((s.connectivity[0] - s.connectivity[2]).abs() < TOL);
    }

    #[test]
    fn single_node_gets_epsilon_normalization() {
        let d = matrix(&[&[Some(0)]]);
        let s = ConnectivityScores::from_matrix(&d, UnreachablePolicy::Exclude);
        assert!((s.normalized[0] - f64::EPSILON).abs() < f64::MIN_POSITIVE);
        assert!((s.connectivity[0] - 1.0 / f64::EPSILON).abs() < 1.0);
    }

    #[test]
    fn excluded_pairs_score_components_independently() {
        // Two disjoint edges: each component is a 2-node path.
        let d = matrix(&[
            &[Some(0), Some(1), None, None],
            &[Some(1), Some(0), None, None],
            &[None, None, Some(0), Some(1)],
            &[None, None, Some(1), Some(0)],
        ]);
        let s = ConnectivityScores::from_matrix(&d, UnreachablePolicy::Exclude);
        for i in 0..4 {
            assert!((s.normalized[i] - 1.0).abs() < TOL, "node {i}");
            assert!((s.connectivity[i] - 1.0).abs() < TOL, "node {i}");
        }
    }

    #[test]
    fn penalty_counts_unreachable_as_n_hops() {
        // Path A-B-C plus a disjoint edge D-E, N = 5.
        let d = matrix(&[
            &[Some(0), Some(1), Some(2), None, None],
            &[Some(1), Some(0), Some(1), None, None],
            &[Some(2), Some(1), Some(0), None, None],
            &[None, None, None, Some(0), Some(1)],
            &[None, None, None, Some(1), Some(0)],
        ]);
        let s = ConnectivityScores::from_matrix(&d, UnreachablePolicy::Penalty);

        // Column sums: A=13, B=12, C=13, D=16, E=16.
        let a = 1.0 / 12.0 + 2.0 / 13.0 + 5.0 / 16.0 + 5.0 / 16.0;
        let b = 1.0 / 13.0 + 1.0 / 13.0 + 5.0 / 16.0 + 5.0 / 16.0;
        let dn = 5.0 / 13.0 + 5.0 / 12.0 + 5.0 / 13.0 + 1.0 / 16.0;
        assert!((s.normalized[0] - a).abs() < TOL);
        assert!((s.normalized[1] - b).abs() < TOL);
        assert!((s.normalized[3] - dn).abs() < TOL);
        assert!(s.connectivity[1] > s.connectivity[0]);
        assert!(s.connectivity.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn exclude_and_penalty_agree_on_connected_graphs() {
        let d = matrix(&[
            &[Some(0), Some(1), Some(1)],
            &[Some(1), Some(0), Some(1)],
            &[Some(1), Some(1), Some(0)],
        ]);
        assert_eq!(
            ConnectivityScores::from_matrix(&d, UnreachablePolicy::Exclude),
            ConnectivityScores::from_matrix(&d, UnreachablePolicy::Penalty)
        );
    }

    #[test]
    fn isolated_node_under_exclude_gets_epsilon() {
        let d = matrix(&[
            &[Some(0), Some(1), None],
            &[Some(1), Some(0), None],
            &[None, None, Some(0)],
        ]);
        let s = ConnectivityScores::from_matrix(&d, UnreachablePolicy::Exclude);
        assert!((s.normalized[2] - f64::EPSILON).abs() < f64::MIN_POSITIVE);
        assert!(s.connectivity[2] > s.connectivity[0]);
    }
}
