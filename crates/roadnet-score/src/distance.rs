//! All-pairs hop-count distances via repeated BFS.
//!
//! # Algorithm
//!
//! For each source node run a breadth-first search over the undirected
//! graph, recording the hop count to every reachable node. Each source fills
//! one row of the matrix independently, so rows can be computed on the rayon
//! pool without synchronization; the parallel and sequential paths produce
//! identical matrices.
//!
//! Complexity: O(V * (V + E)) time, O(V²) space.

use std::collections::VecDeque;

use rayon::prelude::*;
use roadnet_core::RoadGraph;
use tracing::{debug, instrument};

/// Dense N×N hop-count matrix. `None` marks an unreachable pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    n: usize,
    hops: Vec<Option<u32>>,
}

impl DistanceMatrix {
    /// Compute shortest hop counts between every pair of nodes in `rg`.
    #[must_use]
    #[instrument(skip(rg), fields(nodes = rg.node_count()))]
    pub fn from_graph(rg: &RoadGraph, parallel: bool) -> Self {
        let n = rg.node_count();

        let rows: Vec<Vec<Option<u32>>> = if parallel {
            (0..n).into_par_iter().map(|s| bfs_row(rg, s)).collect()
        } else {
            (0..n).map(|s| bfs_row(rg, s)).collect()
        };

        let hops: Vec<Option<u32>> = rows.into_iter().flatten().collect();
        let matrix = Self { n, hops };
        debug!(
            unreachable_pairs = matrix.unreachable_pairs(),
            max_hops = ?matrix.max_finite(),
            "distance matrix ready"
        );
        matrix
    }

    /// Build a matrix directly from rows. Rows must all have length `rows.len()`.
    ///
    /// # Panics
    ///
    /// Panics if the rows do not form a square matrix.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Option<u32>>>) -> Self {
        let n = rows.len();
        assert!(rows.iter().all(|r| r.len() == n), "distance matrix must be square");
        Self {
            n,
            hops: rows.into_iter().flatten().collect(),
        }
    }

    /// Side length N.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.n
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Hop count from `i` to `j`, or `None` if unreachable or out of range.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<u32> {
        if i >= self.n || j >= self.n {
            return None;
        }
        self.hops[i * self.n + j]
    }

    /// Row `i`: distances from node `i` to every node.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not a node index of this matrix.
    #[must_use]
    pub fn row(&self, i: usize) -> &[Option<u32>] {
        &self.hops[i * self.n..(i + 1) * self.n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Option<u32>]> {
        self.hops.chunks(self.n.max(1))
    }

    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    /// Largest finite distance, `None` for an empty matrix.
    #[must_use]
    pub fn max_finite(&self) -> Option<u32> {
        self.hops.iter().flatten().copied().max()
    }

    /// Number of ordered `(i, j)` pairs with no path.
    #[must_use]
    pub fn unreachable_pairs(&self) -> usize {
        self.hops.iter().filter(|h| h.is_none()).count()
    }
}

/// Hop counts from `source` to every node.
fn bfs_row(rg: &RoadGraph, source: usize) -> Vec<Option<u32>> {
    let mut dist: Vec<Option<u32>> = vec![None; rg.node_count()];
    dist[source] = Some(0);

    let mut queue: VecDeque<(usize, u32)> = VecDeque::new();
    queue.push_back((source, 0));

    while let Some((v, d)) = queue.pop_front() {
        for w in rg.neighbors(v) {
            if dist[w].is_none() {
                dist[w] = Some(d + 1);
                queue.push_back((w, d + 1));
            }
        }
    }

    dist
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
