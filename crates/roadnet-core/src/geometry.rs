//! Line geometry input model and endpoint snapping keys.
//!
//! # Snapping
//!
//! Two endpoints are the same topological node iff their [`CoordinateKey`]s
//! are equal. A key is each coordinate scaled by `10^precision` and rounded
//! half away from zero (`f64::round`), stored as an integer so equality and
//! hashing are exact. There is no tolerance beyond this rounding.
//!
//! The rounded value is the binary `f64` product, not the decimal literal the
//! coordinate was written as, so a tie such as `1.0000005` may snap upward
//! where decimal rounding would snap it down.

use geo::{Coord, LineString, MultiLineString, Point};
use serde::Serialize;

/// A road line: either one path or an ordered collection of paths.
#[derive(Debug, Clone, PartialEq)]
pub enum LineGeometry {
    Single(LineString<f64>),
    Multi(MultiLineString<f64>),
}

impl LineGeometry {
    /// Convenience constructor for a single path from `(x, y)` tuples.
    #[must_use]
    pub fn single(coords: &[(f64, f64)]) -> Self {
        Self::Single(LineString::from(coords.to_vec()))
    }

    /// Convenience constructor for a multi-part line from `(x, y)` tuples.
    #[must_use]
    pub fn multi(parts: &[&[(f64, f64)]]) -> Self {
        Self::Multi(MultiLineString::new(
            parts
                .iter()
                .map(|part| LineString::from(part.to_vec()))
                .collect(),
        ))
    }

    /// The constituent paths in stored order.
    pub fn paths(&self) -> impl Iterator<Item = &LineString<f64>> {
        let paths: &[LineString<f64>] = match self {
            Self::Single(line) => std::slice::from_ref(line),
            Self::Multi(lines) => &lines.0,
        };
        paths.iter()
    }

    /// Coordinates of every path with at least two coordinates, concatenated
    /// in stored order.
    ///
    /// Degenerate paths are left out, matching [`Self::endpoint_pairs`].
    #[must_use]
    pub fn flattened(&self) -> Vec<Coord<f64>> {
        self.paths()
            .filter(|path| path.0.len() >= 2)
            .flat_map(|path| path.0.iter().copied())
            .collect()
    }

    /// `(first, last)` of every path with at least two coordinates.
    ///
    /// Shorter paths are degenerate and contribute no endpoints.
    #[must_use]
    pub fn endpoint_pairs(&self) -> Vec<(Coord<f64>, Coord<f64>)> {
        self.paths()
            .filter(|path| path.0.len() >= 2)
            .filter_map(|path| Some((*path.0.first()?, *path.0.last()?)))
            .collect()
    }

    /// Number of paths with fewer than two coordinates.
    #[must_use]
    pub fn degenerate_path_count(&self) -> usize {
        self.paths().filter(|path| path.0.len() < 2).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths().all(|path| path.0.is_empty())
    }
}

/// A coordinate rounded to a fixed number of decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CoordinateKey {
    x: i64,
    y: i64,
}

impl CoordinateKey {
    /// Snap `coord` at `precision` decimal places.
    ///
    /// Returns `None` for non-finite coordinates or values too large to
    /// represent once scaled.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn new(coord: Coord<f64>, precision: u32) -> Option<Self> {
        let scale = 10f64.powi(precision as i32);
        let snap = |v: f64| {
            let scaled = (v * scale).round();
            // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
            (scaled.is_finite() && scaled.abs() < i64::MAX as f64).then_some(scaled as i64)
        };
        Some(Self {
            x: snap(coord.x)?,
            y: snap(coord.y)?,
        })
    }

    /// The rounded coordinate this key stands for.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    pub fn to_coord(self, precision: u32) -> Coord<f64> {
        let scale = 10f64.powi(precision as i32);
        Coord {
            x: self.x as f64 / scale,
            y: self.y as f64 / scale,
        }
    }
}

/// A topological node: a dense id plus the first endpoint seen for its key.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Node {
    pub id: usize,
    pub point: Point<f64>,
}
