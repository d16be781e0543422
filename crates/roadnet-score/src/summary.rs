//! Summary statistics over scored nodes.

use serde::Serialize;

use crate::connectivity::ConnectivityRecord;

/// Count and range of connectivity values, as reported alongside results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectivitySummary {
    pub count: usize,
    pub min_connectivity: Option<f64>,
    pub max_connectivity: Option<f64>,
    pub mean_connectivity: Option<f64>,
}

impl ConnectivitySummary {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_records(records: &[ConnectivityRecord]) -> Self {
        let values = || records.iter().map(|r| r.connectivity);
        let count = records.len();

        Self {
            count,
            min_connectivity: values().reduce(f64::min),
            max_connectivity: values().reduce(f64::max),
            mean_connectivity: (count > 0).then(|| values().sum::<f64>() / count as f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Point;

    fn record(node_id: usize, connectivity: f64) -> ConnectivityRecord {
        ConnectivityRecord {
            node_id,
            geometry: Point::new(0.0, 0.0),
            normalized: 1.0 / connectivity,
            connectivity,
        }
    }

    #[test]
    fn empty_records_have_no_range() {
        let s = ConnectivitySummary::from_records(&[]);
        assert_eq!(s.count, 0);
        assert_eq!(s.min_connectivity, None);
        assert_eq!(s.max_connectivity, None);
        assert_eq!(s.mean_connectivity, None);
    }

    #[test]
    fn range_and_mean() {
        let s = ConnectivitySummary::from_records(&[record(0, 0.5), record(1, 2.0), record(2, 1.0)]);
        assert_eq!(s.count, 3);
        assert_eq!(s.min_connectivity, Some(0.5));
        assert_eq!(s.max_connectivity, Some(2.0));
        assert!((s.mean_connectivity.expect("mean") - 3.5 / 3.0).abs() < 1e-12);
    }
}
