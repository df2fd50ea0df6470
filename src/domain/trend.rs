// Trend classification domain models
use serde::Serialize;

use crate::domain::precision::approx_eq;

/// Direction of one monotonic run of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendType {
    Ascending,
    Descending,
    Flat,
}

impl TrendType {
    /// All variants in declaration order, which is also dataset order.
    pub const ALL: [TrendType; 3] = [TrendType::Ascending, TrendType::Descending, TrendType::Flat];

    /// Classify a run by comparing the value at its end against its anchor.
    /// Values within tolerance of each other classify as `Flat`.
    pub fn classify(anchor: f64, end: f64, tolerance: f64) -> TrendType {
        if approx_eq(anchor, end, tolerance) {
            TrendType::Flat
        } else if end > anchor {
            TrendType::Ascending
        } else {
            TrendType::Descending
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TrendType::Ascending => "ascending",
            TrendType::Descending => "descending",
            TrendType::Flat => "flat",
        }
    }
}

/// Summary of one trend segment. Derived, never mutated after creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendStatistics {
    pub trend_type: TrendType,
    pub min_value: f64,
    pub max_value: f64,
    pub start_timestamp_ms: i64,
    pub end_timestamp_ms: i64,
    pub record_count: usize,
}

impl TrendStatistics {
    pub fn duration_ms(&self) -> i64 {
        self.end_timestamp_ms - self.start_timestamp_ms
    }
}

/// One trend segment as an inclusive index range into its series.
///
/// Boundaries of a series are contiguous and non-overlapping: consecutive
/// boundaries satisfy `end_index + 1 == next.start_index`, and their union
/// covers every record exactly once.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendBoundary {
    pub start_index: usize,
    pub end_index: usize,
    pub statistics: TrendStatistics,
}

impl TrendBoundary {
    pub fn record_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::precision::DEFAULT_TOLERANCE;

    #[test]
    fn test_classify() {
        assert_eq!(
            TrendType::classify(1.0, 4.0, DEFAULT_TOLERANCE),
            TrendType::Ascending
        );
        assert_eq!(
            TrendType::classify(4.0, 1.0, DEFAULT_TOLERANCE),
            TrendType::Descending
        );
        assert_eq!(
            TrendType::classify(2.0, 2.0, DEFAULT_TOLERANCE),
            TrendType::Flat
        );
        assert_eq!(
            TrendType::classify(2.0, 2.0 + 1e-12, DEFAULT_TOLERANCE),
            TrendType::Flat
        );
    }

    #[test]
    fn test_duration() {
        let statistics = TrendStatistics {
            trend_type: TrendType::Ascending,
            min_value: 1.0,
            max_value: 4.0,
            start_timestamp_ms: 1_000,
            end_timestamp_ms: 4_500,
            record_count: 4,
        };
        assert_eq!(statistics.duration_ms(), 3_500);
    }

    #[test]
    fn test_serializes_for_render_consumers() {
        let json = serde_json::to_string(&TrendType::Ascending).unwrap();
        assert_eq!(json, "\"ascending\"");
    }
}
