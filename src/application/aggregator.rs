// Per-segment statistics aggregation
use crate::domain::record::DataSeries;
use crate::domain::trend::{TrendBoundary, TrendStatistics, TrendType};

use crate::application::segmenter::SegmentSpan;

/// Scan each span once and derive its `TrendBoundary`.
///
/// Classification compares the primary value at a span's end against the
/// run's anchor: the previous span's end value (the extremum where this run
/// began) for every span after the first, the span's own start value for the
/// first. Every record is visited exactly once across all spans.
pub fn aggregate(series: &DataSeries, spans: &[SegmentSpan], tolerance: f64) -> Vec<TrendBoundary> {
    let mut boundaries = Vec::with_capacity(spans.len());

    for (position, span) in spans.iter().enumerate() {
        debug_assert!(span.start <= span.end && span.end < series.len());

        let mut min_value = f64::INFINITY;
        let mut max_value = f64::NEG_INFINITY;
        for index in span.start..=span.end {
            let value = series.primary_value(index);
            min_value = min_value.min(value);
            max_value = max_value.max(value);
        }

        let anchor_index = if position == 0 { span.start } else { span.start - 1 };
        let trend_type = TrendType::classify(
            series.primary_value(anchor_index),
            series.primary_value(span.end),
            tolerance,
        );

        boundaries.push(TrendBoundary {
            start_index: span.start,
            end_index: span.end,
            statistics: TrendStatistics {
                trend_type,
                min_value,
                max_value,
                start_timestamp_ms: series.record(span.start).timestamp_ms,
                end_timestamp_ms: series.record(span.end).timestamp_ms,
                record_count: span.end - span.start + 1,
            },
        });
    }

    boundaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::segmenter;
    use crate::domain::precision::DEFAULT_TOLERANCE;
    use crate::domain::record::Record;

    fn series(values: &[f64]) -> DataSeries {
        let records = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Record::new(i as i64 * 1_000, vec![v], vec!["m".to_string()]))
            .collect();
        DataSeries::new(records, 0)
    }

    fn boundaries_of(values: &[f64]) -> Vec<TrendBoundary> {
        let series = series(values);
        let spans = segmenter::segment(&series, DEFAULT_TOLERANCE);
        aggregate(&series, &spans, DEFAULT_TOLERANCE)
    }

    #[test]
    fn test_ascending_series() {
        let boundaries = boundaries_of(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(boundaries.len(), 1);

        let statistics = boundaries[0].statistics;
        assert_eq!(statistics.trend_type, TrendType::Ascending);
        assert_eq!(statistics.min_value, 1.0);
        assert_eq!(statistics.max_value, 4.0);
        assert_eq!(statistics.start_timestamp_ms, 0);
        assert_eq!(statistics.end_timestamp_ms, 3_000);
        assert_eq!(statistics.record_count, 4);
    }

    #[test]
    fn test_descending_series() {
        let boundaries = boundaries_of(&[4.0, 3.0, 2.0, 1.0]);
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].statistics.trend_type, TrendType::Descending);
    }

    #[test]
    fn test_flat_series() {
        let boundaries = boundaries_of(&[2.0, 2.0, 2.0, 2.0]);
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].statistics.trend_type, TrendType::Flat);
        assert_eq!(boundaries[0].statistics.record_count, 4);
    }

    #[test]
    fn test_peak_splits_into_ascending_then_descending() {
        let boundaries = boundaries_of(&[1.0, 3.0, 1.0]);
        assert_eq!(boundaries.len(), 2);

        assert_eq!(boundaries[0].start_index, 0);
        assert_eq!(boundaries[0].end_index, 1);
        assert_eq!(boundaries[0].statistics.trend_type, TrendType::Ascending);

        // the tail run descends from the peak anchor even though it owns a
        // single record
        assert_eq!(boundaries[1].start_index, 2);
        assert_eq!(boundaries[1].end_index, 2);
        assert_eq!(boundaries[1].statistics.trend_type, TrendType::Descending);
    }

    #[test]
    fn test_single_record_is_flat() {
        let boundaries = boundaries_of(&[5.0]);
        assert_eq!(boundaries.len(), 1);
        assert_eq!(boundaries[0].statistics.trend_type, TrendType::Flat);
        assert_eq!(boundaries[0].statistics.min_value, 5.0);
        assert_eq!(boundaries[0].statistics.max_value, 5.0);
    }

    #[test]
    fn test_boundaries_partition_series() {
        let values = [2.0, 4.0, 4.0, 1.0, 0.0, 3.0, 3.5, 2.0];
        let boundaries = boundaries_of(&values);

        let total: usize = boundaries.iter().map(TrendBoundary::record_count).sum();
        assert_eq!(total, values.len());
        for pair in boundaries.windows(2) {
            assert_eq!(pair[0].end_index + 1, pair[1].start_index);
        }
    }

    #[test]
    fn test_empty_series_has_no_boundaries() {
        assert!(boundaries_of(&[]).is_empty());
    }
}
