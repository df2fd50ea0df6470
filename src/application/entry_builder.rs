// Chart entry construction with per-record memoization
use std::sync::Arc;

use crate::domain::chart::{ChartEntry, EntryCache};
use crate::domain::record::DataSeries;
use crate::domain::trend::{TrendBoundary, TrendType};

use crate::application::palette::TrendPalette;

/// Build one entry list per boundary, in boundary order.
///
/// The entry cache is consulted first for every record index; only records
/// with no memoized entry allocate a new one. Reused entries keep their `Arc`
/// identity, so a renderer can tell unchanged points apart from rebuilt ones
/// without comparing values.
pub fn build(
    series: &DataSeries,
    boundaries: &[TrendBoundary],
    palette: &dyn TrendPalette,
    cache: &EntryCache,
) -> Vec<(TrendType, Vec<Arc<ChartEntry>>)> {
    let x_origin = series.start_timestamp_ms().unwrap_or(0);
    let mut grouped = Vec::with_capacity(boundaries.len());

    for boundary in boundaries {
        debug_assert!(boundary.end_index < series.len());

        let trend_type = boundary.statistics.trend_type;
        let color = palette.color_for(trend_type);
        let mut entries = Vec::with_capacity(boundary.record_count());

        for index in boundary.start_index..=boundary.end_index {
            let entry = match cache.get(index) {
                Some(cached) => cached,
                None => {
                    let record = series.record(index);
                    let entry = Arc::new(ChartEntry {
                        x: (record.timestamp_ms - x_origin) as f64 / 1_000.0,
                        y: series.primary_value(index),
                        source_record_index: index,
                        color,
                    });
                    cache.insert(Arc::clone(&entry));
                    entry
                }
            };
            entries.push(entry);
        }

        grouped.push((trend_type, entries));
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{aggregator, segmenter};
    use crate::domain::chart::Color;
    use crate::domain::precision::DEFAULT_TOLERANCE;
    use crate::domain::record::Record;
    use crate::infrastructure::palette::StaticTrendPalette;

    fn series(values: &[f64]) -> DataSeries {
        let records = values
            .iter()
            .enumerate()
            .map(|(i, &v)| Record::new(i as i64 * 500, vec![v], vec!["km/h".to_string()]))
            .collect();
        DataSeries::new(records, 0)
    }

    fn boundaries_of(series: &DataSeries) -> Vec<TrendBoundary> {
        let spans = segmenter::segment(series, DEFAULT_TOLERANCE);
        aggregator::aggregate(series, &spans, DEFAULT_TOLERANCE)
    }

    #[test]
    fn test_entries_position_and_color() {
        let series = series(&[1.0, 3.0, 1.0]);
        let boundaries = boundaries_of(&series);
        let palette = StaticTrendPalette::default();
        let cache = EntryCache::new(series.id());

        let grouped = build(&series, &boundaries, &palette, &cache);
        assert_eq!(grouped.len(), 2);

        let (trend_type, entries) = &grouped[0];
        assert_eq!(*trend_type, TrendType::Ascending);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].x, 0.0);
        assert_eq!(entries[1].x, 0.5);
        assert_eq!(entries[1].y, 3.0);
        assert_eq!(entries[1].source_record_index, 1);
        assert_eq!(entries[0].color, palette.color_for(TrendType::Ascending));

        let (trend_type, entries) = &grouped[1];
        assert_eq!(*trend_type, TrendType::Descending);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].source_record_index, 2);
    }

    #[test]
    fn test_rebuild_reuses_cached_entries_by_identity() {
        let series = series(&[1.0, 2.0, 3.0]);
        let boundaries = boundaries_of(&series);
        let palette = StaticTrendPalette::default();
        let cache = EntryCache::new(series.id());

        let first = build(&series, &boundaries, &palette, &cache);
        let second = build(&series, &boundaries, &palette, &cache);

        for (a, b) in first[0].1.iter().zip(&second[0].1) {
            assert!(Arc::ptr_eq(a, b));
        }
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_prefilled_cache_wins_over_palette() {
        let series = series(&[1.0, 2.0]);
        let boundaries = boundaries_of(&series);
        let palette = StaticTrendPalette::default();
        let cache = EntryCache::new(series.id());

        let stale = Arc::new(ChartEntry {
            x: 0.0,
            y: 1.0,
            source_record_index: 0,
            color: Color(0xFF123456),
        });
        cache.insert(Arc::clone(&stale));

        let grouped = build(&series, &boundaries, &palette, &cache);
        assert!(Arc::ptr_eq(&grouped[0].1[0], &stale));
    }
}
