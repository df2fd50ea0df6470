// Linear composition of the pure pipeline stages
use std::sync::Arc;

use crate::domain::chart::{EntryCache, ProcessedChartData};
use crate::domain::record::DataSeries;
use crate::infrastructure::settings::DisplaySettings;

use crate::application::palette::TrendPalette;
use crate::application::{aggregator, assembler, entry_builder, segmenter};

/// Run segmentation, aggregation, entry building, and assembly over one
/// series. Each stage is a pure function over the previous stage's immutable
/// output; the cache wraps this whole composition rather than any single
/// step. Expects a validated series.
pub fn process(
    series: &DataSeries,
    settings: &DisplaySettings,
    palette: &dyn TrendPalette,
    tolerance: f64,
    entry_cache: &Arc<EntryCache>,
) -> ProcessedChartData {
    let spans = segmenter::segment(series, tolerance);
    let boundaries = aggregator::aggregate(series, &spans, tolerance);
    let grouped = entry_builder::build(series, &boundaries, palette, entry_cache);
    assembler::assemble(Arc::clone(entry_cache), grouped, &boundaries, settings)
}
