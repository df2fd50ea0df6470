// Trend chart service - entry points for pipeline collaborators
use std::sync::Arc;

use anyhow::Context;

use crate::domain::chart::ProcessedChartData;
use crate::domain::error::ChartError;
use crate::domain::record::{DataSeries, SeriesId};
use crate::domain::trend::TrendStatistics;
use crate::infrastructure::settings::{DisplaySettings, PipelineSettings};

use crate::application::axis::{self, AxisBounds};
use crate::application::chart_cache::ChartDataCache;
use crate::application::palette::TrendPalette;
use crate::application::record_source::RecordSource;

/// Facade over the cached segmentation pipeline.
///
/// This is the surface collaborators talk to: the data loader feeds it fresh
/// series, the renderer consumes the processed datasets, and the axis/info
/// collaborators read statistics back out of already processed data.
#[derive(Clone)]
pub struct TrendChartService {
    cache: Arc<ChartDataCache>,
}

impl TrendChartService {
    pub fn new(palette: Arc<dyn TrendPalette>, pipeline_settings: &PipelineSettings) -> Self {
        Self {
            cache: Arc::new(ChartDataCache::new(palette, pipeline_settings)),
        }
    }

    /// Main pipeline entry point: segment, aggregate, build, and assemble the
    /// chart data for `series` under `settings`, computing at most once per
    /// distinct (series, settings) combination.
    pub async fn segment_and_cache(
        &self,
        series: &DataSeries,
        settings: &DisplaySettings,
    ) -> Result<Arc<ProcessedChartData>, ChartError> {
        self.cache.get(series, settings).await
    }

    /// Explicit cache eviction for a replaced data generation. Identity-based
    /// invalidation makes this redundant for correctness; calling it reclaims
    /// the memory immediately.
    pub fn invalidate(&self, series: SeriesId) {
        self.cache.invalidate(series);
    }

    /// Per-segment summaries of already processed data. Never recomputes.
    pub fn statistics_for<'a>(&self, data: &'a ProcessedChartData) -> &'a [TrendStatistics] {
        data.statistics()
    }

    /// Y-axis bounds for processed data combined with externally configured
    /// threshold lines.
    pub fn axis_bounds_for(&self, data: &ProcessedChartData, thresholds: &[f64]) -> AxisBounds {
        axis::compute_bounds(data.statistics(), thresholds)
    }

    /// Load a fresh data generation from `source` and run it through the
    /// cached pipeline. Returns the new series alongside its processed data
    /// so the caller can key later requests to the new identity.
    pub async fn refresh_from(
        &self,
        source: &dyn RecordSource,
        primary_index: usize,
        settings: &DisplaySettings,
    ) -> anyhow::Result<(DataSeries, Arc<ProcessedChartData>)> {
        let series = source
            .load_series(primary_index)
            .await
            .context("loading measurement records")?;
        let data = self
            .segment_and_cache(&series, settings)
            .await
            .context("processing chart data")?;
        Ok((series, data))
    }
}
