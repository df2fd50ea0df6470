//! Trend segmentation and chart data caching for track measurements.
//!
//! Ingests a time-ordered series of multi-channel measurements (altitude,
//! speed, ... at irregular timestamps), partitions it into monotonic trend
//! segments, aggregates per-segment statistics, and produces styled,
//! render-ready datasets. A content-addressed cache in front of the pipeline
//! guarantees the expensive computation runs at most once per distinct
//! (data generation, display settings) combination, with single-flight
//! coordination for concurrent callers.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::axis::{AxisBounds, compute_bounds};
pub use application::chart_cache::{CacheKey, ChartDataCache};
pub use application::chart_service::TrendChartService;
pub use application::palette::TrendPalette;
pub use application::record_source::RecordSource;
pub use domain::chart::{
    ChartEntry, Color, DatasetStyle, EntryCache, ProcessedChartData, TrendDataset,
};
pub use domain::error::ChartError;
pub use domain::record::{DataSeries, Record, SeriesId};
pub use domain::trend::{TrendBoundary, TrendStatistics, TrendType};
pub use infrastructure::palette::StaticTrendPalette;
pub use infrastructure::settings::{
    DisplaySettings, PipelineSettings, load_display_settings, load_pipeline_settings,
};
