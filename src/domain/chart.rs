// Chart entry, dataset, and processed chart data models
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::domain::record::SeriesId;
use crate::domain::trend::{TrendStatistics, TrendType};

/// ARGB color, serialized as the packed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color(pub u32);

impl Color {
    /// Parse `#RRGGBB` or `#AARRGGBB` (leading `#` optional). An RGB value
    /// gets a fully opaque alpha channel.
    pub fn from_hex(hex: &str) -> Option<Color> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let parsed = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Color(0xFF00_0000 | parsed)),
            8 => Some(Color(parsed)),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:08X}", self.0)
    }
}

/// One positioned, colorized point of a rendered line.
///
/// `x` is seconds since the first record of the series, `y` the primary
/// channel value. Entries are shared behind `Arc` so a renderer can diff old
/// and new datasets by identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartEntry {
    pub x: f64,
    pub y: f64,
    pub source_record_index: usize,
    pub color: Color,
}

/// Cosmetic parameters applied to a dataset. Derived from display settings,
/// never consulted by segmentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStyle {
    pub fill_color: Color,
    pub stroke_width: f32,
    pub draw_icons: bool,
    pub draw_filled: bool,
}

/// Renderer-consumable group of entries sharing one trend classification.
#[derive(Debug, Clone)]
pub struct TrendDataset {
    pub trend_type: TrendType,
    pub label: String,
    pub style: DatasetStyle,
    pub entries: Vec<Arc<ChartEntry>>,
}

/// Upper bound on memoized entries per series, so a degenerate source cannot
/// grow the cache without limit.
pub const MAX_CACHED_ENTRIES: usize = 50_000;

/// Per-record memoization of built entries, scoped to one series generation.
///
/// Keyed by source record index. Looking up before building keeps entry
/// identity stable across rebuilds of the same series, which is what lets a
/// renderer reuse unchanged points. The whole cache is dropped when the series
/// identity changes.
#[derive(Debug)]
pub struct EntryCache {
    series: SeriesId,
    entries: RwLock<HashMap<usize, Arc<ChartEntry>>>,
}

impl EntryCache {
    pub fn new(series: SeriesId) -> Self {
        Self {
            series,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn series(&self) -> SeriesId {
        self.series
    }

    pub fn get(&self, source_record_index: usize) -> Option<Arc<ChartEntry>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(&source_record_index).cloned()
    }

    pub fn insert(&self, entry: Arc<ChartEntry>) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        if entries.len() >= MAX_CACHED_ENTRIES {
            tracing::warn!(
                source_record_index = entry.source_record_index,
                capacity = MAX_CACHED_ENTRIES,
                "entry cache full, entry not memoized"
            );
            return;
        }
        entries.insert(entry.source_record_index, entry);
    }

    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Final output of the pipeline: styled datasets plus the entry cache used to
/// build them, bundled so consumers can look entries up by record index
/// without re-deriving anything. Immutable after assembly and shared
/// read-only between the cache and the renderer.
#[derive(Debug)]
pub struct ProcessedChartData {
    series: SeriesId,
    entry_cache: Arc<EntryCache>,
    datasets: Vec<TrendDataset>,
    statistics: Vec<TrendStatistics>,
}

impl ProcessedChartData {
    pub fn new(
        entry_cache: Arc<EntryCache>,
        datasets: Vec<TrendDataset>,
        statistics: Vec<TrendStatistics>,
    ) -> Self {
        Self {
            series: entry_cache.series(),
            entry_cache,
            datasets,
            statistics,
        }
    }

    pub fn series(&self) -> SeriesId {
        self.series
    }

    pub fn entry_cache(&self) -> &Arc<EntryCache> {
        &self.entry_cache
    }

    pub fn datasets(&self) -> &[TrendDataset] {
        &self.datasets
    }

    /// Per-segment summaries in boundary order. Pure accessor.
    pub fn statistics(&self) -> &[TrendStatistics] {
        &self.statistics
    }

    pub fn entry_for(&self, source_record_index: usize) -> Option<Arc<ChartEntry>> {
        self.entry_cache.get(source_record_index)
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}
