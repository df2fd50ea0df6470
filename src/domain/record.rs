// Measurement record and series domain models
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use crate::domain::error::ChartError;

static NEXT_SERIES_ID: AtomicU64 = AtomicU64::new(1);

/// Identity token for one generation of loaded data.
///
/// Minted fresh for every `DataSeries`, monotonically increasing, so a newer
/// generation always compares greater than the one it replaces. Used as the
/// series component of cache keys and for stale-generation eviction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(u64);

impl SeriesId {
    fn next() -> Self {
        SeriesId(NEXT_SERIES_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One timestamped multi-channel measurement. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub timestamp_ms: i64,
    pub values: Vec<f64>,
    pub units: Vec<String>,
}

impl Record {
    pub fn new(timestamp_ms: i64, values: Vec<f64>, units: Vec<String>) -> Self {
        Self {
            timestamp_ms,
            values,
            units,
        }
    }

    pub fn from_utc(timestamp: DateTime<Utc>, values: Vec<f64>, units: Vec<String>) -> Self {
        Self::new(timestamp.timestamp_millis(), values, units)
    }

    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp_ms)
    }
}

/// A normalized view over one generation of measurement records, projected on
/// the selected primary channel.
///
/// Records are shared behind an `Arc`, so cloning a series is cheap and the
/// data can cross thread boundaries without copying. A reload never mutates an
/// existing series; it builds a new one with a fresh `SeriesId`, which is what
/// invalidates everything cached against the old generation.
#[derive(Debug, Clone)]
pub struct DataSeries {
    records: Arc<Vec<Record>>,
    primary_index: usize,
    id: SeriesId,
}

impl DataSeries {
    pub fn new(records: Vec<Record>, primary_index: usize) -> Self {
        Self {
            records: Arc::new(records),
            primary_index,
            id: SeriesId::next(),
        }
    }

    pub fn id(&self) -> SeriesId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record(&self, index: usize) -> &Record {
        &self.records[index]
    }

    pub fn primary_index(&self) -> usize {
        self.primary_index
    }

    /// Value of the primary channel at `index`.
    pub fn primary_value(&self, index: usize) -> f64 {
        self.records[index].values[self.primary_index]
    }

    pub fn start_timestamp_ms(&self) -> Option<i64> {
        self.records.first().map(|record| record.timestamp_ms)
    }

    /// Check the series invariants: timestamps non-decreasing, values and
    /// unit labels parallel, and the primary index valid for every record.
    pub fn validate(&self) -> Result<(), ChartError> {
        for (index, record) in self.records.iter().enumerate() {
            if record.values.len() != record.units.len() {
                return Err(ChartError::MismatchedChannels {
                    index,
                    values: record.values.len(),
                    units: record.units.len(),
                });
            }
            if self.primary_index >= record.values.len() {
                return Err(ChartError::PrimaryIndexOutOfRange {
                    index,
                    primary_index: self.primary_index,
                    channels: record.values.len(),
                });
            }
            if index > 0 && record.timestamp_ms < self.records[index - 1].timestamp_ms {
                return Err(ChartError::NonMonotonicTimestamps { index });
            }
        }
        Ok(())
    }
}
