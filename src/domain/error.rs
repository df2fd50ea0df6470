// Error taxonomy for the chart data pipeline
use thiserror::Error;

/// Failures surfaced by the pipeline and its cache.
///
/// The precondition variants reject a malformed series at the cache boundary,
/// before any worker is scheduled. `Computation` covers unexpected failures in
/// a pipeline stage. All variants are `Clone` so a single failure can be
/// propagated to every caller waiting on the same in-flight computation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("record timestamps decrease at index {index}")]
    NonMonotonicTimestamps { index: usize },

    #[error("primary channel {primary_index} is out of range for record {index} with {channels} channels")]
    PrimaryIndexOutOfRange {
        index: usize,
        primary_index: usize,
        channels: usize,
    },

    #[error("record {index} has {values} values but {units} unit labels")]
    MismatchedChannels {
        index: usize,
        values: usize,
        units: usize,
    },

    #[error("chart computation failed: {0}")]
    Computation(String),
}

impl ChartError {
    /// True for precondition violations detected before any computation runs.
    pub fn is_precondition(&self) -> bool {
        !matches!(self, ChartError::Computation(_))
    }
}
