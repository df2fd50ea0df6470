// Record source trait for measurement data access
use async_trait::async_trait;

use crate::domain::record::DataSeries;

/// Data-source collaborator producing ordered measurement records.
///
/// Implementations own acquisition (file, network, sensor feed); the pipeline
/// only reads the resulting series. Every successful load returns a series
/// with a fresh identity, which is what supersedes cached results for the
/// previous generation.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Load one generation of records projected on the selected primary channel.
    async fn load_series(&self, primary_index: usize) -> anyhow::Result<DataSeries>;
}
