// Dataset grouping and final chart data assembly
use std::sync::Arc;

use crate::domain::chart::{ChartEntry, EntryCache, ProcessedChartData, TrendDataset};
use crate::domain::trend::{TrendBoundary, TrendType};
use crate::infrastructure::settings::DisplaySettings;

/// Group per-boundary entry lists into one dataset per trend type and bundle
/// them with the entry cache used during the build.
///
/// Datasets come out in `TrendType` declaration order with empty groups
/// omitted; boundary order is preserved inside each group. Pure assembly, no
/// recomputation.
pub fn assemble(
    entry_cache: Arc<EntryCache>,
    grouped: Vec<(TrendType, Vec<Arc<ChartEntry>>)>,
    boundaries: &[TrendBoundary],
    settings: &DisplaySettings,
) -> ProcessedChartData {
    let style = settings.dataset_style();
    let mut datasets = Vec::new();

    for trend_type in TrendType::ALL {
        let mut entries = Vec::new();
        let mut segments = 0usize;
        for (group_trend, group_entries) in &grouped {
            if *group_trend == trend_type {
                entries.extend(group_entries.iter().cloned());
                segments += 1;
            }
        }
        if entries.is_empty() {
            continue;
        }
        datasets.push(TrendDataset {
            trend_type,
            label: dataset_label(trend_type, segments),
            style: style.clone(),
            entries,
        });
    }

    let statistics = boundaries
        .iter()
        .map(|boundary| boundary.statistics)
        .collect();

    ProcessedChartData::new(entry_cache, datasets, statistics)
}

fn dataset_label(trend_type: TrendType, segments: usize) -> String {
    if segments == 1 {
        format!("{} (1 segment)", trend_type.label())
    } else {
        format!("{} ({} segments)", trend_type.label(), segments)
    }
}
