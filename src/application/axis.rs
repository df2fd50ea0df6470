// Y axis bounds derivation from trend statistics and threshold lines
use serde::Serialize;

use crate::domain::precision::{DEFAULT_TOLERANCE, is_greater_equal};
use crate::domain::trend::TrendStatistics;

/// Proportional padding margin applied around the combined value range.
pub const PADDING_RATIO: f64 = 0.1;

/// Half-width of the fallback band when the combined range collapses.
const DEGENERATE_BAND: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

/// Derive Y-axis bounds from aggregated statistics and externally configured
/// threshold lines.
///
/// The combined minimum is padded downward by `PADDING_RATIO` of the range.
/// The upper bound pads above whichever is larger between the statistics
/// maximum and the combined maximum (thresholds included), compared with a
/// tolerance so a statistics maximum equal to the top within float precision
/// is not clipped. Pure function; applying it twice to the same input yields
/// identical bounds.
pub fn compute_bounds(statistics: &[TrendStatistics], thresholds: &[f64]) -> AxisBounds {
    let data_min = statistics
        .iter()
        .map(|s| s.min_value)
        .fold(f64::INFINITY, f64::min);
    let data_max = statistics
        .iter()
        .map(|s| s.max_value)
        .fold(f64::NEG_INFINITY, f64::max);

    if statistics.is_empty() && thresholds.is_empty() {
        return AxisBounds {
            min: -DEGENERATE_BAND,
            max: DEGENERATE_BAND,
        };
    }

    // the padded data minimum joins the combined range, so the data band
    // never sits directly on the axis edge even without thresholds
    let mut combined_min = f64::INFINITY;
    let mut combined_max = f64::NEG_INFINITY;
    if !statistics.is_empty() {
        let padded_min = data_min - PADDING_RATIO * (data_max - data_min);
        for value in [padded_min, data_min, data_max] {
            combined_min = combined_min.min(value);
            combined_max = combined_max.max(value);
        }
    }
    for &threshold in thresholds {
        combined_min = combined_min.min(threshold);
        combined_max = combined_max.max(threshold);
    }

    let range = combined_max - combined_min;
    if range <= DEFAULT_TOLERANCE * combined_max.abs().max(1.0) {
        return AxisBounds {
            min: combined_min - DEGENERATE_BAND,
            max: combined_max + DEGENERATE_BAND,
        };
    }

    let offset = range * PADDING_RATIO;
    let max = if !statistics.is_empty()
        && is_greater_equal(data_max, combined_max, DEFAULT_TOLERANCE)
    {
        data_max + 2.0 * offset
    } else {
        combined_max + 2.0 * offset
    };

    AxisBounds {
        min: combined_min - offset,
        max,
    }
}
