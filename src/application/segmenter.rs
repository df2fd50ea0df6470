// Extrema detection and monotonic run segmentation
use crate::domain::precision::approx_eq;
use crate::domain::record::DataSeries;

/// Inclusive index range of one monotonic run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSpan {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepDirection {
    Up,
    Down,
}

/// Sign of one step with a tolerance dead-zone. `None` means the step is a
/// tie and continues the current run.
fn step_direction(prev: f64, next: f64, tolerance: f64) -> Option<StepDirection> {
    if approx_eq(prev, next, tolerance) {
        None
    } else if next > prev {
        Some(StepDirection::Up)
    } else {
        Some(StepDirection::Down)
    }
}

/// Partition `[0, series.len())` into maximal runs that are monotonic in the
/// primary value.
///
/// Single linear scan: a record is an extremum when the step direction flips
/// around it, which closes the current run at that record and opens the next
/// one immediately after. Ties continue the current run, so plateaus never
/// over-segment. The spans are contiguous, non-overlapping, and cover the
/// whole series.
pub fn segment(series: &DataSeries, tolerance: f64) -> Vec<SegmentSpan> {
    let n = series.len();
    if n == 0 {
        return Vec::new();
    }

    let mut spans = Vec::new();
    let mut start = 0;
    let mut direction: Option<StepDirection> = None;

    for i in 1..n {
        let step = step_direction(
            series.primary_value(i - 1),
            series.primary_value(i),
            tolerance,
        );
        match (direction, step) {
            // tie: plateau continues the current run
            (_, None) => {}
            (None, Some(step)) => direction = Some(step),
            (Some(current), Some(step)) if current == step => {}
            (Some(_), Some(step)) => {
                // direction flipped: the extremum at i - 1 closes the run
                spans.push(SegmentSpan {
                    start,
                    end: i - 1,
                });
                start = i;
                direction = Some(step);
            }
        }
    }

    spans.push(SegmentSpan { start, end: n - 1 });
    tracing::debug!(records = n, segments = spans.len(), "segmented series");
    spans
}
