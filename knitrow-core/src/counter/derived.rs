//! Derived counter values
//!
//! Pure functions computing display and decision values from a counter's
//! declared parameters and its current row. None of them mutate.
//!
//! Increase and decrease land at different points of a cycle. An increase
//! is applied once the last row of a cycle is done, so every row of a cycle
//! shows the same count. A decrease is worked on row 1 of each cycle after
//! the first, so rows 2..=freq already show the reduced count.

use serde::Serialize;

use super::model::{Counter, Mode};

/// Rows per cycle, never zero. Constant counters always use a cadence of 1.
const fn cadence(counter: &Counter) -> u32 {
    match counter.mode {
        Mode::Constant => 1,
        Mode::Increase | Mode::Decrease => {
            if counter.freq == 0 {
                1
            } else {
                counter.freq
            }
        }
    }
}

/// Number of full cycles finished before the current row.
const fn completed_cycles(counter: &Counter) -> u32 {
    counter.current_row.saturating_sub(1) / cadence(counter)
}

/// Returns the number of rows in the phase, or `None` when open-ended.
///
/// Constant counters report their declared row target. Shaping counters
/// derive it from the stitch difference: one cycle per stitch changed.
#[must_use]
pub fn total_rows(counter: &Counter) -> Option<u32> {
    match counter.mode {
        Mode::Constant => counter.total_rows.filter(|&rows| rows > 0),
        Mode::Increase | Mode::Decrease => {
            let end = counter.end_stitches?;
            if end == counter.start_stitches {
                return None;
            }
            Some(end.abs_diff(counter.start_stitches).saturating_mul(cadence(counter)))
        }
    }
}

/// Returns `true` if the counter has a computable row target.
#[must_use]
pub fn has_target(counter: &Counter) -> bool {
    total_rows(counter).is_some()
}

/// Returns the 1-based position of the current row within its cycle.
#[must_use]
pub const fn pattern_row(counter: &Counter) -> u32 {
    counter.current_row.saturating_sub(1) % cadence(counter) + 1
}

/// Returns the stitch count on the current row.
#[must_use]
pub const fn current_stitches(counter: &Counter) -> u32 {
    let cycles = completed_cycles(counter);
    match counter.mode {
        Mode::Constant => counter.start_stitches,
        Mode::Increase => counter.start_stitches.saturating_add(cycles),
        Mode::Decrease => {
            let decreases = if pattern_row(counter) == 1 {
                cycles
            } else {
                cycles.saturating_add(1)
            };
            counter.start_stitches.saturating_sub(decreases)
        }
    }
}

/// Returns `true` if the current row is the one carrying the stitch change.
///
/// For increases that is the last row of the cycle; for decreases the first.
#[must_use]
pub const fn is_adjustment_row(counter: &Counter) -> bool {
    match counter.mode {
        Mode::Constant => false,
        Mode::Increase => pattern_row(counter) == cadence(counter),
        Mode::Decrease => pattern_row(counter) == 1,
    }
}

impl Counter {
    /// See [`total_rows`].
    #[must_use]
    pub fn total_rows(&self) -> Option<u32> {
        total_rows(self)
    }

    /// See [`has_target`].
    #[must_use]
    pub fn has_target(&self) -> bool {
        has_target(self)
    }

    /// See [`pattern_row`].
    #[must_use]
    pub const fn pattern_row(&self) -> u32 {
        pattern_row(self)
    }

    /// See [`current_stitches`].
    #[must_use]
    pub const fn current_stitches(&self) -> u32 {
        current_stitches(self)
    }

    /// See [`is_adjustment_row`].
    #[must_use]
    pub const fn is_adjustment_row(&self) -> bool {
        is_adjustment_row(self)
    }

    /// Returns every derived value at once.
    #[must_use]
    pub fn status(&self) -> CounterStatus {
        CounterStatus::of(self)
    }
}

// ============================================================================
// Status snapshot
// ============================================================================

/// Snapshot of all derived values of a counter, for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterStatus {
    /// Row currently being worked
    pub current_row: u32,
    /// Row target, `None` when open-ended
    pub total_rows: Option<u32>,
    /// Whether a row target exists
    pub has_target: bool,
    /// Position within the cycle
    pub pattern_row: u32,
    /// Rows per cycle
    pub freq: u32,
    /// Stitches on the current row
    pub current_stitches: u32,
    /// Whether the current row carries the stitch change
    pub is_adjustment_row: bool,
    /// Whether the phase is finished
    pub completed: bool,
    /// Fraction of rows reached, in `[0, 1]`; `None` when open-ended
    pub progress: Option<f64>,
}

impl CounterStatus {
    /// Computes the snapshot for `counter`.
    #[must_use]
    pub fn of(counter: &Counter) -> Self {
        let total = total_rows(counter);
        let progress = total.map(|t| (f64::from(counter.current_row) / f64::from(t)).min(1.0));
        Self {
            current_row: counter.current_row,
            total_rows: total,
            has_target: total.is_some(),
            pattern_row: pattern_row(counter),
            freq: cadence(counter),
            current_stitches: current_stitches(counter),
            is_adjustment_row: is_adjustment_row(counter),
            completed: counter.completed,
            progress,
        }
    }
}
