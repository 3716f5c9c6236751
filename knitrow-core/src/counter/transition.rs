//! Row-advance transitions
//!
//! Every transition takes a counter by reference and returns a new value.
//!
//! Advancing a counter that is already completed is a caller error. It is
//! not rejected here; the counter is returned unchanged so the
//! `completed`/`current_row` pair can never be corrupted by it.

use super::derived::total_rows;
use super::model::Counter;

/// Marks the current row done.
///
/// - Open-ended counters move to the next row and never complete.
/// - On (or past) the final row the counter completes without moving.
/// - Otherwise the counter moves to the next row. Completion only happens
///   once the final row itself has been marked done.
#[must_use]
pub fn advance(counter: &Counter) -> Counter {
    if counter.completed {
        return counter.clone();
    }
    match total_rows(counter) {
        Some(total) if counter.current_row >= total => Counter {
            completed: true,
            ..counter.clone()
        },
        Some(_) | None => Counter {
            current_row: counter.current_row.saturating_add(1),
            ..counter.clone()
        },
    }
}

/// Force-completes a counter, leaving its row untouched.
///
/// Intended for open-ended counters; finishing a targeted counter early is
/// left to the caller.
#[must_use]
pub fn mark_complete(counter: &Counter) -> Counter {
    Counter {
        completed: true,
        ..counter.clone()
    }
}

/// Returns the counter to row 1, not completed. No other field changes.
#[must_use]
pub fn reset(counter: &Counter) -> Counter {
    Counter {
        current_row: 1,
        completed: false,
        ..counter.clone()
    }
}

impl Counter {
    /// See [`advance`].
    #[must_use]
    pub fn advance(&self) -> Self {
        advance(self)
    }

    /// See [`mark_complete`].
    #[must_use]
    pub fn mark_complete(&self) -> Self {
        mark_complete(self)
    }

    /// See [`reset`].
    #[must_use]
    pub fn reset(&self) -> Self {
        reset(self)
    }
}
