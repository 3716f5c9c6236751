//! Project timer
//!
//! Accumulates time spent on a project across start/stop sessions. The
//! timer stores only a running total and the start instant of the open
//! session; every operation takes the current time from the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Accumulated working time of a project.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectTimer {
    /// Milliseconds from finished sessions
    #[serde(default)]
    pub total_time_ms: u64,
    /// Start of the running session, if any
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
}

/// Milliseconds between two instants, zero if `to` precedes `from`.
fn span_ms(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from((to - from).num_milliseconds()).unwrap_or(0)
}

impl ProjectTimer {
    /// Returns `true` while a session is open.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    /// Returns the total time including the running session.
    #[must_use]
    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
        let running = self.started_at.map_or(0, |start| span_ms(start, now));
        self.total_time_ms.saturating_add(running)
    }

    /// Opens a session. A running timer is left as is.
    #[must_use]
    pub fn start(self, now: DateTime<Utc>) -> Self {
        if self.is_running() {
            return self;
        }
        Self {
            started_at: Some(now),
            ..self
        }
    }

    /// Closes the running session, folding it into the total.
    #[must_use]
    pub fn stop(self, now: DateTime<Utc>) -> Self {
        Self {
            total_time_ms: self.elapsed_ms(now),
            started_at: None,
        }
    }

    /// Starts a stopped timer or stops a running one.
    #[must_use]
    pub fn toggle(self, now: DateTime<Utc>) -> Self {
        if self.is_running() {
            self.stop(now)
        } else {
            self.start(now)
        }
    }

    /// Zeroes the total and stops the timer.
    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }
}

/// Formats a duration as `H:MM:SS`, or `M:SS` under an hour.
#[must_use]
pub fn format_elapsed(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn test_default_is_stopped_and_zero() {
        let timer = ProjectTimer::default();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_ms(at(100)), 0);
    }

    #[test]
    fn test_running_session_counts_toward_elapsed() {
        let timer = ProjectTimer::default().start(at(0));
        assert!(timer.is_running());
        assert_eq!(timer.elapsed_ms(at(90)), 90_000);
    }

    #[test]
    fn test_stop_accumulates_sessions() {
        let timer = ProjectTimer::default()
            .toggle(at(0))
            .toggle(at(60))
            .toggle(at(1000))
            .toggle(at(1030));
        assert!(!timer.is_running());
        assert_eq!(timer.total_time_ms, 90_000);
        assert_eq!(timer.elapsed_ms(at(5000)), 90_000);
    }

    #[test]
    fn test_start_while_running_keeps_original_start() {
        let timer = ProjectTimer::default().start(at(0)).start(at(50));
        assert_eq!(timer.started_at, Some(at(0)));
    }

    #[test]
    fn test_clock_skew_saturates() {
        let timer = ProjectTimer::default().start(at(100));
        assert_eq!(timer.elapsed_ms(at(100) - Duration::seconds(30)), 0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let timer = ProjectTimer {
            total_time_ms: 5_000,
            started_at: Some(at(0)),
        };
        assert_eq!(timer.reset(), ProjectTimer::default());
    }

    #[test]
    fn test_format_under_an_hour() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(65_000), "1:05");
        assert_eq!(format_elapsed(59 * 60_000 + 59_999), "59:59");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_elapsed(3_600_000), "1:00:00");
        assert_eq!(format_elapsed(3_600_000 * 2 + 61_000), "2:01:01");
    }
}
