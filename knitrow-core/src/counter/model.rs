//! Counter data model
//!
//! A counter tracks one phase of a pattern: a monotonic run of rows during
//! which the stitch count rises, falls, or holds steady on a fixed cadence.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseModeError;

// ============================================================================
// Mode
// ============================================================================

/// Stitch-change mode of a counter, fixed for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One stitch gained after the last row of every cycle
    Increase,
    /// One stitch lost on the first row of every cycle after the first
    Decrease,
    /// Stitch count never changes
    Constant,
}

impl Mode {
    /// Every mode, in display order.
    pub const ALL: [Self; 3] = [Self::Increase, Self::Decrease, Self::Constant];

    /// Returns the lowercase wire name of the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Increase => "increase",
            Self::Decrease => "decrease",
            Self::Constant => "constant",
        }
    }

    /// Returns the counter name used when the caller supplies none.
    #[must_use]
    pub const fn default_name(self) -> &'static str {
        match self {
            Self::Increase => "Increasing",
            Self::Decrease => "Decreasing",
            Self::Constant => "Constant",
        }
    }

    /// Returns `true` for modes that change the stitch count.
    #[must_use]
    pub const fn is_shaping(self) -> bool {
        !matches!(self, Self::Constant)
    }

    /// Suggests the closest mode name for a mistyped value.
    ///
    /// Returns a match only if its Damerau-Levenshtein distance is ≤ 3.
    #[must_use]
    pub fn suggest(input: &str) -> Option<&'static str> {
        let needle = input.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .map(|m| (m.as_str(), strsim::damerau_levenshtein(&needle, m.as_str())))
            .filter(|(_, dist)| *dist <= 3)
            .min_by_key(|(_, dist)| *dist)
            .map(|(name, _)| name)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == needle)
            .ok_or_else(|| ParseModeError {
                value: s.to_string(),
                suggestion: Self::suggest(s),
            })
    }
}

// ============================================================================
// Identifiers
// ============================================================================

/// Opaque counter identifier, assigned once at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterId(String);

impl CounterId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first eight characters, for compact display.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl From<&str> for CounterId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for CounterId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Counter
// ============================================================================

/// One phase of a pattern.
///
/// Field names serialize in camelCase so stored documents keep the shape
/// shared with other front ends (`startStitches`, `currentRow`, ...).
/// Absent targets serialize as `null` rather than being skipped, which
/// keeps a save/load round trip loss-free.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    /// Identifier, immutable after creation
    pub id: CounterId,
    /// Display label
    pub name: String,
    /// Stitch-change mode
    pub mode: Mode,
    /// Stitch count on row 1
    pub start_stitches: u32,
    /// Target stitch count; `None` makes a shaping counter open-ended
    #[serde(default)]
    pub end_stitches: Option<u32>,
    /// Rows per adjustment cycle (always 1 for constant counters)
    pub freq: u32,
    /// Declared row target for constant counters
    #[serde(default)]
    pub total_rows: Option<u32>,
    /// Row currently being worked, starting at 1
    pub current_row: u32,
    /// Set once the final row has been marked done
    #[serde(default)]
    pub completed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse_is_case_insensitive() {
        assert_eq!("Increase".parse::<Mode>().unwrap(), Mode::Increase);
        assert_eq!(" decrease ".parse::<Mode>().unwrap(), Mode::Decrease);
        assert_eq!("CONSTANT".parse::<Mode>().unwrap(), Mode::Constant);
    }

    #[test]
    fn test_mode_parse_suggests_close_match() {
        let err = "incrase".parse::<Mode>().unwrap_err();
        assert_eq!(err.suggestion, Some("increase"));
        assert!(err.to_string().contains("did you mean 'increase'"));
    }

    #[test]
    fn test_mode_parse_without_suggestion() {
        let err = "purl".parse::<Mode>().unwrap_err();
        assert_eq!(err.suggestion, None);
        assert_eq!(err.to_string(), "unknown mode 'purl'");
    }

    #[test]
    fn test_mode_serializes_lowercase() {
        let json = serde_json::to_string(&Mode::Decrease).unwrap();
        assert_eq!(json, "\"decrease\"");
    }

    #[test]
    fn test_default_names() {
        assert_eq!(Mode::Increase.default_name(), "Increasing");
        assert_eq!(Mode::Decrease.default_name(), "Decreasing");
        assert_eq!(Mode::Constant.default_name(), "Constant");
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = CounterId::generate();
        let b = CounterId::generate();
        assert_ne!(a, b);
        assert_eq!(a.short().len(), 8);
    }

    #[test]
    fn test_short_id_of_short_value() {
        let id = CounterId::from("abc");
        assert_eq!(id.short(), "abc");
    }

    #[test]
    fn test_counter_serializes_camel_case_with_nulls() {
        let counter = Counter {
            id: CounterId::from("c1"),
            name: "Increasing".to_string(),
            mode: Mode::Increase,
            start_stitches: 60,
            end_stitches: None,
            freq: 8,
            total_rows: None,
            current_row: 1,
            completed: false,
        };
        let value = serde_json::to_value(&counter).unwrap();
        assert_eq!(value["startStitches"], 60);
        assert_eq!(value["currentRow"], 1);
        assert!(value["endStitches"].is_null());
        assert!(value["totalRows"].is_null());
    }
}
