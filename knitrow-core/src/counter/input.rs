//! Counter construction and validation
//!
//! Form-style input arrives with numbers either as JSON numbers or as
//! strings. [`validate`] checks every field and reports all problems at
//! once; [`create`] normalizes validated input into a [`Counter`].

use std::fmt;

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use super::model::{Counter, CounterId, Mode};
use crate::error::CreateError;

// ============================================================================
// Input
// ============================================================================

/// A numeric form field, supplied as a number or as text.
///
/// Any JSON number deserializes; fractional or out-of-range values are
/// reported by validation rather than rejected here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A JSON integer
    Number(i64),
    /// Any other JSON number
    Decimal(f64),
    /// Text to be parsed as a whole number
    Text(String),
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(i64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// How a field reads once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reading {
    Absent,
    Whole(i64),
    Malformed,
}

fn read(value: Option<&FieldValue>) -> Reading {
    match value {
        None => Reading::Absent,
        Some(FieldValue::Number(n)) => Reading::Whole(*n),
        Some(FieldValue::Decimal(value)) => integral(*value),
        Some(FieldValue::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Reading::Absent
            } else {
                text.parse().map_or(Reading::Malformed, Reading::Whole)
            }
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(value: f64) -> Reading {
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    if value.is_finite() && value.fract() == 0.0 && in_range {
        Reading::Whole(value as i64)
    } else {
        Reading::Malformed
    }
}

/// Reads a field that must be a whole number ≥ 1 fitting a `u32`.
fn positive(reading: Reading) -> Option<u32> {
    match reading {
        Reading::Whole(n) if n >= 1 => u32::try_from(n).ok(),
        _ => None,
    }
}

/// Payload for creating a counter.
///
/// `mode` is kept as raw text so an unknown mode can be reported as a
/// field error instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CounterInput {
    /// Display label; generated from the mode when blank
    pub name: Option<String>,
    /// Mode name
    pub mode: Option<String>,
    /// Stitches on row 1
    pub start_stitches: Option<FieldValue>,
    /// Target stitches (shaping modes only)
    pub end_stitches: Option<FieldValue>,
    /// Rows per cycle (shaping modes only)
    pub freq: Option<FieldValue>,
    /// Row target (constant mode only)
    pub total_rows: Option<FieldValue>,
}

impl CounterInput {
    /// Starts an input for the given mode.
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode: Some(mode.as_str().to_string()),
            ..Self::default()
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the starting stitch count.
    #[must_use]
    pub fn start_stitches(mut self, value: impl Into<FieldValue>) -> Self {
        self.start_stitches = Some(value.into());
        self
    }

    /// Sets the target stitch count.
    #[must_use]
    pub fn end_stitches(mut self, value: impl Into<FieldValue>) -> Self {
        self.end_stitches = Some(value.into());
        self
    }

    /// Sets the rows per cycle.
    #[must_use]
    pub fn freq(mut self, value: impl Into<FieldValue>) -> Self {
        self.freq = Some(value.into());
        self
    }

    /// Sets the row target.
    #[must_use]
    pub fn total_rows(mut self, value: impl Into<FieldValue>) -> Self {
        self.total_rows = Some(value.into());
        self
    }
}

// ============================================================================
// Validation result
// ============================================================================

/// Input field a validation message is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// `mode`
    Mode,
    /// `startStitches`
    StartStitches,
    /// `endStitches`
    EndStitches,
    /// `freq`
    Freq,
    /// `totalRows`
    TotalRows,
}

impl Field {
    /// Returns the camelCase field name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mode => "mode",
            Self::StartStitches => "startStitches",
            Self::EndStitches => "endStitches",
            Self::Freq => "freq",
            Self::TotalRows => "totalRows",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`validate`]: a message per offending field.
///
/// Fields appear in the order they were checked. Serializes as
/// `{ "valid": bool, "errors": { field: message } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: IndexMap<Field, String>,
}

impl ValidationResult {
    /// Returns `true` if no field was rejected.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the message for `field`, if it was rejected.
    #[must_use]
    pub fn error(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Returns all field errors in check order.
    #[must_use]
    pub const fn errors(&self) -> &IndexMap<Field, String> {
        &self.errors
    }

    fn reject(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.errors {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Parsed field values of an input that passed validation.
#[derive(Debug, Clone, Copy)]
struct Normalized {
    mode: Mode,
    start_stitches: u32,
    end_stitches: Option<u32>,
    freq: Option<u32>,
    total_rows: Option<u32>,
}

/// Checks every field, collecting all problems, and returns the parsed
/// values when there were none.
fn check(input: &CounterInput) -> (ValidationResult, Option<Normalized>) {
    let mut result = ValidationResult::default();

    let mode = match input.mode.as_deref().map(str::trim) {
        None | Some("") => {
            result.reject(Field::Mode, "Please select a mode");
            None
        }
        Some(raw) => match raw.parse::<Mode>() {
            Ok(mode) => Some(mode),
            Err(err) => {
                result.reject(Field::Mode, capitalize(&err.to_string()));
                None
            }
        },
    };

    let start = positive(read(input.start_stitches.as_ref()));
    if start.is_none() {
        result.reject(Field::StartStitches, "Start stitches must be at least 1");
    }

    let mut end = None;
    let mut freq = None;
    let mut total_rows = None;

    match mode {
        Some(Mode::Constant) => match read(input.total_rows.as_ref()) {
            Reading::Absent => {}
            reading => {
                total_rows = positive(reading);
                if total_rows.is_none() {
                    result.reject(Field::TotalRows, "Total rows must be at least 1");
                }
            }
        },
        Some(mode @ (Mode::Increase | Mode::Decrease)) => {
            match read(input.end_stitches.as_ref()) {
                Reading::Absent => {}
                Reading::Whole(n) => match (u32::try_from(n), start) {
                    (Err(_), _) if n < 0 => {
                        result.reject(Field::EndStitches, "End stitches cannot be negative");
                    }
                    (Err(_), _) => {
                        result.reject(Field::EndStitches, "End stitches must be a whole number");
                    }
                    (Ok(n), Some(start)) if mode == Mode::Increase && n <= start => {
                        result.reject(
                            Field::EndStitches,
                            "End stitches must be greater than start stitches for increasing",
                        );
                    }
                    (Ok(n), Some(start)) if mode == Mode::Decrease && n >= start => {
                        result.reject(
                            Field::EndStitches,
                            "End stitches must be less than start stitches for decreasing",
                        );
                    }
                    (Ok(n), _) => end = Some(n),
                },
                Reading::Malformed => {
                    result.reject(Field::EndStitches, "End stitches must be a whole number");
                }
            }

            let open_ended = read(input.end_stitches.as_ref()) == Reading::Absent;
            match read(input.freq.as_ref()) {
                Reading::Absent if open_ended => {}
                reading => {
                    freq = positive(reading);
                    if freq.is_none() {
                        result.reject(Field::Freq, "Frequency must be at least 1");
                    }
                }
            }
        }
        None => {}
    }

    let normalized = match (mode, start) {
        (Some(mode), Some(start_stitches)) if result.is_valid() => Some(Normalized {
            mode,
            start_stitches,
            end_stitches: end,
            freq,
            total_rows,
        }),
        _ => None,
    };
    (result, normalized)
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Validates a counter payload, reporting every rejected field.
#[must_use]
pub fn validate(input: &CounterInput) -> ValidationResult {
    check(input).0
}

/// Builds a new counter at row 1 from a payload.
///
/// Numeric text is parsed, the name is trimmed (falling back to the mode's
/// default name), constant counters get `end_stitches = start_stitches` and
/// a cadence of 1, and shaping counters drop any row target.
///
/// # Errors
///
/// Returns [`CreateError::Invalid`] carrying the full validation result if
/// the payload does not pass [`validate`].
pub fn create(input: &CounterInput) -> Result<Counter, CreateError> {
    let (result, normalized) = check(input);
    let Some(values) = normalized else {
        return Err(CreateError::Invalid(result));
    };

    let name = input
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map_or_else(|| values.mode.default_name().to_string(), str::to_string);

    let (end_stitches, freq, total_rows) = match values.mode {
        Mode::Constant => (Some(values.start_stitches), 1, values.total_rows),
        Mode::Increase | Mode::Decrease => (values.end_stitches, values.freq.unwrap_or(1), None),
    };

    Ok(Counter {
        id: CounterId::generate(),
        name,
        mode: values.mode,
        start_stitches: values.start_stitches,
        end_stitches,
        freq,
        total_rows,
        current_row: 1,
        completed: false,
    })
}
