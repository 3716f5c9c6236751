//! Counter engine
//!
//! Pure state-transition and derived-value engine for a single phase of a
//! knitting pattern.
//!
//! # Architecture
//!
//! - [`model`]: [`Counter`], [`Mode`] and [`CounterId`]
//! - [`derived`]: total rows, pattern row, stitch count, adjustment flag
//! - [`transition`]: [`advance`], [`mark_complete`], [`reset`]
//! - [`input`]: form payloads, [`validate`] and [`create`]

pub mod derived;
pub mod input;
pub mod model;
pub mod transition;

pub use derived::{
    CounterStatus, current_stitches, has_target, is_adjustment_row, pattern_row, total_rows,
};
pub use input::{CounterInput, Field, FieldValue, ValidationResult, create, validate};
pub use model::{Counter, CounterId, Mode};
pub use transition::{advance, mark_complete, reset};
