//! `knitrow` Core: counter engine and project model
//!
//! This crate holds the pure, synchronous engine behind `knitrow`: the
//! counter data model, its derived values and row transitions, input
//! validation, and the project aggregate that strings counters together.
//! Nothing here performs I/O or keeps state between calls; callers own
//! persistence and identity.
//!
//! # Example
//!
//! ```
//! use knitrow_core::counter::{CounterInput, Mode, create};
//!
//! let counter = create(
//!     &CounterInput::new(Mode::Increase)
//!         .start_stitches(60)
//!         .end_stitches(64)
//!         .freq(8),
//! )
//! .unwrap();
//! assert_eq!(counter.total_rows(), Some(32));
//!
//! let counter = counter.advance();
//! assert_eq!(counter.current_row, 2);
//! assert_eq!(counter.current_stitches(), 60);
//! ```

pub mod counter;
pub mod error;
pub mod project;
pub mod timer;

pub use counter::{Counter, CounterId, CounterInput, CounterStatus, Mode, ValidationResult};
pub use error::{CreateError, ParseModeError, ProjectError};
pub use project::{Progress, Project, ProjectId};
pub use timer::{ProjectTimer, format_elapsed};
