//! Observability module
//!
//! Structured logging for `knitrow` via `tracing`.

pub mod logging;

pub use logging::{LogFormat, init_logging};
