//! Command-line interface
//!
//! Argument parsing, reference resolution, output rendering and the
//! command handlers that tie the engine to the project store.

pub mod args;
pub mod commands;
pub mod render;
pub mod resolve;
