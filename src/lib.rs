//! `knitrow` - row and stitch counter for multi-phase knitting patterns
//!
//! This library holds the command-line shell around `knitrow-core`:
//! argument parsing, settings, logging, and the JSON project store.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod store;
