//! Error types for `knitrow`
//!
//! This module provides the error hierarchy of the command-line shell and
//! its mapping onto process exit codes.

use std::path::PathBuf;

use knitrow_core::{ProjectError, ValidationResult};
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `knitrow` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Invalid counter input or settings file
    pub const VALIDATION_ERROR: i32 = 2;

    /// I/O error (permission denied, disk full)
    pub const IO_ERROR: i32 = 3;

    /// Stored data could not be read back
    pub const STORE_ERROR: i32 = 4;

    /// Action not allowed in the counter's current state
    pub const PRECONDITION_ERROR: i32 = 5;

    /// Usage error (unknown reference, missing confirmation)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `knitrow` operations.
#[derive(Debug, Error)]
pub enum KnitrowError {
    /// Settings loading error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Persistence error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Project bookkeeping error
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Command-level error
    #[error(transparent)]
    Command(#[from] CommandError),

    /// I/O error writing output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KnitrowError {
    /// Returns the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => ExitCode::VALIDATION_ERROR,
            Self::Store(StoreError::Io { .. }) | Self::Io(_) => ExitCode::IO_ERROR,
            Self::Store(_) => ExitCode::STORE_ERROR,
            Self::Project(ProjectError::CounterNotFound { .. }) => ExitCode::USAGE_ERROR,
            Self::Project(_) => ExitCode::PRECONDITION_ERROR,
            Self::Command(CommandError::InvalidCounter(_)) => ExitCode::VALIDATION_ERROR,
            Self::Command(_) => ExitCode::USAGE_ERROR,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Configuration Errors
// ============================================================================

/// Settings file loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing failed
    #[error("parse error in {path}: {message}")]
    ParseError {
        /// Path to the settings file
        path: PathBuf,
        /// Error message from the parser
        message: String,
    },

    /// Settings file not found
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Settings file exists but could not be read
    #[error("cannot read {path}: {source}")]
    Unreadable {
        /// Path to the settings file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

// ============================================================================
// Store Errors
// ============================================================================

/// Persistence errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the store failed
    #[error("store I/O error at {path}: {source}")]
    Io {
        /// Path of the store file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The store file is not a valid library document
    #[error("store file {path} is corrupt: {message}")]
    Corrupt {
        /// Path of the store file
        path: PathBuf,
        /// Deserialization error message
        message: String,
    },

    /// The store file was written by a newer version
    #[error("store file {path} has unsupported version {version}")]
    UnsupportedVersion {
        /// Path of the store file
        path: PathBuf,
        /// Version found in the file
        version: u32,
    },
}

// ============================================================================
// Command Errors
// ============================================================================

/// Errors raised while interpreting a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// No project matches the reference
    #[error("no project matches '{reference}'")]
    ProjectNotFound {
        /// Id, id prefix or name given by the user
        reference: String,
    },

    /// No counter matches the reference
    #[error("no counter matches '{reference}'")]
    CounterNotFound {
        /// Id, id prefix, position or name given by the user
        reference: String,
    },

    /// More than one item matches the reference
    #[error("'{reference}' is ambiguous; it matches {}", .matches.join(", "))]
    Ambiguous {
        /// Reference given by the user
        reference: String,
        /// Short ids of the candidates
        matches: Vec<String>,
    },

    /// Counter input failed validation
    #[error("invalid counter: {0}")]
    InvalidCounter(ValidationResult),

    /// A destructive action was requested without confirmation
    #[error("{action} discards progress; pass --yes to confirm")]
    Unconfirmed {
        /// Name of the action
        action: &'static str,
    },
}
