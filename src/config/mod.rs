//! Configuration
//!
//! Resolution of user settings for the command-line shell.

pub mod settings;

pub use settings::{DEFAULT_STORE_FILE, Overrides, Settings, SettingsFile};
