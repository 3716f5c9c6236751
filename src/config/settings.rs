//! Settings resolution
//!
//! Settings are layered, in increasing precedence:
//! 1. Built-in defaults
//! 2. The optional YAML settings file (`--config` / `KNITROW_CONFIG`)
//! 3. Environment variables and command-line flags, merged by clap

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::cli::args::OutputFormat;
use crate::error::ConfigError;
use crate::observability::LogFormat;

/// Store file used when nothing else is configured.
pub const DEFAULT_STORE_FILE: &str = "knitrow.json";

/// Contents of a YAML settings file. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct SettingsFile {
    /// Path of the JSON store; relative paths are taken from the settings
    /// file's directory
    #[serde(default)]
    pub store_path: Option<PathBuf>,

    /// Log output format
    #[serde(default)]
    pub log_format: Option<LogFormat>,

    /// Output format for commands that support `--format`
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}

impl SettingsFile {
    /// Reads and parses a settings file. An empty file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] if the file does not exist,
    /// [`ConfigError::Unreadable`] on other I/O failures, and
    /// [`ConfigError::ParseError`] for invalid YAML or unknown keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ConfigError::MissingFile {
                    path: path.to_path_buf(),
                }
            } else {
                ConfigError::Unreadable {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let mut file: Self = serde_yaml::from_str(&raw).map_err(|err| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

        if let Some(dir) = path.parent() {
            file.store_path = file
                .store_path
                .map(|store| if store.is_relative() { dir.join(store) } else { store });
        }
        Ok(file)
    }
}

/// Values taken from environment variables and flags.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    /// `--store` / `KNITROW_STORE`
    pub store_path: Option<PathBuf>,
    /// `--log-format` / `KNITROW_LOG_FORMAT`
    pub log_format: Option<LogFormat>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path of the JSON store
    pub store_path: PathBuf,
    /// Log output format
    pub log_format: LogFormat,
    /// Output format for commands that support `--format`
    pub default_format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_FILE),
            log_format: LogFormat::default(),
            default_format: OutputFormat::default(),
        }
    }
}

impl Settings {
    /// Layers the settings file (if any) and overrides onto the defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the settings file cannot be loaded.
    pub fn resolve(config: Option<&Path>, overrides: Overrides) -> Result<Self, ConfigError> {
        let file = config.map(SettingsFile::load).transpose()?.unwrap_or_default();
        let defaults = Self::default();

        Ok(Self {
            store_path: overrides
                .store_path
                .or(file.store_path)
                .unwrap_or(defaults.store_path),
            log_format: overrides
                .log_format
                .or(file.log_format)
                .unwrap_or(defaults.log_format),
            default_format: file.default_format.unwrap_or(defaults.default_format),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("knitrow.yaml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::resolve(None, Overrides::default()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.store_path, PathBuf::from("knitrow.json"));
    }

    #[test]
    fn test_file_values_apply() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "store_path: data/projects.json\nlog_format: json\ndefault_format: json\n",
        );
        let settings = Settings::resolve(Some(&path), Overrides::default()).unwrap();
        assert_eq!(settings.store_path, dir.path().join("data/projects.json"));
        assert_eq!(settings.log_format, LogFormat::Json);
        assert_eq!(settings.default_format, OutputFormat::Json);
    }

    #[test]
    fn test_absolute_store_path_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "store_path: /srv/knitrow.json\n");
        let file = SettingsFile::load(&path).unwrap();
        assert_eq!(file.store_path, Some(PathBuf::from("/srv/knitrow.json")));
    }

    #[test]
    fn test_overrides_beat_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "store_path: a.json\nlog_format: json\n");
        let overrides = Overrides {
            store_path: Some(PathBuf::from("b.json")),
            log_format: Some(LogFormat::Human),
        };
        let settings = Settings::resolve(Some(&path), overrides).unwrap();
        assert_eq!(settings.store_path, PathBuf::from("b.json"));
        assert_eq!(settings.log_format, LogFormat::Human);
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "\n");
        assert_eq!(SettingsFile::load(&path).unwrap(), SettingsFile::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "store: x.json\n");
        let err = SettingsFile::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_missing_file_reported() {
        let err = SettingsFile::load(Path::new("/nonexistent/knitrow.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile { .. }));
    }
}
