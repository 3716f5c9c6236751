//! JSON file store
//!
//! Keeps the whole library in one pretty-printed JSON document. Writes go
//! to a sibling temporary file which is then renamed over the original, so
//! an interrupted save never leaves a half-written library behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use knitrow_core::Project;
use tracing::debug;

use super::{LIBRARY_VERSION, Library, ProjectStore};
use crate::error::StoreError;

/// Library stored as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store backed by `path`. Nothing is touched until used.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProjectStore for JsonFileStore {
    fn load(&self) -> Result<Library, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "store file absent; starting empty");
                return Ok(Library::default());
            }
            Err(err) => return Err(self.io_error(err)),
        };

        if raw.trim().is_empty() {
            debug!(path = %self.path.display(), "store file empty; starting empty");
            return Ok(Library::default());
        }

        let mut library: Library = serde_json::from_str(&raw).map_err(|err| StoreError::Corrupt {
            path: self.path.clone(),
            message: err.to_string(),
        })?;

        if library.version > LIBRARY_VERSION {
            return Err(StoreError::UnsupportedVersion {
                path: self.path.clone(),
                version: library.version,
            });
        }

        library.projects = library
            .projects
            .into_iter()
            .map(Project::normalized)
            .collect();

        debug!(
            path = %self.path.display(),
            projects = library.projects.len(),
            "loaded library"
        );
        Ok(library)
    }

    fn save(&self, library: &Library) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
        }

        let mut content = serde_json::to_string_pretty(library).map_err(|err| {
            StoreError::Corrupt {
                path: self.path.clone(),
                message: err.to_string(),
            }
        })?;
        content.push('\n');

        let temp = self.temp_path();
        fs::write(&temp, content).map_err(|err| self.io_error(err))?;
        fs::rename(&temp, &self.path).map_err(|err| self.io_error(err))?;

        debug!(
            path = %self.path.display(),
            projects = library.projects.len(),
            "saved library"
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(self.io_error(err)),
        }
    }
}
