//! Project persistence
//!
//! The engine keeps no state between calls; this module is the
//! collaborator that stores projects and hands them back unchanged.
//!
//! - [`ProjectStore`]: load/save/clear seam used by the commands
//! - [`JsonFileStore`]: pretty-printed JSON document on disk
//! - [`MemoryStore`]: in-process store for tests

pub mod json;
pub mod memory;

use knitrow_core::{Project, ProjectId};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

/// Version written into new library documents.
pub const LIBRARY_VERSION: u32 = 1;

const fn current_version() -> u32 {
    LIBRARY_VERSION
}

/// The persisted document: every project of the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    /// Document format version
    #[serde(default = "current_version")]
    pub version: u32,
    /// Projects, oldest first
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl Default for Library {
    fn default() -> Self {
        Self {
            version: LIBRARY_VERSION,
            projects: Vec::new(),
        }
    }
}

impl Library {
    /// Returns the project with the given id.
    #[must_use]
    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    /// Stores `project`, replacing the one with the same id or appending.
    pub fn upsert(&mut self, project: Project) {
        match self.projects.iter_mut().find(|p| p.id == project.id) {
            Some(slot) => *slot = project,
            None => self.projects.push(project),
        }
    }

    /// Removes a project, returning it if it existed.
    pub fn remove(&mut self, id: &ProjectId) -> Option<Project> {
        let index = self.projects.iter().position(|p| &p.id == id)?;
        Some(self.projects.remove(index))
    }
}

/// Storage backend for the project library.
pub trait ProjectStore {
    /// Loads the library. A store that was never written loads as empty.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing data cannot be read or
    /// parsed.
    fn load(&self) -> Result<Library, StoreError>;

    /// Replaces the stored library.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the library cannot be written.
    fn save(&self, library: &Library) -> Result<(), StoreError>;

    /// Deletes everything stored.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backing data cannot be removed.
    fn clear(&self) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_default_library_has_current_version() {
        let library = Library::default();
        assert_eq!(library.version, LIBRARY_VERSION);
        assert!(library.projects.is_empty());
    }

    #[test]
    fn test_missing_version_defaults() {
        let library: Library = serde_json::from_str(r#"{"projects":[]}"#).unwrap();
        assert_eq!(library.version, LIBRARY_VERSION);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut library = Library::default();
        let a = Project::new("A", Utc::now());
        let b = Project::new("B", Utc::now());
        library.upsert(a.clone());
        library.upsert(b.clone());

        let renamed = Project {
            name: "A2".to_string(),
            ..a.clone()
        };
        library.upsert(renamed);
        assert_eq!(library.projects.len(), 2);
        assert_eq!(library.projects[0].name, "A2");
        assert_eq!(library.projects[1].id, b.id);
    }

    #[test]
    fn test_remove() {
        let mut library = Library::default();
        let a = Project::new("A", Utc::now());
        library.upsert(a.clone());
        assert_eq!(library.remove(&a.id).map(|p| p.name), Some("A".to_string()));
        assert!(library.remove(&a.id).is_none());
        assert!(library.project(&a.id).is_none());
    }
}
