//! In-memory store

use std::sync::{Mutex, PoisonError};

use super::{Library, ProjectStore};
use crate::error::StoreError;

/// Library held in process memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    library: Mutex<Library>,
}

impl MemoryStore {
    /// Creates a store pre-populated with `library`.
    #[must_use]
    pub const fn with_library(library: Library) -> Self {
        Self {
            library: Mutex::new(library),
        }
    }

    /// Returns a copy of the stored library.
    #[must_use]
    pub fn snapshot(&self) -> Library {
        self.library
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ProjectStore for MemoryStore {
    fn load(&self) -> Result<Library, StoreError> {
        Ok(self.snapshot())
    }

    fn save(&self, library: &Library) -> Result<(), StoreError> {
        *self.library.lock().unwrap_or_else(PoisonError::into_inner) = library.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.library.lock().unwrap_or_else(PoisonError::into_inner) = Library::default();
        Ok(())
    }
}
