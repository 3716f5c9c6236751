//! Project aggregate
//!
//! A project is an ordered list of counters worked one after another, the
//! id of the counter currently being worked, a timer, and free-form
//! metadata. Counters are only ever appended; the order they were added in
//! is the order of the pattern.
//!
//! Like the engine, every operation returns a new value.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::counter::{Counter, CounterId};
use crate::error::ProjectError;
use crate::timer::ProjectTimer;

/// Opaque project identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    /// Generates a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the first eight characters, for compact display.
    #[must_use]
    pub fn short(&self) -> &str {
        self.0.get(..8).unwrap_or(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Completed counters out of all counters in a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// Counters marked completed
    pub completed: usize,
    /// All counters
    pub total: usize,
}

/// A knitting project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Identifier
    pub id: ProjectId,
    /// Display name
    pub name: String,
    /// Yarn description
    #[serde(default)]
    pub yarn: String,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Link to the pattern being followed
    #[serde(default)]
    pub pattern_link: String,
    /// Counters in pattern order
    #[serde(default)]
    pub counters: Vec<Counter>,
    /// Counter currently being worked
    #[serde(default)]
    pub active_counter_id: Option<CounterId>,
    /// Time spent on the project
    #[serde(default)]
    pub timer: ProjectTimer,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates an empty project.
    #[must_use]
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: ProjectId::generate(),
            name: name.into(),
            yarn: String::new(),
            notes: String::new(),
            pattern_link: String::new(),
            counters: Vec::new(),
            active_counter_id: None,
            timer: ProjectTimer::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the counter with the given id.
    #[must_use]
    pub fn counter(&self, id: &CounterId) -> Option<&Counter> {
        self.counters.iter().find(|c| &c.id == id)
    }

    /// Returns the active counter, if any.
    ///
    /// An active id that no longer matches a counter falls back to the
    /// first counter.
    #[must_use]
    pub fn active_counter(&self) -> Option<&Counter> {
        let id = self.active_counter_id.as_ref()?;
        self.counter(id).or_else(|| self.counters.first())
    }

    /// Repairs an active id that no longer matches any counter.
    ///
    /// A stale id moves to the first counter, or to none when the project
    /// has no counters.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let stale = self
            .active_counter_id
            .as_ref()
            .is_some_and(|id| self.counter(id).is_none());
        if stale {
            self.active_counter_id = self.counters.first().map(|c| c.id.clone());
        }
        self
    }

    /// Returns how many counters are completed.
    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.counters.iter().filter(|c| c.completed).count(),
            total: self.counters.len(),
        }
    }

    /// Appends a counter. The first counter added becomes active.
    #[must_use]
    pub fn add_counter(&self, counter: Counter) -> Self {
        let mut next = self.clone();
        if next.counters.is_empty() {
            next.active_counter_id = Some(counter.id.clone());
        }
        next.counters.push(counter);
        next
    }

    /// Replaces a counter with `f` applied to it.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::CounterNotFound`] if no counter has `id`.
    pub fn update_counter<F>(&self, id: &CounterId, f: F) -> Result<Self, ProjectError>
    where
        F: FnOnce(&Counter) -> Counter,
    {
        let index = self.position(id)?;
        let mut next = self.clone();
        next.counters[index] = f(&self.counters[index]);
        Ok(next)
    }

    /// Removes a counter.
    ///
    /// Deleting the active counter makes the first remaining counter
    /// active, or leaves none active when the project is now empty.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::CounterNotFound`] if no counter has `id`.
    pub fn delete_counter(&self, id: &CounterId) -> Result<Self, ProjectError> {
        let index = self.position(id)?;
        let mut next = self.clone();
        next.counters.remove(index);
        if next.active_counter_id.as_ref() == Some(id) {
            next.active_counter_id = next.counters.first().map(|c| c.id.clone());
        }
        Ok(next)
    }

    /// Makes a counter the active one.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::CounterNotFound`] if no counter has `id`.
    pub fn set_active_counter(&self, id: &CounterId) -> Result<Self, ProjectError> {
        self.position(id)?;
        Ok(Self {
            active_counter_id: Some(id.clone()),
            ..self.clone()
        })
    }

    /// Marks the active counter's current row done.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NoActiveCounter`] without an active counter,
    /// or [`ProjectError::CounterCompleted`] if it is already finished.
    pub fn advance_active(&self) -> Result<Self, ProjectError> {
        let active = self.active_counter().ok_or(ProjectError::NoActiveCounter)?;
        if active.completed {
            return Err(ProjectError::CounterCompleted {
                id: active.id.clone(),
            });
        }
        self.update_counter(&active.id, Counter::advance)
    }

    /// Force-completes the active counter.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NoActiveCounter`] without an active counter.
    pub fn complete_active(&self) -> Result<Self, ProjectError> {
        let active = self.active_counter().ok_or(ProjectError::NoActiveCounter)?;
        self.update_counter(&active.id, Counter::mark_complete)
    }

    /// Resets the active counter to row 1.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::NoActiveCounter`] without an active counter.
    pub fn reset_active(&self) -> Result<Self, ProjectError> {
        let active = self.active_counter().ok_or(ProjectError::NoActiveCounter)?;
        self.update_counter(&active.id, Counter::reset)
    }

    /// Starts or stops the project timer.
    #[must_use]
    pub fn toggle_timer(&self, now: DateTime<Utc>) -> Self {
        Self {
            timer: self.timer.toggle(now),
            ..self.clone()
        }
    }

    /// Zeroes and stops the project timer.
    #[must_use]
    pub fn reset_timer(&self) -> Self {
        Self {
            timer: self.timer.reset(),
            ..self.clone()
        }
    }

    /// Records a modification time.
    #[must_use]
    pub fn touch(self, now: DateTime<Utc>) -> Self {
        Self {
            updated_at: now,
            ..self
        }
    }

    fn position(&self, id: &CounterId) -> Result<usize, ProjectError> {
        self.counters
            .iter()
            .position(|c| &c.id == id)
            .ok_or_else(|| ProjectError::CounterNotFound { id: id.clone() })
    }
}
