//! Output rendering
//!
//! Human-readable text and JSON views of projects, counters and
//! validation results. Everything is written to a caller-supplied writer
//! so commands can be exercised against a buffer.

use std::io::{self, Write};

use chrono::{DateTime, Utc};
use knitrow_core::{
    Counter, CounterId, CounterStatus, Mode, Progress, Project, ProjectId, ValidationResult,
    format_elapsed,
};
use serde::Serialize;

use crate::error::KnitrowError;

// ============================================================================
// JSON views
// ============================================================================

/// One line of `project list`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary<'a> {
    /// Project id
    pub id: &'a ProjectId,
    /// Project name
    pub name: &'a str,
    /// Completed counters out of all counters
    pub progress: Progress,
    /// Time spent, including a running span
    pub elapsed_ms: u64,
    /// Whether the timer is running
    pub timer_running: bool,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl<'a> ProjectSummary<'a> {
    /// Summarizes `project` as of `now`.
    #[must_use]
    pub fn of(project: &'a Project, now: DateTime<Utc>) -> Self {
        Self {
            id: &project.id,
            name: &project.name,
            progress: project.progress(),
            elapsed_ms: project.timer.elapsed_ms(now),
            timer_running: project.timer.is_running(),
            updated_at: project.updated_at,
        }
    }
}

/// A counter with its derived values.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterView<'a> {
    /// Stored counter
    #[serde(flatten)]
    pub counter: &'a Counter,
    /// Whether this is the project's active counter
    pub active: bool,
    /// Derived values
    pub status: CounterStatus,
}

impl<'a> CounterView<'a> {
    /// Builds the view of `counter` within `project`.
    #[must_use]
    pub fn of(project: &Project, counter: &'a Counter) -> Self {
        Self {
            counter,
            active: is_active(project, &counter.id),
            status: counter.status(),
        }
    }
}

/// Full view of a project for `project show`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectView<'a> {
    /// Summary fields
    #[serde(flatten)]
    pub summary: ProjectSummary<'a>,
    /// Yarn description
    pub yarn: &'a str,
    /// Notes
    pub notes: &'a str,
    /// Pattern link
    pub pattern_link: &'a str,
    /// Active counter id
    pub active_counter_id: Option<&'a CounterId>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Counters in pattern order
    pub counters: Vec<CounterView<'a>>,
}

impl<'a> ProjectView<'a> {
    /// Builds the view of `project` as of `now`.
    #[must_use]
    pub fn of(project: &'a Project, now: DateTime<Utc>) -> Self {
        Self {
            summary: ProjectSummary::of(project, now),
            yarn: &project.yarn,
            notes: &project.notes,
            pattern_link: &project.pattern_link,
            active_counter_id: project.active_counter_id.as_ref(),
            created_at: project.created_at,
            counters: project
                .counters
                .iter()
                .map(|counter| CounterView::of(project, counter))
                .collect(),
        }
    }
}

/// Writes `value` as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<(), KnitrowError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

// ============================================================================
// Human output
// ============================================================================

fn is_active(project: &Project, id: &CounterId) -> bool {
    project.active_counter_id.as_ref() == Some(id)
}

fn row_label(counter: &Counter) -> String {
    counter.total_rows().map_or_else(
        || format!("row {}", counter.current_row),
        |total| format!("row {}/{total}", counter.current_row),
    )
}

/// Writes one `project list` line.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn project_line(out: &mut dyn Write, project: &Project, now: DateTime<Utc>) -> io::Result<()> {
    let progress = project.progress();
    let running = if project.timer.is_running() {
        " (timer running)"
    } else {
        ""
    };
    writeln!(
        out,
        "{}  {}  {}/{} counters done  {}{running}",
        project.id.short(),
        project.name,
        progress.completed,
        progress.total,
        format_elapsed(project.timer.elapsed_ms(now)),
    )
}

/// Writes one counter line, marking the active counter with `*`.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn counter_line(
    out: &mut dyn Write,
    project: &Project,
    position: usize,
    counter: &Counter,
) -> io::Result<()> {
    let marker = if is_active(project, &counter.id) {
        '*'
    } else {
        ' '
    };
    let done = if counter.completed { "  [done]" } else { "" };
    writeln!(
        out,
        "{marker} {position}. {}  {}  {}  {} sts  ({}){done}",
        counter.name,
        counter.mode,
        row_label(counter),
        counter.current_stitches(),
        counter.id.short(),
    )
}

/// Writes the full project page.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn project_page(out: &mut dyn Write, project: &Project, now: DateTime<Utc>) -> io::Result<()> {
    writeln!(out, "{} ({})", project.name, project.id)?;
    for (label, value) in [
        ("Yarn", &project.yarn),
        ("Pattern", &project.pattern_link),
        ("Notes", &project.notes),
    ] {
        if !value.is_empty() {
            writeln!(out, "{label}: {value}")?;
        }
    }
    writeln!(
        out,
        "Time: {}",
        format_elapsed(project.timer.elapsed_ms(now))
    )?;

    let progress = project.progress();
    writeln!(
        out,
        "Counters: {}/{} done",
        progress.completed, progress.total
    )?;
    for (index, counter) in project.counters.iter().enumerate() {
        counter_line(out, project, index + 1, counter)?;
    }
    Ok(())
}

/// The knitter's cue for the current row, if it changes the stitch count.
#[must_use]
pub fn adjustment_cue(counter: &Counter) -> Option<&'static str> {
    if counter.completed || !counter.is_adjustment_row() {
        return None;
    }
    match counter.mode {
        Mode::Increase => Some("Increase on this row"),
        Mode::Decrease => Some("Decrease on this row"),
        Mode::Constant => None,
    }
}

/// Writes the working view of a counter.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn counter_status(out: &mut dyn Write, counter: &Counter) -> io::Result<()> {
    let status = counter.status();
    writeln!(out, "{} ({})", counter.name, counter.mode)?;
    match status.total_rows {
        Some(total) => writeln!(out, "Row: {} of {total}", status.current_row)?,
        None => writeln!(out, "Row: {}", status.current_row)?,
    }
    if counter.mode.is_shaping() {
        writeln!(
            out,
            "Pattern row: {} of {}",
            status.pattern_row, status.freq
        )?;
    }
    writeln!(out, "Stitches: {}", status.current_stitches)?;
    if let Some(cue) = adjustment_cue(counter) {
        writeln!(out, ">> {cue}")?;
    }
    if status.completed {
        writeln!(out, "Completed")?;
    }
    Ok(())
}

/// Writes each field error on its own line.
///
/// # Errors
///
/// Returns an error if the write fails.
pub fn validation(out: &mut dyn Write, result: &ValidationResult) -> io::Result<()> {
    if result.is_valid() {
        return writeln!(out, "valid");
    }
    for (field, message) in result.errors() {
        writeln!(out, "{field}: {message}")?;
    }
    Ok(())
}
