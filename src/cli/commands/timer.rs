//! `timer` command handlers.

use knitrow_core::format_elapsed;
use tracing::{info, warn};

use super::Context;
use crate::cli::args::{ProjectRefArgs, TimerResetArgs};
use crate::error::{CommandError, KnitrowError};

/// Execute `timer toggle`.
///
/// # Errors
///
/// Returns an error if the project cannot be found or the store fails.
pub fn toggle(args: &ProjectRefArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let now = ctx.now;
    let project = ctx.update_project(&args.project, |project| Ok(project.toggle_timer(now)))?;

    let elapsed = format_elapsed(project.timer.elapsed_ms(now));
    if project.timer.is_running() {
        info!(project = %project.id, "timer started");
        writeln!(ctx.out, "Timer started for {} ({elapsed} so far)", project.name)?;
    } else {
        info!(project = %project.id, total_ms = project.timer.total_time_ms, "timer stopped");
        writeln!(ctx.out, "Timer stopped for {} at {elapsed}", project.name)?;
    }
    Ok(())
}

/// Execute `timer reset`.
///
/// # Errors
///
/// Returns [`CommandError::Unconfirmed`] without `--yes`, or an error if
/// the project cannot be found or the store fails.
pub fn reset(args: &TimerResetArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    if !args.yes {
        warn!(project = %args.project, "timer reset refused without confirmation");
        return Err(CommandError::Unconfirmed {
            action: "resetting the timer",
        }
        .into());
    }

    let project = ctx.update_project(&args.project, |project| Ok(project.reset_timer()))?;
    info!(project = %project.id, "timer reset");
    writeln!(ctx.out, "Timer reset for {}", project.name)?;
    Ok(())
}

/// Execute `timer show`.
///
/// # Errors
///
/// Returns an error if the project cannot be found or output fails.
pub fn show(args: &ProjectRefArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let project = ctx.project(&args.project)?;
    let elapsed = format_elapsed(project.timer.elapsed_ms(ctx.now));
    let state = if project.timer.is_running() {
        "running"
    } else {
        "stopped"
    };
    writeln!(ctx.out, "{}: {elapsed} ({state})", project.name)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::commands::testing::{at, run, run_at};
    use crate::error::ExitCode;
    use crate::store::MemoryStore;

    #[test]
    fn test_toggle_accumulates() {
        let store = MemoryStore::default();
        run(&store, &["project", "new", "Hat"]).unwrap();

        let out = run_at(&store, at(0), &["timer", "toggle", "Hat"]).unwrap();
        assert_eq!(out, "Timer started for Hat (0:00 so far)\n");

        let out = run_at(&store, at(90), &["timer", "show", "Hat"]).unwrap();
        assert_eq!(out, "Hat: 1:30 (running)\n");

        let out = run_at(&store, at(125), &["timer", "toggle", "Hat"]).unwrap();
        assert_eq!(out, "Timer stopped for Hat at 2:05\n");

        run_at(&store, at(1_000), &["timer", "toggle", "Hat"]).unwrap();
        let out = run_at(&store, at(4_600), &["timer", "show", "Hat"]).unwrap();
        assert_eq!(out, "Hat: 1:02:05 (running)\n");
    }

    #[test]
    fn test_reset_requires_confirmation() {
        let store = MemoryStore::default();
        run(&store, &["project", "new", "Hat"]).unwrap();
        run_at(&store, at(0), &["timer", "toggle", "Hat"]).unwrap();

        let err = run_at(&store, at(60), &["timer", "reset", "Hat"]).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::USAGE_ERROR);

        run_at(&store, at(60), &["timer", "reset", "Hat", "--yes"]).unwrap();
        let timer = store.snapshot().projects[0].timer;
        assert_eq!(timer.total_time_ms, 0);
        assert!(!timer.is_running());
    }
}
