//! `row` command handlers.
//!
//! Row commands work on the project's active counter. Naming a counter
//! with `--counter` makes it active first.

use knitrow_core::{Counter, Project, ProjectError};
use tracing::{info, warn};

use super::Context;
use crate::cli::args::{OutputFormat, RowArgs, RowResetArgs, RowStatusArgs};
use crate::cli::{render, resolve};
use crate::error::{CommandError, KnitrowError};

fn focus(project: &Project, reference: Option<&str>) -> Result<Project, KnitrowError> {
    match reference {
        Some(reference) => {
            let counter = resolve::counter(project, reference)?;
            Ok(project.set_active_counter(&counter.id)?)
        }
        None => Ok(project.clone()),
    }
}

fn active(project: &Project) -> Result<&Counter, KnitrowError> {
    project
        .active_counter()
        .ok_or(KnitrowError::Project(ProjectError::NoActiveCounter))
}

/// Execute `row done`: mark the current row finished.
///
/// # Errors
///
/// Returns [`ProjectError::CounterCompleted`] if the counter is already
/// finished, [`ProjectError::NoActiveCounter`] if the project has no
/// counter to work on, or a lookup/store error.
pub fn done(args: &RowArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let project = ctx.update_project(&args.project, |project| {
        let focused = focus(project, args.counter.as_deref())?;
        match focused.advance_active() {
            Err(err @ ProjectError::CounterCompleted { .. }) => {
                warn!(project = %project.id, %err, "row refused");
                Err(err.into())
            }
            other => Ok(other?),
        }
    })?;
    let counter = active(&project)?;

    info!(
        project = %project.id,
        counter = %counter.id,
        row = counter.current_row,
        completed = counter.completed,
        "row done"
    );
    if counter.completed {
        let progress = project.progress();
        writeln!(
            ctx.out,
            "Row {} done. {} is complete ({}/{} counters done).",
            counter.current_row, counter.name, progress.completed, progress.total
        )?;
    } else {
        writeln!(ctx.out, "Row {} done.", counter.current_row - 1)?;
        render::counter_status(ctx.out, counter)?;
    }
    Ok(())
}

/// Execute `row complete`: finish the counter where it stands.
///
/// # Errors
///
/// Returns [`ProjectError::NoActiveCounter`] if the project has no
/// counter to work on, or a lookup/store error.
pub fn complete(args: &RowArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let project = ctx.update_project(&args.project, |project| {
        Ok(focus(project, args.counter.as_deref())?.complete_active()?)
    })?;
    let counter = active(&project)?;

    info!(project = %project.id, counter = %counter.id, row = counter.current_row, "counter completed");
    writeln!(
        ctx.out,
        "{} marked complete at row {}.",
        counter.name, counter.current_row
    )?;
    Ok(())
}

/// Execute `row reset`: go back to row 1.
///
/// # Errors
///
/// Returns [`CommandError::Unconfirmed`] without `--yes`,
/// [`ProjectError::NoActiveCounter`] if the project has no counter to work
/// on, or a lookup/store error.
pub fn reset(args: &RowResetArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    if !args.yes {
        warn!(project = %args.target.project, "reset refused without confirmation");
        return Err(CommandError::Unconfirmed {
            action: "resetting a counter",
        }
        .into());
    }

    let project = ctx.update_project(&args.target.project, |project| {
        Ok(focus(project, args.target.counter.as_deref())?.reset_active()?)
    })?;
    let counter = active(&project)?;

    info!(project = %project.id, counter = %counter.id, "counter reset");
    writeln!(ctx.out, "{} is back on row 1.", counter.name)?;
    Ok(())
}

/// Execute `row status`. Does not change the active counter.
///
/// # Errors
///
/// Returns [`ProjectError::NoActiveCounter`] if the project has no
/// counter to show, or a lookup/store error.
pub fn status(args: &RowStatusArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let project = ctx.project(&args.target.project)?;
    let counter = resolve::target(&project, args.target.counter.as_deref())?
        .ok_or(ProjectError::NoActiveCounter)?;

    match ctx.format(args.format) {
        OutputFormat::Human => render::counter_status(ctx.out, counter)?,
        OutputFormat::Json => render::json(ctx.out, &render::CounterView::of(&project, counter))?,
    }
    Ok(())
}
