//! `counter` command handlers.

use knitrow_core::counter::{self, CounterInput, FieldValue};
use knitrow_core::CreateError;
use tracing::{info, warn};

use super::Context;
use crate::cli::args::{
    CounterAddArgs, CounterListArgs, CounterParams, CounterRefArgs, CounterValidateArgs,
    OutputFormat,
};
use crate::cli::{render, resolve};
use crate::error::{CommandError, KnitrowError};

/// Builds the engine payload from command-line text.
fn input(mode: Option<&str>, params: &CounterParams) -> CounterInput {
    let text = |value: &Option<String>| value.as_deref().map(FieldValue::from);
    CounterInput {
        name: params.name.clone(),
        mode: mode.map(str::to_string),
        start_stitches: text(&params.start_stitches),
        end_stitches: text(&params.end_stitches),
        freq: text(&params.freq),
        total_rows: text(&params.total_rows),
    }
}

/// Execute `counter add`.
///
/// # Errors
///
/// Returns [`CommandError::InvalidCounter`] listing every rejected field,
/// or an error if the project cannot be found or the store fails.
pub fn add(args: &CounterAddArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let payload = input(Some(args.mode.as_str()), &args.params);
    let counter = counter::create(&payload).map_err(|CreateError::Invalid(result)| {
        warn!(%result, "counter rejected");
        CommandError::InvalidCounter(result)
    })?;

    let project = ctx.update_project(&args.project, |project| {
        let next = project.add_counter(counter.clone());
        Ok(if args.select {
            next.set_active_counter(&counter.id)?
        } else {
            next
        })
    })?;

    info!(
        project = %project.id,
        counter = %counter.id,
        mode = %counter.mode,
        total_rows = ?counter.total_rows(),
        "counter added"
    );
    writeln!(
        ctx.out,
        "Added {} ({}) to {} as counter {}",
        counter.name,
        counter.id.short(),
        project.name,
        project.counters.len()
    )?;
    if project.active_counter_id.as_ref() == Some(&counter.id) {
        writeln!(ctx.out, "It is now the active counter.")?;
    }
    Ok(())
}

/// Execute `counter validate`: a dry run of `counter add`.
///
/// # Errors
///
/// Returns [`CommandError::InvalidCounter`] when any field is rejected,
/// after printing the result.
pub fn validate(args: &CounterValidateArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let result = counter::validate(&input(args.mode.as_deref(), &args.params));
    match ctx.format(args.format) {
        OutputFormat::Human => render::validation(ctx.out, &result)?,
        OutputFormat::Json => render::json(ctx.out, &result)?,
    }
    if result.is_valid() {
        Ok(())
    } else {
        Err(CommandError::InvalidCounter(result).into())
    }
}

/// Execute `counter list`.
///
/// # Errors
///
/// Returns an error if the project cannot be found or output fails.
pub fn list(args: &CounterListArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let project = ctx.project(&args.project)?;
    match ctx.format(args.format) {
        OutputFormat::Human => {
            if project.counters.is_empty() {
                writeln!(ctx.out, "{} has no counters yet.", project.name)?;
            }
            for (index, counter) in project.counters.iter().enumerate() {
                render::counter_line(ctx.out, &project, index + 1, counter)?;
            }
        }
        OutputFormat::Json => {
            let views: Vec<_> = project
                .counters
                .iter()
                .map(|counter| render::CounterView::of(&project, counter))
                .collect();
            render::json(ctx.out, &views)?;
        }
    }
    Ok(())
}

/// Execute `counter select`.
///
/// # Errors
///
/// Returns an error if the project or counter cannot be found or the
/// store fails.
pub fn select(args: &CounterRefArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let mut name = String::new();
    let project = ctx.update_project(&args.project, |project| {
        let counter = resolve::counter(project, &args.counter)?;
        name.clone_from(&counter.name);
        Ok(project.set_active_counter(&counter.id)?)
    })?;

    info!(project = %project.id, counter = ?project.active_counter_id, "counter selected");
    writeln!(ctx.out, "Active counter: {name}")?;
    Ok(())
}

/// Execute `counter delete`.
///
/// # Errors
///
/// Returns an error if the project or counter cannot be found or the
/// store fails.
pub fn delete(args: &CounterRefArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let mut name = String::new();
    let project = ctx.update_project(&args.project, |project| {
        let counter = resolve::counter(project, &args.counter)?;
        name.clone_from(&counter.name);
        Ok(project.delete_counter(&counter.id)?)
    })?;

    info!(project = %project.id, "counter deleted");
    writeln!(ctx.out, "Deleted counter {name}")?;
    match project.active_counter() {
        Some(active) => writeln!(ctx.out, "Active counter: {}", active.name)?,
        None => writeln!(ctx.out, "{} has no counters left.", project.name)?,
    }
    Ok(())
}
