//! `project` command handlers.

use knitrow_core::Project;
use tracing::{info, warn};

use super::Context;
use crate::cli::args::{
    ConfirmArgs, FormatArgs, OutputFormat, ProjectDeleteArgs, ProjectNewArgs, ProjectShowArgs,
};
use crate::cli::{render, resolve};
use crate::error::{CommandError, KnitrowError};

/// Execute `project new`.
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub fn new(args: &ProjectNewArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let project = Project {
        yarn: args.yarn.trim().to_string(),
        notes: args.notes.trim().to_string(),
        pattern_link: args.pattern_link.trim().to_string(),
        ..Project::new(args.name.trim(), ctx.now)
    };

    let mut library = ctx.store.load()?;
    library.upsert(project.clone());
    ctx.store.save(&library)?;

    info!(project = %project.id, name = %project.name, "project created");
    writeln!(ctx.out, "Created project {} ({})", project.name, project.id.short())?;
    Ok(())
}

/// Execute `project list`.
///
/// # Errors
///
/// Returns an error if the store cannot be read or output fails.
pub fn list(args: &FormatArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let library = ctx.store.load()?;
    match ctx.format(args.format) {
        OutputFormat::Human => {
            if library.projects.is_empty() {
                writeln!(ctx.out, "No projects yet. Create one with `knitrow project new`.")?;
            }
            for project in &library.projects {
                render::project_line(ctx.out, project, ctx.now)?;
            }
        }
        OutputFormat::Json => {
            let summaries: Vec<_> = library
                .projects
                .iter()
                .map(|project| render::ProjectSummary::of(project, ctx.now))
                .collect();
            render::json(ctx.out, &summaries)?;
        }
    }
    Ok(())
}

/// Execute `project show`.
///
/// # Errors
///
/// Returns an error if the project cannot be found or output fails.
pub fn show(args: &ProjectShowArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let project = ctx.project(&args.project)?;
    match ctx.format(args.format) {
        OutputFormat::Human => render::project_page(ctx.out, &project, ctx.now)?,
        OutputFormat::Json => render::json(ctx.out, &render::ProjectView::of(&project, ctx.now))?,
    }
    Ok(())
}

/// Execute `project delete`.
///
/// # Errors
///
/// Returns an error without `--yes`, if the project cannot be found, or
/// if the store fails.
pub fn delete(args: &ProjectDeleteArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let mut library = ctx.store.load()?;
    let project = resolve::project(&library.projects, &args.project)?.clone();
    if !args.yes {
        warn!(project = %project.id, "delete refused without confirmation");
        return Err(CommandError::Unconfirmed {
            action: "deleting a project",
        }
        .into());
    }

    library.remove(&project.id);
    ctx.store.save(&library)?;

    info!(project = %project.id, "project deleted");
    writeln!(ctx.out, "Deleted project {}", project.name)?;
    Ok(())
}

/// Execute `project clear`.
///
/// # Errors
///
/// Returns an error without `--yes` or if the store fails.
pub fn clear(args: &ConfirmArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    if !args.yes {
        warn!("clear refused without confirmation");
        return Err(CommandError::Unconfirmed {
            action: "clearing the store",
        }
        .into());
    }

    let count = ctx.store.load()?.projects.len();
    ctx.store.clear()?;

    info!(count, "store cleared");
    writeln!(ctx.out, "Deleted {count} project(s)")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::commands::testing::run;
    use crate::error::{ExitCode, KnitrowError};
    use crate::store::{MemoryStore, ProjectStore};

    #[test]
    fn test_new_and_list() {
        let store = MemoryStore::default();
        let out = run(&store, &["project", "new", "  Hat  ", "--yarn", "Merino"]).unwrap();
        assert!(out.starts_with("Created project Hat ("));

        let project = &store.load().unwrap().projects[0];
        assert_eq!(project.name, "Hat");
        assert_eq!(project.yarn, "Merino");

        let listing = run(&store, &["project", "list"]).unwrap();
        assert!(listing.contains("Hat  0/0 counters done  0:00"));
    }

    #[test]
    fn test_list_empty() {
        let out = run(&MemoryStore::default(), &["project", "list"]).unwrap();
        assert!(out.starts_with("No projects yet"));
    }

    #[test]
    fn test_list_json() {
        let store = MemoryStore::default();
        run(&store, &["project", "new", "Hat"]).unwrap();
        let out = run(&store, &["project", "list", "--format", "json"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["name"], "Hat");
        assert_eq!(value[0]["timerRunning"], false);
    }

    #[test]
    fn test_show_by_prefix() {
        let store = MemoryStore::default();
        run(&store, &["project", "new", "Hat", "--notes", "for Sam"]).unwrap();
        let id = store.load().unwrap().projects[0].id.short().to_string();
        let out = run(&store, &["project", "show", &id]).unwrap();
        assert!(out.starts_with("Hat ("));
        assert!(out.contains("Notes: for Sam"));
        assert!(out.contains("Counters: 0/0 done"));
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let store = MemoryStore::default();
        run(&store, &["project", "new", "Hat"]).unwrap();

        let err: KnitrowError = run(&store, &["project", "delete", "Hat"]).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::USAGE_ERROR);
        assert_eq!(store.snapshot().projects.len(), 1);

        run(&store, &["project", "delete", "Hat", "--yes"]).unwrap();
        assert!(store.snapshot().projects.is_empty());
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::default();
        run(&store, &["project", "new", "Hat"]).unwrap();
        run(&store, &["project", "new", "Scarf"]).unwrap();
        assert!(run(&store, &["project", "clear"]).is_err());
        let out = run(&store, &["project", "clear", "--yes"]).unwrap();
        assert_eq!(out, "Deleted 2 project(s)\n");
        assert!(store.snapshot().projects.is_empty());
    }

    #[test]
    fn test_unknown_project() {
        let err = run(&MemoryStore::default(), &["project", "show", "Nope"]).unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::USAGE_ERROR);
    }
}
