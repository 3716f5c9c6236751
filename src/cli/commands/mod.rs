//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler. Every
//! handler loads the library from the store, applies engine operations,
//! and saves the result back when something changed.

pub mod completions;
pub mod counter;
pub mod project;
pub mod row;
pub mod timer;
pub mod version;

use std::io::Write;

use chrono::{DateTime, Utc};
use knitrow_core::Project;

use crate::cli::args::{
    Commands, CounterSubcommand, OutputFormat, ProjectSubcommand, RowSubcommand, TimerSubcommand,
};
use crate::cli::resolve;
use crate::error::KnitrowError;
use crate::store::ProjectStore;

/// Everything a command handler needs from the outside world.
pub struct Context<'a> {
    /// Where projects are loaded from and saved to
    pub store: &'a dyn ProjectStore,
    /// Command output
    pub out: &'a mut dyn Write,
    /// Time of the invocation, used for timestamps and the timer
    pub now: DateTime<Utc>,
    /// Output format when a command is not given `--format`
    pub default_format: OutputFormat,
}

impl Context<'_> {
    /// Picks the requested output format or the configured default.
    #[must_use]
    pub fn format(&self, requested: Option<OutputFormat>) -> OutputFormat {
        requested.unwrap_or(self.default_format)
    }

    /// Loads a single project by reference.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or the reference does
    /// not resolve.
    pub fn project(&self, reference: &str) -> Result<Project, KnitrowError> {
        let library = self.store.load()?;
        Ok(resolve::project(&library.projects, reference)?.clone())
    }

    /// Applies `f` to a project and saves the result with a fresh
    /// modification time.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails, the reference does not
    /// resolve, or `f` fails. Nothing is saved when `f` fails.
    pub fn update_project<F>(&self, reference: &str, f: F) -> Result<Project, KnitrowError>
    where
        F: FnOnce(&Project) -> Result<Project, KnitrowError>,
    {
        let mut library = self.store.load()?;
        let current = resolve::project(&library.projects, reference)?;
        let updated = f(current)?.normalized().touch(self.now);
        library.upsert(updated.clone());
        self.store.save(&library)?;
        Ok(updated)
    }
}

/// Dispatch a parsed command to the appropriate handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(command: Commands, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    match command {
        Commands::Project(cmd) => match cmd.subcommand {
            ProjectSubcommand::New(args) => project::new(&args, ctx),
            ProjectSubcommand::List(args) => project::list(&args, ctx),
            ProjectSubcommand::Show(args) => project::show(&args, ctx),
            ProjectSubcommand::Delete(args) => project::delete(&args, ctx),
            ProjectSubcommand::Clear(args) => project::clear(&args, ctx),
        },
        Commands::Counter(cmd) => match cmd.subcommand {
            CounterSubcommand::Add(args) => counter::add(&args, ctx),
            CounterSubcommand::Validate(args) => counter::validate(&args, ctx),
            CounterSubcommand::List(args) => counter::list(&args, ctx),
            CounterSubcommand::Select(args) => counter::select(&args, ctx),
            CounterSubcommand::Delete(args) => counter::delete(&args, ctx),
        },
        Commands::Row(cmd) => match cmd.subcommand {
            RowSubcommand::Done(args) => row::done(&args, ctx),
            RowSubcommand::Complete(args) => row::complete(&args, ctx),
            RowSubcommand::Reset(args) => row::reset(&args, ctx),
            RowSubcommand::Status(args) => row::status(&args, ctx),
        },
        Commands::Timer(cmd) => match cmd.subcommand {
            TimerSubcommand::Toggle(args) => timer::toggle(&args, ctx),
            TimerSubcommand::Reset(args) => timer::reset(&args, ctx),
            TimerSubcommand::Show(args) => timer::show(&args, ctx),
        },
        Commands::Completions(args) => completions::run(&args, ctx),
        Commands::Version(args) => version::run(&args, ctx),
    }
}

/// Dispatch a command, then flush its output.
///
/// # Errors
///
/// Returns the handler's error, or [`KnitrowError::Io`] if the output
/// cannot be flushed.
pub fn execute(command: Commands, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    dispatch(command, ctx)?;
    ctx.out.flush()?;
    Ok(())
}
