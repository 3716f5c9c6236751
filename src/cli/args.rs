//! CLI argument definitions
//!
//! All Clap derive structs for `knitrow` command-line parsing.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use knitrow_core::Mode;
use serde::Deserialize;

use crate::observability::LogFormat;

// ============================================================================
// Root CLI
// ============================================================================

/// Row and stitch counter for multi-phase knitting patterns.
#[derive(Parser, Debug)]
#[command(name = "knitrow", author, version, about)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output control.
    #[arg(long, default_value = "auto", global = true, env = "KNITROW_COLOR")]
    pub color: ColorChoice,

    /// Log output format.
    #[arg(long, global = true, env = "KNITROW_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,

    /// Path to the project store (JSON).
    #[arg(long, global = true, env = "KNITROW_STORE")]
    pub store: Option<PathBuf>,

    /// Path to a YAML settings file.
    #[arg(long, global = true, env = "KNITROW_CONFIG")]
    pub config: Option<PathBuf>,
}

// ============================================================================
// Top-Level Commands
// ============================================================================

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create, list, show and delete projects.
    Project(ProjectCommand),

    /// Add, inspect and manage the counters of a project.
    Counter(CounterCommand),

    /// Work rows on a project's counter.
    Row(RowCommand),

    /// Track time spent on a project.
    Timer(TimerCommand),

    /// Generate shell completion scripts.
    Completions(CompletionsArgs),

    /// Display version information.
    Version(VersionArgs),
}

// ============================================================================
// Project Command
// ============================================================================

/// Project management commands.
#[derive(Args, Debug)]
pub struct ProjectCommand {
    /// Project subcommand.
    #[command(subcommand)]
    pub subcommand: ProjectSubcommand,
}

/// Project subcommands.
#[derive(Subcommand, Debug)]
pub enum ProjectSubcommand {
    /// Create a new project.
    New(ProjectNewArgs),

    /// List all projects.
    List(FormatArgs),

    /// Show a project with all of its counters.
    Show(ProjectShowArgs),

    /// Delete a project and its counters.
    Delete(ProjectDeleteArgs),

    /// Delete every project in the store.
    Clear(ConfirmArgs),
}

/// Arguments for `project new`.
#[derive(Args, Debug)]
pub struct ProjectNewArgs {
    /// Project name.
    pub name: String,

    /// Yarn used.
    #[arg(long, default_value = "")]
    pub yarn: String,

    /// Free-form notes.
    #[arg(long, default_value = "")]
    pub notes: String,

    /// Link to the pattern.
    #[arg(long, default_value = "")]
    pub pattern_link: String,
}

/// Arguments for `project show`.
#[derive(Args, Debug)]
pub struct ProjectShowArgs {
    /// Project id, id prefix or name.
    pub project: String,

    /// Output format.
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

/// Arguments for `project delete`.
#[derive(Args, Debug)]
pub struct ProjectDeleteArgs {
    /// Project id, id prefix or name.
    pub project: String,

    /// Confirm deletion.
    #[arg(long)]
    pub yes: bool,
}

/// Arguments carrying only a confirmation flag.
#[derive(Args, Debug)]
pub struct ConfirmArgs {
    /// Confirm the action.
    #[arg(long)]
    pub yes: bool,
}

// ============================================================================
// Counter Command
// ============================================================================

/// Counter management commands.
#[derive(Args, Debug)]
pub struct CounterCommand {
    /// Counter subcommand.
    #[command(subcommand)]
    pub subcommand: CounterSubcommand,
}

/// Counter subcommands.
#[derive(Subcommand, Debug)]
pub enum CounterSubcommand {
    /// Add a counter to the end of a project.
    Add(CounterAddArgs),

    /// Check counter parameters without saving anything.
    Validate(CounterValidateArgs),

    /// List the counters of a project.
    List(CounterListArgs),

    /// Make a counter the active one.
    Select(CounterRefArgs),

    /// Delete a counter.
    Delete(CounterRefArgs),
}

/// Counter parameters shared by `counter add` and `counter validate`.
///
/// Numbers are taken as text and checked by the engine so every problem
/// is reported at once.
#[derive(Args, Debug, Clone)]
pub struct CounterParams {
    /// Stitches on row 1.
    #[arg(long = "start")]
    pub start_stitches: Option<String>,

    /// Target stitches (increase/decrease; omit for open-ended).
    #[arg(long = "end")]
    pub end_stitches: Option<String>,

    /// Rows per increase/decrease cycle.
    #[arg(long)]
    pub freq: Option<String>,

    /// Row target for constant counters (omit for open-ended).
    #[arg(long)]
    pub total_rows: Option<String>,

    /// Counter name (generated from the mode when omitted).
    #[arg(long)]
    pub name: Option<String>,
}

/// Arguments for `counter add`.
#[derive(Args, Debug)]
pub struct CounterAddArgs {
    /// Project id, id prefix or name.
    pub project: String,

    /// Stitch-change mode (case-insensitive).
    #[arg(short, long, ignore_case = true)]
    pub mode: Mode,

    /// Counter parameters.
    #[command(flatten)]
    pub params: CounterParams,

    /// Make the new counter active.
    #[arg(long)]
    pub select: bool,
}

/// Arguments for `counter validate`.
#[derive(Args, Debug)]
pub struct CounterValidateArgs {
    /// Stitch-change mode (increase, decrease, constant).
    #[arg(short, long)]
    pub mode: Option<String>,

    /// Counter parameters.
    #[command(flatten)]
    pub params: CounterParams,

    /// Output format.
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

/// Arguments for `counter list`.
#[derive(Args, Debug)]
pub struct CounterListArgs {
    /// Project id, id prefix or name.
    pub project: String,

    /// Output format.
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

/// Arguments naming one counter of one project.
#[derive(Args, Debug)]
pub struct CounterRefArgs {
    /// Project id, id prefix or name.
    pub project: String,

    /// Counter id, id prefix, 1-based position or name.
    pub counter: String,
}

// ============================================================================
// Row Command
// ============================================================================

/// Row-working commands.
#[derive(Args, Debug)]
pub struct RowCommand {
    /// Row subcommand.
    #[command(subcommand)]
    pub subcommand: RowSubcommand,
}

/// Row subcommands.
#[derive(Subcommand, Debug)]
pub enum RowSubcommand {
    /// Mark the current row done.
    Done(RowArgs),

    /// Mark the counter finished where it stands.
    Complete(RowArgs),

    /// Return the counter to row 1.
    Reset(RowResetArgs),

    /// Show the current row, stitch count and cycle position.
    Status(RowStatusArgs),
}

/// Arguments selecting the counter to work on.
#[derive(Args, Debug)]
pub struct RowArgs {
    /// Project id, id prefix or name.
    pub project: String,

    /// Counter to use instead of the active one; done, complete and reset
    /// also make it active.
    #[arg(short, long)]
    pub counter: Option<String>,
}

/// Arguments for `row reset`.
#[derive(Args, Debug)]
pub struct RowResetArgs {
    /// Counter selection.
    #[command(flatten)]
    pub target: RowArgs,

    /// Confirm the reset.
    #[arg(long)]
    pub yes: bool,
}

/// Arguments for `row status`.
#[derive(Args, Debug)]
pub struct RowStatusArgs {
    /// Counter selection.
    #[command(flatten)]
    pub target: RowArgs,

    /// Output format.
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

// ============================================================================
// Timer Command
// ============================================================================

/// Timer commands.
#[derive(Args, Debug)]
pub struct TimerCommand {
    /// Timer subcommand.
    #[command(subcommand)]
    pub subcommand: TimerSubcommand,
}

/// Timer subcommands.
#[derive(Subcommand, Debug)]
pub enum TimerSubcommand {
    /// Start the timer, or stop it if running.
    Toggle(ProjectRefArgs),

    /// Zero and stop the timer.
    Reset(TimerResetArgs),

    /// Show time spent.
    Show(ProjectRefArgs),
}

/// Arguments naming a project.
#[derive(Args, Debug)]
pub struct ProjectRefArgs {
    /// Project id, id prefix or name.
    pub project: String,
}

/// Arguments for `timer reset`.
#[derive(Args, Debug)]
pub struct TimerResetArgs {
    /// Project id, id prefix or name.
    pub project: String,

    /// Confirm the reset.
    #[arg(long)]
    pub yes: bool,
}

// ============================================================================
// Utility Commands
// ============================================================================

/// Arguments carrying only an output format.
#[derive(Args, Debug)]
pub struct FormatArgs {
    /// Output format.
    #[arg(short, long)]
    pub format: Option<OutputFormat>,
}

/// Arguments for `completions`.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell.
    pub shell: Shell,
}

/// Arguments for `version`.
#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output format.
    #[arg(short, long, default_value = "human")]
    pub format: OutputFormat,
}

// ============================================================================
// Value Enums
// ============================================================================

/// Color output control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect from the terminal and `NO_COLOR`.
    #[default]
    Auto,
    /// Always emit ANSI colors.
    Always,
    /// Never emit ANSI colors.
    Never,
}

/// Command output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Human,
    /// JSON.
    Json,
}

/// Shells supported by `completions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bourne Again Shell
    Bash,
    /// Z Shell
    Zsh,
    /// Fish
    Fish,
    /// `PowerShell`
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish
    Elvish,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_counter_add() {
        let cli = Cli::try_parse_from([
            "knitrow", "counter", "add", "Sweater", "--mode", "increase", "--start", "60", "--end",
            "72", "--freq", "6",
        ])
        .unwrap();
        let Commands::Counter(CounterCommand {
            subcommand: CounterSubcommand::Add(args),
        }) = cli.command
        else {
            panic!("expected counter add");
        };
        assert_eq!(args.mode, Mode::Increase);
        assert_eq!(args.params.start_stitches.as_deref(), Some("60"));
        assert_eq!(args.params.end_stitches.as_deref(), Some("72"));
        assert!(!args.select);
    }

    #[test]
    fn test_parse_row_done_with_counter() {
        let cli = Cli::try_parse_from(["knitrow", "-vv", "row", "done", "Hat", "-c", "2"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Row(RowCommand {
            subcommand: RowSubcommand::Done(args),
        }) = cli.command
        else {
            panic!("expected row done");
        };
        assert_eq!(args.project, "Hat");
        assert_eq!(args.counter.as_deref(), Some("2"));
    }

    #[test]
    fn test_unknown_mode_rejected_by_add() {
        let result = Cli::try_parse_from([
            "knitrow", "counter", "add", "Hat", "--mode", "sideways", "--start", "10",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_add_mode_ignores_case() {
        for spelling in ["Increase", "INCREASE", "increase"] {
            let cli = Cli::try_parse_from([
                "knitrow", "counter", "add", "Hat", "--mode", spelling, "--start", "60",
            ])
            .unwrap();
            let Commands::Counter(CounterCommand {
                subcommand: CounterSubcommand::Add(args),
            }) = cli.command
            else {
                panic!("expected counter add");
            };
            assert_eq!(args.mode, Mode::Increase);
        }
    }

    #[test]
    fn test_global_store_flag() {
        let cli =
            Cli::try_parse_from(["knitrow", "project", "list", "--store", "/tmp/k.json"]).unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/k.json")));
    }
}
