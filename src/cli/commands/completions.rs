//! Shell completion generation
//!
//! Generates shell completion scripts for supported shells.

use clap::CommandFactory;
use clap_complete::Shell as ClapShell;

use super::Context;
use crate::cli::args::{Cli, CompletionsArgs, Shell};
use crate::error::KnitrowError;

/// Generate a completion script for the requested shell.
///
/// # Errors
///
/// Returns an error if the script cannot be written.
pub fn run(args: &CompletionsArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let shell = match args.shell {
        Shell::Bash => ClapShell::Bash,
        Shell::Zsh => ClapShell::Zsh,
        Shell::Fish => ClapShell::Fish,
        Shell::PowerShell => ClapShell::PowerShell,
        Shell::Elvish => ClapShell::Elvish,
    };

    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "knitrow", &mut *ctx.out);
    Ok(())
}
