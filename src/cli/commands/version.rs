//! Version information display
//!
//! Prints version metadata in human or JSON format.

use serde_json::json;

use super::Context;
use crate::cli::args::{OutputFormat, VersionArgs};
use crate::error::KnitrowError;
use crate::store::LIBRARY_VERSION;

/// Print version information.
///
/// # Errors
///
/// Returns an error if output fails.
pub fn run(args: &VersionArgs, ctx: &mut Context<'_>) -> Result<(), KnitrowError> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => {
            writeln!(ctx.out, "{name} {version}")?;
        }
        OutputFormat::Json => {
            let info = json!({
                "name": name,
                "version": version,
                "storeVersion": LIBRARY_VERSION,
            });
            writeln!(ctx.out, "{info}")?;
        }
    }
    Ok(())
}
