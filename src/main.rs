//! `knitrow` - row and stitch counter for multi-phase knitting patterns

use chrono::Utc;
use clap::Parser;

use knitrow::cli::args::Cli;
use knitrow::cli::commands::{self, Context};
use knitrow::config::{Overrides, Settings};
use knitrow::error::{ExitCode, KnitrowError};
use knitrow::observability::init_logging;
use knitrow::store::JsonFileStore;

fn main() {
    let cli = Cli::parse();

    let overrides = Overrides {
        store_path: cli.store.clone(),
        log_format: cli.log_format,
    };
    let settings = match Settings::resolve(cli.config.as_deref(), overrides) {
        Ok(settings) => settings,
        Err(e) => {
            let e = KnitrowError::from(e);
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    };

    if !cli.quiet {
        init_logging(settings.log_format, cli.verbose, cli.color);
    }
    tracing::debug!(store = %settings.store_path.display(), "settings resolved");

    let store = JsonFileStore::new(&settings.store_path);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut ctx = Context {
        store: &store,
        out: &mut out,
        now: Utc::now(),
        default_format: settings.default_format,
    };

    let result = commands::execute(cli.command, &mut ctx);

    match result {
        Ok(()) => std::process::exit(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}
