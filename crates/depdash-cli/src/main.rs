//! depdash CLI - module dependency dashboard.
//!
//! Parses arguments, initializes logging, and dispatches to the command.

use clap::Parser;
use depdash_cli::{cli, commands, logger};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    if args.no_color || !logger::should_use_colors() {
        console::set_colors_enabled(false);
    }

    commands::execute(args).await
}
