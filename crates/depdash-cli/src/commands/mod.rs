//! Command implementations.

mod file;
mod folder;

pub use file::FileCommand;
pub use folder::FolderCommand;

use anyhow::{Context, Result};
use console::{StyledObject, style};
use depdash::Severity;
use std::path::Path;
use tokio::fs;

use crate::cli::{Cli, Command};
use crate::config::{self, CliOverrides};

/// Load configuration for the selected command and run it.
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Command::File(args) => {
            let overrides = CliOverrides::from_args(&args.analysis, None, cli.verbose);
            let config = config::load(&overrides, cli.config.as_deref())?;
            FileCommand::new(args, config, cli.quiet).run().await
        }
        Command::Folder(args) => {
            let overrides = CliOverrides::from_args(&args.analysis, args.top, cli.verbose);
            let config = config::load(&overrides, cli.config.as_deref())?;
            FolderCommand::new(args, config, cli.quiet).run().await
        }
    }
}

/// Write a serialized report, creating parent directories as needed.
async fn write_json(path: &Path, json: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, json.into_bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "{} Wrote report JSON to {}",
        style("✔").green().bold(),
        style(path.display()).bold()
    );
    Ok(())
}

fn severity_style(severity: Severity) -> StyledObject<Severity> {
    match severity {
        Severity::Critical => style(severity).red().bold(),
        Severity::Warning => style(severity).yellow(),
        Severity::Info => style(severity).dim(),
    }
}

fn print_cycles(report: &depdash::CircularReport) {
    if report.is_empty() {
        println!("  Circular dependencies: {}", style("none").green());
        return;
    }

    println!(
        "  Circular dependencies: {} ({} critical, {} warning, {} info)",
        style(report.total_circular_dependencies).red().bold(),
        report.critical,
        report.warnings,
        report.info
    );
    for cycle in &report.circular_dependencies {
        println!("    [{}] {}", severity_style(cycle.severity), cycle.description);
    }
}
