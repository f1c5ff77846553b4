use anyhow::{Context, Result};
use console::style;
use depdash::module_id::normalize_separators;
use depdash::report::SingleFileReport;
use depdash::{Analyzer, AnalyzerConfig, DependencyChain};
use path_clean::PathClean;
use std::path::{Path, PathBuf};

use super::{print_cycles, write_json};
use crate::cli::FileArgs;

pub struct FileCommand {
    args: FileArgs,
    config: AnalyzerConfig,
    quiet: bool,
}

impl FileCommand {
    pub fn new(args: FileArgs, config: AnalyzerConfig, quiet: bool) -> Self {
        Self {
            args,
            config,
            quiet,
        }
    }

    pub async fn run(self) -> Result<()> {
        let cwd = std::env::current_dir().context("Could not determine the current directory")?;
        let folder = cwd.join(&self.args.folder).clean();
        let target = target_in_folder(&cwd, &self.args.file, &folder);

        tracing::info!("Analyzing file: {}", self.args.file.display());
        tracing::info!("Scanning folder: {}", folder.display());
        tracing::info!("Target file (relative to scan folder): {}", target);

        let report = Analyzer::new()
            .config(self.config)
            .root(&folder)
            .analyze_file(&target)
            .await
            .with_context(|| format!("Failed to analyze {} in {}", target, folder.display()))?;

        if !self.quiet {
            print_summary(&report);
        }

        if let Some(path) = &self.args.analysis.json {
            let json = report.to_pretty_json().context("Failed to serialize report")?;
            write_json(path, json).await?;
        }

        Ok(())
    }
}

/// Express `file` relative to the scan folder.
///
/// A file outside the folder is passed through as written, so a bare
/// filename still selects a module by suffix.
fn target_in_folder(cwd: &Path, file: &Path, folder: &Path) -> String {
    let absolute: PathBuf = cwd.join(file).clean();
    let target = match absolute.strip_prefix(folder) {
        Ok(relative) => relative.to_string_lossy().into_owned(),
        Err(_) => file.to_string_lossy().into_owned(),
    };
    normalize_separators(&target)
}

fn print_summary(report: &SingleFileReport) {
    println!(
        "{} Analyzed {} ({} files scanned)",
        style("✔").green().bold(),
        style(&report.target_file).cyan(),
        style(report.total_files).cyan()
    );

    if report.incoming.is_empty() && report.outgoing.is_empty() {
        println!("  No local dependencies found");
        return;
    }

    println!("  Imported by ({}):", style(report.incoming.len()).bold());
    for (importer, details) in &report.incoming {
        println!("    {}  {}", importer, style(details.join("; ")).dim());
    }
    println!("  Imports ({}):", style(report.outgoing.len()).bold());
    for (dependency, details) in &report.outgoing {
        println!("    {}  {}", dependency, style(details.join("; ")).dim());
    }

    print_cycles(&report.circular_dependencies);
    print_chain("Longest outgoing chain", report.dependency_chains.outgoing.first());
    print_chain("Longest incoming chain", report.dependency_chains.incoming.first());
}

fn print_chain(label: &str, chain: Option<&DependencyChain>) {
    if let Some(chain) = chain {
        println!("  {} ({}): {}", label, chain.depth, chain.format_chain());
    }
}
