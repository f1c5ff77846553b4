use anyhow::{Context, Result};
use console::style;
use depdash::report::{FileMetrics, FolderReport};
use depdash::{Analyzer, AnalyzerConfig};
use path_clean::PathClean;

use super::{print_cycles, severity_style, write_json};
use crate::cli::FolderArgs;

/// Entries of each ranking shown in the terminal summary.
const SUMMARY_ROWS: usize = 5;

pub struct FolderCommand {
    args: FolderArgs,
    config: AnalyzerConfig,
    quiet: bool,
}

impl FolderCommand {
    pub fn new(args: FolderArgs, config: AnalyzerConfig, quiet: bool) -> Self {
        Self {
            args,
            config,
            quiet,
        }
    }

    pub async fn run(self) -> Result<()> {
        let cwd = std::env::current_dir().context("Could not determine the current directory")?;
        let folder = cwd.join(&self.args.folder).clean();
        tracing::info!("Scanning folder: {}", folder.display());

        let report = Analyzer::new()
            .config(self.config)
            .root(&folder)
            .analyze_folder()
            .await
            .with_context(|| format!("Failed to analyze {}", folder.display()))?;

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

fn print_summary(report: &FolderReport) {
    println!(
        "{} Analyzed {} files",
        style("✔").green().bold(),
        style(report.total_files).cyan()
    );
    println!(
        "  Dependencies: {} (avg incoming {:.2}, avg outgoing {:.2})",
        report.summary.total_dependencies, report.summary.average_incoming, report.summary.average_outgoing
    );

    print_ranking("Most depended on", &report.metrics.most_depended_on, |f| {
        f.incoming_count.to_string()
    });
    print_ranking("Most dependent", &report.metrics.most_dependent, |f| {
        f.outgoing_count.to_string()
    });
    print_ranking("Highest ratio", &report.metrics.highest_ratio, |f| {
        format!("{:.2}", f.dependency_ratio)
    });

    print_cycles(&report.circular_dependencies);

    let stats = &report.depth_analysis.statistics;
    println!(
        "  Depth: max outgoing {}, max incoming {}, average outgoing {:.2}",
        stats.max_outgoing_depth, stats.max_incoming_depth, stats.average_outgoing_depth
    );
    for warning in &report.depth_analysis.deep_dependency_warnings {
        println!(
            "    [{}] {}: {}",
            severity_style(warning.severity),
            warning.file,
            warning.message
        );
    }
    for recommendation in &report.depth_analysis.recommendations {
        println!(
            "  [{}] {} {}",
            severity_style(recommendation.severity),
            recommendation.message,
            style(&recommendation.suggestion).dim()
        );
    }
}

fn print_ranking<F>(label: &str, files: &[FileMetrics], value: F)
where
    F: Fn(&FileMetrics) -> String,
{
    if files.is_empty() {
        return;
    }
    println!("  {}:", label);
    for file in files.iter().take(SUMMARY_ROWS) {
        println!("    {} ({})", file.file, style(value(file)).bold());
    }
}
