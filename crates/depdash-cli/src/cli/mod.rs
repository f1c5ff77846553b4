//! Command-line interface definition.
//!
//! # Command Structure
//!
//! - `depdash file <FILE> <FOLDER>` - dependencies of one file within a scan folder
//! - `depdash folder <FOLDER>` - dependency metrics for every file in a folder


use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// depdash - module dependency dashboard for JavaScript/TypeScript
#[derive(Parser, Debug)]
#[command(
    name = "depdash",
    version,
    about = "Analyze module dependencies of JavaScript/TypeScript projects",
    long_about = "depdash scans a folder for JavaScript/TypeScript modules, follows their relative\n\
                  imports and reports circular dependencies, dependency depth and chains,\n\
                  and per-file fan-in/fan-out metrics."
)]
pub struct Cli {
    /// Enable verbose logging (debug level) and structural dumps
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a configuration file (default: ./depdash.config.json if present)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze the dependencies of a single file
    ///
    /// Lists the files importing the target and the files it imports,
    /// together with cycles and the longest chains through it.
    ///
    /// Examples:
    ///   depdash file src/utils/format.ts src
    ///   depdash file format.ts src --json report.json
    File(FileArgs),

    /// Analyze every file under a folder
    ///
    /// Reports per-file metrics, top-N rankings, circular dependencies and
    /// depth statistics for the whole tree.
    Folder(FolderArgs),
}

/// Arguments for the file command
#[derive(Args, Debug)]
pub struct FileArgs {
    /// Target file to analyze, resolved against the current directory
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Folder to scan for dependencies
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Arguments for the folder command
#[derive(Args, Debug)]
pub struct FolderArgs {
    /// Folder to scan for dependencies
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// Number of entries in each ranking
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub top: Option<u64>,

    #[command(flatten)]
    pub analysis: AnalysisArgs,
}

/// Options shared by both commands
#[derive(Args, Debug, Default)]
pub struct AnalysisArgs {
    /// Write the full report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Maximum number of modules in an enumerated dependency chain
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(2..))]
    pub max_chain_length: Option<u64>,

    /// Also scan hidden files and directories
    #[arg(long)]
    pub include_hidden: bool,

    /// Additional directory name to skip (repeatable)
    #[arg(long = "exclude", value_name = "DIR")]
    pub exclude: Vec<String>,
}
