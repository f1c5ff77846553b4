//! Configuration loading.
//!
//! Sources, lowest priority first:
//!
//! 1. [`AnalyzerConfig::default`]
//! 2. `depdash.config.json` in the current directory, or `--config <path>`
//! 3. `DEPDASH_*` environment variables (`DEPDASH_TOP_N=5`, `DEPDASH_EXTENSIONS=[js,ts]`)
//! 4. Command-line flags

use anyhow::{Context, Result};
use depdash::AnalyzerConfig;
use figment::{
    Figment,
    providers::{Env, Format as _, Json, Serialized},
};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::cli::AnalysisArgs;

/// Default config file name, looked up in the current directory.
pub const CONFIG_FILE: &str = "depdash.config.json";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "DEPDASH_";

/// Values set on the command line. Unset fields leave lower layers untouched.
#[derive(Debug, Default, Serialize)]
pub struct CliOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_chain_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_n: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_hidden: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose: Option<bool>,
    #[serde(skip)]
    pub extra_excluded_dirs: Vec<String>,
}

impl CliOverrides {
    pub fn from_args(args: &AnalysisArgs, top: Option<u64>, verbose: bool) -> Self {
        Self {
            max_chain_length: args.max_chain_length.map(|n| n as usize),
            top_n: top.map(|n| n as usize),
            skip_hidden: args.include_hidden.then_some(false),
            verbose: verbose.then_some(true),
            extra_excluded_dirs: args.exclude.clone(),
        }
    }
}

/// Load the analyzer configuration from every source.
pub fn load(overrides: &CliOverrides, config_path: Option<&Path>) -> Result<AnalyzerConfig> {
    let mut figment = Figment::new().merge(Serialized::defaults(AnalyzerConfig::default()));

    let config_file = match config_path {
        Some(path) => {
            anyhow::ensure!(path.is_file(), "Config file not found: {}", path.display());
            Some(path.to_path_buf())
        }
        None => {
            let default_path = PathBuf::from(CONFIG_FILE);
            default_path.is_file().then_some(default_path)
        }
    };
    if let Some(path) = &config_file {
        tracing::debug!("Loading configuration from {}", path.display());
        figment = figment.merge(Json::file(path));
    }

    figment = figment.merge(Env::prefixed(ENV_PREFIX).ignore(&["verbose"]));
    if verbose_from_env() {
        figment = figment.merge(Serialized::default("verbose", true));
    }

    figment = figment.merge(Serialized::defaults(overrides));

    let mut config: AnalyzerConfig = figment.extract().with_context(|| match &config_file {
        Some(path) => format!(
            "Invalid configuration (check {} and {}* variables)",
            path.display(),
            ENV_PREFIX
        ),
        None => format!("Invalid configuration (check {}* variables)", ENV_PREFIX),
    })?;

    for dir in &overrides.extra_excluded_dirs {
        if !config.excluded_dirs.contains(dir) {
            config.excluded_dirs.push(dir.clone());
        }
    }

    Ok(config)
}

/// `DEPDASH_VERBOSE` or the legacy `VERBOSE`, parsed the way the library does.
fn verbose_from_env() -> bool {
    AnalyzerConfig::from_env().verbose
}
