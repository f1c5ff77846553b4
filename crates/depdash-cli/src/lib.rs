//! depdash CLI.
//!
//! Command-line front end for the `depdash` analyzer:
//!
//! - [`cli`] - argument definitions (clap)
//! - [`config`] - layered configuration (figment)
//! - [`logger`] - tracing subscriber setup
//! - [`commands`] - `file` and `folder` command implementations
//!
//! # Example
//!
//! ```rust,no_run
//! use depdash_cli::logger;
//!
//! logger::init_logger(false, false, false);
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod logger;
