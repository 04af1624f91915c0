//! CLI module for tutorlog
//!
//! Provides command-line interface for:
//! - init: (re)create the database schema and sample data
//! - serve: start the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, serve};
pub use errors::{CliError, CliResult};
