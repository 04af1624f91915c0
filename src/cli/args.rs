//! CLI argument definitions using clap
//!
//! Commands:
//! - tutorlog init --config <path>
//! - tutorlog serve --config <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// tutorlog - a small REST API for recording tutoring sessions
#[derive(Parser, Debug)]
#[command(name = "tutorlog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the database: drop and recreate all tables, indexes and sample data
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./tutorlog.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./tutorlog.json")]
        config: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_default_config_path() {
        let cli = Cli::try_parse_from(["tutorlog", "init"]).unwrap();
        match cli.command {
            Command::Init { config } => assert_eq!(config, PathBuf::from("./tutorlog.json")),
            _ => panic!("expected init command"),
        }
    }

    #[test]
    fn test_serve_custom_config_path() {
        let cli = Cli::try_parse_from(["tutorlog", "serve", "--config", "/etc/tl.json"]).unwrap();
        match cli.command {
            Command::Serve { config } => assert_eq!(config, PathBuf::from("/etc/tl.json")),
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn test_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["tutorlog"]).is_err());
    }
}
