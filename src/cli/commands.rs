//! CLI command implementations
//!
//! `init` rebuilds the database from scratch (tables, indexes, sample
//! rows) and is safe to re-run. `serve` opens the database, creates any
//! missing tables, and blocks on the HTTP server.

use std::path::Path;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::config::ServerConfig;
use crate::api::server;
use crate::db::Store;

use super::args::{Cli, Command};
use super::errors::CliResult;

/// Parse arguments and dispatch to the selected command.
pub fn run() -> CliResult<()> {
    init_logging();

    let cli = Cli::parse_args();
    match cli.command {
        Command::Init { config } => init(&config),
        Command::Serve { config } => serve(&config),
    }
}

/// (Re)initialize the database file named by the config.
pub fn init(config_path: &Path) -> CliResult<()> {
    let config = ServerConfig::load(config_path)?;

    let store = Store::open(Path::new(&config.db_path))?;
    store.init_schema()?;

    info!(db_path = %config.db_path, "database initialized with sample data and indexes");
    println!("Database initialized at {}", config.db_path);
    Ok(())
}

/// Start the HTTP server and block until terminated.
pub fn serve(config_path: &Path) -> CliResult<()> {
    let config = ServerConfig::load(config_path)?;

    let store = Store::open(Path::new(&config.db_path))?;
    store.ensure_schema()?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(server::serve(&config, store))?;

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // Ignore the error when a test harness already installed a subscriber.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_with_db(dir: &TempDir) -> std::path::PathBuf {
        let db_path = dir.path().join("tutoring.db");
        let config_path = dir.path().join("tutorlog.json");
        std::fs::write(
            &config_path,
            format!(r#"{{"db_path": "{}"}}"#, db_path.display()),
        )
        .unwrap();
        config_path
    }

    #[test]
    fn test_init_creates_database_file() {
        let dir = TempDir::new().unwrap();
        let config_path = config_with_db(&dir);

        init(&config_path).unwrap();

        let config = ServerConfig::load(&config_path).unwrap();
        assert!(Path::new(&config.db_path).exists());

        let store = Store::open(Path::new(&config.db_path)).unwrap();
        let tutors = store.list_tutors().unwrap();
        assert_eq!(tutors.len(), 1);
        assert_eq!(tutors[0].name, "Alice Smith");
    }

    #[test]
    fn test_init_twice_resets_data() {
        let dir = TempDir::new().unwrap();
        let config_path = config_with_db(&dir);

        init(&config_path).unwrap();
        let config = ServerConfig::load(&config_path).unwrap();
        {
            let store = Store::open(Path::new(&config.db_path)).unwrap();
            store.insert_tutor("Extra Tutor").unwrap();
        }

        init(&config_path).unwrap();
        let store = Store::open(Path::new(&config.db_path)).unwrap();
        assert_eq!(store.list_tutors().unwrap().len(), 1);
    }
}
