//! Runtime configuration from the environment and command line.

use std::path::PathBuf;

const DB_ENV: &str = "DEUTSCHSPRINT_DB";
const DECKS_ENV: &str = "DEUTSCHSPRINT_DECKS";

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    /// Directory of extra `.md` deck files.
    pub decks_dir: Option<PathBuf>,
}

impl Config {
    /// Command line flags win over environment variables, which win over defaults.
    pub fn resolve(db_flag: Option<PathBuf>, decks_flag: Option<PathBuf>) -> Self {
        let db_path = db_flag
            .or_else(|| std::env::var_os(DB_ENV).map(PathBuf::from))
            .unwrap_or_else(default_db_path);
        let decks_dir = decks_flag.or_else(|| std::env::var_os(DECKS_ENV).map(PathBuf::from));

        Self { db_path, decks_dir }
    }
}

/// Database location inside the user's local data directory.
pub fn default_db_path() -> PathBuf {
    // Fall back to the working directory when no data dir is known
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("deutschsprint")
        .join("deutschsprint.db")
}
