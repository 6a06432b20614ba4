//! Commands exposed on the command line.

pub mod decks;
pub mod reset;
pub mod review;
pub mod settings;
pub mod stats;

use thiserror::Error;

pub use decks::{list_decks, load_deck_dir, DeckSummary};
pub use reset::reset_all;
pub use review::{run_review, ReviewOptions, ReviewSummary};
pub use settings::{get_settings, update_setting};
pub use stats::{get_stats, StatsView};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Db(#[from] crate::db::DbError),

    #[error(transparent)]
    Parse(#[from] deutschsprint_core::ParseError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("deck not found: {0}")]
    DeckNotFound(String),

    #[error("unknown setting: {0}")]
    UnknownSetting(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

pub type Result<T> = std::result::Result<T, CommandError>;
