pub mod commands;
pub mod config;
pub mod db;
pub mod state;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use deutschsprint_core::{AnswerMode, Clock, Curriculum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::ReviewOptions;
use crate::config::Config;
use crate::db::SqliteRepository;
use crate::state::AppState;

#[derive(Parser, Debug)]
#[command(name = "deutschsprint", about = "German vocabulary trainer with Leitner boxes", version)]
pub struct Cli {
    /// Database file (default: local data dir, or DEUTSCHSPRINT_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Directory with extra deck files (or DEUTSCHSPRINT_DECKS)
    #[arg(long, global = true)]
    decks: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List decks with due counts
    Decks,

    /// Run a review session
    Review {
        /// Study every card of one deck instead of due cards
        #[arg(long)]
        deck: Option<String>,
        /// How cards are asked
        #[arg(long, value_enum, default_value = "recognition")]
        mode: ModeArg,
        /// Seed for shuffling
        #[arg(long)]
        seed: Option<u64>,
        /// Shuffle the card order
        #[arg(long)]
        shuffle: bool,
    },

    /// Show progress statistics
    Stats,

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Delete all review records, settings and progress
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    /// Print current settings
    Show,
    /// Change one setting
    Set { key: String, value: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Recognition,
    Choice,
    Typed,
}

impl From<ModeArg> for AnswerMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Recognition => AnswerMode::Recognition,
            ModeArg::Choice => AnswerMode::MultipleChoice,
            ModeArg::Typed => AnswerMode::FreeText,
        }
    }
}

pub fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::resolve(cli.db.clone(), cli.decks.clone());

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    tracing::info!(path = %config.db_path.display(), "opening database");
    let repository = SqliteRepository::open(&config.db_path).context("failed to open database")?;

    let mut curriculum = Curriculum::builtin().context("built-in decks are malformed")?;
    if let Some(dir) = &config.decks_dir {
        let loaded = commands::load_deck_dir(&mut curriculum, dir)
            .with_context(|| format!("failed to read decks from {}", dir.display()))?;
        tracing::info!(loaded, dir = %dir.display(), "loaded extra decks");
    }

    let state = AppState::new(repository, curriculum);
    let stdin = io::stdin();
    execute(&state, cli.command, stdin.lock(), io::stdout().lock())
}

fn execute<C: Clock, R: BufRead, W: Write>(
    state: &AppState<C>,
    command: Command,
    mut input: R,
    mut out: W,
) -> anyhow::Result<()> {
    match command {
        Command::Decks => {
            for deck in commands::list_decks(state)? {
                writeln!(
                    out,
                    "{:<20} {:<28} {:>3} cards  {:>3} due",
                    deck.id, deck.name, deck.card_count, deck.due_count
                )?;
            }
        }
        Command::Review {
            deck,
            mode,
            seed,
            shuffle,
        } => {
            let options = ReviewOptions {
                deck,
                mode: mode.into(),
                seed,
                shuffle,
            };
            commands::run_review(state, &options, input, out)?;
        }
        Command::Stats => {
            let stats = commands::get_stats(state)?;
            let last = stats
                .progress
                .last_review_date
                .map(|d| d.to_string())
                .unwrap_or_else(|| "never".to_string());
            writeln!(out, "Day streak:     {}", stats.progress.streak)?;
            writeln!(out, "Words learned:  {}", stats.progress.words_learned)?;
            writeln!(out, "Total reviews:  {}", stats.progress.total_reviews)?;
            writeln!(out, "Daily goal:     {} / {}", stats.goal_progress, stats.daily_goal)?;
            writeln!(out, "Last review:    {}", last)?;
            writeln!(out, "Reviewed items: {}", stats.report.reviewed_items)?;
            writeln!(out, "Due now:        {}", stats.report.due_items)?;
            writeln!(out, "Average streak: {:.2}", stats.report.average_streak)?;
            for (i, count) in stats.report.box_counts.iter().enumerate() {
                writeln!(out, "Box {}: {}", i + 1, count)?;
            }
        }
        Command::Settings(SettingsCommand::Show) => {
            let settings = commands::get_settings(state)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&settings)?)?;
        }
        Command::Settings(SettingsCommand::Set { key, value }) => {
            let settings = commands::update_setting(state, &key, &value)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&settings)?)?;
        }
        Command::Reset { yes } => {
            if !yes {
                write!(out, "This deletes all progress. Type 'yes' to confirm: ")?;
                out.flush()?;
                let mut line = String::new();
                input.read_line(&mut line)?;
                if line.trim() != "yes" {
                    writeln!(out, "Aborted.")?;
                    return Ok(());
                }
            }
            commands::reset_all(state)?;
            writeln!(out, "All data has been reset.")?;
        }
    }
    Ok(())
}
