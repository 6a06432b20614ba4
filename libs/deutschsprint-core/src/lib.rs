//! Core library of the DeutschSprint vocabulary trainer.
//!
//! Provides:
//! - Leitner box scheduling (5 boxes, 1/3/7/14/30 day intervals)
//! - Typed answer grading (Levenshtein distance with a typo budget)
//! - Review session sequencing and multiple-choice option generation
//! - Deck file parser and the built-in curriculum
//! - Shared types (ReviewRecord, Card, Deck, UserSettings, etc.)

pub mod clock;
pub mod curriculum;
pub mod error;
pub mod matching;
pub mod parser;
pub mod progress;
pub mod scheduler;
pub mod session;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use curriculum::Curriculum;
pub use error::{CoreError, CurriculumError, ParseError, Result};
pub use matching::{fold_german, grade_answer, is_acceptable, levenshtein_distance, MatchResult, DEFAULT_TOLERANCE};
pub use parser::parse_deck;
pub use progress::{ProgressReport, ProgressStats};
pub use scheduler::{interval_for, Scheduler};
pub use session::{multiple_choice_options, Graded, Response, ReviewSession, DEFAULT_WRONG_OPTIONS};
pub use store::{InMemoryStore, RecordStore};
pub use types::{
    AnswerMode, Article, Card, Deck, FontSize, LeitnerBox, PartOfSpeech, ReviewRecord, UserSettings,
};
