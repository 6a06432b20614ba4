//! Error types for deutschsprint-core.

use thiserror::Error;

/// Result type alias using ParseError.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Boundary validation errors for core values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("leitner box must be between 1 and 5, got {0}")]
    InvalidBox(u8),
}

/// Errors that can occur while parsing a deck file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing deck name heading")]
    MissingName,

    #[error("card field outside of a card at line {line}")]
    FieldWithoutId { line: usize },

    #[error("missing German text for card {id} at line {line}")]
    MissingGerman { id: String, line: usize },

    #[error("missing English text for card {id} at line {line}")]
    MissingEnglish { id: String, line: usize },

    #[error("empty card ID at line {line}")]
    EmptyId { line: usize },

    #[error("unknown part of speech at line {line}: {value}")]
    InvalidPartOfSpeech { line: usize, value: String },

    #[error("unknown article at line {line}: {value}")]
    InvalidArticle { line: usize, value: String },

    #[error("duplicate ID {id} at line {line}")]
    DuplicateId { id: String, line: usize },

    #[error("empty file")]
    EmptyFile,
}

/// Errors that can occur while assembling a curriculum from decks.
#[derive(Debug, Error)]
pub enum CurriculumError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("card ID {id} in deck {deck} is already used in deck {other}")]
    DuplicateCardId {
        id: String,
        deck: String,
        other: String,
    },
}
