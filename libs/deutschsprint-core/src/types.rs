//! Core types for the vocabulary trainer.

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Leitner box number, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LeitnerBox(u8);

impl LeitnerBox {
    pub const FIRST: Self = Self(1);
    pub const LAST: Self = Self(5);

    /// Validate a raw box number.
    pub fn new(value: u8) -> Result<Self, CoreError> {
        if (Self::FIRST.0..=Self::LAST.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidBox(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Next box up, saturating at box 5.
    pub fn promote(self) -> Self {
        Self((self.0 + 1).min(Self::LAST.0))
    }

    /// All boxes in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (Self::FIRST.0..=Self::LAST.0).map(Self)
    }
}

impl Default for LeitnerBox {
    fn default() -> Self {
        Self::FIRST
    }
}

impl TryFrom<u8> for LeitnerBox {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LeitnerBox> for u8 {
    fn from(value: LeitnerBox) -> Self {
        value.0
    }
}

impl fmt::Display for LeitnerBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review state of a single learnable item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub item_id: String,
    #[serde(rename = "box")]
    pub leitner_box: LeitnerBox,
    pub last_reviewed_at: DateTime<Utc>,
    pub next_due_at: DateTime<Utc>,
    pub success_streak: u32,
}

/// Grammatical category of a vocabulary card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Phrase,
    Adj,
    Adv,
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Noun => "noun",
            Self::Verb => "verb",
            Self::Phrase => "phrase",
            Self::Adj => "adj",
            Self::Adv => "adv",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "noun" => Some(Self::Noun),
            "verb" => Some(Self::Verb),
            "phrase" => Some(Self::Phrase),
            "adj" => Some(Self::Adj),
            "adv" => Some(Self::Adv),
            _ => None,
        }
    }
}

/// Definite article of a German noun.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Article {
    Der,
    Die,
    Das,
}

impl Article {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Der => "der",
            Self::Die => "die",
            Self::Das => "das",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "der" => Some(Self::Der),
            "die" => Some(Self::Die),
            "das" => Some(Self::Das),
            _ => None,
        }
    }
}

/// A vocabulary card. `en` is the reference answer used for grading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub de: String,
    pub en: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<PartOfSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Card {
    /// German prompt including the article, e.g. "der Montag".
    pub fn prompt(&self) -> String {
        match self.article {
            Some(article) => format!("{} {}", article.as_str(), self.de),
            None => self.de.clone(),
        }
    }

    pub fn reference_answer(&self) -> &str {
        &self.en
    }
}

/// A named, ordered collection of cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }
}

/// How an item is presented to the learner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerMode {
    /// Flashcard flip, learner self-reports.
    Recognition,
    MultipleChoice,
    FreeText,
}

impl Default for AnswerMode {
    fn default() -> Self {
        Self::Recognition
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

impl Default for FontSize {
    fn default() -> Self {
        Self::Medium
    }
}

/// User preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub dark_mode: bool,
    pub font_size: FontSize,
    pub tts_enabled: bool,
    pub daily_goal: u32,
    pub dyslexic_font: bool,
    /// Tolerance budget for typed answers.
    pub typo_tolerance: usize,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            font_size: FontSize::default(),
            tts_enabled: true,
            daily_goal: 20,
            dyslexic_font: false,
            typo_tolerance: crate::matching::DEFAULT_TOLERANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_rejects_out_of_range() {
        assert_eq!(LeitnerBox::new(0), Err(CoreError::InvalidBox(0)));
        assert_eq!(LeitnerBox::new(6), Err(CoreError::InvalidBox(6)));
        assert_eq!(LeitnerBox::new(3).map(LeitnerBox::value), Ok(3));
    }

    #[test]
    fn box_promotion_saturates() {
        let boxes: Vec<u8> = LeitnerBox::all().map(|b| b.promote().value()).collect();
        assert_eq!(boxes, vec![2, 3, 4, 5, 5]);
    }

    #[test]
    fn record_with_invalid_box_fails_to_deserialize() {
        let json = r#"{"item_id":"g1","box":7,"last_reviewed_at":"2026-01-01T00:00:00Z","next_due_at":"2026-01-02T00:00:00Z","success_streak":0}"#;
        assert!(serde_json::from_str::<ReviewRecord>(json).is_err());
    }

    #[test]
    fn prompt_includes_article() {
        let card = Card {
            id: "d1".into(),
            de: "Montag".into(),
            en: "Monday".into(),
            part_of_speech: Some(PartOfSpeech::Noun),
            article: Some(Article::Der),
            note: None,
        };
        assert_eq!(card.prompt(), "der Montag");
    }

    #[test]
    fn settings_fill_missing_fields_with_defaults() {
        let settings: UserSettings = serde_json::from_str(r#"{"daily_goal":5}"#).unwrap();
        assert_eq!(settings.daily_goal, 5);
        assert!(settings.tts_enabled);
        assert_eq!(settings.typo_tolerance, 2);
    }
}
