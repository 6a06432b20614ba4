//! Markdown parser for vocabulary deck files.
//!
//! # Format
//! ```markdown
//! # Days & Time
//! > Days of the week and time-related words
//!
//! ID: d1
//! DE: Montag
//! EN: Monday
//! ART: der
//! POS: noun
//!
//! ID: d8
//! DE: heute
//! EN: today
//! POS: adv
//! NOTE: Also used in "heute Abend"
//! ```

use crate::error::{ParseError, Result};
use crate::types::{Article, Card, Deck, PartOfSpeech};
use std::collections::HashSet;

/// Parse a deck file. `id` is the deck identifier, usually the file stem.
pub fn parse_deck(id: &str, content: &str) -> Result<Deck> {
    if content.trim().is_empty() {
        return Err(ParseError::EmptyFile);
    }

    let mut parser = Parser::default();
    for (idx, line) in content.lines().enumerate() {
        parser.process_line(line, idx + 1)?;
    }
    parser.finalize(id)
}

struct CardBuilder {
    id: String,
    de: Option<String>,
    en: Option<String>,
    part_of_speech: Option<PartOfSpeech>,
    article: Option<Article>,
    note: Option<String>,
    start_line: usize,
}

impl CardBuilder {
    fn new(id: String, start_line: usize) -> Self {
        Self {
            id,
            de: None,
            en: None,
            part_of_speech: None,
            article: None,
            note: None,
            start_line,
        }
    }

    fn build(self) -> Result<Card> {
        let de = self.de.ok_or_else(|| ParseError::MissingGerman {
            id: self.id.clone(),
            line: self.start_line,
        })?;
        let en = self.en.ok_or_else(|| ParseError::MissingEnglish {
            id: self.id.clone(),
            line: self.start_line,
        })?;

        Ok(Card {
            id: self.id,
            de,
            en,
            part_of_speech: self.part_of_speech,
            article: self.article,
            note: self.note,
        })
    }
}

#[derive(Default)]
struct Parser {
    name: Option<String>,
    description: Option<String>,
    current: Option<CardBuilder>,
    cards: Vec<Card>,
    seen_ids: HashSet<String>,
}

impl Parser {
    fn process_line(&mut self, line: &str, line_num: usize) -> Result<()> {
        match Self::parse_line(line) {
            LineType::Heading(text) => {
                if self.name.is_none() {
                    self.name = Some(text.to_string());
                }
            }
            LineType::Quote(text) => {
                if self.description.is_none() && self.current.is_none() {
                    self.description = Some(text.to_string());
                }
            }
            LineType::Id(id) => self.handle_id(id, line_num)?,
            LineType::Field(field, value) => self.handle_field(field, value, line_num)?,
            LineType::Other => {}
        }
        Ok(())
    }

    fn parse_line(line: &str) -> LineType<'_> {
        let trimmed = line.trim();

        if let Some(rest) = trimmed.strip_prefix("# ") {
            return LineType::Heading(rest.trim());
        }
        if let Some(rest) = trimmed.strip_prefix('>') {
            return LineType::Quote(rest.trim());
        }
        if let Some(rest) = trimmed.strip_prefix("ID:") {
            return LineType::Id(rest.trim());
        }

        let fields = [
            ("DE:", Field::German),
            ("EN:", Field::English),
            ("POS:", Field::PartOfSpeech),
            ("ART:", Field::Article),
            ("NOTE:", Field::Note),
        ];
        for (prefix, field) in fields {
            if let Some(rest) = trimmed.strip_prefix(prefix) {
                return LineType::Field(field, rest.trim());
            }
        }

        LineType::Other
    }

    fn handle_id(&mut self, id: &str, line_num: usize) -> Result<()> {
        if id.is_empty() {
            return Err(ParseError::EmptyId { line: line_num });
        }
        if !self.seen_ids.insert(id.to_string()) {
            return Err(ParseError::DuplicateId {
                id: id.to_string(),
                line: line_num,
            });
        }

        self.flush()?;
        self.current = Some(CardBuilder::new(id.to_string(), line_num));
        Ok(())
    }

    fn handle_field(&mut self, field: Field, value: &str, line_num: usize) -> Result<()> {
        let card = self
            .current
            .as_mut()
            .ok_or(ParseError::FieldWithoutId { line: line_num })?;

        match field {
            Field::German => card.de = Some(value.to_string()),
            Field::English => card.en = Some(value.to_string()),
            Field::PartOfSpeech => {
                let pos = PartOfSpeech::parse(value).ok_or_else(|| ParseError::InvalidPartOfSpeech {
                    line: line_num,
                    value: value.to_string(),
                })?;
                card.part_of_speech = Some(pos);
            }
            Field::Article => {
                let article = Article::parse(value).ok_or_else(|| ParseError::InvalidArticle {
                    line: line_num,
                    value: value.to_string(),
                })?;
                card.article = Some(article);
            }
            Field::Note => card.note = Some(value.to_string()),
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(builder) = self.current.take() {
            self.cards.push(builder.build()?);
        }
        Ok(())
    }

    fn finalize(mut self, id: &str) -> Result<Deck> {
        self.flush()?;
        let name = self.name.ok_or(ParseError::MissingName)?;

        Ok(Deck {
            id: id.to_string(),
            name,
            description: self.description.unwrap_or_default(),
            cards: self.cards,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    German,
    English,
    PartOfSpeech,
    Article,
    Note,
}

enum LineType<'a> {
    Heading(&'a str),
    Quote(&'a str),
    Id(&'a str),
    Field(Field, &'a str),
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAYS: &str = "# Days & Time\n> Days of the week\n\nID: d1\nDE: Montag\nEN: Monday\nART: der\nPOS: noun\n\nID: d8\nDE: heute\nEN: today\nPOS: adv\nNOTE: Adverb\n";

    #[test]
    fn parse_deck_header_and_cards() {
        let deck = parse_deck("days", DAYS).unwrap();
        assert_eq!(deck.id, "days");
        assert_eq!(deck.name, "Days & Time");
        assert_eq!(deck.description, "Days of the week");
        assert_eq!(deck.cards.len(), 2);

        let monday = &deck.cards[0];
        assert_eq!(monday.id, "d1");
        assert_eq!(monday.de, "Montag");
        assert_eq!(monday.en, "Monday");
        assert_eq!(monday.article, Some(Article::Der));
        assert_eq!(monday.part_of_speech, Some(PartOfSpeech::Noun));
        assert_eq!(deck.cards[1].note.as_deref(), Some("Adverb"));
    }

    #[test]
    fn parse_deck_without_description() {
        let deck = parse_deck("x", "# Verbs\nID: v1\nDE: sein\nEN: to be").unwrap();
        assert_eq!(deck.description, "");
        assert_eq!(deck.cards[0].en, "to be");
    }

    #[test]
    fn reject_duplicate_ids() {
        let input = "# D\nID: a\nDE: x\nEN: y\nID: a\nDE: z\nEN: w";
        let result = parse_deck("d", input);
        assert!(matches!(result, Err(ParseError::DuplicateId { line: 5, .. })));
    }

    #[test]
    fn reject_missing_english() {
        let result = parse_deck("d", "# D\nID: a\nDE: Hallo\n\nID: b\nDE: Ja\nEN: Yes");
        assert!(matches!(result, Err(ParseError::MissingEnglish { line: 2, .. })));
    }

    #[test]
    fn reject_missing_german() {
        let result = parse_deck("d", "# D\nID: a\nEN: Hello");
        assert!(matches!(result, Err(ParseError::MissingGerman { .. })));
    }

    #[test]
    fn reject_field_before_id() {
        let result = parse_deck("d", "# D\nDE: Hallo\nID: a");
        assert!(matches!(result, Err(ParseError::FieldWithoutId { line: 2 })));
    }

    #[test]
    fn reject_unknown_article() {
        let result = parse_deck("d", "# D\nID: a\nDE: Haus\nEN: house\nART: den");
        assert!(matches!(result, Err(ParseError::InvalidArticle { line: 5, .. })));
    }

    #[test]
    fn reject_missing_name() {
        let result = parse_deck("d", "ID: a\nDE: Ja\nEN: Yes");
        assert!(matches!(result, Err(ParseError::MissingName)));
    }

    #[test]
    fn reject_empty_content() {
        assert!(matches!(parse_deck("d", "  \n"), Err(ParseError::EmptyFile)));
    }
}
