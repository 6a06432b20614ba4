//! Built-in vocabulary decks and lookup by item id.

use crate::error::CurriculumError;
use crate::parser::parse_deck;
use crate::types::{Card, Deck};

const BUILTIN_DECKS: [(&str, &str); 6] = [
    ("greetings", include_str!("../decks/greetings.md")),
    ("numbers", include_str!("../decks/numbers.md")),
    ("days", include_str!("../decks/days.md")),
    ("common-verbs", include_str!("../decks/common-verbs.md")),
    ("a1-basics", include_str!("../decks/a1-basics.md")),
    ("travel-phrasebook", include_str!("../decks/travel-phrasebook.md")),
];

/// Set of decks the learner can study.
#[derive(Debug, Clone, Default)]
pub struct Curriculum {
    decks: Vec<Deck>,
}

impl Curriculum {
    /// Build a curriculum from `decks`, rejecting card ids shared between decks.
    pub fn new(decks: Vec<Deck>) -> Result<Self, CurriculumError> {
        let mut curriculum = Self::default();
        for deck in decks {
            curriculum.add_deck(deck)?;
        }
        Ok(curriculum)
    }

    /// The decks shipped with the application.
    pub fn builtin() -> Result<Self, CurriculumError> {
        let decks = BUILTIN_DECKS
            .iter()
            .map(|(id, content)| parse_deck(id, content))
            .collect::<crate::error::Result<Vec<_>>>()?;
        Self::new(decks)
    }

    /// Add a deck, replacing any deck with the same id.
    ///
    /// Card ids key review records, so a deck reusing an id from another
    /// deck is rejected and the curriculum is left unchanged.
    pub fn add_deck(&mut self, deck: Deck) -> Result<(), CurriculumError> {
        for other in self.decks.iter().filter(|d| d.id != deck.id) {
            if let Some(card) = deck.cards.iter().find(|c| other.card(&c.id).is_some()) {
                return Err(CurriculumError::DuplicateCardId {
                    id: card.id.clone(),
                    deck: deck.id.clone(),
                    other: other.id.clone(),
                });
            }
        }

        match self.decks.iter_mut().find(|d| d.id == deck.id) {
            Some(existing) => *existing = deck,
            None => self.decks.push(deck),
        }
        Ok(())
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn deck(&self, id: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == id)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.decks.iter().flat_map(|d| d.cards.iter())
    }

    pub fn card(&self, item_id: &str) -> Option<&Card> {
        self.cards().find(|c| c.id == item_id)
    }

    /// Reference answer used to grade `item_id`.
    pub fn reference_answer(&self, item_id: &str) -> Option<&str> {
        self.card(item_id).map(Card::reference_answer)
    }
}
