//! Review session sequencing and grading.

use crate::clock::Clock;
use crate::matching::{fold_german, is_acceptable};
use crate::scheduler::Scheduler;
use crate::store::RecordStore;
use crate::types::{AnswerMode, Card, Deck, ReviewRecord};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Wrong options shown next to the correct one in multiple choice.
pub const DEFAULT_WRONG_OPTIONS: usize = 3;

/// A learner's answer to the current item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Flashcard mode: "got it" or "again".
    SelfReported(bool),
    /// Selected multiple-choice option.
    Choice(String),
    /// Free-text input.
    Typed(String),
}

impl Response {
    pub fn mode(&self) -> AnswerMode {
        match self {
            Self::SelfReported(_) => AnswerMode::Recognition,
            Self::Choice(_) => AnswerMode::MultipleChoice,
            Self::Typed(_) => AnswerMode::FreeText,
        }
    }

    /// Whether this response counts as correct for `reference`.
    ///
    /// Typed answers may spell out umlauts and sharp s (`ae`, `ss`, ...).
    pub fn is_correct(&self, reference: &str, tolerance: usize) -> bool {
        match self {
            Self::SelfReported(correct) => *correct,
            Self::Choice(option) => option == reference,
            Self::Typed(input) => {
                is_acceptable(input, reference, tolerance)
                    || is_acceptable(&fold_german(input), &fold_german(reference), tolerance)
            }
        }
    }
}

/// Outcome of grading one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graded {
    pub item_id: String,
    pub correct: bool,
    /// Stored record before this answer, `None` for a first review.
    pub previous: Option<ReviewRecord>,
    pub updated: ReviewRecord,
}

/// Ordered walk over a working set of cards.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    items: Vec<Card>,
    position: usize,
}

impl ReviewSession {
    pub fn new(items: Vec<Card>) -> Self {
        Self { items, position: 0 }
    }

    /// Every card of a deck, in deck order.
    pub fn for_deck(deck: &Deck) -> Self {
        Self::new(deck.cards.clone())
    }

    /// Due cards across all decks, in deck order.
    pub fn due<C: Clock>(
        decks: &[Deck],
        records: &HashMap<String, ReviewRecord>,
        scheduler: &Scheduler<C>,
    ) -> Self {
        let cards: Vec<&Card> = decks.iter().flat_map(|d| d.cards.iter()).collect();
        let ids: Vec<&str> = cards.iter().map(|c| c.id.as_str()).collect();
        let due: HashSet<String> = scheduler.filter_due(&ids, records).into_iter().collect();

        Self::new(
            cards
                .into_iter()
                .filter(|c| due.contains(&c.id))
                .cloned()
                .collect(),
        )
    }

    /// Randomize the order of the items not yet answered.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.items[self.position..].shuffle(rng);
    }

    pub fn current(&self) -> Option<&Card> {
        self.items.get(self.position)
    }

    pub fn items(&self) -> &[Card] {
        &self.items
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn remaining(&self) -> usize {
        self.items.len().saturating_sub(self.position)
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.items.len()
    }

    /// Multiple-choice options for the current card, drawing wrong answers
    /// from the other cards of `pool`.
    pub fn options_for_current<R: Rng + ?Sized>(
        &self,
        pool: &[Card],
        wrong_count: usize,
        rng: &mut R,
    ) -> Vec<String> {
        let Some(card) = self.current() else {
            return Vec::new();
        };
        let others = pool
            .iter()
            .filter(|c| c.id != card.id)
            .map(|c| c.en.as_str());
        multiple_choice_options(&card.en, others, wrong_count, rng)
    }

    /// Grade the current card, persist its updated record and advance.
    ///
    /// Returns `Ok(None)` once the session is complete.
    pub fn submit<C: Clock, S: RecordStore>(
        &mut self,
        response: &Response,
        scheduler: &Scheduler<C>,
        store: &mut S,
        tolerance: usize,
    ) -> Result<Option<Graded>, S::Error> {
        let Some(card) = self.current() else {
            return Ok(None);
        };

        let correct = response.is_correct(card.reference_answer(), tolerance);
        let previous = store.get(&card.id)?;
        let base = match &previous {
            Some(record) => record.clone(),
            None => scheduler.initialize(card.id.clone()),
        };
        let updated = scheduler.record_outcome(&base, correct);
        store.set(updated.clone())?;

        let graded = Graded {
            item_id: card.id.clone(),
            correct,
            previous,
            updated,
        };
        self.position += 1;
        Ok(Some(graded))
    }
}

/// Build a shuffled option set: `correct` plus up to `wrong_count` distinct
/// wrong answers sampled from `pool`. Shrinks when the pool runs short.
pub fn multiple_choice_options<'a, I, R>(
    correct: &str,
    pool: I,
    wrong_count: usize,
    rng: &mut R,
) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
    R: Rng + ?Sized,
{
    let mut seen = HashSet::new();
    let candidates: Vec<&str> = pool
        .into_iter()
        .filter(|option| *option != correct && seen.insert(*option))
        .collect();

    let mut options: Vec<String> = candidates
        .choose_multiple(rng, wrong_count)
        .map(|option| option.to_string())
        .collect();
    options.push(correct.to_string());
    options.shuffle(rng);
    options
}
