//! Deck listing and loading.

use super::Result;
use crate::state::AppState;
use deutschsprint_core::{parse_deck, Clock, Curriculum, RecordStore};
use std::fs;
use std::path::Path;

/// Deck with card counts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct DeckSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub card_count: usize,
    pub due_count: usize,
}

/// List all decks with the number of cards due now.
pub fn list_decks<C: Clock>(state: &AppState<C>) -> Result<Vec<DeckSummary>> {
    let records = state.repo().get_all()?;

    Ok(state
        .curriculum
        .decks()
        .iter()
        .map(|deck| {
            let ids: Vec<&str> = deck.cards.iter().map(|c| c.id.as_str()).collect();
            DeckSummary {
                id: deck.id.clone(),
                name: deck.name.clone(),
                description: deck.description.clone(),
                card_count: deck.cards.len(),
                due_count: state.scheduler.filter_due(&ids, &records).len(),
            }
        })
        .collect())
}

/// Add every `.md` deck in `dir` to the curriculum. Files that cannot be
/// read or parsed, or that reuse card ids from another deck, are skipped
/// with a warning. Returns the number of decks loaded.
pub fn load_deck_dir(curriculum: &mut Curriculum, dir: &Path) -> Result<usize> {
    let mut loaded = 0;

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.extension().map_or(false, |ext| ext == "md") {
            continue;
        }

        let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping unreadable deck file");
                continue;
            }
        };
        let deck = match parse_deck(id, &content) {
            Ok(deck) => deck,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "skipping deck file");
                continue;
            }
        };

        let (deck_id, cards) = (deck.id.clone(), deck.cards.len());
        match curriculum.add_deck(deck) {
            Ok(()) => {
                tracing::debug!(deck = %deck_id, cards, "loaded deck file");
                loaded += 1;
            }
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "skipping deck file"),
        }
    }

    Ok(loaded)
}
