//! Test fixtures and factory functions for creating test data.

use deutschsprint_core::{parse_deck, AnswerMode, Deck};
use deutschsprint_trainer::commands::ReviewOptions;

/// Three-card deck used by most tests.
pub const TEST_DECK: &str = "# Test Deck
> Cards for integration tests

ID: t1
DE: Hallo
EN: Hello
POS: phrase

ID: t2
DE: Montag
EN: Monday
ART: der
POS: noun

ID: t3
DE: zwei
EN: two
POS: adj
";

pub fn test_deck() -> Deck {
    parse_deck("test", TEST_DECK).expect("fixture deck parses")
}

/// Generate deck file content with `num_cards` cards.
pub fn sample_deck_content(name: &str, num_cards: usize) -> String {
    let cards = (0..num_cards)
        .map(|i| format!("ID: {name}-{i}\nDE: Wort {i}\nEN: word {i}\n"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("# {name}\n\n{cards}")
}

/// Options for a full pass over the fixture deck.
pub fn deck_options(mode: AnswerMode) -> ReviewOptions {
    ReviewOptions {
        deck: Some("test".to_string()),
        mode,
        seed: Some(11),
        shuffle: false,
    }
}

/// Options for reviewing due cards across all decks.
pub fn due_options(mode: AnswerMode) -> ReviewOptions {
    ReviewOptions {
        deck: None,
        mode,
        seed: Some(11),
        shuffle: false,
    }
}
