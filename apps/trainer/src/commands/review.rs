//! Interactive review session over a line-based terminal.

use super::{CommandError, Result};
use crate::db::date_utils::{describe_due, study_day};
use crate::db::{ProgressRepository, SettingsRepository};
use crate::state::AppState;
use deutschsprint_core::{
    grade_answer, AnswerMode, Card, Clock, Graded, RecordStore, Response, ReviewSession,
    DEFAULT_WRONG_OPTIONS,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{BufRead, Write};

/// How to build and present a session.
#[derive(Debug, Clone, Default)]
pub struct ReviewOptions {
    /// Study one deck in full; `None` reviews due cards across all decks.
    pub deck: Option<String>,
    pub mode: AnswerMode,
    /// Seed for option and order shuffling.
    pub seed: Option<u64>,
    pub shuffle: bool,
}

/// What happened during a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ReviewSummary {
    pub total: usize,
    pub answered: usize,
    pub correct: usize,
    pub completed: bool,
}

/// Run a review session, reading answers from `input` and writing prompts
/// to `output`. Every graded answer is persisted before the next prompt.
pub fn run_review<C, R, W>(
    state: &AppState<C>,
    options: &ReviewOptions,
    mut input: R,
    mut output: W,
) -> Result<ReviewSummary>
where
    C: Clock,
    R: BufRead,
    W: Write,
{
    let (mut session, pool) = build_session(state, options)?;
    let mut rng = match options.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    if options.shuffle {
        session.shuffle(&mut rng);
    }

    let mut summary = ReviewSummary {
        total: session.len(),
        ..Default::default()
    };

    if session.is_empty() {
        writeln!(output, "All caught up! No cards are due for review right now.")?;
        summary.completed = true;
        return Ok(summary);
    }

    let tolerance = state.repo().get_settings()?.typo_tolerance;
    tracing::info!(cards = session.len(), mode = ?options.mode, "starting review session");

    while let Some(card) = session.current().cloned() {
        writeln!(output)?;
        writeln!(output, "[{}/{}] {}", session.position() + 1, session.len(), card.prompt())?;
        if let Some(pos) = card.part_of_speech {
            writeln!(output, "      ({})", pos.as_str())?;
        }

        let response = match options.mode {
            AnswerMode::Recognition => ask_recognition(&card, &mut input, &mut output)?,
            AnswerMode::MultipleChoice => {
                let choices = session.options_for_current(&pool, DEFAULT_WRONG_OPTIONS, &mut rng);
                ask_choice(&choices, &mut input, &mut output)?
            }
            AnswerMode::FreeText => ask_typed(&mut input, &mut output)?,
        };
        let Some(response) = response else {
            writeln!(output, "Session stopped. Progress so far is saved.")?;
            break;
        };

        let Some(graded) = grade_and_save(state, &mut session, &response, tolerance)? else {
            break;
        };
        summary.answered += 1;
        if graded.correct {
            summary.correct += 1;
        }
        write_feedback(state, &card, &response, &graded, tolerance, &mut output)?;
    }

    summary.completed = session.is_complete();
    if summary.completed {
        writeln!(
            output,
            "\nSession complete: {} of {} correct.",
            summary.correct, summary.answered
        )?;
    }
    tracing::info!(answered = summary.answered, correct = summary.correct, "review session ended");
    Ok(summary)
}

fn build_session<C: Clock>(
    state: &AppState<C>,
    options: &ReviewOptions,
) -> Result<(ReviewSession, Vec<Card>)> {
    match &options.deck {
        Some(id) => {
            let deck = state
                .curriculum
                .deck(id)
                .ok_or_else(|| CommandError::DeckNotFound(id.clone()))?;
            Ok((ReviewSession::for_deck(deck), deck.cards.clone()))
        }
        None => {
            let records = state.repo().get_all()?;
            let session = ReviewSession::due(state.curriculum.decks(), &records, &state.scheduler);
            Ok((session, state.curriculum.cards().cloned().collect()))
        }
    }
}

/// Grade the current card, store the new record and update progress
/// counters in one transaction.
fn grade_and_save<C: Clock>(
    state: &AppState<C>,
    session: &mut ReviewSession,
    response: &Response,
    tolerance: usize,
) -> Result<Option<Graded>> {
    let today = study_day(state.scheduler.clock().now());
    let mut repo = state.repo();
    let graded = repo.atomically(|repo| -> Result<Option<Graded>> {
        let Some(graded) = session.submit(response, &state.scheduler, repo, tolerance)? else {
            return Ok(None);
        };

        let mut progress = repo.get_progress()?;
        progress.record_answer(
            graded.correct,
            graded.previous.as_ref().map(|r| r.leitner_box),
            today,
        );
        repo.save_progress(&progress)?;
        Ok(Some(graded))
    })?;
    let Some(graded) = graded else {
        return Ok(None);
    };

    tracing::debug!(
        item = %graded.item_id,
        correct = graded.correct,
        from_box = ?graded.previous.as_ref().map(|r| r.leitner_box.value()),
        to_box = graded.updated.leitner_box.value(),
        "graded answer"
    );
    Ok(Some(graded))
}

/// Read one trimmed line. `None` on end of input or `q`.
fn read_answer<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim_end_matches(&['\r', '\n'][..]).to_string();
    if line.trim() == "q" {
        return Ok(None);
    }
    Ok(Some(line))
}

fn ask_recognition<R: BufRead, W: Write>(
    card: &Card,
    input: &mut R,
    output: &mut W,
) -> Result<Option<Response>> {
    write!(output, "Press Enter to reveal the answer... ")?;
    output.flush()?;
    if read_answer(input)?.is_none() {
        return Ok(None);
    }

    writeln!(output, "  {}", card.en)?;
    if let Some(note) = &card.note {
        writeln!(output, "  note: {}", note)?;
    }

    loop {
        write!(output, "Did you know it? [y/n] ")?;
        output.flush()?;
        let Some(answer) = read_answer(input)? else {
            return Ok(None);
        };
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(Some(Response::SelfReported(true))),
            "n" | "no" => return Ok(Some(Response::SelfReported(false))),
            _ => writeln!(output, "Please answer y or n.")?,
        }
    }
}

fn ask_choice<R: BufRead, W: Write>(
    choices: &[String],
    input: &mut R,
    output: &mut W,
) -> Result<Option<Response>> {
    for (i, choice) in choices.iter().enumerate() {
        writeln!(output, "  {}) {}", i + 1, choice)?;
    }

    loop {
        write!(output, "Your choice: ")?;
        output.flush()?;
        let Some(answer) = read_answer(input)? else {
            return Ok(None);
        };
        match answer.trim().parse::<usize>() {
            Ok(n) if (1..=choices.len()).contains(&n) => {
                return Ok(Some(Response::Choice(choices[n - 1].clone())));
            }
            _ => writeln!(output, "Enter a number between 1 and {}.", choices.len())?,
        }
    }
}

fn ask_typed<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Option<Response>> {
    loop {
        write!(output, "Type the English translation: ")?;
        output.flush()?;
        let Some(answer) = read_answer(input)? else {
            return Ok(None);
        };
        if !answer.trim().is_empty() {
            return Ok(Some(Response::Typed(answer)));
        }
    }
}

fn write_feedback<C: Clock, W: Write>(
    state: &AppState<C>,
    card: &Card,
    response: &Response,
    graded: &Graded,
    tolerance: usize,
    output: &mut W,
) -> Result<()> {
    match (response, graded.correct) {
        (Response::Typed(typed), true) => {
            let result = grade_answer(typed, &card.en, tolerance);
            if result.distance > 0 {
                writeln!(output, "Correct (almost)! Exact spelling: {}", card.en)?;
            } else {
                writeln!(output, "Correct!")?;
            }
        }
        (Response::SelfReported(_), true) | (Response::Choice(_), true) => {
            writeln!(output, "Correct!")?;
        }
        (_, false) => writeln!(output, "Not quite. The answer is: {}", card.en)?,
    }

    let now = state.scheduler.clock().now();
    writeln!(
        output,
        "Box {} - next review {}",
        graded.updated.leitner_box,
        describe_due(graded.updated.next_due_at, now)
    )?;
    Ok(())
}
