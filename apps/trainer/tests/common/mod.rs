//! Common test utilities for trainer integration tests.
//!
//! Every test gets its own in-memory SQLite database, a small curriculum and
//! a manually driven clock, so no files or wall-clock time are involved.

pub mod fixtures;

use chrono::{DateTime, Duration, TimeZone, Utc};
use deutschsprint_core::{Curriculum, FixedClock};

use deutschsprint_trainer::commands::{run_review, ReviewOptions, ReviewSummary};
use deutschsprint_trainer::db::SqliteRepository;
use deutschsprint_trainer::state::AppState;

/// Test context wrapping the application state.
pub struct TestContext {
    pub state: AppState<FixedClock>,
}

impl TestContext {
    /// Context with the fixture deck and the clock at `start()`.
    pub fn new() -> Self {
        Self::with_curriculum(Curriculum::new(vec![fixtures::test_deck()]).expect("fixture curriculum"))
    }

    pub fn with_curriculum(curriculum: Curriculum) -> Self {
        let repository = SqliteRepository::open_in_memory().expect("in-memory database");
        Self {
            state: AppState::with_clock(repository, curriculum, FixedClock::new(start())),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.state.scheduler.clock().advance(by);
    }

    /// Run a session feeding `script` as stdin; returns the summary and transcript.
    pub fn review(&self, options: &ReviewOptions, script: &str) -> (ReviewSummary, String) {
        let mut output = Vec::new();
        let summary = run_review(&self.state, options, script.as_bytes(), &mut output)
            .expect("review session");
        (summary, String::from_utf8(output).expect("utf-8 output"))
    }
}

/// Clock value every context starts at.
pub fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap()
}
