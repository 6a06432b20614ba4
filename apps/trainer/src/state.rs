//! Application state.

use crate::db::SqliteRepository;
use deutschsprint_core::{Clock, Curriculum, Scheduler, SystemClock};
use std::sync::{Mutex, MutexGuard};

/// Everything a command needs: the record store, the decks and the scheduler.
pub struct AppState<C = SystemClock> {
    pub repository: Mutex<SqliteRepository>,
    pub curriculum: Curriculum,
    pub scheduler: Scheduler<C>,
}

impl AppState<SystemClock> {
    pub fn new(repository: SqliteRepository, curriculum: Curriculum) -> Self {
        Self::with_clock(repository, curriculum, SystemClock)
    }
}

impl<C: Clock> AppState<C> {
    pub fn with_clock(repository: SqliteRepository, curriculum: Curriculum, clock: C) -> Self {
        Self {
            repository: Mutex::new(repository),
            curriculum,
            scheduler: Scheduler::new(clock),
        }
    }

    pub fn repo(&self) -> MutexGuard<'_, SqliteRepository> {
        self.repository.lock().expect("repository lock")
    }
}
