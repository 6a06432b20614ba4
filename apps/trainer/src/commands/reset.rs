//! Bulk data reset.

use super::Result;
use crate::state::AppState;
use deutschsprint_core::Clock;

/// Wipe all review records, settings and progress.
pub fn reset_all<C: Clock>(state: &AppState<C>) -> Result<()> {
    state.repo().reset_all()?;
    tracing::info!("all learner data cleared");
    Ok(())
}
