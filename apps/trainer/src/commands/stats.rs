//! Statistics command.

use super::Result;
use crate::db::{ProgressRepository, SettingsRepository};
use crate::state::AppState;
use deutschsprint_core::{Clock, ProgressReport, ProgressStats, RecordStore};

/// Progress counters together with the record snapshot.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StatsView {
    pub progress: ProgressStats,
    pub report: ProgressReport,
    pub daily_goal: u32,
    pub goal_progress: u32,
}

/// Get overall study statistics.
pub fn get_stats<C: Clock>(state: &AppState<C>) -> Result<StatsView> {
    let repo = state.repo();
    let progress = repo.get_progress()?;
    let settings = repo.get_settings()?;
    let records = repo.get_all()?;

    Ok(StatsView {
        report: ProgressReport::build(&records, &state.scheduler),
        daily_goal: settings.daily_goal,
        goal_progress: progress.goal_progress(settings.daily_goal),
        progress,
    })
}
