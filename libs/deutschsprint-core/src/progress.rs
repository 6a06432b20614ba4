//! Learner progress counters and review statistics.

use crate::clock::Clock;
use crate::scheduler::Scheduler;
use crate::types::{LeitnerBox, ReviewRecord};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Running totals shown on the home and progress screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressStats {
    /// Consecutive study days.
    pub streak: u32,
    pub words_learned: u32,
    pub total_reviews: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_review_date: Option<NaiveDate>,
}

impl ProgressStats {
    /// Account for one graded answer.
    ///
    /// `previous_box` is the item's box before grading, `None` if the item
    /// had never been reviewed. A correct answer out of box 1 counts as a
    /// newly learned word.
    pub fn record_answer(&mut self, correct: bool, previous_box: Option<LeitnerBox>, today: NaiveDate) {
        if correct {
            self.total_reviews += 1;
            if previous_box.unwrap_or(LeitnerBox::FIRST) == LeitnerBox::FIRST {
                self.words_learned += 1;
            }
        }

        self.streak = match self.last_review_date {
            Some(last) if last == today => self.streak.max(1),
            Some(last) if last.succ_opt() == Some(today) => self.streak + 1,
            _ => 1,
        };
        self.last_review_date = Some(today);
    }

    /// Progress towards the daily goal, capped at the goal.
    pub fn goal_progress(&self, daily_goal: u32) -> u32 {
        self.total_reviews.min(daily_goal)
    }
}

/// Snapshot of the record collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    /// Number of records in boxes 1 through 5.
    pub box_counts: [usize; 5],
    pub reviewed_items: usize,
    pub due_items: usize,
    pub average_streak: f64,
}

impl ProgressReport {
    pub fn build<C: Clock>(records: &HashMap<String, ReviewRecord>, scheduler: &Scheduler<C>) -> Self {
        let mut box_counts = [0usize; 5];
        let mut streak_sum = 0u64;
        let mut due_items = 0;

        for record in records.values() {
            box_counts[usize::from(record.leitner_box.value() - 1)] += 1;
            streak_sum += u64::from(record.success_streak);
            if scheduler.is_due(Some(record)) {
                due_items += 1;
            }
        }

        let average_streak = if records.is_empty() {
            0.0
        } else {
            (streak_sum as f64 / records.len() as f64 * 100.0).round() / 100.0
        };

        Self {
            box_counts,
            reviewed_items: records.len(),
            due_items,
            average_streak,
        }
    }
}
