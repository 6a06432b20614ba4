//! Leitner box scheduler.
//!
//! Five fixed boxes with intervals of 1, 3, 7, 14 and 30 days. A correct
//! answer moves an item one box up (box 5 is the ceiling), a wrong answer
//! sends it back to box 1.

use crate::clock::Clock;
use crate::types::{LeitnerBox, ReviewRecord};
use chrono::Duration;
use std::collections::HashMap;

/// Days until the next review for each box, indexed by `box - 1`.
const BOX_INTERVAL_DAYS: [i64; 5] = [1, 3, 7, 14, 30];

/// Interval before an item in `leitner_box` becomes due again.
pub fn interval_for(leitner_box: LeitnerBox) -> Duration {
    Duration::days(BOX_INTERVAL_DAYS[usize::from(leitner_box.value() - 1)])
}

/// Scheduler over an injected clock. Holds no review state of its own.
#[derive(Debug, Clone, Default)]
pub struct Scheduler<C> {
    clock: C,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Fresh record in box 1, due one day from now.
    pub fn initialize(&self, item_id: impl Into<String>) -> ReviewRecord {
        let now = self.clock.now();
        ReviewRecord {
            item_id: item_id.into(),
            leitner_box: LeitnerBox::FIRST,
            last_reviewed_at: now,
            next_due_at: now + interval_for(LeitnerBox::FIRST),
            success_streak: 0,
        }
    }

    /// Apply a graded answer and return the updated record.
    pub fn record_outcome(&self, record: &ReviewRecord, correct: bool) -> ReviewRecord {
        let now = self.clock.now();

        let (new_box, new_streak) = if correct {
            (record.leitner_box.promote(), record.success_streak + 1)
        } else {
            (LeitnerBox::FIRST, 0)
        };

        ReviewRecord {
            item_id: record.item_id.clone(),
            leitner_box: new_box,
            last_reviewed_at: now,
            next_due_at: now + interval_for(new_box),
            success_streak: new_streak,
        }
    }

    /// Items never reviewed are always due.
    pub fn is_due(&self, record: Option<&ReviewRecord>) -> bool {
        match record {
            Some(r) => r.next_due_at <= self.clock.now(),
            None => true,
        }
    }

    /// Due subset of `item_ids`, in the given order.
    pub fn filter_due<S: AsRef<str>>(
        &self,
        item_ids: &[S],
        records: &HashMap<String, ReviewRecord>,
    ) -> Vec<String> {
        let now = self.clock.now();
        item_ids
            .iter()
            .map(AsRef::as_ref)
            .filter(|id| records.get(*id).map_or(true, |r| r.next_due_at <= now))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{DateTime, TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, 8, 30, 0).unwrap()
    }

    fn record_in(leitner_box: u8, streak: u32) -> ReviewRecord {
        ReviewRecord {
            item_id: "g1".to_string(),
            leitner_box: LeitnerBox::new(leitner_box).unwrap(),
            last_reviewed_at: start() - Duration::days(10),
            next_due_at: start() - Duration::days(1),
            success_streak: streak,
        }
    }

    #[test]
    fn initialize_starts_in_first_box() {
        let scheduler = Scheduler::new(FixedClock::new(start()));
        let record = scheduler.initialize("card1");
        assert_eq!(record.item_id, "card1");
        assert_eq!(record.leitner_box, LeitnerBox::FIRST);
        assert_eq!(record.success_streak, 0);
        assert_eq!(record.last_reviewed_at, start());
        assert_eq!(record.next_due_at, start() + Duration::days(1));
    }

    #[test]
    fn initialize_twice_yields_equivalent_records() {
        let scheduler = Scheduler::new(FixedClock::new(start()));
        assert_eq!(scheduler.initialize("x"), scheduler.initialize("x"));
    }

    #[test]
    fn correct_answer_promotes_one_box() {
        let scheduler = Scheduler::new(FixedClock::new(start()));
        for b in 1..=5u8 {
            let updated = scheduler.record_outcome(&record_in(b, 2), true);
            assert_eq!(updated.leitner_box.value(), (b + 1).min(5));
            assert_eq!(updated.success_streak, 3);
            assert_eq!(updated.last_reviewed_at, start());
        }
    }

    #[test]
    fn wrong_answer_resets_to_first_box() {
        let scheduler = Scheduler::new(FixedClock::new(start()));
        for b in 1..=5u8 {
            let updated = scheduler.record_outcome(&record_in(b, 5), false);
            assert_eq!(updated.leitner_box, LeitnerBox::FIRST);
            assert_eq!(updated.success_streak, 0);
            assert_eq!(updated.next_due_at - updated.last_reviewed_at, Duration::days(1));
        }
    }

    #[test]
    fn interval_matches_box_table() {
        let scheduler = Scheduler::new(FixedClock::new(start()));
        let expected = [(1u8, 3i64), (2, 7), (3, 14), (4, 30), (5, 30)];
        for (from, days) in expected {
            let updated = scheduler.record_outcome(&record_in(from, 0), true);
            assert_eq!(updated.next_due_at - updated.last_reviewed_at, Duration::days(days));
        }
    }

    #[test]
    fn ceiling_holds_under_repeated_success() {
        let clock = FixedClock::new(start());
        let scheduler = Scheduler::new(&clock);
        let mut record = record_in(5, 0);
        for _ in 0..10 {
            clock.advance(Duration::days(31));
            record = scheduler.record_outcome(&record, true);
            assert_eq!(record.leitner_box, LeitnerBox::LAST);
            assert_eq!(record.next_due_at, clock.now() + Duration::days(30));
        }
        assert_eq!(record.success_streak, 10);
    }

    #[test]
    fn unknown_items_are_due() {
        let scheduler = Scheduler::new(FixedClock::new(start()));
        assert!(scheduler.is_due(None));
    }

    #[test]
    fn due_exactly_at_next_due_time() {
        let clock = FixedClock::new(start());
        let scheduler = Scheduler::new(&clock);
        let record = scheduler.initialize("g1");
        assert!(!scheduler.is_due(Some(&record)));
        clock.advance(Duration::days(1));
        assert!(scheduler.is_due(Some(&record)));
    }

    #[test]
    fn filter_due_preserves_order_and_skips_future_items() {
        let scheduler = Scheduler::new(FixedClock::new(start()));
        let mut a = record_in(2, 1);
        a.item_id = "a".into();
        a.next_due_at = start() - Duration::days(1);
        let mut b = record_in(3, 2);
        b.item_id = "b".into();
        b.next_due_at = start() + Duration::days(1);

        let records: HashMap<String, ReviewRecord> =
            [a, b].into_iter().map(|r| (r.item_id.clone(), r)).collect();

        let due = scheduler.filter_due(&["a", "b", "c"], &records);
        assert_eq!(due, vec!["a".to_string(), "c".to_string()]);
    }
}
