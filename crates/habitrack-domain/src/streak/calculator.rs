use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;

use super::types::{Frequency, StreakSnapshot};
use crate::shared::dates::week_start;

/// Pure streak computation over a completion history.
///
/// The snapshot is always recomputed from the full history, so inserting,
/// deleting or backfilling a completion in any order yields the same result
/// as if the history had been written in date order.
pub struct StreakCalculator;

impl StreakCalculator {
    /// Compute current and best streaks as of `as_of`.
    ///
    /// Dates after `as_of` are ignored and duplicates collapse. The current
    /// streak is anchored at the `as_of` period, or at the period before it
    /// when the `as_of` period has no completion yet (grace window).
    pub fn compute<I>(
        completion_dates: I,
        frequency: Frequency,
        as_of: NaiveDate,
    ) -> StreakSnapshot
    where
        I: IntoIterator<Item = NaiveDate>,
    {
        let dates: BTreeSet<NaiveDate> = completion_dates
            .into_iter()
            .filter(|d| *d <= as_of)
            .collect();

        let Some(last_completion_date) = dates.last().copied() else {
            return StreakSnapshot::empty();
        };

        let (periods, step, anchor): (BTreeSet<NaiveDate>, Duration, NaiveDate) = match frequency {
            Frequency::Daily => (dates, Duration::days(1), as_of),
            Frequency::Weekly => (
                dates.iter().copied().map(week_start).collect(),
                Duration::days(7),
                week_start(as_of),
            ),
        };

        // Weekly streaks report the Monday of the latest completed week
        let last_completion_date = match frequency {
            Frequency::Daily => last_completion_date,
            Frequency::Weekly => week_start(last_completion_date),
        };

        let current_streak = current_run(&periods, anchor, step);
        let best_streak = longest_run(&periods, step);

        StreakSnapshot {
            current_streak,
            best_streak,
            last_completion_date: Some(last_completion_date),
        }
    }
}

fn current_run(periods: &BTreeSet<NaiveDate>, anchor: NaiveDate, step: Duration) -> u32 {
    let start = if periods.contains(&anchor) {
        anchor
    } else {
        match anchor.checked_sub_signed(step) {
            Some(previous) if periods.contains(&previous) => previous,
            _ => return 0,
        }
    };

    let mut count = 0;
    let mut cursor = Some(start);
    while let Some(period) = cursor.filter(|p| periods.contains(p)) {
        count += 1;
        cursor = period.checked_sub_signed(step);
    }
    count
}

fn longest_run(periods: &BTreeSet<NaiveDate>, step: Duration) -> u32 {
    let mut best = 0;
    let mut run = 0;
    let mut newer: Option<NaiveDate> = None;

    for period in periods.iter().rev() {
        run = match newer {
            Some(newer) if newer - *period == step => run + 1,
            _ => 1,
        };
        best = best.max(run);
        newer = Some(*period);
    }
    best
}
