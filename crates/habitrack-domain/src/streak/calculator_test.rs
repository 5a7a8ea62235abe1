#[cfg(test)]
mod tests {
    use super::super::*;
    use chrono::{Duration, NaiveDate};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn dates(values: &[&str]) -> Vec<NaiveDate> {
        values.iter().map(|s| d(s)).collect()
    }

    #[test]
    fn test_empty_history() {
        let snapshot = StreakCalculator::compute(Vec::new(), Frequency::Daily, d("2024-01-07"));
        assert_eq!(snapshot, StreakSnapshot::empty());
        assert_eq!(snapshot.last_completion_date, None);
    }

    #[test]
    fn test_single_completion_on_as_of() {
        let snapshot =
            StreakCalculator::compute(dates(&["2024-01-07"]), Frequency::Daily, d("2024-01-07"));
        assert_eq!(snapshot.current_streak, 1);
        assert_eq!(snapshot.best_streak, 1);
    }

    #[test]
    fn test_daily_run_ending_today() {
        let snapshot = StreakCalculator::compute(
            dates(&["2024-01-05", "2024-01-06", "2024-01-07"]),
            Frequency::Daily,
            d("2024-01-07"),
        );
        assert_eq!(
            snapshot,
            StreakSnapshot {
                current_streak: 3,
                best_streak: 3,
                last_completion_date: Some(d("2024-01-07")),
            }
        );
    }

    #[test]
    fn test_daily_broken_streak_keeps_best() {
        let snapshot = StreakCalculator::compute(
            dates(&["2024-01-01", "2024-01-02", "2024-01-05"]),
            Frequency::Daily,
            d("2024-01-07"),
        );
        assert_eq!(snapshot.current_streak, 0);
        assert_eq!(snapshot.best_streak, 2);
        assert_eq!(snapshot.last_completion_date, Some(d("2024-01-05")));
    }

    #[test]
    fn test_daily_grace_window_uses_yesterday() {
        let snapshot = StreakCalculator::compute(
            dates(&["2024-01-04", "2024-01-05", "2024-01-06"]),
            Frequency::Daily,
            d("2024-01-07"),
        );
        assert_eq!(snapshot.current_streak, 3);
        assert_eq!(snapshot.best_streak, 3);
    }

    #[test]
    fn test_daily_two_days_ago_is_broken() {
        let snapshot =
            StreakCalculator::compute(dates(&["2024-01-05"]), Frequency::Daily, d("2024-01-07"));
        assert_eq!(snapshot.current_streak, 0);
        assert_eq!(snapshot.best_streak, 1);
    }

    #[test]
    fn test_duplicates_and_order_do_not_matter() {
        let shuffled = dates(&["2024-01-07", "2024-01-05", "2024-01-06", "2024-01-07", "2024-01-05"]);
        let snapshot = StreakCalculator::compute(shuffled, Frequency::Daily, d("2024-01-07"));
        assert_eq!(snapshot.current_streak, 3);
        assert_eq!(snapshot.best_streak, 3);
    }

    #[test]
    fn test_dates_after_as_of_are_ignored() {
        let snapshot = StreakCalculator::compute(
            dates(&["2024-01-06", "2024-01-07", "2024-01-08", "2024-01-09"]),
            Frequency::Daily,
            d("2024-01-07"),
        );
        assert_eq!(snapshot.current_streak, 2);
        assert_eq!(snapshot.best_streak, 2);
        assert_eq!(snapshot.last_completion_date, Some(d("2024-01-07")));
    }

    #[test]
    fn test_backfill_revises_current_streak() {
        let as_of = d("2024-01-07");
        let before = StreakCalculator::compute(
            dates(&["2024-01-04", "2024-01-06", "2024-01-07"]),
            Frequency::Daily,
            as_of,
        );
        assert_eq!(before.current_streak, 2);

        let after = StreakCalculator::compute(
            dates(&["2024-01-04", "2024-01-05", "2024-01-06", "2024-01-07"]),
            Frequency::Daily,
            as_of,
        );
        assert_eq!(after.current_streak, 4);
        assert_eq!(after.best_streak, 4);
    }

    #[test]
    fn test_best_streak_is_monotonic_as_history_grows() {
        let as_of = d("2024-03-01");
        let history = dates(&[
            "2024-01-03", "2024-01-10", "2024-01-11", "2024-02-01", "2024-01-12", "2024-02-02",
            "2024-01-13", "2024-02-28", "2024-02-29", "2024-03-01", "2024-01-14",
        ]);

        let mut previous_best = 0;
        for n in 0..=history.len() {
            let snapshot = StreakCalculator::compute(history[..n].to_vec(), Frequency::Daily, as_of);
            assert!(snapshot.best_streak >= previous_best);
            assert!(snapshot.best_streak >= snapshot.current_streak);
            previous_best = snapshot.best_streak;
        }
        assert_eq!(previous_best, 5);
    }

    #[test]
    fn test_weekly_grace_and_gap() {
        // as_of 2024-01-17 sits in the week of Monday 2024-01-15 (W)
        let as_of = d("2024-01-17");
        let snapshot = StreakCalculator::compute(
            dates(&[
                "2024-01-16", // W
                "2024-01-10", // W-1
                "2024-01-08", // W-1 again
                "2023-12-27", // W-3
            ]),
            Frequency::Weekly,
            as_of,
        );
        assert_eq!(snapshot.current_streak, 2);
        assert_eq!(snapshot.best_streak, 2);
        assert_eq!(snapshot.last_completion_date, Some(d("2024-01-15")));
    }

    #[test]
    fn test_weekly_last_completion_is_week_start() {
        let as_of = d("2024-01-17");
        let snapshot =
            StreakCalculator::compute(dates(&["2024-01-17"]), Frequency::Weekly, as_of);
        assert_eq!(snapshot.current_streak, 1);
        assert_eq!(snapshot.last_completion_date, Some(d("2024-01-15")));

        let daily = StreakCalculator::compute(dates(&["2024-01-17"]), Frequency::Daily, as_of);
        assert_eq!(daily.last_completion_date, Some(d("2024-01-17")));
    }

    #[test]
    fn test_weekly_last_week_counts_as_current() {
        let as_of = d("2024-01-15"); // Monday, nothing done yet this week
        let snapshot = StreakCalculator::compute(
            dates(&["2024-01-12", "2024-01-03", "2023-12-25"]),
            Frequency::Weekly,
            as_of,
        );
        assert_eq!(snapshot.current_streak, 3);
        assert_eq!(snapshot.best_streak, 3);
    }

    #[test]
    fn test_weekly_run_longer_than_two_weeks() {
        let as_of = d("2024-02-05");
        let history: Vec<NaiveDate> = (0..6).map(|w| as_of - Duration::days(7 * w)).collect();
        let snapshot = StreakCalculator::compute(history, Frequency::Weekly, as_of);
        assert_eq!(snapshot.current_streak, 6);
        assert_eq!(snapshot.best_streak, 6);
    }

    #[test]
    fn test_weekly_two_weeks_ago_is_broken() {
        let as_of = d("2024-01-17");
        let snapshot =
            StreakCalculator::compute(dates(&["2024-01-03"]), Frequency::Weekly, as_of);
        assert_eq!(snapshot.current_streak, 0);
        assert_eq!(snapshot.best_streak, 1);
    }

    #[test]
    fn test_history_at_calendar_minimum() {
        let snapshot = StreakCalculator::compute(
            vec![NaiveDate::MIN],
            Frequency::Daily,
            NaiveDate::MIN,
        );
        assert_eq!(snapshot.current_streak, 1);
    }

    #[test]
    fn test_weekly_history_at_calendar_extremes() {
        let at_min =
            StreakCalculator::compute(vec![NaiveDate::MIN], Frequency::Weekly, NaiveDate::MIN);
        assert_eq!(at_min.current_streak, 1);
        assert_eq!(at_min.best_streak, 1);

        let at_max =
            StreakCalculator::compute(vec![NaiveDate::MAX], Frequency::Weekly, NaiveDate::MAX);
        assert_eq!(at_max.current_streak, 1);
    }

    #[test]
    fn test_frequency_parsing() {
        assert_eq!("weekly".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert!("monthly".parse::<Frequency>().is_err());
        assert_eq!(Frequency::from_stored("monthly"), Frequency::Daily);
    }
}
