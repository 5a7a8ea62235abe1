use chrono::{Days, NaiveDate};
use std::collections::HashSet;

use crate::application::dtos::{WeekDayDto, WeekOverviewDto};
use habitrack_domain::check_in::CheckIn;
use habitrack_domain::habit::Habit;
use habitrack_domain::schedule::is_due_as_of;
use habitrack_domain::shared::dates::{format_date, iso_weekday};

/// Per day of the week starting at `monday`: habits due that day and how many
/// of those have a counting check-in.
pub(super) fn build(
    monday: NaiveDate,
    habits: &[Habit],
    check_ins: &[CheckIn],
    today: NaiveDate,
) -> WeekOverviewDto {
    let done: HashSet<(&str, NaiveDate)> = check_ins
        .iter()
        .filter(|c| c.status().counts_toward_streak())
        .map(|c| (c.habit_id().as_str(), c.date()))
        .collect();

    // The final week of the calendar is cut short at `NaiveDate::MAX`
    let days = (0..7)
        .map_while(|offset| monday.checked_add_days(Days::new(offset)))
        .map(|day| {
            let due: Vec<&Habit> = habits
                .iter()
                .filter(|h| is_due_as_of(h.schedule(), day, today))
                .collect();
            let completed = due
                .iter()
                .filter(|h| done.contains(&(h.id().as_str(), day)))
                .count() as u32;
            let scheduled = due.len() as u32;

            WeekDayDto {
                date: format_date(day),
                weekday: iso_weekday(day),
                scheduled,
                completed,
                is_complete: scheduled > 0 && completed == scheduled,
            }
        })
        .collect();

    WeekOverviewDto {
        week_start: format_date(monday),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use habitrack_domain::check_in::CheckInStatus;
    use habitrack_domain::habit::HabitDetails;
    use habitrack_domain::shared::UserId;
    use habitrack_domain::streak::Frequency;
    use serde_json::{json, Value};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn habit(user: &UserId, raw: Option<Value>, today: NaiveDate) -> Habit {
        Habit::new(
            user.clone(),
            "Read".to_string(),
            "build".to_string(),
            Frequency::Daily,
            raw.as_ref(),
            Utc::now(),
            HabitDetails::default(),
            0,
            today,
        )
        .unwrap()
    }

    #[test]
    fn test_week_with_all_time_and_weekday_habits() {
        // Monday 2024-01-01, viewed on that same Monday
        let monday = d("2024-01-01");
        let user = UserId::new();
        let every_day = habit(&user, None, monday);
        let mon_wed = habit(
            &user,
            Some(json!({"mode": "weekdays", "days": [1, 3]})),
            monday,
        );

        let check_ins = vec![
            CheckIn::new(user.clone(), every_day.id().clone(), monday, CheckInStatus::completed(), None),
            CheckIn::new(user.clone(), mon_wed.id().clone(), monday, CheckInStatus::completed(), None),
            CheckIn::new(user.clone(), every_day.id().clone(), d("2024-01-02"), CheckInStatus::skipped(), None),
            CheckIn::new(user.clone(), mon_wed.id().clone(), d("2024-01-03"), CheckInStatus::completed(), None),
        ];

        let overview = build(monday, &[every_day, mon_wed], &check_ins, monday);

        assert_eq!(overview.week_start, "2024-01-01");
        assert_eq!(overview.days.len(), 7);

        let mon = &overview.days[0];
        assert_eq!(mon.weekday, 1);
        assert_eq!((mon.scheduled, mon.completed), (2, 2));
        assert!(mon.is_complete);

        // skipped does not complete the day
        let tue = &overview.days[1];
        assert_eq!((tue.scheduled, tue.completed), (1, 0));
        assert!(!tue.is_complete);

        let wed = &overview.days[2];
        assert_eq!((wed.scheduled, wed.completed), (2, 1));
        assert!(!wed.is_complete);

        let sun = &overview.days[6];
        assert_eq!(sun.date, "2024-01-07");
        assert_eq!(sun.weekday, 7);
        assert_eq!(sun.scheduled, 1);
    }

    #[test]
    fn test_no_habits_is_never_complete() {
        let overview = build(d("2024-01-01"), &[], &[], d("2024-01-01"));
        assert!(overview.days.iter().all(|day| day.scheduled == 0 && !day.is_complete));
    }

    #[test]
    fn test_last_week_of_calendar_is_truncated() {
        let monday = habitrack_domain::shared::dates::week_start(NaiveDate::MAX);
        let overview = build(monday, &[], &[], NaiveDate::MAX);
        assert!(!overview.days.is_empty());
        assert!(overview.days.len() <= 7);
        assert_eq!(
            overview.days.last().map(|day| day.date.clone()),
            Some(format_date(NaiveDate::MAX))
        );
    }
}
