#[cfg(test)]
mod tests {
    use super::super::*;
    use chrono::{Duration, Local, NaiveDate};
    use serde_json::{json, Value};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    const TODAY: &str = "2024-01-01";

    fn norm(raw: Value) -> Schedule {
        normalize(Some(&raw), d(TODAY))
    }

    #[test]
    fn test_missing_or_malformed_payload_is_all_time() {
        assert_eq!(normalize(None, d(TODAY)), Schedule::AllTime);
        assert_eq!(norm(Value::Null), Schedule::AllTime);
        assert_eq!(norm(json!("weekdays")), Schedule::AllTime);
        assert_eq!(norm(json!([1, 2, 3])), Schedule::AllTime);
        assert_eq!(norm(json!({})), Schedule::AllTime);
        assert_eq!(norm(json!({ "mode": null })), Schedule::AllTime);
        assert_eq!(norm(json!({ "mode": "monthly" })), Schedule::AllTime);
        assert_eq!(norm(json!({ "mode": 7 })), Schedule::AllTime);
    }

    #[test]
    fn test_all_time_ignores_other_fields() {
        let schedule = norm(json!({ "mode": "all_time", "start": "2020-01-01", "days": [1] }));
        assert_eq!(schedule, Schedule::AllTime);
        assert_eq!(schedule.to_value(), json!({ "mode": "all_time" }));
    }

    #[test]
    fn test_days_21_is_anchored_at_today() {
        let schedule = norm(json!({ "mode": "days_21", "start": "2023-05-01", "end": "2023-05-03" }));
        assert_eq!(
            schedule,
            Schedule::Days21 {
                start: d("2024-01-01"),
                end: d("2024-01-21"),
            }
        );
        assert!(schedule.occurs_on(d("2024-01-21")));
        assert!(!schedule.occurs_on(d("2024-01-22")));
    }

    #[test]
    fn test_date_range_end_field_fallbacks() {
        let by_end = norm(json!({ "mode": "date_range", "end": "2024-02-01" }));
        let by_to = norm(json!({ "mode": "date_range", "to": "2024-02-01" }));
        let by_until = norm(json!({ "mode": "date_range", "until": "2024-02-01T09:00:00" }));
        let expected = Schedule::DateRange {
            start: d(TODAY),
            end: d("2024-02-01"),
        };
        assert_eq!(by_end, expected);
        assert_eq!(by_to, expected);
        assert_eq!(by_until, expected);

        // unparseable `end` falls through to `to`
        let fallthrough = norm(json!({ "mode": "date_range", "end": "soon", "to": "2024-02-01" }));
        assert_eq!(fallthrough, expected);
    }

    #[test]
    fn test_date_range_missing_end_is_today() {
        let schedule = norm(json!({ "mode": "date_range" }));
        assert_eq!(
            schedule,
            Schedule::DateRange {
                start: d(TODAY),
                end: d(TODAY),
            }
        );
    }

    #[test]
    fn test_date_range_end_before_today_clamps() {
        let today = d(TODAY);
        let schedule = norm(json!({ "mode": "date_range", "end": "2023-12-01" }));
        assert_eq!(
            schedule,
            Schedule::DateRange {
                start: today,
                end: today,
            }
        );
        assert!(is_due_as_of(&schedule, today, today));
        assert!(!is_due_as_of(&schedule, today + Duration::days(1), today));
    }

    #[test]
    fn test_weekdays_coercion_dedup_and_sort() {
        let schedule = norm(json!({
            "mode": "weekdays",
            "days": [5, "3", 1, 3, 0, 8, -1, "x", null, 2.9, " 7 ", true]
        }));
        assert_eq!(
            schedule,
            Schedule::Weekdays {
                start: d(TODAY),
                days: vec![1, 2, 3, 5, 7],
            }
        );
    }

    #[test]
    fn test_weekdays_non_array_is_empty() {
        let schedule = norm(json!({ "mode": "weekdays", "days": "135" }));
        assert_eq!(
            schedule,
            Schedule::Weekdays {
                start: d(TODAY),
                days: vec![],
            }
        );
    }

    #[test]
    fn test_weekdays_mon_wed_fri() {
        // 2024-01-01 is a Monday
        let today = d("2024-01-01");
        let schedule = normalize(Some(&json!({ "mode": "weekdays", "days": [1, 3, 5] })), today);

        for due in ["2024-01-01", "2024-01-03", "2024-01-05", "2024-01-08"] {
            assert!(is_due_as_of(&schedule, d(due), today), "{due} should be due");
        }
        for not_due in ["2024-01-02", "2024-01-06", "2024-01-07"] {
            assert!(!is_due_as_of(&schedule, d(not_due), today), "{not_due} should not be due");
        }
    }

    #[test]
    fn test_specific_dates_drop_past_and_duplicates() {
        let schedule = norm(json!({
            "mode": "specific_dates",
            "dates": ["2024-01-10", "2023-12-31", "2024-01-01", "2024-01-10", "bogus", 3]
        }));
        assert_eq!(
            schedule,
            Schedule::SpecificDates {
                start: d(TODAY),
                dates: vec![d("2024-01-01"), d("2024-01-10")],
            }
        );
    }

    #[test]
    fn test_specific_dates_fall_back_to_days_field() {
        let missing = norm(json!({ "mode": "specific_dates", "days": ["2024-01-05"] }));
        let empty = norm(json!({ "mode": "specific_dates", "dates": [], "days": ["2024-01-05"] }));
        let expected = Schedule::SpecificDates {
            start: d(TODAY),
            dates: vec![d("2024-01-05")],
        };
        assert_eq!(missing, expected);
        assert_eq!(empty, expected);
    }

    #[test]
    fn test_specific_dates_membership() {
        let today = d(TODAY);
        let schedule = norm(json!({ "mode": "specific_dates", "dates": ["2024-01-05"] }));
        assert!(is_due_as_of(&schedule, d("2024-01-05"), today));
        assert!(!is_due_as_of(&schedule, d("2024-01-06"), today));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let today = d(TODAY);
        let payloads = vec![
            Value::Null,
            json!({ "mode": "all_time" }),
            json!({ "mode": "days_21" }),
            json!({ "mode": "date_range", "until": "2024-03-01" }),
            json!({ "mode": "date_range", "end": "2020-01-01" }),
            json!({ "mode": "weekdays", "days": [7, "2", 2, 9] }),
            json!({ "mode": "specific_dates", "dates": ["2024-02-01", "2023-01-01"] }),
            json!({ "mode": "specific_dates", "days": ["2024-02-01"] }),
            json!({ "mode": "nonsense" }),
        ];

        for raw in payloads {
            let once = normalize(Some(&raw), today);
            let twice = normalize(Some(&once.to_value()), today);
            assert_eq!(once, twice, "not idempotent for {raw}");
        }
    }

    #[test]
    fn test_normalized_wire_form() {
        let schedule = norm(json!({ "mode": "weekdays", "days": [3, 1] }));
        assert_eq!(
            schedule.to_value(),
            json!({ "mode": "weekdays", "start": "2024-01-01", "days": [1, 3] })
        );

        let schedule = norm(json!({ "mode": "days_21" }));
        assert_eq!(
            schedule.to_value(),
            json!({ "mode": "days_21", "start": "2024-01-01", "end": "2024-01-21" })
        );
    }

    #[test]
    fn test_day_before_start_is_never_due() {
        let today = d(TODAY);
        let schedule = norm(json!({ "mode": "weekdays", "days": [1, 2, 3, 4, 5, 6, 7] }));
        assert!(!is_due_as_of(&schedule, d("2023-12-31"), today));
        assert!(is_due_as_of(&schedule, today, today));
    }

    #[test]
    fn test_is_due_accepts_raw_payloads() {
        let today = d(TODAY);
        assert!(is_due_as_of(&Value::Null, d("1999-01-01"), today));
        assert!(is_due_as_of(&None::<Value>, d("1999-01-01"), today));
        assert!(is_due_as_of(&json!({ "mode": 42 }), d("1999-01-01"), today));
        assert!(is_due_as_of(
            &Some(json!({ "mode": "weekdays", "days": [1] })),
            today,
            today
        ));
    }

    #[test]
    fn test_is_due_renormalizes_stale_start_to_now() {
        let today = Local::now().date_naive();
        let stale = Schedule::DateRange {
            start: today - Duration::days(30),
            end: today + Duration::days(30),
        };
        // the stored start is ignored; "now" becomes the lower bound
        assert!(!is_due(&stale, today - Duration::days(1)));
        assert!(is_due(&stale, today));
    }

    #[test]
    fn test_days_21_end_clamps_at_calendar_maximum() {
        let schedule = normalize(Some(&json!({ "mode": "days_21" })), NaiveDate::MAX);
        assert_eq!(
            schedule,
            Schedule::Days21 {
                start: NaiveDate::MAX,
                end: NaiveDate::MAX,
            }
        );
        assert!(is_due_as_of(&schedule, NaiveDate::MAX, NaiveDate::MAX));
    }

    #[test]
    fn test_is_due_never_panics_on_odd_dates() {
        let today = d(TODAY);
        let schedules = vec![
            norm(json!({ "mode": "days_21" })),
            norm(json!({ "mode": "weekdays", "days": [] })),
            norm(json!({ "mode": "specific_dates" })),
        ];
        for schedule in schedules {
            for day in [NaiveDate::MIN, NaiveDate::MAX, today] {
                let _ = is_due_as_of(&schedule, day, today);
                let _ = is_due_as_of(&schedule, day, NaiveDate::MAX);
                let _ = is_due_as_of(&schedule, day, NaiveDate::MIN);
            }
        }
    }
}
