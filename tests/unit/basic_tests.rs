/// Dashboard scenarios exercised through the public API
use habit_progress::*;

fn day(s: &str) -> DayId {
    s.parse().expect("valid day")
}

fn done(habit: &str, date: &str) -> CompletionRecord {
    CompletionRecord::parse(habit, date, true).expect("valid record")
}

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_partial_week_rate_and_streaks() {
        let config = EngineConfig::default();
        let range = range_for(ViewMode::Week, day("2024-01-01"), &config).unwrap();
        let days: Vec<String> = range.iter().map(ToString::to_string).collect();
        assert_eq!(days.first().map(String::as_str), Some("2024-01-01"));
        assert_eq!(days.last().map(String::as_str), Some("2024-01-07"));

        let habits = vec![Habit::new("h1", "Meditate")];
        let index = build_index(&[
            done("h1", "2024-01-01"),
            done("h1", "2024-01-02"),
            done("h1", "2024-01-03"),
        ]);
        let h1 = HabitId::from("h1");

        assert_eq!(completion_rate(&range, &habits, &index), 43);
        assert_eq!(current_streak(&h1, day("2024-01-03"), &index), 3);
        assert_eq!(current_streak(&h1, day("2024-01-07"), &index), 0);
    }

    #[test]
    fn test_leap_and_common_february() {
        let config = EngineConfig::default();
        assert_eq!(range_for(ViewMode::Month, day("2024-02-15"), &config).unwrap().len(), 29);
        assert_eq!(range_for(ViewMode::Month, day("2023-02-15"), &config).unwrap().len(), 28);
    }

    #[test]
    fn test_two_habits_half_complete() {
        let mode = ViewMode::Custom { start: day("2024-06-01"), end: day("2024-06-10") };
        let range = range_for(mode, day("2024-06-01"), &EngineConfig::default()).unwrap();
        assert_eq!(range.len(), 10);

        let records: Vec<CompletionRecord> = range.iter().map(|d| CompletionRecord::new("a", *d, true)).collect();
        let index = build_index(&records);
        let habits = vec![Habit::new("a", "A"), Habit::new("b", "B")];

        assert_eq!(completion_rate(&range, &habits, &index), 50);
    }

    #[test]
    fn test_uncompleting_a_day_removes_it() {
        let index = build_index(&[
            CompletionRecord::parse("h1", "2024-03-01", true).unwrap(),
            CompletionRecord::parse("h1", "2024-03-01", false).unwrap(),
        ]);
        assert!(!index.is_completed(&HabitId::from("h1"), day("2024-03-01")));
        assert_eq!(current_streak(&HabitId::from("h1"), day("2024-03-01"), &index), 0);
    }

    #[test]
    fn test_custom_range_backwards_is_rejected() {
        let mode = ViewMode::Custom { start: day("2024-06-10"), end: day("2024-06-01") };
        let result = range_for(mode, day("2024-06-05"), &EngineConfig::default());
        assert!(matches!(result, Err(DomainError::InvalidRange { .. })));
    }

    #[test]
    fn test_malformed_dates_fail_at_the_boundary() {
        assert!(matches!("2024-13-01".parse::<DayId>(), Err(DomainError::MalformedDate(_))));
        assert!(matches!(
            CompletionRecord::parse("h1", "2023-02-29", true),
            Err(DomainError::MalformedDate(_))
        ));
    }

    #[test]
    fn test_new_user_gets_zeroes() {
        let config = EngineConfig::default();
        let range = range_for(ViewMode::AllTime, day("2024-06-01"), &config).unwrap();
        let index = build_index(&[]);

        assert_eq!(completion_rate(&range, &[], &index), 0);
        assert_eq!(period_delta(&range, &range.preceding().unwrap(), &[], &index), 0);
        assert_eq!(best_streak(&HabitId::from("h1"), &range, &index), 0);
    }

    #[test]
    fn test_week_over_week_delta() {
        let config = EngineConfig::default();
        let current = range_for(ViewMode::Week, day("2024-01-10"), &config).unwrap();
        let prior = current.preceding().unwrap();
        let habits = vec![Habit::new("h1", "Read")];
        let index = build_index(&[
            done("h1", "2024-01-01"),
            done("h1", "2024-01-02"),
            done("h1", "2024-01-08"),
        ]);

        // 1/7 this week against 2/7 last week
        assert_eq!(period_delta(&current, &prior, &habits, &index), 14 - 29);
    }

    #[test]
    fn test_shift_navigation_across_new_year() {
        let config = EngineConfig::default();
        let previous = shift(ViewMode::Month, day("2024-01-20"), Direction::Previous, &config).unwrap();
        assert_eq!(previous, day("2023-12-20"));
        assert_eq!(period_label(ViewMode::Month, previous, &config), "December 2023");
    }

    #[test]
    fn test_analytics_engine_creation() {
        let engine = AnalyticsEngine::new(EngineConfig { all_time_days: 30 });
        let range = range_for(ViewMode::AllTime, day("2024-06-30"), engine.config()).unwrap();
        assert_eq!(range.len(), 30);
    }
}
