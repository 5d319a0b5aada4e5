//! Weekly completion rate.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashSet;

use crate::goal::{Habit, HabitCompletion};

/// Monday and Sunday of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = i64::from(date.weekday().num_days_from_monday());
    let monday = date - Duration::days(offset);
    (monday, monday + Duration::days(6))
}

/// Percentage of expected completions achieved in the week containing `week_of`.
///
/// Only active habits are expected; each daily habit expects 7 completions
/// and each weekly habit 1. The result is not clamped, so over-completion
/// reads above 100.
pub fn weekly_completion_rate(
    habits: &[Habit],
    completions: &[HabitCompletion],
    week_of: NaiveDate,
) -> f64 {
    let active: Vec<&Habit> = habits.iter().filter(|h| h.is_active()).collect();
    let expected: u32 = active.iter().map(|h| h.frequency.expected_per_week()).sum();
    if expected == 0 {
        return 0.0;
    }

    let active_ids: HashSet<&str> = active.iter().map(|h| h.id.as_str()).collect();
    let (monday, sunday) = week_bounds(week_of);
    let achieved = completions
        .iter()
        .filter(|c| c.completed)
        .filter(|c| c.date >= monday && c.date <= sunday)
        .filter(|c| active_ids.contains(c.habit_id.as_str()))
        .count();

    achieved as f64 / f64::from(expected) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{HabitFrequency, HabitStatus};

    // 2025-06-02 is a Monday
    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn habit(id: &str, frequency: HabitFrequency) -> Habit {
        let mut h = Habit::new("g1", "u1", id, frequency);
        h.id = id.to_string();
        h
    }

    #[test]
    fn test_week_bounds() {
        assert_eq!(week_bounds(day(4)), (day(2), day(8)));
        assert_eq!(week_bounds(day(2)), (day(2), day(8)));
        assert_eq!(week_bounds(day(8)), (day(2), day(8)));
    }

    #[test]
    fn test_full_week_of_daily_habit_is_100() {
        let habits = [habit("h1", HabitFrequency::Daily)];
        let completions: Vec<_> = (2..=8).map(|d| HabitCompletion::new("h1", "u1", day(d))).collect();
        assert_eq!(weekly_completion_rate(&habits, &completions, day(5)), 100.0);
    }

    #[test]
    fn test_no_completions_is_zero() {
        let habits = [habit("h1", HabitFrequency::Daily)];
        assert_eq!(weekly_completion_rate(&habits, &[], day(5)), 0.0);
    }

    #[test]
    fn test_over_completion_is_not_clamped() {
        let habits = [habit("h1", HabitFrequency::Daily)];
        let mut completions: Vec<_> = (2..=8).map(|d| HabitCompletion::new("h1", "u1", day(d))).collect();
        completions.push(HabitCompletion::new("h1", "u1", day(3)));

        let rate = weekly_completion_rate(&habits, &completions, day(2));
        assert!(rate > 100.0);
        assert!((rate - 800.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_active_habits_is_zero() {
        let mut paused = habit("h1", HabitFrequency::Daily);
        paused.status = HabitStatus::Paused;
        let completions = [HabitCompletion::new("h1", "u1", day(3))];
        assert_eq!(weekly_completion_rate(&[paused], &completions, day(3)), 0.0);
        assert_eq!(weekly_completion_rate(&[], &[], day(3)), 0.0);
    }

    #[test]
    fn test_mixed_frequencies_and_out_of_week_records() {
        let habits = [
            habit("daily", HabitFrequency::Daily),
            habit("weekly", HabitFrequency::Weekly),
        ];
        let completions = [
            HabitCompletion::new("daily", "u1", day(2)),
            HabitCompletion::new("daily", "u1", day(3)),
            HabitCompletion::new("weekly", "u1", day(4)),
            // previous and next week
            HabitCompletion::new("daily", "u1", day(1)),
            HabitCompletion::new("daily", "u1", day(9)),
        ];
        let rate = weekly_completion_rate(&habits, &completions, day(6));
        assert!((rate - 3.0 / 8.0 * 100.0).abs() < 1e-9);
    }
}
