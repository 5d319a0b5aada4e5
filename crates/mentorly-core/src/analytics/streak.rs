//! Cross-habit streaks.
//!
//! A day counts when any habit was completed on it.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::goal::HabitCompletion;

/// Completed days up to and including `today`; future-dated records are ignored.
fn completed_dates(completions: &[HabitCompletion], today: NaiveDate) -> BTreeSet<NaiveDate> {
    completions
        .iter()
        .filter(|c| c.completed && c.date <= today)
        .map(|c| c.date)
        .collect()
}

/// Consecutive completed days ending today, or ending yesterday when today
/// has no completion yet.
pub fn current_streak(completions: &[HabitCompletion], today: NaiveDate) -> u32 {
    let dates = completed_dates(completions, today);

    let anchor = if dates.contains(&today) {
        today
    } else {
        match today.pred_opt() {
            Some(yesterday) => yesterday,
            None => return 0,
        }
    };

    let mut streak = 0;
    let mut day = Some(anchor);
    while let Some(current) = day {
        if !dates.contains(&current) {
            break;
        }
        streak += 1;
        day = current.pred_opt();
    }
    streak
}

/// Longest run of consecutive completed days up to `today`.
pub fn longest_streak(completions: &[HabitCompletion], today: NaiveDate) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut previous: Option<NaiveDate> = None;

    for date in completed_dates(completions, today) {
        run = match previous.and_then(|p| p.succ_opt()) {
            Some(next) if next == date => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
    }

    fn done(habit: &str, date: NaiveDate) -> HabitCompletion {
        HabitCompletion::new(habit, "u1", date)
    }

    #[test]
    fn test_empty_history_has_no_streak() {
        assert_eq!(current_streak(&[], day(10)), 0);
        assert_eq!(longest_streak(&[], day(10)), 0);
    }

    #[test]
    fn test_only_today() {
        assert_eq!(current_streak(&[done("h1", day(10))], day(10)), 1);
    }

    #[test]
    fn test_three_consecutive_days() {
        let history = [done("h1", day(10)), done("h1", day(9)), done("h1", day(8))];
        assert_eq!(current_streak(&history, day(10)), 3);
    }

    #[test]
    fn test_gap_breaks_streak() {
        let history = [done("h1", day(10)), done("h1", day(8))];
        assert_eq!(current_streak(&history, day(10)), 1);
    }

    #[test]
    fn test_streak_counts_from_yesterday_when_today_is_open() {
        let history = [done("h1", day(9)), done("h1", day(8))];
        assert_eq!(current_streak(&history, day(10)), 2);
    }

    #[test]
    fn test_streak_spans_habits() {
        let history = [done("h1", day(10)), done("h2", day(9)), done("h3", day(8))];
        assert_eq!(current_streak(&history, day(10)), 3);
    }

    #[test]
    fn test_unchecked_records_do_not_count() {
        let mut undone = done("h1", day(9));
        undone.completed = false;
        let history = [done("h1", day(10)), undone, done("h1", day(8))];
        assert_eq!(current_streak(&history, day(10)), 1);
    }

    #[test]
    fn test_duplicate_dates_count_once() {
        let history = [done("h1", day(10)), done("h2", day(10))];
        assert_eq!(current_streak(&history, day(10)), 1);
    }

    #[test]
    fn test_longest_streak_finds_best_run() {
        let history = [
            done("h1", day(1)),
            done("h1", day(2)),
            done("h1", day(3)),
            done("h1", day(4)),
            done("h1", day(7)),
            done("h1", day(8)),
        ];
        assert_eq!(longest_streak(&history, day(8)), 4);
        assert_eq!(current_streak(&history, day(8)), 2);
    }

    #[test]
    fn test_future_dated_completions_are_ignored() {
        let history = [done("h1", day(11)), done("h1", day(10))];
        assert_eq!(current_streak(&history, day(10)), 1);
        assert_eq!(longest_streak(&history, day(10)), 1);

        let ahead = [done("h1", day(12)), done("h1", day(13)), done("h1", day(14))];
        assert_eq!(current_streak(&ahead, day(10)), 0);
        assert_eq!(longest_streak(&ahead, day(10)), 0);
    }
}
