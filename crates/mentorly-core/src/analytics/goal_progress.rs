//! Habit roll-up for a single goal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::completion_rate::{week_bounds, weekly_completion_rate};
use super::round1;
use crate::goal::{Goal, Habit, HabitCompletion};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: String,
    pub total_habits: usize,
    pub active_habits: usize,
    /// Completions of this goal's habits inside the week
    pub completions_this_week: usize,
    /// Weekly completion rate restricted to this goal's habits, one decimal
    pub weekly_completion_rate: f64,
}

pub fn goal_progress(
    goal: &Goal,
    habits: &[Habit],
    completions: &[HabitCompletion],
    week_of: NaiveDate,
) -> GoalProgress {
    let own: Vec<Habit> = habits
        .iter()
        .filter(|h| h.goal_id == goal.id)
        .cloned()
        .collect();
    let (monday, sunday) = week_bounds(week_of);

    let completions_this_week = completions
        .iter()
        .filter(|c| c.completed && c.date >= monday && c.date <= sunday)
        .filter(|c| own.iter().any(|h| h.id == c.habit_id))
        .count();

    GoalProgress {
        goal_id: goal.id.clone(),
        total_habits: own.len(),
        active_habits: own.iter().filter(|h| h.is_active()).count(),
        completions_this_week,
        weekly_completion_rate: round1(weekly_completion_rate(&own, completions, week_of)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{HabitFrequency, HabitStatus};

    #[test]
    fn test_only_goal_habits_count() {
        let goal = Goal::new("u1", "Become a runner");
        let run = Habit::new(&goal.id, "u1", "Run", HabitFrequency::Weekly);
        let mut stretch = Habit::new(&goal.id, "u1", "Stretch", HabitFrequency::Daily);
        stretch.status = HabitStatus::Paused;
        let other = Habit::new("other-goal", "u1", "Read", HabitFrequency::Daily);

        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let completions = [
            HabitCompletion::new(&run.id, "u1", monday),
            HabitCompletion::new(&other.id, "u1", monday),
        ];

        let progress = goal_progress(&goal, &[run, stretch, other], &completions, monday);
        assert_eq!(progress.total_habits, 2);
        assert_eq!(progress.active_habits, 1);
        assert_eq!(progress.completions_this_week, 1);
        assert_eq!(progress.weekly_completion_rate, 100.0);
    }

    #[test]
    fn test_goal_without_habits() {
        let goal = Goal::new("u1", "Write more");
        let progress = goal_progress(&goal, &[], &[], NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
        assert_eq!(progress.total_habits, 0);
        assert_eq!(progress.weekly_completion_rate, 0.0);
    }
}
