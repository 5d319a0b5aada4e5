//! Goal domain module.
//!
//! Identity-based goals own micro-habits; habits accumulate dated completions.

mod habit;
mod model;

pub use habit::{
    Habit, HabitCompletion, HabitCompletionPatch, HabitFrequency, HabitPatch, HabitStatus,
};
pub use model::{Goal, GoalPatch, GoalStatus};
