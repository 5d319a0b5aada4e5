//! Derived metrics.
//!
//! Pure functions over already-fetched records. None of them can fail: an
//! empty input yields the zero, empty or `None` result.
//!
//! # Module Structure
//!
//! - `streak`: consecutive days with at least one habit completion
//! - `completion_rate`: Monday-Sunday completion percentage
//! - `mentor_stats`: rating, volume and feedback keywords for one mentor
//! - `mentee_summary`: per-mentee roll-up of a mentor's sessions
//! - `recommendation`: heuristic mentor ranking for a mentee
//! - `goal_progress`: habit roll-up for one goal

mod completion_rate;
mod goal_progress;
mod keywords;
mod mentee_summary;
mod mentor_stats;
mod recommendation;
mod streak;

pub use completion_rate::{week_bounds, weekly_completion_rate};
pub use goal_progress::{GoalProgress, goal_progress};
pub use keywords::extract_keywords;
pub use mentee_summary::{MenteeSummary, mentee_summaries};
pub use mentor_stats::{MentorStats, mentor_stats};
pub use recommendation::{MentorQuery, ScoredMentor, recommend_mentors};
pub use streak::{current_streak, longest_streak};

/// Rounds to one decimal place, the precision every displayed figure uses.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
