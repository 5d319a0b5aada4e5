//! Per-mentee roll-up of a mentor's sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::round1;
use crate::session::{Session, SessionFeedback, SessionStatus};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenteeSummary {
    pub mentee_id: String,
    pub total_sessions: usize,
    pub completed_sessions: usize,
    /// Mean rating this mentee gave, one decimal
    pub average_rating: Option<f64>,
    /// Start of the most recent completed session
    pub last_completed_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct Tally {
    total: usize,
    completed: usize,
    rating_sum: u32,
    rating_count: u32,
    last_completed_at: Option<DateTime<Utc>>,
}

/// One summary per distinct mentee appearing in `sessions`.
///
/// Callers needing a particular order should sort the result themselves.
pub fn mentee_summaries(
    sessions: &[Session],
    feedbacks: &[SessionFeedback],
) -> Vec<MenteeSummary> {
    let mut tallies: BTreeMap<&str, Tally> = BTreeMap::new();

    for session in sessions {
        let tally = tallies.entry(session.mentee_id.as_str()).or_default();
        tally.total += 1;
        if session.status == SessionStatus::Completed {
            tally.completed += 1;
            tally.last_completed_at = tally.last_completed_at.max(Some(session.scheduled_at));
        }
    }

    for feedback in feedbacks {
        if let Some(tally) = tallies.get_mut(feedback.mentee_id.as_str()) {
            tally.rating_sum += u32::from(feedback.rating);
            tally.rating_count += 1;
        }
    }

    tallies
        .into_iter()
        .map(|(mentee_id, tally)| MenteeSummary {
            mentee_id: mentee_id.to_string(),
            total_sessions: tally.total,
            completed_sessions: tally.completed,
            average_rating: (tally.rating_count > 0)
                .then(|| round1(f64::from(tally.rating_sum) / f64::from(tally.rating_count))),
            last_completed_at: tally.last_completed_at,
        })
        .collect()
}
