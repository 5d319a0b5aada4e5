//! Mentor performance aggregation.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::keywords::extract_keywords;
use super::round1;
use crate::config::AnalyticsSettings;
use crate::session::{Session, SessionFeedback, SessionStatus};

/// Dashboard figures for one mentor.
///
/// `strengths` and `improvement_areas` are keyword heuristics over the
/// feedback text and should be read as hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorStats {
    /// Mean feedback rating, one decimal; 0.0 without feedback
    pub average_rating: f64,
    pub total_sessions: usize,
    pub completed_sessions: usize,
    pub total_feedbacks: usize,
    /// Non-cancelled sessions per week over the trailing window
    pub sessions_per_week: f64,
    /// Feedback received per completed session, as a percentage
    pub feedback_response_rate: f64,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
}

/// Aggregates a mentor's feedback and sessions; `None` when there are no sessions.
pub fn mentor_stats(
    feedbacks: &[SessionFeedback],
    sessions: &[Session],
    now: DateTime<Utc>,
    settings: &AnalyticsSettings,
) -> Option<MentorStats> {
    if sessions.is_empty() {
        return None;
    }

    let average_rating = if feedbacks.is_empty() {
        0.0
    } else {
        let sum: u32 = feedbacks.iter().map(|f| u32::from(f.rating)).sum();
        round1(f64::from(sum) / feedbacks.len() as f64)
    };

    let completed_sessions = sessions
        .iter()
        .filter(|s| s.status == SessionStatus::Completed)
        .count();

    let sessions_per_week = if settings.trailing_weeks == 0 {
        0.0
    } else {
        let window_start = now - Duration::weeks(i64::from(settings.trailing_weeks));
        let recent = sessions
            .iter()
            .filter(|s| s.status != SessionStatus::Cancelled)
            .filter(|s| s.scheduled_at > window_start && s.scheduled_at <= now)
            .count();
        round1(recent as f64 / f64::from(settings.trailing_weeks))
    };

    let feedback_response_rate = if completed_sessions == 0 {
        0.0
    } else {
        round1(feedbacks.len() as f64 / completed_sessions as f64 * 100.0)
    };

    let strengths = extract_keywords(
        feedbacks.iter().map(|f| f.what_went_well.as_str()),
        &settings.keywords,
    );
    let improvement_areas = extract_keywords(
        feedbacks.iter().map(|f| f.what_to_improve.as_str()),
        &settings.keywords,
    );

    Some(MentorStats {
        average_rating,
        total_sessions: sessions.len(),
        completed_sessions,
        total_feedbacks: feedbacks.len(),
        sessions_per_week,
        feedback_response_rate,
        strengths,
        improvement_areas,
    })
}
