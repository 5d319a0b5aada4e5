//! Request payloads accepted by the store's mutation operations.

use chrono::{DateTime, NaiveDate, Utc};
use mentorly_core::goal::HabitCompletion;
use mentorly_core::reflection::{Mood, ReflectionContent, Visibility};
use mentorly_core::session::SessionType;
use serde::{Deserialize, Serialize};

/// A mentee's request to book a mentor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub mentor_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub session_type: SessionType,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackDraft {
    pub session_id: String,
    pub rating: u8,
    #[serde(default)]
    pub what_went_well: String,
    #[serde(default)]
    pub what_to_improve: String,
    #[serde(default)]
    pub additional_comments: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDraft {
    pub title: String,
    #[serde(default)]
    pub identity_statement: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionDraft {
    pub mood: Mood,
    pub content: ReflectionContent,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub selected_viewer_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesDraft {
    pub notes: String,
    #[serde(default)]
    pub action_items: Vec<String>,
    #[serde(default)]
    pub is_private: bool,
}

/// Result of toggling a `(habit, date)` slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ToggleOutcome {
    Completed { completion: HabitCompletion },
    Cleared,
}
