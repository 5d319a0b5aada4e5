use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Change notifications published by the store after its cache changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreEvent {
    /// A full reload finished for this user.
    Loaded { user_id: String },
    /// Cached state was dropped (sign-out).
    Cleared,
    ProfileChanged,
    SessionsChanged { session_id: String },
    GoalsChanged { goal_id: String },
    HabitsChanged { habit_id: String },
    CompletionsChanged { habit_id: String, date: NaiveDate },
    ReflectionsChanged { reflection_id: String },
    FeedbackChanged { session_id: String },
    NotificationsChanged,
    NotesChanged { session_id: String },
}
