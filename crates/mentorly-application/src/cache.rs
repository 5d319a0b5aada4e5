//! In-memory mirror of the signed-in user's records.

use mentorly_core::Entity;
use mentorly_core::goal::{Goal, Habit, HabitCompletion};
use mentorly_core::notification::Notification;
use mentorly_core::reflection::Reflection;
use mentorly_core::session::{MentorSessionNotes, Session, SessionFeedback};
use mentorly_core::user::User;

/// Last-write-wins copy of backend records, rescoped on every full load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreCache {
    pub current_user: Option<User>,
    /// Sessions where the user is mentor or mentee
    pub sessions: Vec<Session>,
    pub goals: Vec<Goal>,
    pub habits: Vec<Habit>,
    pub completions: Vec<HabitCompletion>,
    /// The user's own reflections
    pub reflections: Vec<Reflection>,
    /// Feedback given as mentee and received as mentor
    pub feedback: Vec<SessionFeedback>,
    pub notifications: Vec<Notification>,
    /// Own notes as mentor plus shared notes as mentee
    pub session_notes: Vec<MentorSessionNotes>,
}

impl StoreCache {
    pub fn user_id(&self) -> Option<&str> {
        self.current_user.as_ref().map(|u| u.id.as_str())
    }

    pub fn find_session(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn find_goal(&self, id: &str) -> Option<&Goal> {
        self.goals.iter().find(|g| g.id == id)
    }

    pub fn find_habit(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|h| h.id == id)
    }

    /// Sessions the user runs as mentor.
    pub fn mentoring_sessions(&self) -> Vec<Session> {
        let Some(user_id) = self.user_id() else {
            return Vec::new();
        };
        self.sessions
            .iter()
            .filter(|s| s.mentor_id == user_id)
            .cloned()
            .collect()
    }

    /// Feedback the user received as mentor.
    pub fn received_feedback(&self) -> Vec<SessionFeedback> {
        let Some(user_id) = self.user_id() else {
            return Vec::new();
        };
        self.feedback
            .iter()
            .filter(|f| f.mentor_id == user_id)
            .cloned()
            .collect()
    }
}

/// Replaces the record with the same id, or appends it.
pub fn upsert<E: Entity>(records: &mut Vec<E>, record: E) {
    match records.iter_mut().find(|r| r.id() == record.id()) {
        Some(slot) => *slot = record,
        None => records.push(record),
    }
}

/// Removes the record with `id`; returns whether one was present.
pub fn remove_by_id<E: Entity>(records: &mut Vec<E>, id: &str) -> bool {
    let before = records.len();
    records.retain(|r| r.id() != id);
    records.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut a = Session::new("m", "a", Utc::now(), 30);
        let b = Session::new("m", "b", Utc::now(), 30);
        let mut records = vec![a.clone(), b.clone()];

        a.duration_minutes = 90;
        upsert(&mut records, a.clone());
        assert_eq!(records, vec![a, b]);
    }

    #[test]
    fn test_remove_by_id() {
        let a = Session::new("m", "a", Utc::now(), 30);
        let mut records = vec![a.clone()];
        assert!(remove_by_id(&mut records, &a.id));
        assert!(!remove_by_id(&mut records, &a.id));
    }
}
