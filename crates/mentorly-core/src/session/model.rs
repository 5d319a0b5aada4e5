//! Session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::entity::{Entity, Relation};
use crate::error::{MentorlyError, Result};

/// Lifecycle state of a session.
///
/// Sessions only move forward: `Pending -> Confirmed -> Completed`, and any
/// non-terminal state may be cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionStatus {
    /// Requested by the mentee, not yet accepted
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether moving from `self` to `next` is an allowed lifecycle step.
    ///
    /// Re-applying the current status is always allowed.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        self == next
            || matches!(
                (self, next),
                (Self::Pending, Self::Confirmed)
                    | (Self::Confirmed, Self::Completed)
                    | (Self::Pending | Self::Confirmed, Self::Cancelled)
            )
    }
}

/// Where a session takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionType {
    Virtual,
    InPerson,
}

impl Default for SessionType {
    fn default() -> Self {
        Self::Virtual
    }
}

/// A scheduled meeting between one mentor and one mentee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub mentor_id: String,
    pub mentee_id: String,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: u32,
    pub status: SessionStatus,
    #[serde(default)]
    pub session_type: SessionType,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Creates a pending virtual session.
    pub fn new(
        mentor_id: impl Into<String>,
        mentee_id: impl Into<String>,
        scheduled_at: DateTime<Utc>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            id: crate::entity::new_id(),
            mentor_id: mentor_id.into(),
            mentee_id: mentee_id.into(),
            scheduled_at,
            duration_minutes,
            status: SessionStatus::Pending,
            session_type: SessionType::Virtual,
            venue: None,
            topic: None,
            created_at: Utc::now(),
        }
    }

    /// The other participant, if `user_id` takes part in this session.
    pub fn counterpart_of(&self, user_id: &str) -> Option<&str> {
        if self.mentor_id == user_id {
            Some(&self.mentee_id)
        } else if self.mentee_id == user_id {
            Some(&self.mentor_id)
        } else {
            None
        }
    }

    pub fn involves(&self, user_id: &str) -> bool {
        self.counterpart_of(user_id).is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPatch {
    pub status: Option<SessionStatus>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<u32>,
    pub session_type: Option<SessionType>,
    pub venue: Option<Option<String>>,
    pub topic: Option<Option<String>>,
}

impl SessionPatch {
    pub fn status(status: SessionStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

impl Entity for Session {
    const ENTITY_NAME: &'static str = "session";
    type Patch = SessionPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn belongs_to(&self, owner_id: &str, relation: Relation) -> bool {
        match relation {
            Relation::Mentor => self.mentor_id == owner_id,
            Relation::Mentee => self.mentee_id == owner_id,
            Relation::User => self.involves(owner_id),
            _ => false,
        }
    }

    fn apply_patch(&mut self, patch: SessionPatch) -> Result<()> {
        if let Some(status) = patch.status {
            if !self.status.can_transition_to(status) {
                return Err(MentorlyError::invalid_transition(
                    Self::ENTITY_NAME,
                    self.status,
                    status,
                ));
            }
            self.status = status;
        }
        if let Some(scheduled_at) = patch.scheduled_at {
            self.scheduled_at = scheduled_at;
        }
        if let Some(duration) = patch.duration_minutes {
            self.duration_minutes = duration;
        }
        if let Some(session_type) = patch.session_type {
            self.session_type = session_type;
        }
        if let Some(venue) = patch.venue {
            self.venue = venue;
        }
        if let Some(topic) = patch.topic {
            self.topic = topic;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.mentor_id == self.mentee_id {
            return Err(MentorlyError::validation(
                "a session needs two different participants",
            ));
        }
        if self.duration_minutes == 0 {
            return Err(MentorlyError::validation("session duration must be positive"));
        }
        if self.session_type == SessionType::Virtual && self.venue.is_some() {
            return Err(MentorlyError::validation("virtual sessions have no venue"));
        }
        Ok(())
    }
}
