//! Session DTO.

use chrono::{DateTime, Utc};
use mentorly_core::entity::parse_tag;
use mentorly_core::error::Result;
use mentorly_core::session::{Session, SessionStatus, SessionType};
use serde::Deserialize;

use super::{Ingest, IntoDomain};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: String,
    pub mentor_id: String,
    pub mentee_id: String,
    pub scheduled_at: DateTime<Utc>,
    #[serde(default, alias = "duration")]
    pub duration_minutes: Option<u32>,
    pub status: String,
    #[serde(default, alias = "type")]
    pub session_type: Option<String>,
    #[serde(default, alias = "location")]
    pub venue: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl IntoDomain<Session> for SessionDto {
    fn into_domain(self) -> Result<Session> {
        let session_type = match self.session_type.as_deref() {
            Some(raw) => parse_tag::<SessionType>("session type", raw)?,
            None => SessionType::default(),
        };
        // Virtual sessions sometimes carry a leftover venue from an edit
        let venue = match session_type {
            SessionType::Virtual => None,
            SessionType::InPerson => self.venue.filter(|v| !v.trim().is_empty()),
        };

        Ok(Session {
            id: self.id,
            mentor_id: self.mentor_id,
            mentee_id: self.mentee_id,
            scheduled_at: self.scheduled_at,
            duration_minutes: self.duration_minutes.unwrap_or(60),
            status: parse_tag::<SessionStatus>("session status", &self.status)?,
            session_type,
            venue,
            topic: self.topic,
            created_at: self.created_at.unwrap_or(self.scheduled_at),
        })
    }
}

impl Ingest for Session {
    type Raw = SessionDto;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_type_variants() {
        for raw in ["in-person", "IN_PERSON", "InPerson", "in_person"] {
            let json = format!(
                r#"{{"id":"s1","mentorId":"m","menteeId":"e","scheduledAt":"2025-06-01T10:00:00Z","status":"Confirmed","type":"{raw}","location":"Cafe"}}"#
            );
            let session = Session::ingest(json.as_bytes()).unwrap();
            assert_eq!(session.session_type, SessionType::InPerson);
            assert_eq!(session.status, SessionStatus::Confirmed);
            assert_eq!(session.venue.as_deref(), Some("Cafe"));
            assert_eq!(session.duration_minutes, 60);
        }
    }

    #[test]
    fn test_self_session_is_rejected() {
        let json = r#"{"id":"s1","mentorId":"u","menteeId":"u","scheduledAt":"2025-06-01T10:00:00Z","status":"pending"}"#;
        assert!(Session::ingest(json.as_bytes()).unwrap_err().is_validation());
    }
}
