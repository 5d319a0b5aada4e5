//! User DTO.

use chrono::{DateTime, Utc};
use mentorly_core::entity::parse_tag;
use mentorly_core::error::Result;
use mentorly_core::user::{MembershipTier, User, UserRole};
use serde::Deserialize;

use super::{Ingest, IntoDomain};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "userType")]
    pub role: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, alias = "membership")]
    pub membership_tier: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, alias = "sessionsCompleted")]
    pub total_sessions: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl IntoDomain<User> for UserDto {
    fn into_domain(self) -> Result<User> {
        let role = match self.role.as_deref() {
            Some(raw) => parse_tag::<UserRole>("user role", raw)?,
            None => UserRole::default(),
        };
        let membership_tier = match self.membership_tier.as_deref() {
            Some(raw) => parse_tag::<MembershipTier>("membership tier", raw)?,
            None => MembershipTier::default(),
        };

        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            role,
            bio: self.bio.unwrap_or_default(),
            skills: self.skills.unwrap_or_default(),
            interests: self.interests.unwrap_or_default(),
            category: self.category.filter(|c| !c.trim().is_empty()),
            membership_tier,
            rating: self.rating.unwrap_or_default(),
            total_sessions: self.total_sessions.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_default(),
        })
    }
}

impl Ingest for User {
    type Raw = UserDto;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_casing_is_normalised() {
        for raw in ["MENTOR", "Mentor", "mentor"] {
            let json = format!(r#"{{"id":"u1","name":"Ada","role":"{raw}"}}"#);
            let user = User::ingest(json.as_bytes()).unwrap();
            assert_eq!(user.role, UserRole::Mentor);
        }
    }

    #[test]
    fn test_legacy_field_names() {
        let json = r#"{"id":"u1","name":"Ada","userType":"Both","membership":"PREMIUM","sessionsCompleted":12}"#;
        let user = User::ingest(json.as_bytes()).unwrap();
        assert_eq!(user.role, UserRole::Both);
        assert_eq!(user.membership_tier, MembershipTier::Premium);
        assert_eq!(user.total_sessions, 12);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let json = r#"{"id":"u1","name":"Ada","role":"coach"}"#;
        assert!(User::ingest(json.as_bytes()).unwrap_err().is_validation());
    }
}
