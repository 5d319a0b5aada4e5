//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::entity::{Entity, Relation, parse_tag};
use crate::error::{MentorlyError, Result};

/// The role a user plays in the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    Mentor,
    Mentee,
    /// Acts as both mentor and mentee
    Both,
}

impl UserRole {
    pub fn is_mentor(self) -> bool {
        matches!(self, Self::Mentor | Self::Both)
    }

    pub fn is_mentee(self) -> bool {
        matches!(self, Self::Mentee | Self::Both)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Mentee
    }
}

/// Paid membership level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MembershipTier {
    Free,
    Premium,
    Pro,
}

impl Default for MembershipTier {
    fn default() -> Self {
        Self::Free
    }
}

/// A marketplace member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
    #[serde(default)]
    pub bio: String,
    /// Mentor-side expertise tags
    #[serde(default)]
    pub skills: Vec<String>,
    /// Topics the user wants to learn or talk about
    #[serde(default)]
    pub interests: Vec<String>,
    /// Directory category (e.g. "engineering", "design")
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub membership_tier: MembershipTier,
    /// Average rating on a 0-5 scale
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub total_sessions: u32,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: crate::entity::new_id(),
            name: name.into(),
            email: email.into(),
            role,
            bio: String::new(),
            skills: Vec::new(),
            interests: Vec::new(),
            category: None,
            membership_tier: MembershipTier::Free,
            rating: 0.0,
            total_sessions: 0,
            created_at: Utc::now(),
        }
    }

    /// Skills and interests, the tags a mentee's interests are matched against.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.skills
            .iter()
            .chain(self.interests.iter())
            .map(String::as_str)
    }
}

/// Profile edit payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub bio: Option<String>,
    pub skills: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub category: Option<Option<String>>,
    pub membership_tier: Option<MembershipTier>,
    pub rating: Option<f64>,
    pub total_sessions: Option<u32>,
}

impl Entity for User {
    const ENTITY_NAME: &'static str = "user";
    type Patch = UserPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn belongs_to(&self, owner_id: &str, relation: Relation) -> bool {
        match relation {
            Relation::User => self.id == owner_id,
            Relation::Role => match parse_tag::<UserRole>("role", owner_id) {
                Ok(UserRole::Mentor) => self.role.is_mentor(),
                Ok(UserRole::Mentee) => self.role.is_mentee(),
                Ok(UserRole::Both) => self.role == UserRole::Both,
                Err(_) => false,
            },
            _ => false,
        }
    }

    fn apply_patch(&mut self, patch: UserPatch) -> Result<()> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(bio) = patch.bio {
            self.bio = bio;
        }
        if let Some(skills) = patch.skills {
            self.skills = skills;
        }
        if let Some(interests) = patch.interests {
            self.interests = interests;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(tier) = patch.membership_tier {
            self.membership_tier = tier;
        }
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(total) = patch.total_sessions {
            self.total_sessions = total;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MentorlyError::validation("user name must not be empty"));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(MentorlyError::validation(format!(
                "user rating {} is outside 0-5",
                self.rating
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_membership() {
        assert!(UserRole::Both.is_mentor());
        assert!(UserRole::Both.is_mentee());
        assert!(!UserRole::Mentee.is_mentor());
    }

    #[test]
    fn test_belongs_to_role() {
        let both = User::new("Ada", "ada@example.com", UserRole::Both);
        let mentee = User::new("Ben", "ben@example.com", UserRole::Mentee);

        assert!(both.belongs_to("mentor", Relation::Role));
        assert!(both.belongs_to("MENTEE", Relation::Role));
        assert!(!mentee.belongs_to("mentor", Relation::Role));
        assert!(!mentee.belongs_to("coach", Relation::Role));
    }

    #[test]
    fn test_patch_rejects_out_of_range_rating() {
        let mut user = User::new("Ada", "ada@example.com", UserRole::Mentor);
        let result = user.apply_patch(UserPatch {
            rating: Some(7.5),
            ..Default::default()
        });
        assert!(result.unwrap_err().is_validation());
    }

    #[test]
    fn test_role_parses_from_strum() {
        assert_eq!("both".parse::<UserRole>().unwrap(), UserRole::Both);
        assert_eq!(UserRole::Mentor.to_string(), "mentor");
    }
}
