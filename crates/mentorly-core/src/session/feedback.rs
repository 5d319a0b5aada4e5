//! Session feedback domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Relation};
use crate::error::{MentorlyError, Result};

/// The mentee's rating and narrative for a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFeedback {
    pub id: String,
    pub session_id: String,
    pub mentor_id: String,
    pub mentee_id: String,
    /// 1 to 5 stars
    pub rating: u8,
    #[serde(default)]
    pub what_went_well: String,
    #[serde(default)]
    pub what_to_improve: String,
    #[serde(default)]
    pub additional_comments: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionFeedback {
    pub fn new(
        session_id: impl Into<String>,
        mentor_id: impl Into<String>,
        mentee_id: impl Into<String>,
        rating: u8,
    ) -> Self {
        Self {
            id: crate::entity::new_id(),
            session_id: session_id.into(),
            mentor_id: mentor_id.into(),
            mentee_id: mentee_id.into(),
            rating,
            what_went_well: String::new(),
            what_to_improve: String::new(),
            additional_comments: None,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFeedbackPatch {
    pub rating: Option<u8>,
    pub what_went_well: Option<String>,
    pub what_to_improve: Option<String>,
    pub additional_comments: Option<Option<String>>,
}

impl Entity for SessionFeedback {
    const ENTITY_NAME: &'static str = "session_feedback";
    type Patch = SessionFeedbackPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn belongs_to(&self, owner_id: &str, relation: Relation) -> bool {
        match relation {
            Relation::Session => self.session_id == owner_id,
            Relation::Mentor => self.mentor_id == owner_id,
            Relation::Mentee | Relation::Author => self.mentee_id == owner_id,
            _ => false,
        }
    }

    fn apply_patch(&mut self, patch: SessionFeedbackPatch) -> Result<()> {
        if let Some(rating) = patch.rating {
            self.rating = rating;
        }
        if let Some(text) = patch.what_went_well {
            self.what_went_well = text;
        }
        if let Some(text) = patch.what_to_improve {
            self.what_to_improve = text;
        }
        if let Some(comments) = patch.additional_comments {
            self.additional_comments = comments;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if !(1..=5).contains(&self.rating) {
            return Err(MentorlyError::validation(format!(
                "feedback rating {} is outside 1-5",
                self.rating
            )));
        }
        Ok(())
    }
}
