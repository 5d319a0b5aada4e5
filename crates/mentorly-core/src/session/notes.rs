//! Mentor-side session notes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, Relation};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorSessionNotes {
    pub id: String,
    pub session_id: String,
    pub mentor_id: String,
    pub mentee_id: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub action_items: Vec<String>,
    /// Hidden from the mentee when set
    #[serde(default = "default_private")]
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_private() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorSessionNotesPatch {
    pub notes: Option<String>,
    pub action_items: Option<Vec<String>>,
    pub is_private: Option<bool>,
}

impl Entity for MentorSessionNotes {
    const ENTITY_NAME: &'static str = "mentor_session_notes";
    type Patch = MentorSessionNotesPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn belongs_to(&self, owner_id: &str, relation: Relation) -> bool {
        match relation {
            Relation::Session => self.session_id == owner_id,
            Relation::Mentor | Relation::Author => self.mentor_id == owner_id,
            Relation::Mentee => self.mentee_id == owner_id,
            _ => false,
        }
    }

    fn apply_patch(&mut self, patch: MentorSessionNotesPatch) -> Result<()> {
        if let Some(notes) = patch.notes {
            self.notes = notes;
        }
        if let Some(items) = patch.action_items {
            self.action_items = items;
        }
        if let Some(private) = patch.is_private {
            self.is_private = private;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
