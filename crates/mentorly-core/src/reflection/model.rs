//! Reflection domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::entity::{Entity, Relation};
use crate::error::{MentorlyError, Result};
use crate::user::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Mood {
    Great,
    Good,
    Okay,
    Low,
    Struggling,
}

impl Default for Mood {
    fn default() -> Self {
        Self::Okay
    }
}

/// Who can see a reflection besides its author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Visibility {
    Everyone,
    /// Users holding a mentor role
    Mentors,
    /// Only the ids listed in `selected_viewer_ids`
    Selected,
    Private,
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Private
    }
}

/// The body of a reflection.
///
/// Legacy records store a bare string; newer ones store the guided prompts.
/// Both are resolved into this union when a record is ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReflectionContent {
    Text {
        text: String,
    },
    Structured {
        #[serde(default)]
        wins: String,
        #[serde(default)]
        challenges: String,
        #[serde(default)]
        learnings: String,
        #[serde(default)]
        next_steps: String,
    },
}

impl ReflectionContent {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Flattened text for feeds and previews.
    pub fn display_text(&self) -> String {
        match self {
            Self::Text { text } => text.clone(),
            Self::Structured {
                wins,
                challenges,
                learnings,
                next_steps,
            } => [wins, challenges, learnings, next_steps]
                .into_iter()
                .filter(|part| !part.trim().is_empty())
                .map(|part| part.trim())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.display_text().trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub user_id: String,
    pub emoji: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(author_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: crate::entity::new_id(),
            author_id: author_id.into(),
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub id: String,
    pub author_id: String,
    #[serde(default)]
    pub mood: Mood,
    pub content: ReflectionContent,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default)]
    pub selected_viewer_ids: Vec<String>,
    #[serde(default)]
    pub reactions: Vec<Reaction>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

impl Reflection {
    pub fn new(author_id: impl Into<String>, mood: Mood, content: ReflectionContent) -> Self {
        Self {
            id: crate::entity::new_id(),
            author_id: author_id.into(),
            mood,
            content,
            visibility: Visibility::Private,
            selected_viewer_ids: Vec::new(),
            reactions: Vec::new(),
            comments: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Whether `viewer_id` (holding `viewer_role`) may read this reflection.
    pub fn is_visible_to(&self, viewer_id: &str, viewer_role: UserRole) -> bool {
        if self.author_id == viewer_id {
            return true;
        }
        match self.visibility {
            Visibility::Everyone => true,
            Visibility::Mentors => viewer_role.is_mentor(),
            Visibility::Selected => self.selected_viewer_ids.iter().any(|id| id == viewer_id),
            Visibility::Private => false,
        }
    }

    /// Adds the reaction, or removes it when `user_id` already reacted with `emoji`.
    pub fn toggle_reaction(&mut self, user_id: &str, emoji: &str) {
        let before = self.reactions.len();
        self.reactions
            .retain(|r| !(r.user_id == user_id && r.emoji == emoji));
        if self.reactions.len() == before {
            self.reactions.push(Reaction {
                user_id: user_id.to_string(),
                emoji: emoji.to_string(),
                created_at: Utc::now(),
            });
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionPatch {
    pub mood: Option<Mood>,
    pub content: Option<ReflectionContent>,
    pub visibility: Option<Visibility>,
    pub selected_viewer_ids: Option<Vec<String>>,
    pub reactions: Option<Vec<Reaction>>,
    pub comments: Option<Vec<Comment>>,
}

impl Entity for Reflection {
    const ENTITY_NAME: &'static str = "reflection";
    type Patch = ReflectionPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn belongs_to(&self, owner_id: &str, relation: Relation) -> bool {
        matches!(relation, Relation::Author | Relation::User) && self.author_id == owner_id
    }

    fn apply_patch(&mut self, patch: ReflectionPatch) -> Result<()> {
        if let Some(mood) = patch.mood {
            self.mood = mood;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(visibility) = patch.visibility {
            self.visibility = visibility;
        }
        if let Some(ids) = patch.selected_viewer_ids {
            self.selected_viewer_ids = ids;
        }
        if let Some(reactions) = patch.reactions {
            self.reactions = reactions;
        }
        if let Some(comments) = patch.comments {
            self.comments = comments;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.content.is_empty() {
            return Err(MentorlyError::validation("reflection content must not be empty"));
        }
        if self.visibility == Visibility::Selected && self.selected_viewer_ids.is_empty() {
            return Err(MentorlyError::validation(
                "selected visibility needs at least one viewer",
            ));
        }
        Ok(())
    }
}
