//! Reflection DTO.
//!
//! The body is either a bare legacy string, the canonical tagged form, or an
//! untagged guided-prompt object.

use chrono::{DateTime, Utc};
use mentorly_core::entity::parse_tag;
use mentorly_core::error::Result;
use mentorly_core::reflection::{Comment, Mood, Reaction, Reflection, ReflectionContent, Visibility};
use serde::Deserialize;

use super::{Ingest, IntoDomain};

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawReflectionContent {
    Plain(String),
    Tagged(ReflectionContent),
    #[serde(rename_all = "camelCase")]
    Guided {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        wins: Option<String>,
        #[serde(default)]
        challenges: Option<String>,
        #[serde(default)]
        learnings: Option<String>,
        #[serde(default)]
        next_steps: Option<String>,
    },
}

impl From<RawReflectionContent> for ReflectionContent {
    fn from(raw: RawReflectionContent) -> Self {
        match raw {
            RawReflectionContent::Plain(text) => ReflectionContent::Text { text },
            RawReflectionContent::Tagged(content) => content,
            RawReflectionContent::Guided {
                text,
                wins,
                challenges,
                learnings,
                next_steps,
            } => {
                let guided = wins.is_some()
                    || challenges.is_some()
                    || learnings.is_some()
                    || next_steps.is_some();
                if guided {
                    ReflectionContent::Structured {
                        wins: wins.unwrap_or_default(),
                        challenges: challenges.unwrap_or_default(),
                        learnings: learnings.unwrap_or_default(),
                        next_steps: next_steps.unwrap_or_default(),
                    }
                } else {
                    ReflectionContent::Text {
                        text: text.unwrap_or_default(),
                    }
                }
            }
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionDto {
    pub id: String,
    #[serde(alias = "userId")]
    pub author_id: String,
    #[serde(default)]
    pub mood: Option<String>,
    pub content: RawReflectionContent,
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub selected_viewer_ids: Option<Vec<String>>,
    #[serde(default)]
    pub reactions: Option<Vec<Reaction>>,
    #[serde(default)]
    pub comments: Option<Vec<Comment>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl IntoDomain<Reflection> for ReflectionDto {
    fn into_domain(self) -> Result<Reflection> {
        let mood = match self.mood.as_deref() {
            Some(raw) => parse_tag::<Mood>("mood", raw)?,
            None => Mood::default(),
        };
        let visibility = match self.visibility.as_deref() {
            Some(raw) => parse_tag::<Visibility>("visibility", raw)?,
            None => Visibility::default(),
        };
        Ok(Reflection {
            id: self.id,
            author_id: self.author_id,
            mood,
            content: self.content.into(),
            visibility,
            selected_viewer_ids: self.selected_viewer_ids.unwrap_or_default(),
            reactions: self.reactions.unwrap_or_default(),
            comments: self.comments.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_default(),
        })
    }
}

impl Ingest for Reflection {
    type Raw = ReflectionDto;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_string_content() {
        let json = r#"{"id":"r1","authorId":"u1","mood":"GREAT","content":"Finished my first 10k","visibility":"Everyone"}"#;
        let reflection = Reflection::ingest(json.as_bytes()).unwrap();
        assert_eq!(reflection.mood, Mood::Great);
        assert_eq!(reflection.visibility, Visibility::Everyone);
        assert_eq!(
            reflection.content,
            ReflectionContent::text("Finished my first 10k")
        );
    }

    #[test]
    fn test_guided_object_content() {
        let json = r#"{"id":"r1","userId":"u1","content":{"wins":"Shipped","nextSteps":"Rest"}}"#;
        let reflection = Reflection::ingest(json.as_bytes()).unwrap();
        assert_eq!(reflection.author_id, "u1");
        assert_eq!(
            reflection.content,
            ReflectionContent::Structured {
                wins: "Shipped".to_string(),
                challenges: String::new(),
                learnings: String::new(),
                next_steps: "Rest".to_string(),
            }
        );
    }

    #[test]
    fn test_object_with_text_only() {
        let json = r#"{"id":"r1","authorId":"u1","content":{"text":"Quiet day"}}"#;
        let reflection = Reflection::ingest(json.as_bytes()).unwrap();
        assert_eq!(reflection.content, ReflectionContent::text("Quiet day"));
    }

    #[test]
    fn test_canonical_form_round_trips() {
        let original = Reflection::new("u1", Mood::Low, ReflectionContent::text("Tough week"));
        let bytes = serde_json::to_vec(&original).unwrap();
        assert_eq!(Reflection::ingest(&bytes).unwrap(), original);
    }
}
