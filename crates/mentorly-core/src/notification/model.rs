//! Notification domain model.
//!
//! Notifications are append-only; the read flag is the only mutable field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::entity::{Entity, Relation};
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationKind {
    SessionRequested,
    SessionConfirmed,
    SessionCancelled,
    SessionCompleted,
    FeedbackReceived,
    ReflectionComment,
    System,
}

impl Default for NotificationKind {
    fn default() -> Self {
        Self::System
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub kind: NotificationKind,
    pub title: String,
    #[serde(default)]
    pub message: String,
    /// In-app route the notification points at
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(
        user_id: impl Into<String>,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: crate::entity::new_id(),
            user_id: user_id.into(),
            kind,
            title: title.into(),
            message: message.into(),
            link: None,
            read: false,
            created_at: Utc::now(),
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPatch {
    pub read: Option<bool>,
}

impl NotificationPatch {
    pub fn mark_read() -> Self {
        Self { read: Some(true) }
    }
}

impl Entity for Notification {
    const ENTITY_NAME: &'static str = "notification";
    type Patch = NotificationPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn belongs_to(&self, owner_id: &str, relation: Relation) -> bool {
        matches!(relation, Relation::User) && self.user_id == owner_id
    }

    fn apply_patch(&mut self, patch: NotificationPatch) -> Result<()> {
        if let Some(read) = patch.read {
            self.read = read;
        }
        Ok(())
    }
}

/// Number of notifications still unread.
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.read).count()
}
