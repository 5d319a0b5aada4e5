//! Notification DTO.

use chrono::{DateTime, Utc};
use mentorly_core::entity::parse_tag;
use mentorly_core::error::Result;
use mentorly_core::notification::{Notification, NotificationKind};
use serde::Deserialize;

use super::{Ingest, IntoDomain};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: String,
    pub user_id: String,
    #[serde(default, alias = "type")]
    pub kind: Option<String>,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default, alias = "isRead")]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl IntoDomain<Notification> for NotificationDto {
    fn into_domain(self) -> Result<Notification> {
        let kind = match self.kind.as_deref() {
            Some(raw) => parse_tag::<NotificationKind>("notification kind", raw)?,
            None => NotificationKind::default(),
        };
        Ok(Notification {
            id: self.id,
            user_id: self.user_id,
            kind,
            title: self.title,
            message: self.message,
            link: self.link,
            read: self.read,
            created_at: self.created_at.unwrap_or_default(),
        })
    }
}

impl Ingest for Notification {
    type Raw = NotificationDto;
}
