//! Profile, reflections and notifications.

use mentorly_core::error::{MentorlyError, Result};
use mentorly_core::notification::{Notification, NotificationKind, NotificationPatch};
use mentorly_core::reflection::{Comment, Reflection, ReflectionPatch};
use mentorly_core::user::{User, UserPatch};
use mentorly_core::{Entity, Relation};

use super::AppStore;
use crate::cache::{remove_by_id, upsert};
use crate::event::StoreEvent;
use crate::request::ReflectionDraft;

impl AppStore {
    pub async fn update_profile(&self, patch: UserPatch) -> Result<User> {
        let user = self.require_user().await?;

        let updated = self
            .api
            .users
            .update(&user.id, patch)
            .await?
            .ok_or_else(|| MentorlyError::not_found(User::ENTITY_NAME, &user.id))?;
        tracing::info!("[Store] Updated profile of {}", user.id);

        self.cache.write().await.current_user = Some(updated.clone());
        self.publish(StoreEvent::ProfileChanged);
        Ok(updated)
    }

    pub async fn post_reflection(&self, draft: ReflectionDraft) -> Result<Reflection> {
        let user = self.require_user().await?;

        let mut reflection = Reflection::new(&user.id, draft.mood, draft.content);
        reflection.visibility = draft.visibility;
        reflection.selected_viewer_ids = draft.selected_viewer_ids;

        let created = self.api.reflections.create(reflection).await?;
        tracing::info!(
            "[Store] Posted reflection {} ({})",
            created.id,
            created.visibility
        );

        upsert(&mut self.cache.write().await.reflections, created.clone());
        self.publish(StoreEvent::ReflectionsChanged {
            reflection_id: created.id.clone(),
        });
        Ok(created)
    }

    /// Adds or removes the signed-in user's `emoji` reaction.
    pub async fn toggle_reaction(&self, reflection_id: &str, emoji: &str) -> Result<Reflection> {
        let user = self.require_user().await?;
        let mut reflection = self.visible_reflection(reflection_id, &user).await?;

        reflection.toggle_reaction(&user.id, emoji);
        let patch = ReflectionPatch {
            reactions: Some(reflection.reactions),
            ..Default::default()
        };
        let updated = self.patch_reflection(reflection_id, patch).await?;
        self.cache_reflection(&user, updated.clone()).await;
        Ok(updated)
    }

    /// Appends a comment and tells the author when someone else wrote it.
    pub async fn add_comment(&self, reflection_id: &str, text: &str) -> Result<Reflection> {
        let user = self.require_user().await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(MentorlyError::validation("comment must not be empty"));
        }
        let mut reflection = self.visible_reflection(reflection_id, &user).await?;

        reflection.comments.push(Comment::new(&user.id, text));
        let patch = ReflectionPatch {
            comments: Some(reflection.comments),
            ..Default::default()
        };
        let updated = self.patch_reflection(reflection_id, patch).await?;
        self.cache_reflection(&user, updated.clone()).await;

        if updated.author_id != user.id {
            self.notify(
                &updated.author_id,
                NotificationKind::ReflectionComment,
                "New comment",
                format!("{} commented on your reflection", user.name),
                Some(format!("/reflections/{}", updated.id)),
            )
            .await;
        }
        Ok(updated)
    }

    /// Deletes one of the signed-in user's own reflections.
    pub async fn delete_reflection(&self, reflection_id: &str) -> Result<()> {
        let user = self.require_user().await?;
        let reflection = self
            .api
            .reflections
            .get(reflection_id)
            .await?
            .ok_or_else(|| MentorlyError::not_found(Reflection::ENTITY_NAME, reflection_id))?;
        if reflection.author_id != user.id {
            return Err(MentorlyError::validation(
                "only the author can delete a reflection",
            ));
        }

        if !self.api.reflections.delete(reflection_id).await? {
            return Err(MentorlyError::not_found(Reflection::ENTITY_NAME, reflection_id));
        }
        tracing::info!("[Store] Deleted reflection {}", reflection_id);

        remove_by_id(&mut self.cache.write().await.reflections, reflection_id);
        self.publish(StoreEvent::ReflectionsChanged {
            reflection_id: reflection_id.to_string(),
        });
        Ok(())
    }

    /// Reflections by `author_ids` the signed-in user may read, newest first.
    pub async fn feed(&self, author_ids: &[String]) -> Result<Vec<Reflection>> {
        let user = self.require_user().await?;

        let mut visible = Vec::new();
        for author_id in author_ids {
            let reflections = self.api.reflections.list(author_id, Relation::Author).await?;
            visible.extend(
                reflections
                    .into_iter()
                    .filter(|r| r.is_visible_to(&user.id, user.role)),
            );
        }
        visible.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(visible)
    }

    pub async fn mark_notification_read(&self, notification_id: &str) -> Result<Notification> {
        let user = self.require_user().await?;
        let owned = self
            .cache
            .read()
            .await
            .notifications
            .iter()
            .any(|n| n.id == notification_id && n.user_id == user.id);
        if !owned {
            return Err(MentorlyError::not_found(
                Notification::ENTITY_NAME,
                notification_id,
            ));
        }

        let updated = self
            .api
            .notifications
            .update(notification_id, NotificationPatch::mark_read())
            .await?
            .ok_or_else(|| MentorlyError::not_found(Notification::ENTITY_NAME, notification_id))?;

        upsert(&mut self.cache.write().await.notifications, updated.clone());
        self.publish(StoreEvent::NotificationsChanged);
        Ok(updated)
    }

    /// Marks every unread notification as read and returns how many changed.
    ///
    /// Each successful update lands in the cache even if a later one fails.
    pub async fn mark_all_notifications_read(&self) -> Result<usize> {
        self.require_user().await?;
        let unread: Vec<String> = self
            .cache
            .read()
            .await
            .notifications
            .iter()
            .filter(|n| !n.read)
            .map(|n| n.id.clone())
            .collect();

        let mut marked = 0;
        let mut outcome = Ok(());
        for id in &unread {
            match self
                .api
                .notifications
                .update(id, NotificationPatch::mark_read())
                .await
            {
                Ok(Some(updated)) => {
                    upsert(&mut self.cache.write().await.notifications, updated);
                    marked += 1;
                }
                Ok(None) => tracing::debug!("[Store] Notification {} vanished upstream", id),
                Err(e) => {
                    tracing::warn!("[Store] Failed to mark notification {} read: {}", id, e);
                    outcome = Err(e);
                    break;
                }
            }
        }

        if marked > 0 {
            self.publish(StoreEvent::NotificationsChanged);
        }
        outcome.map(|()| marked)
    }

    async fn visible_reflection(&self, reflection_id: &str, viewer: &User) -> Result<Reflection> {
        self.api
            .reflections
            .get(reflection_id)
            .await?
            .filter(|r| r.is_visible_to(&viewer.id, viewer.role))
            .ok_or_else(|| MentorlyError::not_found(Reflection::ENTITY_NAME, reflection_id))
    }

    async fn patch_reflection(
        &self,
        reflection_id: &str,
        patch: ReflectionPatch,
    ) -> Result<Reflection> {
        self.api
            .reflections
            .update(reflection_id, patch)
            .await?
            .ok_or_else(|| MentorlyError::not_found(Reflection::ENTITY_NAME, reflection_id))
    }

    /// Only the user's own reflections are mirrored.
    async fn cache_reflection(&self, user: &User, reflection: Reflection) {
        let reflection_id = reflection.id.clone();
        if reflection.author_id == user.id {
            upsert(&mut self.cache.write().await.reflections, reflection);
        }
        self.publish(StoreEvent::ReflectionsChanged { reflection_id });
    }
}
