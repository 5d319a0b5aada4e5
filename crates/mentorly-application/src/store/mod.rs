//! The application state container.
//!
//! # Module Structure
//!
//! - `sessions`: booking, status changes, feedback and mentor notes
//! - `habits`: goals, habits and the completion toggle
//! - `social`: profile, reflections and notifications
//! - `metrics`: derived metrics over the cache

mod habits;
mod metrics;
mod sessions;
mod social;

pub use metrics::Dashboard;

use mentorly_core::config::AnalyticsSettings;
use mentorly_core::error::{MentorlyError, Result};
use mentorly_core::notification::{Notification, NotificationKind};
use mentorly_core::user::User;
use mentorly_core::{DataApi, Relation};
use tokio::sync::{RwLock, broadcast};

use crate::cache::{StoreCache, upsert};
use crate::event::StoreEvent;

const EVENT_CAPACITY: usize = 64;

/// Mirrors the signed-in user's records and mutates them through the data API.
///
/// Every mutation calls the backend first and touches the cache only after
/// the call succeeded, so a failed call leaves the mirror as it was. Each
/// cache change is announced on the event channel returned by `subscribe`.
pub struct AppStore {
    api: DataApi,
    settings: AnalyticsSettings,
    cache: RwLock<StoreCache>,
    events: broadcast::Sender<StoreEvent>,
}

impl AppStore {
    pub fn new(api: DataApi, settings: AnalyticsSettings) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            api,
            settings,
            cache: RwLock::new(StoreCache::default()),
            events,
        }
    }

    pub fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// Receives every `StoreEvent` published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// A copy of the current cache, for rendering.
    pub async fn snapshot(&self) -> StoreCache {
        self.cache.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.cache.read().await.current_user.clone()
    }

    /// Fetches everything the user can see and replaces the cache wholesale.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown user, or the first data API error.
    /// On error the previous cache is kept untouched.
    pub async fn load_for_user(&self, user_id: &str) -> Result<()> {
        tracing::info!("[Store] Loading state for user {}", user_id);

        let user = self
            .api
            .users
            .get(user_id)
            .await?
            .ok_or_else(|| MentorlyError::not_found("user", user_id))?;

        let (
            sessions,
            goals,
            habits,
            completions,
            reflections,
            feedback_given,
            feedback_received,
            notifications,
            own_notes,
            shared_notes,
        ) = tokio::try_join!(
            self.api.sessions.list(user_id, Relation::User),
            self.api.goals.list(user_id, Relation::User),
            self.api.habits.list(user_id, Relation::User),
            self.api.completions.list(user_id, Relation::User),
            self.api.reflections.list(user_id, Relation::Author),
            self.api.feedback.list(user_id, Relation::Mentee),
            self.api.feedback.list(user_id, Relation::Mentor),
            self.api.notifications.list(user_id, Relation::User),
            self.api.session_notes.list(user_id, Relation::Mentor),
            self.api.session_notes.list(user_id, Relation::Mentee),
        )
        .inspect_err(|e| tracing::warn!("[Store] Load for {} failed: {}", user_id, e))?;

        let mut feedback = feedback_given;
        for record in feedback_received {
            upsert(&mut feedback, record);
        }
        let mut session_notes = own_notes;
        for record in shared_notes.into_iter().filter(|n| !n.is_private) {
            upsert(&mut session_notes, record);
        }

        let fresh = StoreCache {
            current_user: Some(user),
            sessions,
            goals,
            habits,
            completions,
            reflections,
            feedback,
            notifications,
            session_notes,
        };
        tracing::debug!(
            "[Store] Loaded {} sessions, {} goals, {} habits, {} completions",
            fresh.sessions.len(),
            fresh.goals.len(),
            fresh.habits.len(),
            fresh.completions.len()
        );

        *self.cache.write().await = fresh;
        self.publish(StoreEvent::Loaded {
            user_id: user_id.to_string(),
        });
        Ok(())
    }

    /// Drops all cached state, e.g. on sign-out.
    pub async fn clear(&self) {
        *self.cache.write().await = StoreCache::default();
        self.publish(StoreEvent::Cleared);
    }

    fn publish(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }

    async fn require_user(&self) -> Result<User> {
        self.cache
            .read()
            .await
            .current_user
            .clone()
            .ok_or(MentorlyError::NotSignedIn)
    }

    /// Sends a notification to `recipient`. Delivery problems are logged and
    /// never fail the operation that triggered them.
    async fn notify(
        &self,
        recipient: &str,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        link: Option<String>,
    ) {
        let mut notification = Notification::new(recipient, kind, title, message);
        notification.link = link;

        match self.api.notifications.create(notification).await {
            Ok(created) => {
                let mut cache = self.cache.write().await;
                if cache.user_id() == Some(recipient) {
                    upsert(&mut cache.notifications, created);
                    drop(cache);
                    self.publish(StoreEvent::NotificationsChanged);
                }
            }
            Err(e) => tracing::warn!(
                "[Store] Failed to notify {} ({}): {}",
                recipient,
                kind,
                e
            ),
        }
    }
}
