//! Booking, session lifecycle, feedback and mentor notes.

use chrono::Utc;
use mentorly_core::error::{MentorlyError, Result};
use mentorly_core::notification::NotificationKind;
use mentorly_core::session::{
    MentorSessionNotes, MentorSessionNotesPatch, Session, SessionFeedback, SessionPatch,
    SessionStatus,
};
use mentorly_core::user::{User, UserPatch};
use mentorly_core::entity::new_id;
use mentorly_core::{Entity, Relation};

use super::AppStore;
use crate::cache::upsert;
use crate::event::StoreEvent;
use crate::request::{BookingRequest, FeedbackDraft, NotesDraft};

impl AppStore {
    /// Books a pending session with a mentor on behalf of the signed-in user.
    pub async fn book_session(&self, request: BookingRequest) -> Result<Session> {
        let user = self.require_user().await?;
        if request.mentor_id == user.id {
            return Err(MentorlyError::validation("you cannot book a session with yourself"));
        }

        let mentor = self
            .api
            .users
            .get(&request.mentor_id)
            .await?
            .ok_or_else(|| MentorlyError::not_found("user", &request.mentor_id))?;
        if !mentor.role.is_mentor() {
            return Err(MentorlyError::validation(format!(
                "{} is not a mentor",
                mentor.name
            )));
        }

        let mut session = Session::new(
            &mentor.id,
            &user.id,
            request.scheduled_at,
            request.duration_minutes,
        );
        session.session_type = request.session_type;
        session.venue = request.venue;
        session.topic = request.topic;

        let created = self.api.sessions.create(session).await.inspect_err(|e| {
            tracing::warn!("[Store] Booking with {} failed: {}", mentor.id, e)
        })?;
        tracing::info!(
            "[Store] Booked session {} with mentor {}",
            created.id,
            mentor.id
        );

        upsert(&mut self.cache.write().await.sessions, created.clone());
        self.publish(StoreEvent::SessionsChanged {
            session_id: created.id.clone(),
        });

        self.notify(
            &mentor.id,
            NotificationKind::SessionRequested,
            "New session request",
            format!(
                "{} requested a session on {}",
                user.name,
                created.scheduled_at.format("%Y-%m-%d %H:%M UTC")
            ),
            Some(format!("/sessions/{}", created.id)),
        )
        .await;

        Ok(created)
    }

    /// Moves a session forward in its lifecycle and tells the other participant.
    pub async fn update_session_status(
        &self,
        session_id: &str,
        status: SessionStatus,
    ) -> Result<Session> {
        let user = self.require_user().await?;
        let current = self.session_for(session_id, &user.id).await?;
        if !current.status.can_transition_to(status) {
            return Err(MentorlyError::invalid_transition(
                Session::ENTITY_NAME,
                current.status,
                status,
            ));
        }
        if current.status == status {
            return Ok(current);
        }

        let updated = self
            .api
            .sessions
            .update(session_id, SessionPatch::status(status))
            .await?
            .ok_or_else(|| MentorlyError::not_found(Session::ENTITY_NAME, session_id))?;
        tracing::info!(
            "[Store] Session {} moved {} -> {}",
            session_id,
            current.status,
            status
        );

        upsert(&mut self.cache.write().await.sessions, updated.clone());
        self.publish(StoreEvent::SessionsChanged {
            session_id: session_id.to_string(),
        });

        if status == SessionStatus::Completed {
            self.bump_mentor_session_count(&updated.mentor_id).await;
        }

        let kind = match status {
            SessionStatus::Confirmed => Some(NotificationKind::SessionConfirmed),
            SessionStatus::Cancelled => Some(NotificationKind::SessionCancelled),
            SessionStatus::Completed => Some(NotificationKind::SessionCompleted),
            SessionStatus::Pending => None,
        };
        if let (Some(kind), Some(counterpart)) = (kind, updated.counterpart_of(&user.id)) {
            self.notify(
                counterpart,
                kind,
                format!("Session {}", status),
                format!("{} marked your session as {}", user.name, status),
                Some(format!("/sessions/{}", updated.id)),
            )
            .await;
        }

        Ok(updated)
    }

    pub async fn confirm_session(&self, session_id: &str) -> Result<Session> {
        self.update_session_status(session_id, SessionStatus::Confirmed)
            .await
    }

    pub async fn cancel_session(&self, session_id: &str) -> Result<Session> {
        self.update_session_status(session_id, SessionStatus::Cancelled)
            .await
    }

    pub async fn complete_session(&self, session_id: &str) -> Result<Session> {
        self.update_session_status(session_id, SessionStatus::Completed)
            .await
    }

    /// Records the mentee's rating of a completed session.
    pub async fn submit_feedback(&self, draft: FeedbackDraft) -> Result<SessionFeedback> {
        let user = self.require_user().await?;
        let session = self.session_for(&draft.session_id, &user.id).await?;

        if session.mentee_id != user.id {
            return Err(MentorlyError::validation(
                "only the session's mentee can leave feedback",
            ));
        }
        if session.status != SessionStatus::Completed {
            return Err(MentorlyError::validation(
                "feedback is only accepted for completed sessions",
            ));
        }
        let existing = self
            .api
            .feedback
            .list(&session.id, Relation::Session)
            .await?;
        if !existing.is_empty() {
            return Err(MentorlyError::validation(
                "feedback was already submitted for this session",
            ));
        }

        let mut feedback =
            SessionFeedback::new(&session.id, &session.mentor_id, &user.id, draft.rating);
        feedback.what_went_well = draft.what_went_well;
        feedback.what_to_improve = draft.what_to_improve;
        feedback.additional_comments = draft.additional_comments;

        let created = self.api.feedback.create(feedback).await?;
        tracing::info!(
            "[Store] Feedback {} submitted for session {}",
            created.id,
            session.id
        );

        upsert(&mut self.cache.write().await.feedback, created.clone());
        self.publish(StoreEvent::FeedbackChanged {
            session_id: session.id.clone(),
        });

        self.refresh_mentor_rating(&session.mentor_id).await;
        self.notify(
            &session.mentor_id,
            NotificationKind::FeedbackReceived,
            "New feedback",
            format!("{} rated your session {}/5", user.name, created.rating),
            Some(format!("/sessions/{}", session.id)),
        )
        .await;

        Ok(created)
    }

    /// Creates or replaces the signed-in mentor's notes for a session.
    pub async fn save_session_notes(
        &self,
        session_id: &str,
        draft: NotesDraft,
    ) -> Result<MentorSessionNotes> {
        let user = self.require_user().await?;
        let session = self.session_for(session_id, &user.id).await?;
        if session.mentor_id != user.id {
            return Err(MentorlyError::validation(
                "only the session's mentor can write notes",
            ));
        }

        let existing = self
            .cache
            .read()
            .await
            .session_notes
            .iter()
            .find(|n| n.session_id == session_id && n.mentor_id == user.id)
            .map(|n| n.id.clone());

        let saved = match existing {
            Some(notes_id) => self
                .api
                .session_notes
                .update(
                    &notes_id,
                    MentorSessionNotesPatch {
                        notes: Some(draft.notes),
                        action_items: Some(draft.action_items),
                        is_private: Some(draft.is_private),
                    },
                )
                .await?
                .ok_or_else(|| MentorlyError::not_found(MentorSessionNotes::ENTITY_NAME, &notes_id))?,
            None => {
                let now = Utc::now();
                let notes = MentorSessionNotes {
                    id: new_id(),
                    session_id: session.id.clone(),
                    mentor_id: session.mentor_id.clone(),
                    mentee_id: session.mentee_id.clone(),
                    notes: draft.notes,
                    action_items: draft.action_items,
                    is_private: draft.is_private,
                    created_at: now,
                    updated_at: now,
                };
                self.api.session_notes.create(notes).await?
            }
        };

        upsert(&mut self.cache.write().await.session_notes, saved.clone());
        self.publish(StoreEvent::NotesChanged {
            session_id: session_id.to_string(),
        });
        Ok(saved)
    }

    /// Fetches the current backend copy of a session the user takes part in.
    ///
    /// The other participant may have changed it since the last load, so the
    /// cache is refreshed from the backend copy before any status check.
    async fn session_for(&self, session_id: &str, user_id: &str) -> Result<Session> {
        let session = self
            .api
            .sessions
            .get(session_id)
            .await?
            .filter(|s| s.involves(user_id))
            .ok_or_else(|| MentorlyError::not_found(Session::ENTITY_NAME, session_id))?;

        let mut cache = self.cache.write().await;
        if cache.find_session(session_id) != Some(&session) {
            tracing::debug!("[Store] Refreshed stale session {}", session_id);
            upsert(&mut cache.sessions, session.clone());
            drop(cache);
            self.publish(StoreEvent::SessionsChanged {
                session_id: session_id.to_string(),
            });
        }
        Ok(session)
    }

    async fn bump_mentor_session_count(&self, mentor_id: &str) {
        let result: Result<Option<User>> = async {
            let mentor = self
                .api
                .users
                .get(mentor_id)
                .await?
                .ok_or_else(|| MentorlyError::not_found("user", mentor_id))?;
            let patch = UserPatch {
                total_sessions: Some(mentor.total_sessions + 1),
                ..Default::default()
            };
            self.api.users.update(mentor_id, patch).await
        }
        .await;
        self.apply_counterpart_profile(mentor_id, result).await;
    }

    /// Recomputes the mentor's public rating from all feedback they received.
    async fn refresh_mentor_rating(&self, mentor_id: &str) {
        let result: Result<Option<User>> = async {
            let received = self.api.feedback.list(mentor_id, Relation::Mentor).await?;
            if received.is_empty() {
                return Ok(None);
            }
            let sum: u32 = received.iter().map(|f| u32::from(f.rating)).sum();
            let average = (f64::from(sum) / received.len() as f64 * 10.0).round() / 10.0;
            let patch = UserPatch {
                rating: Some(average),
                ..Default::default()
            };
            self.api.users.update(mentor_id, patch).await
        }
        .await;
        self.apply_counterpart_profile(mentor_id, result).await;
    }

    async fn apply_counterpart_profile(
        &self,
        user_id: &str,
        result: Result<Option<User>>,
    ) {
        match result {
            Ok(Some(updated)) => {
                let mut cache = self.cache.write().await;
                if cache.user_id() == Some(user_id) {
                    cache.current_user = Some(updated);
                    drop(cache);
                    self.publish(StoreEvent::ProfileChanged);
                }
            }
            Ok(None) => {}
            Err(e) => tracing::warn!("[Store] Failed to update profile of {}: {}", user_id, e),
        }
    }
}
