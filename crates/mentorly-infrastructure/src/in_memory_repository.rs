//! In-memory data API.
//!
//! Mirrors the backend's CRUD semantics over a `Vec` in insertion order. Used
//! by tests and demos; `set_failing` simulates an unreachable backend.

use async_trait::async_trait;
use mentorly_core::error::{MentorlyError, Result};
use mentorly_core::goal::{Goal, Habit, HabitCompletion};
use mentorly_core::notification::Notification;
use mentorly_core::reflection::Reflection;
use mentorly_core::session::{MentorSessionNotes, Session, SessionFeedback};
use mentorly_core::user::User;
use mentorly_core::{DataApi, Entity, EntityRepository, Relation};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

pub struct InMemoryRepository<E> {
    records: RwLock<Vec<E>>,
    failing: AtomicBool,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<E>) -> Self {
        Self {
            records: RwLock::new(records),
            failing: AtomicBool::new(false),
        }
    }

    /// Inserts a record without validation, as if another client had written it.
    pub async fn seed(&self, record: E) {
        self.records.write().await.push(record);
    }

    /// Makes every subsequent call fail with a data access error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Current contents, in insertion order.
    pub async fn snapshot(&self) -> Vec<E> {
        self.records.read().await.clone()
    }

    fn check_available(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MentorlyError::data_access(format!(
                "{} backend unavailable",
                E::ENTITY_NAME
            )));
        }
        Ok(())
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Entity> EntityRepository<E> for InMemoryRepository<E> {
    async fn create(&self, record: E) -> Result<E> {
        self.check_available()?;
        record.validate()?;

        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(MentorlyError::data_access(format!(
                "{} '{}' already exists",
                E::ENTITY_NAME,
                record.id()
            )));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, id: &str) -> Result<Option<E>> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn list(&self, owner_id: &str, relation: Relation) -> Result<Vec<E>> {
        self.check_available()?;
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.belongs_to(owner_id, relation))
            .cloned()
            .collect())
    }

    async fn update(&self, id: &str, patch: E::Patch) -> Result<Option<E>> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let Some(slot) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };

        // Patch a copy so a rejected patch leaves the stored record intact
        let mut updated = slot.clone();
        updated.apply_patch(patch)?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.check_available()?;
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() != before)
    }
}

/// Handles to every in-memory repository, for seeding and fault injection.
#[derive(Clone, Default)]
pub struct InMemoryBackend {
    pub users: Arc<InMemoryRepository<User>>,
    pub sessions: Arc<InMemoryRepository<Session>>,
    pub goals: Arc<InMemoryRepository<Goal>>,
    pub habits: Arc<InMemoryRepository<Habit>>,
    pub completions: Arc<InMemoryRepository<HabitCompletion>>,
    pub reflections: Arc<InMemoryRepository<Reflection>>,
    pub feedback: Arc<InMemoryRepository<SessionFeedback>>,
    pub notifications: Arc<InMemoryRepository<Notification>>,
    pub session_notes: Arc<InMemoryRepository<MentorSessionNotes>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The repositories as the trait objects the application consumes.
    pub fn data_api(&self) -> DataApi {
        DataApi {
            users: self.users.clone(),
            sessions: self.sessions.clone(),
            goals: self.goals.clone(),
            habits: self.habits.clone(),
            completions: self.completions.clone(),
            reflections: self.reflections.clone(),
            feedback: self.feedback.clone(),
            notifications: self.notifications.clone(),
            session_notes: self.session_notes.clone(),
        }
    }

    /// Switches every repository into or out of failing mode.
    pub fn set_failing(&self, failing: bool) {
        self.users.set_failing(failing);
        self.sessions.set_failing(failing);
        self.goals.set_failing(failing);
        self.habits.set_failing(failing);
        self.completions.set_failing(failing);
        self.reflections.set_failing(failing);
        self.feedback.set_failing(failing);
        self.notifications.set_failing(failing);
        self.session_notes.set_failing(failing);
    }
}
