//! Data API collaborator.
//!
//! The backend owns every record; these traits are the client's view of its
//! generated CRUD and list-by-relation calls. Failures of the backend surface
//! as `Err`, a missing record as `None` or `false`.

use async_trait::async_trait;
use std::sync::Arc;

use crate::entity::{Entity, Relation};
use crate::error::Result;
use crate::goal::{Goal, Habit, HabitCompletion};
use crate::notification::Notification;
use crate::reflection::Reflection;
use crate::session::{MentorSessionNotes, Session, SessionFeedback};
use crate::user::User;

/// CRUD and list operations for one entity type.
#[async_trait]
pub trait EntityRepository<E: Entity>: Send + Sync {
    /// Stores a new record and returns it as the backend saw it.
    async fn create(&self, record: E) -> Result<E>;

    /// Finds a record by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(E))`: Record found
    /// - `Ok(None)`: Record not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn get(&self, id: &str) -> Result<Option<E>>;

    /// Lists records reachable from `owner_id` through `relation`, in the
    /// backend's order.
    async fn list(&self, owner_id: &str, relation: Relation) -> Result<Vec<E>>;

    /// Applies a partial update.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(E))`: The updated record
    /// - `Ok(None)`: No record with this ID
    /// - `Err(_)`: The patch was rejected or the backend failed
    async fn update(&self, id: &str, patch: E::Patch) -> Result<Option<E>>;

    /// Deletes a record; `Ok(false)` when nothing was deleted.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// One repository per entity, as exposed by the backend.
#[derive(Clone)]
pub struct DataApi {
    pub users: Arc<dyn EntityRepository<User>>,
    pub sessions: Arc<dyn EntityRepository<Session>>,
    pub goals: Arc<dyn EntityRepository<Goal>>,
    pub habits: Arc<dyn EntityRepository<Habit>>,
    pub completions: Arc<dyn EntityRepository<HabitCompletion>>,
    pub reflections: Arc<dyn EntityRepository<Reflection>>,
    pub feedback: Arc<dyn EntityRepository<SessionFeedback>>,
    pub notifications: Arc<dyn EntityRepository<Notification>>,
    pub session_notes: Arc<dyn EntityRepository<MentorSessionNotes>>,
}
