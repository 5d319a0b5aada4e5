//! Domain layer for Mentorly.
//!
//! Entities exchanged with the backend data API, the repository traits that
//! describe that API, and the derived metrics computed over cached records.

pub mod analytics;
pub mod config;
pub mod entity;
pub mod error;
pub mod goal;
pub mod notification;
pub mod reflection;
pub mod repository;
pub mod session;
pub mod user;

// Re-export common types
pub use entity::{Entity, Relation};
pub use error::{MentorlyError, Result};
pub use repository::{DataApi, EntityRepository};
