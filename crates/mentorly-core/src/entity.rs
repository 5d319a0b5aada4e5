//! The contract every record exchanged with the data API fulfils.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::str::FromStr;

use crate::error::{MentorlyError, Result};

/// The foreign key a `list` call filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// Owning user (goals, habits, completions, notifications)
    User,
    /// Mentor side of a session-scoped record
    Mentor,
    /// Mentee side of a session-scoped record
    Mentee,
    /// Parent goal of a habit
    Goal,
    /// Parent habit of a completion
    Habit,
    /// Parent session of feedback and notes
    Session,
    /// Author of a reflection
    Author,
    /// Role membership of a user; the owner id is a role name such as `mentor`
    Role,
}

/// A record owned by the external data API.
///
/// Implementations keep their invariants in `validate` and apply partial
/// updates through `apply_patch`, so every adapter enforces the same rules.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// Stable collection name, used for storage layout and error messages.
    const ENTITY_NAME: &'static str;

    /// Partial-update payload accepted by `update`.
    type Patch: Clone + Send + Sync + 'static;

    fn id(&self) -> &str;

    /// Whether this record is reachable from `owner_id` through `relation`.
    fn belongs_to(&self, owner_id: &str, relation: Relation) -> bool;

    /// Applies a partial update in place.
    fn apply_patch(&mut self, patch: Self::Patch) -> Result<()>;

    /// Checks record-level invariants.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Generates a new record identifier.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Canonicalises an enumeration tag coming from the backend.
///
/// `"MENTOR"`, `"Mentor"`, `"in-person"`, `"InPerson"` and `"in person"` all
/// collapse to their snake_case form.
pub fn normalize_tag(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;
    for ch in raw.trim().chars() {
        if ch == '-' || ch == ' ' || ch == '_' {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            prev_lower = false;
        } else if ch.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}

/// Parses a backend enumeration tag into its typed form.
pub fn parse_tag<T: FromStr>(field: &'static str, raw: &str) -> Result<T> {
    normalize_tag(raw)
        .parse::<T>()
        .map_err(|_| MentorlyError::validation(format!("unknown {}: '{}'", field, raw)))
}
