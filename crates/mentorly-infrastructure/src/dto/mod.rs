//! Ingestion DTOs.
//!
//! Raw backend records are loosely typed: enumeration tags come in several
//! casings and legacy reflections store their body as a bare string. Each
//! entity names its raw shape here and resolves it into the domain model
//! exactly once, on the way in.

mod goal;
mod notification;
mod reflection;
mod session;
mod user;

pub use goal::{GoalDto, HabitDto};
pub use notification::NotificationDto;
pub use reflection::{RawReflectionContent, ReflectionDto};
pub use session::SessionDto;
pub use user::UserDto;

use mentorly_core::Entity;
use mentorly_core::error::Result;
use mentorly_core::goal::HabitCompletion;
use mentorly_core::session::{MentorSessionNotes, SessionFeedback};
use serde::de::DeserializeOwned;

/// Conversion from a raw DTO into its domain model.
pub trait IntoDomain<T> {
    fn into_domain(self) -> Result<T>;
}

/// An entity that can be read from raw backend JSON.
pub trait Ingest: Entity {
    type Raw: DeserializeOwned + IntoDomain<Self>;

    /// Parses and normalises one raw JSON record.
    fn ingest(bytes: &[u8]) -> Result<Self> {
        let raw: Self::Raw = serde_json::from_slice(bytes)?;
        let entity = raw.into_domain()?;
        entity.validate()?;
        Ok(entity)
    }
}

/// Records whose wire shape already is the domain shape.
macro_rules! ingest_as_is {
    ($($entity:ty),* $(,)?) => {
        $(
            impl IntoDomain<$entity> for $entity {
                fn into_domain(self) -> Result<$entity> {
                    Ok(self)
                }
            }

            impl Ingest for $entity {
                type Raw = $entity;
            }
        )*
    };
}

ingest_as_is!(HabitCompletion, SessionFeedback, MentorSessionNotes);
