//! Application layer for Mentorly.
//!
//! `AppStore` is the state container the presentation layer talks to: it
//! mirrors the signed-in user's records, routes every mutation through the
//! data API and recomputes derived metrics on demand.

pub mod cache;
pub mod event;
pub mod request;
pub mod store;

pub use cache::StoreCache;
pub use event::StoreEvent;
pub use request::{
    BookingRequest, FeedbackDraft, GoalDraft, NotesDraft, ReflectionDraft, ToggleOutcome,
};
pub use store::{AppStore, Dashboard};
