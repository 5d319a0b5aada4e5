//! Notification domain module.

mod model;

pub use model::{Notification, NotificationKind, NotificationPatch, unread_count};
