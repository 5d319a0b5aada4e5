//! User domain module.
//!
//! Users carry their identity, profile, role and mentor-side counters.

mod model;

pub use model::{MembershipTier, User, UserPatch, UserRole};
