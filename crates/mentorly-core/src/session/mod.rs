//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: scheduled mentor/mentee meetings and their status machine
//! - `feedback`: the mentee's rating of a completed session
//! - `notes`: the mentor's private or shared notes for a session

mod feedback;
mod model;
mod notes;

pub use feedback::{SessionFeedback, SessionFeedbackPatch};
pub use model::{Session, SessionPatch, SessionStatus, SessionType};
pub use notes::{MentorSessionNotes, MentorSessionNotesPatch};
