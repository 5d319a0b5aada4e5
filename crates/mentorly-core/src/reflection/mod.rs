//! Reflection domain module.
//!
//! Reflections are journal posts shared to the social feed with a mood and a
//! visibility scope. They carry their own reactions and comments.

mod model;

pub use model::{
    Comment, Mood, Reaction, Reflection, ReflectionContent, ReflectionPatch, Visibility,
};
