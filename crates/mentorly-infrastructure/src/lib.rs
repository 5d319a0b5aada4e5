//! Infrastructure layer for Mentorly.
//!
//! Adapters for the data API (in-memory and JSON directory), the ingestion
//! DTOs that normalise raw backend records, and configuration loading.

pub mod config_service;
pub mod dto;
pub mod in_memory_repository;
pub mod json_dir_repository;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::in_memory_repository::{InMemoryBackend, InMemoryRepository};
pub use crate::json_dir_repository::{JsonDirRepository, json_dir_data_api};
pub use crate::paths::MentorlyPaths;
