//! JSON-directory data API.
//!
//! Directory structure:
//! ```text
//! base_dir/
//! └── <entity_name>/
//!     ├── _index.json       # ids in insertion order
//!     ├── <id-1>.json
//!     └── <id-2>.json
//! ```
//!
//! Records are read through the ingestion DTOs, so files written by other
//! tools in the backend's loose shape are normalised on load. Writes go to a
//! temporary file first and are renamed into place.

use async_trait::async_trait;
use mentorly_core::error::{MentorlyError, Result};
use mentorly_core::goal::{Goal, Habit, HabitCompletion};
use mentorly_core::notification::Notification;
use mentorly_core::reflection::Reflection;
use mentorly_core::session::{MentorSessionNotes, Session, SessionFeedback};
use mentorly_core::user::User;
use mentorly_core::{DataApi, Entity, EntityRepository, Relation};
use std::collections::HashSet;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::dto::Ingest;

const INDEX_FILE: &str = "_index.json";

pub struct JsonDirRepository<E> {
    dir: PathBuf,
    /// Serialises writers so the index and record files stay in step
    write_lock: Mutex<()>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Ingest> JsonDirRepository<E> {
    /// Stores records under `base_dir/<entity_name>/`.
    pub fn new(base_dir: &Path) -> Self {
        Self {
            dir: base_dir.join(E::ENTITY_NAME),
            write_lock: Mutex::new(()),
            _entity: PhantomData,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> Result<PathBuf> {
        let invalid = id.is_empty()
            || id.starts_with('.')
            || id.starts_with('_')
            || id.contains(['/', '\\']);
        if invalid {
            return Err(MentorlyError::validation(format!(
                "'{}' is not a valid {} id",
                id,
                E::ENTITY_NAME
            )));
        }
        Ok(self.dir.join(format!("{id}.json")))
    }

    async fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| MentorlyError::internal(format!("bad record path {:?}", path)))?;
        let tmp_path = self.dir.join(format!(".{file_name}.tmp"));

        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(bytes).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, path).await?;
        Ok(())
    }

    async fn read_index(&self) -> Result<Vec<String>> {
        match fs::read(self.dir.join(INDEX_FILE)).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_index(&self, ids: &[String]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(ids)?;
        self.write_atomic(&self.dir.join(INDEX_FILE), &bytes).await
    }

    async fn read_record(&self, path: &Path) -> Result<Option<E>> {
        match fs::read(path).await {
            Ok(bytes) => E::ingest(&bytes).map(Some).map_err(|e| {
                MentorlyError::data_access(format!("Failed to load {}: {}", path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Every record: indexed ones first, then files dropped in by other tools.
    async fn load_all(&self) -> Result<Vec<E>> {
        let index = self.read_index().await?;
        let mut records = Vec::with_capacity(index.len());

        for id in &index {
            match self.read_record(&self.record_path(id)?).await? {
                Some(record) => records.push(record),
                None => tracing::warn!(
                    "{} '{}' is indexed but has no file, skipping",
                    E::ENTITY_NAME,
                    id
                ),
            }
        }

        let indexed: HashSet<&str> = index.iter().map(String::as_str).collect();
        let mut orphans = Vec::new();
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(records),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let is_json = path.extension().is_some_and(|ext| ext == "json");
            if is_json && !stem.starts_with(['_', '.']) && !indexed.contains(stem) {
                orphans.push(path.clone());
            }
        }
        orphans.sort();

        for path in orphans {
            if let Some(record) = self.read_record(&path).await? {
                records.push(record);
            }
        }
        Ok(records)
    }
}

#[async_trait]
impl<E: Ingest> EntityRepository<E> for JsonDirRepository<E> {
    async fn create(&self, record: E) -> Result<E> {
        record.validate()?;
        let path = self.record_path(record.id())?;

        let _guard = self.write_lock.lock().await;
        if fs::try_exists(&path).await? {
            return Err(MentorlyError::data_access(format!(
                "{} '{}' already exists",
                E::ENTITY_NAME,
                record.id()
            )));
        }

        let bytes = serde_json::to_vec_pretty(&record)?;
        self.write_atomic(&path, &bytes).await?;

        let mut index = self.read_index().await?;
        index.push(record.id().to_string());
        self.write_index(&index).await?;

        tracing::debug!("Created {} '{}'", E::ENTITY_NAME, record.id());
        Ok(record)
    }

    async fn get(&self, id: &str) -> Result<Option<E>> {
        self.read_record(&self.record_path(id)?).await
    }

    async fn list(&self, owner_id: &str, relation: Relation) -> Result<Vec<E>> {
        Ok(self
            .load_all()
            .await?
            .into_iter()
            .filter(|r| r.belongs_to(owner_id, relation))
            .collect())
    }

    async fn update(&self, id: &str, patch: E::Patch) -> Result<Option<E>> {
        let path = self.record_path(id)?;

        let _guard = self.write_lock.lock().await;
        let Some(mut record) = self.read_record(&path).await? else {
            return Ok(None);
        };
        record.apply_patch(patch)?;

        let bytes = serde_json::to_vec_pretty(&record)?;
        self.write_atomic(&path, &bytes).await?;
        Ok(Some(record))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let path = self.record_path(id)?;

        let _guard = self.write_lock.lock().await;
        let removed = match fs::remove_file(&path).await {
            Ok(()) => true,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => return Err(e.into()),
        };

        let mut index = self.read_index().await?;
        let before = index.len();
        index.retain(|indexed| indexed != id);
        if index.len() != before {
            self.write_index(&index).await?;
        }
        Ok(removed)
    }
}

/// A `DataApi` persisted under `base_dir`.
pub fn json_dir_data_api(base_dir: &Path) -> DataApi {
    DataApi {
        users: Arc::new(JsonDirRepository::<User>::new(base_dir)),
        sessions: Arc::new(JsonDirRepository::<Session>::new(base_dir)),
        goals: Arc::new(JsonDirRepository::<Goal>::new(base_dir)),
        habits: Arc::new(JsonDirRepository::<Habit>::new(base_dir)),
        completions: Arc::new(JsonDirRepository::<HabitCompletion>::new(base_dir)),
        reflections: Arc::new(JsonDirRepository::<Reflection>::new(base_dir)),
        feedback: Arc::new(JsonDirRepository::<SessionFeedback>::new(base_dir)),
        notifications: Arc::new(JsonDirRepository::<Notification>::new(base_dir)),
        session_notes: Arc::new(JsonDirRepository::<MentorSessionNotes>::new(base_dir)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mentorly_core::session::{SessionPatch, SessionStatus};
    use tempfile::TempDir;

    fn create_test_repository() -> (JsonDirRepository<Session>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonDirRepository::new(temp_dir.path());
        (repo, temp_dir)
    }

    #[tokio::test]
    async fn test_save_and_find_session() {
        let (repo, _temp_dir) = create_test_repository();
        let session = Session::new("mentor", "mentee", Utc::now(), 45);

        repo.create(session.clone()).await.unwrap();
        let loaded = repo.get(&session.id).await.unwrap();
        assert_eq!(loaded, Some(session.clone()));
        assert!(repo.dir().join(format!("{}.json", session.id)).exists());
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let (repo, _temp_dir) = create_test_repository();
        let ids: Vec<String> = ["c", "a", "b"].iter().map(|s| s.to_string()).collect();
        for id in &ids {
            let mut s = Session::new("mentor", "mentee", Utc::now(), 45);
            s.id = id.clone();
            repo.create(s).await.unwrap();
        }

        let listed: Vec<String> = repo
            .list("mentor", Relation::Mentor)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let (repo, _temp_dir) = create_test_repository();
        let session = Session::new("mentor", "mentee", Utc::now(), 45);
        repo.create(session.clone()).await.unwrap();

        let updated = repo
            .update(&session.id, SessionPatch::status(SessionStatus::Confirmed))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, SessionStatus::Confirmed);
        assert_eq!(
            repo.get(&session.id).await.unwrap().unwrap().status,
            SessionStatus::Confirmed
        );

        assert!(repo.delete(&session.id).await.unwrap());
        assert!(!repo.delete(&session.id).await.unwrap());
        assert!(repo.list("mentor", Relation::Mentor).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_create_fails() {
        let (repo, _temp_dir) = create_test_repository();
        let session = Session::new("mentor", "mentee", Utc::now(), 45);
        repo.create(session.clone()).await.unwrap();
        assert!(repo.create(session).await.unwrap_err().is_data_access());
    }

    #[tokio::test]
    async fn test_path_like_ids_are_rejected() {
        let (repo, _temp_dir) = create_test_repository();
        assert!(repo.get("../escape").await.unwrap_err().is_validation());
        assert!(repo.get("_index").await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn test_missing_directory_lists_empty() {
        let (repo, _temp_dir) = create_test_repository();
        assert!(repo.list("anyone", Relation::User).await.unwrap().is_empty());
        assert_eq!(repo.get("nope").await.unwrap(), None);
    }
}
