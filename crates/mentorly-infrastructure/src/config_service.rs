//! Configuration service implementation.
//!
//! Loads `MentorlyConfig` from `config.toml` and caches it.

use mentorly_core::config::MentorlyConfig;
use mentorly_core::error::{MentorlyError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::paths::MentorlyPaths;

/// Configuration service that loads and caches the root configuration.
///
/// A missing file yields the defaults; a malformed file is an error.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    paths: MentorlyPaths,
    config: Arc<RwLock<Option<MentorlyConfig>>>,
}

impl ConfigService {
    /// Uses the platform config file.
    pub fn new() -> Result<Self> {
        let paths = MentorlyPaths::default();
        let path = paths.config_file()?;
        Ok(Self::with_paths(path, paths))
    }

    /// Uses an explicit config file, for tests and `--config`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self::with_paths(path.into(), MentorlyPaths::default())
    }

    fn with_paths(path: PathBuf, paths: MentorlyPaths) -> Self {
        Self {
            path,
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<MentorlyConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|e| MentorlyError::internal(format!("config lock poisoned: {e}")))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = Self::load_config(&self.path)?;

        let mut write_lock = self
            .config
            .write()
            .map_err(|e| MentorlyError::internal(format!("config lock poisoned: {e}")))?;
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// The configured data directory, or the platform default.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match self.get_config()?.storage.data_dir {
            Some(dir) => Ok(dir),
            None => Ok(self.paths.default_store_dir()?),
        }
    }

    fn load_config(path: &Path) -> Result<MentorlyConfig> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(MentorlyConfig::default());
        }

        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(MentorlyConfig::default());
        }

        toml::from_str(&content).map_err(|e| {
            MentorlyError::config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let service = ConfigService::with_path(temp_dir.path().join("config.toml"));
        assert_eq!(service.get_config().unwrap(), MentorlyConfig::default());
    }

    #[test]
    fn test_loads_and_caches() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[storage]\ndata_dir = \"/srv/mentorly\"\n[analytics.scoring]\nmax_results = 3\n",
        )
        .unwrap();

        let service = ConfigService::with_path(&path);
        let config = service.get_config().unwrap();
        assert_eq!(config.analytics.scoring.max_results, 3);
        assert_eq!(service.data_dir().unwrap(), PathBuf::from("/srv/mentorly"));

        // Cached until invalidated
        std::fs::write(&path, "[analytics.scoring]\nmax_results = 9\n").unwrap();
        assert_eq!(service.get_config().unwrap().analytics.scoring.max_results, 3);
        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().analytics.scoring.max_results, 9);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[analytics\nbroken").unwrap();

        let err = ConfigService::with_path(&path).get_config().unwrap_err();
        assert!(err.is_config());
    }
}
