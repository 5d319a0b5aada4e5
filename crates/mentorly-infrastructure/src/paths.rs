//! Unified path management for mentorly configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/mentorly/          # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/mentorly/     # Data directory
//! └── data/                    # JSON data API mirror
//!     ├── user/
//!     │   ├── _index.json
//!     │   └── <id>.json
//!     ├── session/
//!     └── ...
//! ```

use std::path::{Path, PathBuf};

const APP_DIR: &str = "mentorly";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for mentorly_core::MentorlyError {
    fn from(err: PathError) -> Self {
        mentorly_core::MentorlyError::config(err.to_string())
    }
}

/// Resolves mentorly paths, optionally under a fixed base directory (tests).
#[derive(Debug, Clone, Default)]
pub struct MentorlyPaths {
    base_dir: Option<PathBuf>,
}

impl MentorlyPaths {
    /// Creates a resolver; with `Some(base)` every path lives under `base`.
    pub fn new(base_dir: Option<&Path>) -> Self {
        Self {
            base_dir: base_dir.map(Path::to_path_buf),
        }
    }

    /// Returns the configuration directory (e.g. `~/.config/mentorly/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.join("config")),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the data directory (e.g. `~/.local/share/mentorly/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base_dir {
            Some(base) => Ok(base.join("share")),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the default root of the JSON data directory.
    pub fn default_store_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_dir_override() {
        let paths = MentorlyPaths::new(Some(Path::new("/tmp/mentorly-test")));
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/mentorly-test/config/config.toml")
        );
        assert_eq!(
            paths.default_store_dir().unwrap(),
            PathBuf::from("/tmp/mentorly-test/share/data")
        );
    }
}
