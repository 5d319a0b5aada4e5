use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use mentorly_application::AppStore;
use mentorly_core::config::MentorlyConfig;
use mentorly_infrastructure::{ConfigService, json_dir_data_api};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Config file contents plus the record directory to open.
pub struct Settings {
    pub config: MentorlyConfig,
    pub data_dir: PathBuf,
}

impl Settings {
    /// `--data-dir` wins over the config file, which wins over the platform default.
    pub fn resolve(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let service = match config_path {
            Some(path) => ConfigService::with_path(path),
            None => ConfigService::new().context("Failed to locate the config directory")?,
        };
        let config = service
            .get_config()
            .with_context(|| format!("Failed to read {}", service.path().display()))?;
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => service.data_dir().context("Failed to resolve the data directory")?,
        };
        Ok(Self { config, data_dir })
    }
}

/// Logs go to stderr so stdout stays pure JSON.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub async fn open_store(settings: &Settings, user_id: &str) -> Result<AppStore> {
    tracing::debug!("Opening records in {}", settings.data_dir.display());
    let api = json_dir_data_api(&settings.data_dir);
    let store = AppStore::new(api, settings.config.analytics.clone());
    store
        .load_for_user(user_id)
        .await
        .with_context(|| format!("Failed to load user '{}'", user_id))?;
    Ok(store)
}

pub fn today_or(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Utc::now().date_naive())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
