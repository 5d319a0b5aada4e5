use anyhow::{Context, Result};
use chrono::NaiveDate;
use mentorly_application::AppStore;
use mentorly_core::notification::Notification;

use super::context::{print_json, today_or};

pub async fn toggle(store: &AppStore, habit_id: &str, date: Option<NaiveDate>) -> Result<()> {
    let date = today_or(date);
    let outcome = store
        .toggle_habit_completion(habit_id, date)
        .await
        .with_context(|| format!("Failed to toggle habit '{}' on {}", habit_id, date))?;
    print_json(&outcome)
}

pub async fn notifications(store: &AppStore, mark_read: bool) -> Result<()> {
    print_json(&list_notifications(store, mark_read).await?)
}

/// The user's notifications, after marking them read when asked to.
async fn list_notifications(store: &AppStore, mark_read: bool) -> Result<Vec<Notification>> {
    if mark_read {
        let marked = store.mark_all_notifications_read().await?;
        tracing::info!("Marked {} notification(s) read", marked);
    }
    Ok(store.snapshot().await.notifications)
}
