use anyhow::Result;
use chrono::{NaiveDate, Utc};
use mentorly_application::AppStore;
use mentorly_core::analytics::{MentorQuery, week_bounds};
use serde_json::json;

use super::context::{print_json, today_or};

pub async fn streak(store: &AppStore, today: Option<NaiveDate>) -> Result<()> {
    let today = today_or(today);
    print_json(&json!({
        "today": today,
        "currentStreak": store.current_streak(today).await,
        "longestStreak": store.longest_streak(today).await,
    }))
}

pub async fn weekly_rate(store: &AppStore, week_of: Option<NaiveDate>) -> Result<()> {
    let day = today_or(week_of);
    let (monday, sunday) = week_bounds(day);
    print_json(&json!({
        "weekStart": monday,
        "weekEnd": sunday,
        "completionRate": store.weekly_completion_rate(day).await,
    }))
}

/// Prints `null` for users without mentoring sessions.
pub async fn mentor_stats(store: &AppStore) -> Result<()> {
    print_json(&store.mentor_stats(Utc::now()).await)
}

pub async fn mentees(store: &AppStore) -> Result<()> {
    print_json(&store.mentee_summaries().await)
}

pub async fn recommend(
    store: &AppStore,
    category: Option<String>,
    search: Option<String>,
) -> Result<()> {
    let query = MentorQuery { category, search };
    let ranked = store.recommend_mentors(&query).await?;
    print_json(&ranked)
}

pub async fn dashboard(store: &AppStore, today: Option<NaiveDate>) -> Result<()> {
    let dashboard = store.dashboard(today_or(today), Utc::now()).await?;
    print_json(&dashboard)
}
