//! Goal and habit DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use mentorly_core::entity::parse_tag;
use mentorly_core::error::Result;
use mentorly_core::goal::{Goal, GoalStatus, Habit, HabitFrequency, HabitStatus};
use serde::Deserialize;

use super::{Ingest, IntoDomain};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDto {
    pub id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default, alias = "identity")]
    pub identity_statement: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl IntoDomain<Goal> for GoalDto {
    fn into_domain(self) -> Result<Goal> {
        let status = match self.status.as_deref() {
            Some(raw) => parse_tag::<GoalStatus>("goal status", raw)?,
            None => GoalStatus::default(),
        };
        Ok(Goal {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            identity_statement: self.identity_statement.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            category: self.category,
            status,
            target_date: self.target_date,
            created_at: self.created_at.unwrap_or_default(),
        })
    }
}

impl Ingest for Goal {
    type Raw = GoalDto;
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitDto {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub frequency: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl IntoDomain<Habit> for HabitDto {
    fn into_domain(self) -> Result<Habit> {
        let frequency = match self.frequency.as_deref() {
            Some(raw) => parse_tag::<HabitFrequency>("habit frequency", raw)?,
            None => HabitFrequency::default(),
        };
        let status = match self.status.as_deref() {
            Some(raw) => parse_tag::<HabitStatus>("habit status", raw)?,
            None => HabitStatus::default(),
        };
        Ok(Habit {
            id: self.id,
            goal_id: self.goal_id,
            user_id: self.user_id,
            title: self.title,
            frequency,
            status,
            created_at: self.created_at.unwrap_or_default(),
        })
    }
}

impl Ingest for Habit {
    type Raw = HabitDto;
}
