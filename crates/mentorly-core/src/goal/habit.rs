//! Habit and habit-completion domain models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::entity::{Entity, Relation};
use crate::error::{MentorlyError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HabitFrequency {
    Daily,
    Weekly,
}

impl HabitFrequency {
    /// How many completions one Monday-Sunday week expects.
    pub fn expected_per_week(self) -> u32 {
        match self {
            Self::Daily => 7,
            Self::Weekly => 1,
        }
    }
}

impl Default for HabitFrequency {
    fn default() -> Self {
        Self::Daily
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HabitStatus {
    Active,
    Paused,
    Completed,
}

impl Default for HabitStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// A recurring micro-action that belongs to exactly one goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub goal_id: String,
    pub user_id: String,
    pub title: String,
    #[serde(default)]
    pub frequency: HabitFrequency,
    #[serde(default)]
    pub status: HabitStatus,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    pub fn new(
        goal_id: impl Into<String>,
        user_id: impl Into<String>,
        title: impl Into<String>,
        frequency: HabitFrequency,
    ) -> Self {
        Self {
            id: crate::entity::new_id(),
            goal_id: goal_id.into(),
            user_id: user_id.into(),
            title: title.into(),
            frequency,
            status: HabitStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == HabitStatus::Active
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitPatch {
    pub title: Option<String>,
    pub frequency: Option<HabitFrequency>,
    pub status: Option<HabitStatus>,
}

impl Entity for Habit {
    const ENTITY_NAME: &'static str = "habit";
    type Patch = HabitPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn belongs_to(&self, owner_id: &str, relation: Relation) -> bool {
        match relation {
            Relation::User => self.user_id == owner_id,
            Relation::Goal => self.goal_id == owner_id,
            _ => false,
        }
    }

    fn apply_patch(&mut self, patch: HabitPatch) -> Result<()> {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(frequency) = patch.frequency {
            self.frequency = frequency;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(MentorlyError::validation("habit title must not be empty"));
        }
        Ok(())
    }
}

/// The fact that a habit was done by a user on a calendar day.
///
/// At most one record exists per `(habit_id, date)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCompletion {
    pub id: String,
    pub habit_id: String,
    pub user_id: String,
    pub date: NaiveDate,
    #[serde(default = "default_completed")]
    pub completed: bool,
    #[serde(default)]
    pub note: Option<String>,
}

fn default_completed() -> bool {
    true
}

impl HabitCompletion {
    pub fn new(habit_id: impl Into<String>, user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: crate::entity::new_id(),
            habit_id: habit_id.into(),
            user_id: user_id.into(),
            date,
            completed: true,
            note: None,
        }
    }

    /// Whether this record is the `(habit_id, date)` slot.
    pub fn is_slot(&self, habit_id: &str, date: NaiveDate) -> bool {
        self.habit_id == habit_id && self.date == date
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitCompletionPatch {
    pub completed: Option<bool>,
    pub note: Option<Option<String>>,
}

impl Entity for HabitCompletion {
    const ENTITY_NAME: &'static str = "habit_completion";
    type Patch = HabitCompletionPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn belongs_to(&self, owner_id: &str, relation: Relation) -> bool {
        match relation {
            Relation::User => self.user_id == owner_id,
            Relation::Habit => self.habit_id == owner_id,
            _ => false,
        }
    }

    fn apply_patch(&mut self, patch: HabitCompletionPatch) -> Result<()> {
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(note) = patch.note {
            self.note = note;
        }
        Ok(())
    }
}
