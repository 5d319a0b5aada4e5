//! Goal domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::entity::{Entity, Relation};
use crate::error::{MentorlyError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum GoalStatus {
    Draft,
    Active,
    Completed,
    Archived,
}

impl Default for GoalStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// An identity-based aspiration ("I am someone who ...").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    /// The identity the user is building toward
    #[serde(default)]
    pub identity_statement: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: GoalStatus,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: crate::entity::new_id(),
            user_id: user_id.into(),
            title: title.into(),
            identity_statement: String::new(),
            description: String::new(),
            category: None,
            status: GoalStatus::Active,
            target_date: None,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPatch {
    pub title: Option<String>,
    pub identity_statement: Option<String>,
    pub description: Option<String>,
    pub category: Option<Option<String>>,
    pub status: Option<GoalStatus>,
    pub target_date: Option<Option<NaiveDate>>,
}

impl Entity for Goal {
    const ENTITY_NAME: &'static str = "goal";
    type Patch = GoalPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn belongs_to(&self, owner_id: &str, relation: Relation) -> bool {
        matches!(relation, Relation::User) && self.user_id == owner_id
    }

    fn apply_patch(&mut self, patch: GoalPatch) -> Result<()> {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(identity) = patch.identity_statement {
            self.identity_statement = identity;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(target) = patch.target_date {
            self.target_date = target;
        }
        self.validate()
    }

    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(MentorlyError::validation("goal title must not be empty"));
        }
        Ok(())
    }
}
