//! Goals, habits and the daily completion toggle.

use chrono::NaiveDate;
use mentorly_core::{Entity, Relation};
use mentorly_core::error::{MentorlyError, Result};
use mentorly_core::goal::{
    Goal, GoalPatch, Habit, HabitCompletion, HabitCompletionPatch, HabitFrequency, HabitPatch,
    HabitStatus,
};

use super::AppStore;
use crate::cache::{remove_by_id, upsert};
use crate::event::StoreEvent;
use crate::request::{GoalDraft, ToggleOutcome};

impl AppStore {
    pub async fn create_goal(&self, draft: GoalDraft) -> Result<Goal> {
        let user = self.require_user().await?;

        let mut goal = Goal::new(&user.id, draft.title);
        goal.identity_statement = draft.identity_statement;
        goal.description = draft.description;
        goal.category = draft.category;
        goal.target_date = draft.target_date;

        let created = self.api.goals.create(goal).await?;
        tracing::info!("[Store] Created goal {}", created.id);

        upsert(&mut self.cache.write().await.goals, created.clone());
        self.publish(StoreEvent::GoalsChanged {
            goal_id: created.id.clone(),
        });
        Ok(created)
    }

    pub async fn update_goal(&self, goal_id: &str, patch: GoalPatch) -> Result<Goal> {
        self.owned_goal(goal_id).await?;

        let updated = self
            .api
            .goals
            .update(goal_id, patch)
            .await?
            .ok_or_else(|| MentorlyError::not_found(Goal::ENTITY_NAME, goal_id))?;

        upsert(&mut self.cache.write().await.goals, updated.clone());
        self.publish(StoreEvent::GoalsChanged {
            goal_id: goal_id.to_string(),
        });
        Ok(updated)
    }

    /// Deletes a goal together with its habits.
    ///
    /// Habits go first so a failure never leaves habits pointing at a missing
    /// goal. Their completion history is kept.
    pub async fn delete_goal(&self, goal_id: &str) -> Result<()> {
        self.owned_goal(goal_id).await?;

        let habits = self.api.habits.list(goal_id, Relation::Goal).await?;
        for habit in &habits {
            self.api.habits.delete(&habit.id).await?;
            remove_by_id(&mut self.cache.write().await.habits, &habit.id);
            self.publish(StoreEvent::HabitsChanged {
                habit_id: habit.id.clone(),
            });
        }
        if !self.api.goals.delete(goal_id).await? {
            return Err(MentorlyError::not_found(Goal::ENTITY_NAME, goal_id));
        }
        tracing::info!(
            "[Store] Deleted goal {} and {} habit(s)",
            goal_id,
            habits.len()
        );

        remove_by_id(&mut self.cache.write().await.goals, goal_id);
        self.publish(StoreEvent::GoalsChanged {
            goal_id: goal_id.to_string(),
        });
        Ok(())
    }

    pub async fn create_habit(
        &self,
        goal_id: &str,
        title: impl Into<String>,
        frequency: HabitFrequency,
    ) -> Result<Habit> {
        let goal = self.owned_goal(goal_id).await?;

        let habit = Habit::new(&goal.id, &goal.user_id, title, frequency);
        let created = self.api.habits.create(habit).await?;
        tracing::info!("[Store] Created habit {} under goal {}", created.id, goal.id);

        upsert(&mut self.cache.write().await.habits, created.clone());
        self.publish(StoreEvent::HabitsChanged {
            habit_id: created.id.clone(),
        });
        Ok(created)
    }

    pub async fn update_habit_status(&self, habit_id: &str, status: HabitStatus) -> Result<Habit> {
        self.owned_habit(habit_id).await?;

        let patch = HabitPatch {
            status: Some(status),
            ..Default::default()
        };
        let updated = self
            .api
            .habits
            .update(habit_id, patch)
            .await?
            .ok_or_else(|| MentorlyError::not_found(Habit::ENTITY_NAME, habit_id))?;

        upsert(&mut self.cache.write().await.habits, updated.clone());
        self.publish(StoreEvent::HabitsChanged {
            habit_id: habit_id.to_string(),
        });
        Ok(updated)
    }

    /// Flips the `(habit, date)` slot between done and not done.
    ///
    /// A completed record is deleted, an uncompleted one is marked completed
    /// and a missing one is created. Two calls leave the set of completed
    /// days as it was; an uncompleted record does not survive the round trip.
    pub async fn toggle_habit_completion(
        &self,
        habit_id: &str,
        date: NaiveDate,
    ) -> Result<ToggleOutcome> {
        let habit = self.owned_habit(habit_id).await?;

        let existing = self
            .cache
            .read()
            .await
            .completions
            .iter()
            .find(|c| c.is_slot(habit_id, date))
            .cloned();

        let outcome = match existing {
            Some(record) if record.completed => {
                if !self.api.completions.delete(&record.id).await? {
                    tracing::debug!(
                        "[Store] Completion {} was already gone upstream",
                        record.id
                    );
                }
                remove_by_id(&mut self.cache.write().await.completions, &record.id);
                ToggleOutcome::Cleared
            }
            Some(record) => {
                let patch = HabitCompletionPatch {
                    completed: Some(true),
                    ..Default::default()
                };
                let updated = self
                    .api
                    .completions
                    .update(&record.id, patch)
                    .await?
                    .ok_or_else(|| {
                        MentorlyError::not_found(HabitCompletion::ENTITY_NAME, &record.id)
                    })?;
                upsert(&mut self.cache.write().await.completions, updated.clone());
                ToggleOutcome::Completed {
                    completion: updated,
                }
            }
            None => {
                let record = HabitCompletion::new(&habit.id, &habit.user_id, date);
                let created = self.api.completions.create(record).await?;
                upsert(&mut self.cache.write().await.completions, created.clone());
                ToggleOutcome::Completed {
                    completion: created,
                }
            }
        };
        tracing::info!(
            "[Store] Toggled habit {} on {}: {}",
            habit_id,
            date,
            match outcome {
                ToggleOutcome::Completed { .. } => "completed",
                ToggleOutcome::Cleared => "cleared",
            }
        );

        self.publish(StoreEvent::CompletionsChanged {
            habit_id: habit_id.to_string(),
            date,
        });
        Ok(outcome)
    }

    async fn owned_goal(&self, goal_id: &str) -> Result<Goal> {
        let cache = self.cache.read().await;
        let user_id = cache.user_id().ok_or(MentorlyError::NotSignedIn)?;
        cache
            .find_goal(goal_id)
            .filter(|g| g.user_id == user_id)
            .cloned()
            .ok_or_else(|| MentorlyError::not_found(Goal::ENTITY_NAME, goal_id))
    }

    async fn owned_habit(&self, habit_id: &str) -> Result<Habit> {
        let cache = self.cache.read().await;
        let user_id = cache.user_id().ok_or(MentorlyError::NotSignedIn)?;
        cache
            .find_habit(habit_id)
            .filter(|h| h.user_id == user_id)
            .cloned()
            .ok_or_else(|| MentorlyError::not_found(Habit::ENTITY_NAME, habit_id))
    }
}
