//! Derived metrics computed on demand from the cache.

use chrono::{DateTime, NaiveDate, Utc};
use mentorly_core::analytics::{
    self, GoalProgress, MenteeSummary, MentorQuery, MentorStats, ScoredMentor,
};
use mentorly_core::error::{MentorlyError, Result};
use mentorly_core::goal::Goal;
use mentorly_core::notification::unread_count;
use mentorly_core::session::Session;
use mentorly_core::user::UserRole;
use mentorly_core::{Entity, Relation};
use serde::{Deserialize, Serialize};

use super::AppStore;

/// Everything the home screen shows, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub user_id: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub weekly_completion_rate: f64,
    /// Present only for users who have run at least one session as mentor
    pub mentor_stats: Option<MentorStats>,
    pub mentee_summaries: Vec<MenteeSummary>,
    pub unread_notifications: usize,
    /// Pending or confirmed sessions from `now` on, soonest first
    pub upcoming_sessions: Vec<Session>,
    pub goal_progress: Vec<GoalProgress>,
}

impl AppStore {
    pub async fn current_streak(&self, today: NaiveDate) -> u32 {
        analytics::current_streak(&self.cache.read().await.completions, today)
    }

    pub async fn longest_streak(&self, today: NaiveDate) -> u32 {
        analytics::longest_streak(&self.cache.read().await.completions, today)
    }

    pub async fn weekly_completion_rate(&self, week_of: NaiveDate) -> f64 {
        let cache = self.cache.read().await;
        analytics::weekly_completion_rate(&cache.habits, &cache.completions, week_of)
    }

    /// Statistics for the signed-in user as mentor; `None` without sessions.
    pub async fn mentor_stats(&self, now: DateTime<Utc>) -> Option<MentorStats> {
        let cache = self.cache.read().await;
        analytics::mentor_stats(
            &cache.received_feedback(),
            &cache.mentoring_sessions(),
            now,
            &self.settings,
        )
    }

    pub async fn mentee_summaries(&self) -> Vec<MenteeSummary> {
        let cache = self.cache.read().await;
        analytics::mentee_summaries(&cache.mentoring_sessions(), &cache.received_feedback())
    }

    pub async fn goal_progress(&self, goal_id: &str, week_of: NaiveDate) -> Result<GoalProgress> {
        let cache = self.cache.read().await;
        let goal = cache
            .find_goal(goal_id)
            .ok_or_else(|| MentorlyError::not_found(Goal::ENTITY_NAME, goal_id))?;
        Ok(analytics::goal_progress(
            goal,
            &cache.habits,
            &cache.completions,
            week_of,
        ))
    }

    pub async fn unread_count(&self) -> usize {
        unread_count(&self.cache.read().await.notifications)
    }

    /// Ranks mentors for the signed-in user by their interests.
    ///
    /// Candidates are fetched fresh from the backend; the user never appears
    /// in their own recommendations.
    pub async fn recommend_mentors(&self, query: &MentorQuery) -> Result<Vec<ScoredMentor>> {
        let user = self.require_user().await?;
        let mentor_role = UserRole::Mentor.to_string();

        let candidates: Vec<_> = self
            .api
            .users
            .list(&mentor_role, Relation::Role)
            .await
            .inspect_err(|e| tracing::warn!("[Store] Failed to fetch mentors: {}", e))?
            .into_iter()
            .filter(|m| m.id != user.id)
            .collect();
        tracing::debug!("[Store] Scoring {} mentor candidates", candidates.len());

        Ok(analytics::recommend_mentors(
            &user.interests,
            &candidates,
            query,
            &self.settings.scoring,
        ))
    }

    pub async fn dashboard(&self, today: NaiveDate, now: DateTime<Utc>) -> Result<Dashboard> {
        let cache = self.cache.read().await;
        let user_id = cache
            .user_id()
            .ok_or(MentorlyError::NotSignedIn)?
            .to_string();

        let mentoring = cache.mentoring_sessions();
        let received = cache.received_feedback();

        let mut upcoming: Vec<Session> = cache
            .sessions
            .iter()
            .filter(|s| !s.status.is_terminal() && s.scheduled_at >= now)
            .cloned()
            .collect();
        upcoming.sort_by(|a, b| a.scheduled_at.cmp(&b.scheduled_at));

        let goal_progress = cache
            .goals
            .iter()
            .map(|g| analytics::goal_progress(g, &cache.habits, &cache.completions, today))
            .collect();

        Ok(Dashboard {
            user_id,
            current_streak: analytics::current_streak(&cache.completions, today),
            longest_streak: analytics::longest_streak(&cache.completions, today),
            weekly_completion_rate: analytics::weekly_completion_rate(
                &cache.habits,
                &cache.completions,
                today,
            ),
            mentor_stats: analytics::mentor_stats(&received, &mentoring, now, &self.settings),
            mentee_summaries: analytics::mentee_summaries(&mentoring, &received),
            unread_notifications: unread_count(&cache.notifications),
            upcoming_sessions: upcoming,
            goal_progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use mentorly_core::config::AnalyticsSettings;
    use mentorly_core::goal::{HabitCompletion, HabitFrequency};
    use mentorly_core::user::User;
    use mentorly_infrastructure::InMemoryBackend;

    async fn signed_in(user: &User, backend: &InMemoryBackend) -> AppStore {
        backend.users.seed(user.clone()).await;
        let store = AppStore::new(backend.data_api(), AnalyticsSettings::default());
        store.load_for_user(&user.id).await.unwrap();
        store
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[tokio::test]
    async fn test_metrics_on_empty_cache() {
        let backend = InMemoryBackend::new();
        let store = AppStore::new(backend.data_api(), AnalyticsSettings::default());

        assert_eq!(store.current_streak(day(10)).await, 0);
        assert_eq!(store.weekly_completion_rate(day(10)).await, 0.0);
        assert!(store.mentor_stats(Utc::now()).await.is_none());
        assert_eq!(store.unread_count().await, 0);
        assert!(matches!(
            store.dashboard(day(10), Utc::now()).await,
            Err(MentorlyError::NotSignedIn)
        ));
    }

    #[tokio::test]
    async fn test_streak_follows_toggles() {
        let backend = InMemoryBackend::new();
        let user = User::new("Mina", "mina@example.com", UserRole::Mentee);
        let store = signed_in(&user, &backend).await;

        let goal = store
            .create_goal(crate::GoalDraft {
                title: "Run".into(),
                ..Default::default()
            })
            .await
            .unwrap();
        let habit = store
            .create_habit(&goal.id, "Jog 2km", HabitFrequency::Daily)
            .await
            .unwrap();

        for d in 6..=8 {
            store.toggle_habit_completion(&habit.id, day(d)).await.unwrap();
        }
        assert_eq!(store.current_streak(day(8)).await, 3);
        assert_eq!(store.current_streak(day(9)).await, 3);
        assert_eq!(store.longest_streak(day(8)).await, 3);

        store.toggle_habit_completion(&habit.id, day(7)).await.unwrap();
        assert_eq!(store.current_streak(day(8)).await, 1);
        assert_eq!(store.longest_streak(day(8)).await, 1);

        // 6th and 8th out of 7 expected in the week of Mon 6 May
        let rate = store.weekly_completion_rate(day(8)).await;
        assert!((rate - 200.0 / 7.0).abs() < 1e-9);
        let progress = store.goal_progress(&goal.id, day(8)).await.unwrap();
        assert_eq!(progress.completions_this_week, 2);
    }

    #[tokio::test]
    async fn test_recommend_excludes_self_and_non_mentors() {
        let backend = InMemoryBackend::new();
        let mut user = User::new("Kai", "kai@example.com", UserRole::Both);
        user.interests = vec!["rust".into()];

        let mut mentor = User::new("Ada", "ada@example.com", UserRole::Mentor);
        mentor.skills = vec!["Rust".into()];
        let mentee = User::new("Lee", "lee@example.com", UserRole::Mentee);
        backend.users.seed(mentor.clone()).await;
        backend.users.seed(mentee).await;

        let store = signed_in(&user, &backend).await;
        let ranked = store
            .recommend_mentors(&MentorQuery::default())
            .await
            .unwrap();

        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].mentor.id, mentor.id);
        assert_eq!(ranked[0].matched_interests, vec!["rust".to_string()]);
    }

    #[tokio::test]
    async fn test_dashboard_lists_upcoming_sessions_in_order() {
        let backend = InMemoryBackend::new();
        let mentor = User::new("Ada", "ada@example.com", UserRole::Mentor);
        let mentee = User::new("Lee", "lee@example.com", UserRole::Mentee);
        let now = Utc::now();

        let later = Session::new(&mentor.id, &mentee.id, now + Duration::days(3), 45);
        let sooner = Session::new(&mentor.id, &mentee.id, now + Duration::days(1), 45);
        let past = Session::new(&mentor.id, &mentee.id, now - Duration::days(1), 45);
        for session in [later.clone(), past, sooner.clone()] {
            backend.sessions.seed(session).await;
        }
        backend
            .completions
            .seed(HabitCompletion::new("h1", &mentor.id, now.date_naive()))
            .await;
        backend.users.seed(mentee).await;

        let store = signed_in(&mentor, &backend).await;
        let dashboard = store.dashboard(now.date_naive(), now).await.unwrap();

        let ids: Vec<&str> = dashboard
            .upcoming_sessions
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(ids, vec![sooner.id.as_str(), later.id.as_str()]);
        assert_eq!(dashboard.current_streak, 1);
        let stats = dashboard.mentor_stats.unwrap();
        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.average_rating, 0.0);
        assert_eq!(dashboard.mentee_summaries.len(), 1);
    }
}
