//! Heuristic mentor recommendations.
//!
//! Score = interest matches, plus rating, plus capped experience. The weights
//! come from [`ScoringWeights`] and are tuning parameters.

use serde::{Deserialize, Serialize};

use crate::config::ScoringWeights;
use crate::user::User;

/// Directory filters applied before scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorQuery {
    /// Exact category, case-insensitive
    pub category: Option<String>,
    /// Substring of name, bio, skills or category, case-insensitive
    pub search: Option<String>,
}

impl MentorQuery {
    fn matches(&self, mentor: &User) -> bool {
        if let Some(category) = non_blank(&self.category) {
            let same = mentor
                .category
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case(category));
            if !same {
                return false;
            }
        }

        if let Some(search) = non_blank(&self.search) {
            let needle = search.to_lowercase();
            let found = [mentor.name.as_str(), mentor.bio.as_str()]
                .into_iter()
                .chain(mentor.skills.iter().map(String::as_str))
                .chain(mentor.category.as_deref())
                .any(|hay| hay.to_lowercase().contains(&needle));
            if !found {
                return false;
            }
        }
        true
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredMentor {
    pub mentor: User,
    pub score: f64,
    /// Mentee interests that matched one of the mentor's tags
    pub matched_interests: Vec<String>,
}

fn tags_overlap(interest: &str, tag: &str) -> bool {
    let interest = interest.to_lowercase();
    let tag = tag.to_lowercase();
    !interest.is_empty() && !tag.is_empty() && (tag.contains(&interest) || interest.contains(&tag))
}

fn score(interests: &[String], mentor: &User, weights: &ScoringWeights) -> ScoredMentor {
    let matched_interests: Vec<String> = interests
        .iter()
        .filter(|interest| mentor.tags().any(|tag| tags_overlap(interest, tag)))
        .cloned()
        .collect();

    let experience = if weights.sessions_divisor > 0.0 {
        (f64::from(mentor.total_sessions) / weights.sessions_divisor).min(weights.session_cap)
    } else {
        0.0
    };

    let score = matched_interests.len() as f64 * weights.interest_weight
        + mentor.rating * weights.rating_weight
        + experience;

    ScoredMentor {
        mentor: mentor.clone(),
        score,
        matched_interests,
    }
}

/// Filters `candidates` by `query`, scores them against the mentee's
/// `interests` and returns the best `max_results`.
///
/// Ties are broken by mentor id, so the result does not depend on the order
/// of `candidates`.
pub fn recommend_mentors(
    interests: &[String],
    candidates: &[User],
    query: &MentorQuery,
    weights: &ScoringWeights,
) -> Vec<ScoredMentor> {
    let mut scored: Vec<ScoredMentor> = candidates
        .iter()
        .filter(|m| m.role.is_mentor())
        .filter(|m| query.matches(m))
        .map(|m| score(interests, m, weights))
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.mentor.id.cmp(&b.mentor.id))
    });
    scored.truncate(weights.max_results);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::UserRole;

    fn mentor(id: &str, skills: &[&str], rating: f64, sessions: u32) -> User {
        let mut u = User::new(format!("Mentor {id}"), format!("{id}@example.com"), UserRole::Mentor);
        u.id = id.to_string();
        u.skills = skills.iter().map(|s| s.to_string()).collect();
        u.rating = rating;
        u.total_sessions = sessions;
        u
    }

    fn interests(tags: &[&str]) -> Vec<String> {
        tags.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_candidates() {
        let result = recommend_mentors(
            &interests(&["rust"]),
            &[],
            &MentorQuery::default(),
            &ScoringWeights::default(),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_score_components() {
        let m = mentor("m1", &["Rust", "Systems Design"], 4.5, 350);
        let result = recommend_mentors(
            &interests(&["rust", "design", "cooking"]),
            &[m],
            &MentorQuery::default(),
            &ScoringWeights::default(),
        );
        // 2 matches * 30 + 4.5 * 20 + min(35, 20)
        assert_eq!(result[0].score, 60.0 + 90.0 + 20.0);
        assert_eq!(result[0].matched_interests, interests(&["rust", "design"]));
    }

    #[test]
    fn test_mentees_are_not_recommended() {
        let mut m = mentor("m1", &["rust"], 5.0, 10);
        m.role = UserRole::Mentee;
        let result = recommend_mentors(
            &interests(&["rust"]),
            &[m],
            &MentorQuery::default(),
            &ScoringWeights::default(),
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_category_and_search_filters() {
        let mut design = mentor("m1", &["Figma"], 4.0, 10);
        design.category = Some("Design".to_string());
        let mut eng = mentor("m2", &["Rust"], 4.0, 10);
        eng.category = Some("Engineering".to_string());
        let candidates = [design, eng];

        let by_category = recommend_mentors(
            &[],
            &candidates,
            &MentorQuery {
                category: Some("design".to_string()),
                search: None,
            },
            &ScoringWeights::default(),
        );
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].mentor.id, "m1");

        let by_search = recommend_mentors(
            &[],
            &candidates,
            &MentorQuery {
                category: None,
                search: Some("RUST".to_string()),
            },
            &ScoringWeights::default(),
        );
        assert_eq!(by_search.len(), 1);
        assert_eq!(by_search[0].mentor.id, "m2");

        let blank = recommend_mentors(
            &[],
            &candidates,
            &MentorQuery {
                category: Some("  ".to_string()),
                search: Some(String::new()),
            },
            &ScoringWeights::default(),
        );
        assert_eq!(blank.len(), 2);
    }

    #[test]
    fn test_top_six_independent_of_input_order() {
        // Eight mentors, four of them tied on the cut line
        let candidates: Vec<User> = vec![
            mentor("a", &["rust"], 5.0, 0),
            mentor("b", &["rust"], 4.0, 0),
            mentor("c", &[], 3.0, 0),
            mentor("d", &[], 3.0, 0),
            mentor("e", &[], 3.0, 0),
            mentor("f", &[], 3.0, 0),
            mentor("g", &[], 3.0, 0),
            mentor("h", &[], 1.0, 0),
        ];
        let weights = ScoringWeights::default();
        let query = MentorQuery::default();
        let wanted = interests(&["rust"]);

        let forward = recommend_mentors(&wanted, &candidates, &query, &weights);
        let mut reversed_input = candidates.clone();
        reversed_input.reverse();
        let backward = recommend_mentors(&wanted, &reversed_input, &query, &weights);

        let ids = |r: &[ScoredMentor]| r.iter().map(|s| s.mentor.id.clone()).collect::<Vec<_>>();
        assert_eq!(forward.len(), 6);
        assert_eq!(ids(&forward), ids(&backward));
        assert_eq!(ids(&forward), vec!["a", "b", "c", "d", "e", "f"]);
    }
}
