use chrono::{NaiveDate, Utc};
use rand::Rng;

use crate::core::scoring::{calculate_match_score, UNSCOREABLE};
use crate::models::{ScoredCandidate, ScoringWeights, User};

/// Number of candidates returned when the caller does not ask for a count
pub const DEFAULT_TOP_K: usize = 10;

/// Scores candidate users for a viewer and ranks them
///
/// The random tie-breaker is drawn from the `Rng` handed to each call, so
/// callers that need reproducible output pass a seeded or mock generator.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    default_top_k: usize,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            default_top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default())
    }

    pub fn with_default_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn default_top_k(&self) -> usize {
        self.default_top_k
    }

    /// Compatibility of `candidate` for `viewer`, or [`UNSCOREABLE`] if either lacks a profile
    pub fn score<R: Rng + ?Sized>(&self, viewer: &User, candidate: &User, rng: &mut R) -> f64 {
        self.score_on(viewer, candidate, Utc::now().date_naive(), rng)
    }

    /// Same as [`Matcher::score`] with ages computed as of `today`
    pub fn score_on<R: Rng + ?Sized>(
        &self,
        viewer: &User,
        candidate: &User,
        today: NaiveDate,
        rng: &mut R,
    ) -> f64 {
        let (Some(viewer_profile), Some(candidate_profile)) = (&viewer.profile, &candidate.profile)
        else {
            return UNSCOREABLE;
        };

        let score = calculate_match_score(viewer_profile, candidate_profile, &self.weights, today, rng);
        tracing::trace!(viewer = %viewer.user_id, candidate = %candidate.user_id, score, "scored candidate");
        score
    }

    /// Best `top_k` candidates for `viewer`, highest score first
    ///
    /// The viewer is skipped by id even when present in `candidates`.
    /// `None` uses the configured default count; `Some(0)` returns nothing.
    pub fn compute_matches<'a, I, R>(
        &self,
        viewer: &User,
        candidates: I,
        top_k: Option<usize>,
        rng: &mut R,
    ) -> Vec<&'a User>
    where
        I: IntoIterator<Item = &'a User>,
        R: Rng + ?Sized,
    {
        self.ranked(viewer, candidates, top_k, rng)
            .into_iter()
            .map(|(_, user)| user)
            .collect()
    }

    /// Like [`Matcher::compute_matches`] but keeps each candidate's score
    pub fn rank<'a, I, R>(
        &self,
        viewer: &User,
        candidates: I,
        top_k: Option<usize>,
        rng: &mut R,
    ) -> Vec<ScoredCandidate>
    where
        I: IntoIterator<Item = &'a User>,
        R: Rng + ?Sized,
    {
        self.ranked(viewer, candidates, top_k, rng)
            .into_iter()
            .map(|(score, user)| ScoredCandidate {
                user_id: user.user_id,
                display_name: user.display_name().to_string(),
                score,
            })
            .collect()
    }

    fn ranked<'a, I, R>(
        &self,
        viewer: &User,
        candidates: I,
        top_k: Option<usize>,
        rng: &mut R,
    ) -> Vec<(f64, &'a User)>
    where
        I: IntoIterator<Item = &'a User>,
        R: Rng + ?Sized,
    {
        let limit = top_k.unwrap_or(self.default_top_k);
        if limit == 0 {
            return Vec::new();
        }

        let today = Utc::now().date_naive();
        let mut scored: Vec<(f64, &User)> = candidates
            .into_iter()
            .filter(|candidate| candidate.user_id != viewer.user_id)
            .map(|candidate| (self.score_on(viewer, candidate, today, rng), candidate))
            .collect();
        let total_candidates = scored.len();

        // Sort by score (descending); equal scores keep no particular order
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        tracing::debug!(
            viewer = %viewer.user_id,
            total_candidates,
            returned = scored.len(),
            "ranked candidates"
        );
        scored
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, Location, Photo, Profile};
    use chrono::Datelike;
    use rand::rngs::mock::StepRng;

    fn create_candidate(name: &str, age: i32, gender: Gender, lat: f64, lon: f64) -> User {
        let today = Utc::now().date_naive();
        let mut profile = Profile::new(name);
        profile.birthdate = NaiveDate::from_ymd_opt(today.year() - age, 1, 1);
        profile.gender = Some(gender);
        profile.bio = "bio".to_string();
        profile.location = Some(Location::new(lat, lon).unwrap());
        profile.add_photo(Photo::default());

        let mut user = User::new(format!("{}@example.com", name));
        user.update_profile(profile);
        user
    }

    fn create_viewer() -> User {
        let mut viewer = create_candidate("viewer", 30, Gender::Male, 37.7749, -122.4194);
        if let Some(profile) = viewer.profile.as_mut() {
            profile.preferences.gender_preference = vec![Gender::Female];
            profile.preferences.age_min = 21;
            profile.preferences.age_max = 35;
            profile.preferences.max_distance_km = 50;
        }
        viewer
    }

    #[test]
    fn test_score_without_profile() {
        let matcher = Matcher::default();
        let viewer = create_viewer();
        let bare = User::new("bare@example.com");

        assert_eq!(matcher.score(&viewer, &bare, &mut rand::thread_rng()), UNSCOREABLE);
        assert_eq!(matcher.score(&bare, &viewer, &mut rand::thread_rng()), UNSCOREABLE);
        assert_eq!(matcher.score(&bare, &bare, &mut rand::thread_rng()), UNSCOREABLE);
    }

    #[test]
    fn test_compute_matches_sorted_by_score() {
        let matcher = Matcher::with_default_weights();
        let viewer = create_viewer();

        let candidates = vec![
            create_candidate("far", 25, Gender::Female, 39.0, -122.4194),
            create_candidate("close", 25, Gender::Female, 37.78, -122.42),
            create_candidate("wrong_gender", 25, Gender::Male, 37.78, -122.42),
        ];

        let result = matcher.compute_matches(&viewer, &candidates, None, &mut StepRng::new(0, 0));
        let names: Vec<&str> = result.iter().map(|u| u.display_name()).collect();

        // The 136 km penalty is smaller than the gender swing
        assert_eq!(names, vec!["close", "far", "wrong_gender"]);
    }

    #[test]
    fn test_viewer_excluded() {
        let matcher = Matcher::default();
        let viewer = create_viewer();
        let candidates = vec![
            viewer.clone(),
            create_candidate("a", 25, Gender::Female, 37.78, -122.42),
        ];

        let result = matcher.compute_matches(&viewer, &candidates, Some(10), &mut rand::thread_rng());

        assert_eq!(result.len(), 1);
        assert!(result.iter().all(|u| u.user_id != viewer.user_id));
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::default();
        let viewer = create_viewer();

        let candidates: Vec<User> = (0..20)
            .map(|i| {
                create_candidate(
                    &format!("user{}", i),
                    22 + (i % 10),
                    Gender::Female,
                    37.7749 + (i as f64 * 0.01),
                    -122.4194,
                )
            })
            .collect();

        let result = matcher.compute_matches(&viewer, &candidates, Some(5), &mut rand::thread_rng());
        assert_eq!(result.len(), 5);

        // Default count applies when none is given
        let result = matcher.compute_matches(&viewer, &candidates, None, &mut rand::thread_rng());
        assert_eq!(result.len(), DEFAULT_TOP_K);

        let result = matcher.compute_matches(&viewer, &candidates, Some(0), &mut rand::thread_rng());
        assert!(result.is_empty());
    }

    #[test]
    fn test_fewer_candidates_than_limit() {
        let matcher = Matcher::default().with_default_top_k(3);
        let viewer = create_viewer();
        let candidates = vec![create_candidate("only", 25, Gender::Female, 37.78, -122.42)];

        assert_eq!(matcher.default_top_k(), 3);
        let result = matcher.compute_matches(&viewer, &candidates, None, &mut rand::thread_rng());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_rank_reports_scores_descending() {
        let matcher = Matcher::default();
        let viewer = create_viewer();
        let candidates: Vec<User> = (0..8)
            .map(|i| create_candidate(&format!("c{}", i), 20 + i * 3, Gender::Female, 37.78, -122.42))
            .collect();

        let ranked = matcher.rank(&viewer, &candidates, Some(8), &mut rand::thread_rng());

        assert_eq!(ranked.len(), 8);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }
}
