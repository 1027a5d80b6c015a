use chrono::NaiveDate;
use rand::Rng;

use crate::core::filters::{age_shortfall, matches_gender, shared_interests};
use crate::models::{Preferences, Profile, ScoringWeights};

/// Score reported when either side has no profile
pub const UNSCOREABLE: f64 = -1.0;

/// Calculate how well `candidate` fits `viewer`'s preferences
///
/// Scoring formula (default weights):
/// score = (
///     gender     +20 if accepted, -10 otherwise
///   + age        +15 inside range, -years outside; skipped without birthdate
///   + interests  +5 per shared tag
///   + complete   +0.1 per completeness percent
///   + distance   proximity bonus up to +10, or -0.2 per km beyond the limit
///   + noise      uniform in [0, 2)
/// )
///
/// The result is unbounded in both directions and finite for finite inputs.
pub fn calculate_match_score<R: Rng + ?Sized>(
    viewer: &Profile,
    candidate: &Profile,
    weights: &ScoringWeights,
    today: NaiveDate,
    rng: &mut R,
) -> f64 {
    let preferences = &viewer.preferences;

    let gender_score = calculate_gender_score(candidate, preferences, weights);

    let age_score = candidate
        .age_on(today)
        .map_or(0.0, |age| calculate_age_score(age, preferences, weights));

    let shared = shared_interests(preferences, &candidate.preferences);
    let interest_score = weights.shared_interest * shared.len() as f64;

    let completeness_score = weights.completeness * f64::from(candidate.completeness());

    let distance_score = match (&viewer.location, &candidate.location) {
        (Some(here), Some(there)) => calculate_distance_score(
            here.distance_km_to(there),
            preferences.max_distance_km,
            weights,
        ),
        _ => 0.0,
    };

    let noise = rng.gen::<f64>() * weights.tie_breaker;

    gender_score + age_score + interest_score + completeness_score + distance_score + noise
}

#[inline]
fn calculate_gender_score(
    candidate: &Profile,
    preferences: &Preferences,
    weights: &ScoringWeights,
) -> f64 {
    if matches_gender(candidate, preferences) {
        weights.gender_match
    } else {
        -weights.gender_mismatch
    }
}

/// Flat bonus inside the range, linear penalty per year outside it
#[inline]
fn calculate_age_score(age: i32, preferences: &Preferences, weights: &ScoringWeights) -> f64 {
    match age_shortfall(age, preferences) {
        None => weights.age_in_range,
        Some(years) => -(years as f64),
    }
}

/// Proximity bonus within `max_distance_km`, linear penalty beyond it
#[inline]
fn calculate_distance_score(distance_km: f64, max_distance_km: u32, weights: &ScoringWeights) -> f64 {
    let max = f64::from(max_distance_km);
    if distance_km > max {
        return -(distance_km - max) * weights.distance_penalty;
    }

    // max(1, ..) keeps a zero limit from dividing by zero
    ((max - distance_km) / max.max(1.0)).max(0.0) * weights.proximity
}
