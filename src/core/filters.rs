use crate::models::{Preferences, Profile};

/// Check if the candidate's recorded gender is one the viewer accepts
///
/// A candidate without a recorded gender never matches.
#[inline]
pub fn matches_gender(candidate: &Profile, preferences: &Preferences) -> bool {
    candidate
        .gender
        .map_or(false, |gender| preferences.accepts_gender(gender))
}

/// Years by which `age` falls outside the preferred range
///
/// Returns `None` when the age is inside the inclusive range. The gap is
/// computed in `i64`, which holds any `i32` age against any `u32` bound.
#[inline]
pub fn age_shortfall(age: i32, preferences: &Preferences) -> Option<u64> {
    let age = i64::from(age);
    let min = i64::from(preferences.age_min);
    let max = i64::from(preferences.age_max);

    if age < min {
        Some((min - age).unsigned_abs())
    } else if age > max {
        Some((age - max).unsigned_abs())
    } else {
        None
    }
}

/// Interest tags present on both sides, compared as exact strings
///
/// Duplicates are collapsed; the result is sorted for stable output.
pub fn shared_interests(viewer: &Preferences, candidate: &Preferences) -> Vec<String> {
    let theirs = candidate.interest_set();
    let mut shared: Vec<String> = viewer
        .interest_set()
        .into_iter()
        .filter(|tag| theirs.contains(tag))
        .map(str::to_string)
        .collect();
    shared.sort();
    shared
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Gender;

    fn create_test_preferences(interests: &[&str]) -> Preferences {
        Preferences {
            gender_preference: vec![Gender::Female],
            age_min: 25,
            age_max: 35,
            max_distance_km: 50,
            interests: interests.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_gender_match() {
        let preferences = create_test_preferences(&[]);
        let mut profile = Profile::new("Test");

        profile.gender = Some(Gender::Female);
        assert!(matches_gender(&profile, &preferences));

        profile.gender = Some(Gender::Male);
        assert!(!matches_gender(&profile, &preferences));
    }

    #[test]
    fn test_missing_gender_is_mismatch() {
        let preferences = create_test_preferences(&[]);
        let profile = Profile::new("Test");
        assert!(!matches_gender(&profile, &preferences));
    }

    #[test]
    fn test_age_shortfall() {
        let preferences = create_test_preferences(&[]);

        assert_eq!(age_shortfall(25, &preferences), None);
        assert_eq!(age_shortfall(35, &preferences), None);
        assert_eq!(age_shortfall(20, &preferences), Some(5));
        assert_eq!(age_shortfall(50, &preferences), Some(15));
        assert_eq!(age_shortfall(-1, &preferences), Some(26));
    }

    #[test]
    fn test_age_shortfall_extreme_bounds() {
        let preferences = Preferences {
            age_min: u32::MAX,
            age_max: u32::MAX,
            ..create_test_preferences(&[])
        };
        assert_eq!(age_shortfall(-1, &preferences), Some(u64::from(u32::MAX) + 1));
        assert_eq!(
            age_shortfall(i32::MIN, &preferences),
            Some(u64::from(u32::MAX) + 2_147_483_648)
        );

        let open = Preferences {
            age_min: 0,
            age_max: 0,
            ..create_test_preferences(&[])
        };
        assert_eq!(age_shortfall(i32::MAX, &open), Some(2_147_483_647));
        assert_eq!(age_shortfall(0, &open), None);
    }

    #[test]
    fn test_shared_interests() {
        let viewer = create_test_preferences(&["hiking", "coffee", "hiking"]);
        let candidate = create_test_preferences(&["coffee", "Hiking", "movies", "coffee"]);

        assert_eq!(shared_interests(&viewer, &candidate), vec!["coffee"]);
    }

    #[test]
    fn test_no_shared_interests() {
        let viewer = create_test_preferences(&["hiking"]);
        let candidate = create_test_preferences(&[]);
        assert!(shared_interests(&viewer, &candidate).is_empty());
    }
}
