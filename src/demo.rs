//! Sample data and a scripted walkthrough of the store and matcher.

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

use crate::core::Matcher;
use crate::models::{
    Conversation, DomainError, Gender, Location, Match, Message, Notification, Payment, Photo,
    Preferences, Profile, ScoredCandidate, Subscription, Swipe, User,
};
use crate::services::InMemoryStore;

const BASE_LAT: f64 = 37.7749;
const BASE_LON: f64 = -122.4194;
const DEMO_PASSWORD: &str = "password123";
const PREMIUM_PRICE: f64 = 9.99;
const PREMIUM_DAYS: i64 = 30;

/// Outcome of [`run`]
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub top_matches: Vec<ScoredCandidate>,
    pub new_match: Option<Match>,
    pub conversation_id: Option<Uuid>,
    pub payment_succeeded: bool,
    pub notification_id: Uuid,
}

/// Build one sample user
pub fn sample_user<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Result<User, DomainError> {
    let i = index as u32;
    let mut user = User::new(format!("user{}@example.com", index));
    user.set_password(DEMO_PASSWORD);
    user.verify_email();

    let birthdate = NaiveDate::from_ymd_opt(1990 + (index % 10) as i32, 1 + i % 12, 1 + i % 28)
        .ok_or_else(|| DomainError::InvalidOperation(format!("no sample birthdate for user {}", index)))?;

    let mut profile = Profile::new(format!("User{}", index));
    profile.birthdate = Some(birthdate);
    profile.gender = Gender::ALL.choose(rng).copied();
    profile.bio = format!("This is a short bio for user {}. Likes hiking and coffee.", index);
    profile.location = Some(
        Location::new(BASE_LAT + index as f64 * 0.01, BASE_LON + index as f64 * 0.01)?
            .with_place("DemoCity", "DemoLand"),
    );

    let interests = if index % 2 == 0 {
        ["hiking", "coffee"]
    } else {
        ["movies", "music"]
    };
    profile.set_preferences(Preferences {
        gender_preference: Gender::ALL.choose(rng).copied().into_iter().collect(),
        age_min: 20 + i % 5,
        age_max: 40 + i % 10,
        max_distance_km: 50 + i * 5,
        interests: interests.iter().map(|s| s.to_string()).collect(),
    })?;
    profile.add_photo(Photo::default());

    user.update_profile(profile);
    Ok(user)
}

/// Add `count` sample users to the store, returning their ids in creation order
pub fn seed_users<R: Rng + ?Sized>(
    store: &mut InMemoryStore,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Uuid>, DomainError> {
    let mut ids = Vec::with_capacity(count);
    for index in 0..count {
        let user = sample_user(index, rng)?;
        ids.push(user.user_id);
        store.add_user(user);
    }
    tracing::info!(count, "seeded sample users");
    Ok(ids)
}

/// Walk through ranking, a mutual like, messaging and billing
///
/// Needs at least three users in `ids`.
pub fn run<R: Rng + ?Sized>(
    store: &mut InMemoryStore,
    matcher: &Matcher,
    ids: &[Uuid],
    rng: &mut R,
) -> Result<DemoReport, DomainError> {
    let &[me, first, second, ..] = ids else {
        return Err(DomainError::InvalidOperation(format!(
            "demo needs at least 3 users, got {}",
            ids.len()
        )));
    };

    let viewer = store.user(me).ok_or(DomainError::NotFound("user", me))?;
    let candidates = store.users().filter(|u| u.user_id != me);
    let top_matches = matcher.rank(viewer, candidates, Some(5), rng);
    for candidate in &top_matches {
        tracing::info!(name = %candidate.display_name, score = candidate.score, "top match");
    }

    store.record_swipe(Swipe::like(first, second));
    let new_match = store.record_swipe(Swipe::like(second, first));

    let conversation_id = match &new_match {
        Some(m) => {
            tracing::info!(match_id = %m.match_id, "match created");
            let mut conversation = Conversation::from_match(m);
            conversation.send_message(Message::new(m.user_a, "Hi! Nice to match with you."))?;
            let id = conversation.conversation_id;
            store.add_conversation(conversation);
            Some(id)
        }
        None => None,
    };

    let mut payment = Payment::new(me, PREMIUM_PRICE);
    let payment_succeeded = payment.charge(rng)?;
    store.add_payment(payment);
    if payment_succeeded {
        let subscription = Subscription::premium(me, PREMIUM_DAYS);
        tracing::info!(sub_id = %subscription.sub_id, "subscription started");
        store.add_subscription(subscription);
    } else {
        tracing::info!("payment declined; staying on free tier");
    }

    let payload = serde_json::json!({ "match_id": new_match.as_ref().map(|m| m.match_id) });
    let notification = Notification::new(me, "match", payload);
    let notification_id = notification.notification_id;
    store.add_notification(notification);

    Ok(DemoReport {
        top_matches,
        new_match,
        conversation_id,
        payment_succeeded,
        notification_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_sample_user_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let user = sample_user(3, &mut rng).unwrap();
        let profile = user.profile.as_ref().unwrap();

        assert_eq!(user.email, "user3@example.com");
        assert!(user.verify_password("password123"));
        assert!(user.email_verified);
        assert_eq!(profile.display_name, "User3");
        assert_eq!(profile.birthdate, NaiveDate::from_ymd_opt(1993, 4, 4));
        assert_eq!(profile.preferences.age_min, 23);
        assert_eq!(profile.preferences.age_max, 43);
        assert_eq!(profile.preferences.max_distance_km, 65);
        assert_eq!(profile.preferences.interests, vec!["movies", "music"]);
        assert_eq!(profile.preferences.gender_preference.len(), 1);
        assert_eq!(profile.completeness(), 100);
    }

    #[test]
    fn test_run_needs_three_users() {
        let mut store = InMemoryStore::new();
        let mut rng = StdRng::seed_from_u64(1);
        let ids = seed_users(&mut store, 2, &mut rng).unwrap();

        let result = run(&mut store, &Matcher::default(), &ids, &mut rng);
        assert!(matches!(result, Err(DomainError::InvalidOperation(_))));
    }
}
