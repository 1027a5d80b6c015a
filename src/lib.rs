//! Spark Match - in-memory dating domain with match scoring and mutual-like reconciliation
//!
//! This library scores candidate users against a viewer's preferences, ranks
//! them, and turns reciprocal likes into exactly one match per pair.

pub mod config;
pub mod core;
pub mod demo;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, PairState, SwipeLedger, UNSCOREABLE};
pub use crate::models::{DomainError, Match, Preferences, Profile, ScoredCandidate, ScoringWeights, Swipe, User};
pub use crate::services::InMemoryStore;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let mut store = InMemoryStore::new();
        let a = User::new("a@example.com");
        let b = User::new("b@example.com");

        store.record_swipe(Swipe::like(a.user_id, b.user_id));
        assert!(store.record_swipe(Swipe::like(b.user_id, a.user_id)).is_some());
        assert_eq!(Matcher::default().score(&a, &b, &mut rand::thread_rng()), UNSCOREABLE);
    }
}
