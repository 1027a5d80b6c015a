// Model exports
pub mod billing;
pub mod domain;
pub mod error;
pub mod social;

pub use billing::{Payment, PaymentStatus, Subscription, SubscriptionTier};
pub use domain::{
    age_from_birthdate, hash_password, Gender, Location, Match, Photo, Preferences, Profile,
    ScoredCandidate, ScoringWeights, Swipe, SwipeDirection, User,
};
pub use error::DomainError;
pub use social::{Conversation, Message, Notification, Report};
