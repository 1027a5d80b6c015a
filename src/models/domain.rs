use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::error::{ensure_within, DomainError};
use crate::core::distance::equirectangular_distance;

/// Gender recorded on a profile and used in preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Nonbinary,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Male, Gender::Female, Gender::Nonbinary, Gender::Other];
}

/// Geographic position of a profile
///
/// Coordinates are only set through [`Location::new`] (or deserialization,
/// which goes through it), so they are always finite and in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LocationRecord")]
pub struct Location {
    lat: f64,
    lon: f64,
    pub city: String,
    pub country: String,
}

#[derive(Deserialize)]
struct LocationRecord {
    lat: f64,
    lon: f64,
    #[serde(default)]
    city: String,
    #[serde(default)]
    country: String,
}

impl TryFrom<LocationRecord> for Location {
    type Error = DomainError;

    fn try_from(record: LocationRecord) -> Result<Self, Self::Error> {
        Ok(Self::new(record.lat, record.lon)?.with_place(record.city, record.country))
    }
}

impl Location {
    /// Build a location; latitude must lie in [-90, 90] and longitude in [-180, 180]
    pub fn new(lat: f64, lon: f64) -> Result<Self, DomainError> {
        Ok(Self {
            lat: ensure_within("lat", lat, -90.0, 90.0)?,
            lon: ensure_within("lon", lon, -180.0, 180.0)?,
            city: String::new(),
            country: String::new(),
        })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn with_place(mut self, city: impl Into<String>, country: impl Into<String>) -> Self {
        self.city = city.into();
        self.country = country.into();
        self
    }

    /// Flat-earth distance in kilometers
    #[inline]
    pub fn distance_km_to(&self, other: &Location) -> f64 {
        equirectangular_distance(self.lat, self.lon, other.lat, other.lon)
    }
}

/// Profile photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub photo_id: Uuid,
    pub url: String,
    pub order: usize,
    pub uploaded_at: Option<DateTime<Utc>>,
}

impl Default for Photo {
    fn default() -> Self {
        Self {
            photo_id: Uuid::new_v4(),
            url: String::new(),
            order: 0,
            uploaded_at: None,
        }
    }
}

impl Photo {
    /// Mark the photo uploaded, assigning a CDN url if none was set
    pub fn upload(&mut self) {
        self.uploaded_at = Some(Utc::now());
        if self.url.is_empty() {
            self.url = format!("https://cdn.example.com/photos/{}.jpg", self.photo_id);
        }
    }

    pub fn delete(&mut self) {
        self.url.clear();
        self.uploaded_at = None;
    }
}

/// Matching preferences of a profile owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_age_range"))]
pub struct Preferences {
    #[validate(length(min = 1))]
    pub gender_preference: Vec<Gender>,
    pub age_min: u32,
    pub age_max: u32,
    pub max_distance_km: u32,
    #[serde(default)]
    pub interests: Vec<String>,
}

fn validate_age_range(prefs: &Preferences) -> std::result::Result<(), ValidationError> {
    if prefs.age_min > prefs.age_max {
        return Err(ValidationError::new("age_min_exceeds_age_max"));
    }
    Ok(())
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            gender_preference: Gender::ALL.to_vec(),
            age_min: 18,
            age_max: 99,
            max_distance_km: 100,
            interests: Vec::new(),
        }
    }
}

impl Preferences {
    #[inline]
    pub fn accepts_gender(&self, gender: Gender) -> bool {
        self.gender_preference.contains(&gender)
    }

    /// Interest tags with duplicates collapsed
    pub fn interest_set(&self) -> HashSet<&str> {
        self.interests.iter().map(String::as_str).collect()
    }
}

/// Number of optional fields counted by [`Profile::completeness`]
const COMPLETENESS_FIELDS: u32 = 6;

/// Dating profile owned by a [`User`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub profile_id: Uuid,
    pub display_name: String,
    pub birthdate: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub bio: String,
    pub photos: Vec<Photo>,
    pub location: Option<Location>,
    pub preferences: Preferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Profile {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            profile_id: Uuid::new_v4(),
            display_name: String::new(),
            birthdate: None,
            gender: None,
            bio: String::new(),
            photos: Vec::new(),
            location: None,
            preferences: Preferences::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Profile {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    /// Percentage (0-100, floored) of filled optional fields
    pub fn completeness(&self) -> u32 {
        let filled = [
            !self.display_name.is_empty(),
            self.birthdate.is_some(),
            self.gender.is_some(),
            !self.bio.is_empty(),
            !self.photos.is_empty(),
            self.location.is_some(),
        ]
        .iter()
        .filter(|present| **present)
        .count() as u32;

        filled * 100 / COMPLETENESS_FIELDS
    }

    /// Age in whole years as of `today`, or `None` without a birthdate
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        self.birthdate.map(|birth| age_from_birthdate(birth, today))
    }

    pub fn add_photo(&mut self, mut photo: Photo) {
        photo.order = self.photos.len();
        photo.upload();
        self.photos.push(photo);
        self.touch();
    }

    pub fn remove_photo(&mut self, photo_id: Uuid) {
        self.photos.retain(|p| p.photo_id != photo_id);
        for (i, photo) in self.photos.iter_mut().enumerate() {
            photo.order = i;
        }
        self.touch();
    }

    /// Replace preferences after validating them
    pub fn set_preferences(&mut self, preferences: Preferences) -> Result<(), DomainError> {
        preferences.validate()?;
        self.preferences = preferences;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Whole years elapsed since `birth`, minus one if the birthday has not come yet this year
pub fn age_from_birthdate(birth: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years - 1
    } else {
        years
    }
}

/// Lowercase hex SHA-256 digest of a password
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Application account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub profile: Option<Profile>,
    pub email_verified: bool,
}

impl User {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            email: email.into(),
            password_hash: String::new(),
            created_at: Utc::now(),
            last_login: None,
            is_active: true,
            profile: None,
            email_verified: false,
        }
    }

    pub fn set_password(&mut self, password: &str) {
        self.password_hash = hash_password(password);
    }

    pub fn verify_password(&self, password: &str) -> bool {
        self.password_hash == hash_password(password)
    }

    pub fn verify_email(&mut self) -> bool {
        self.email_verified = true;
        self.email_verified
    }

    pub fn update_profile(&mut self, mut profile: Profile) {
        profile.touch();
        self.profile = Some(profile);
    }

    pub fn login(&mut self) {
        self.last_login = Some(Utc::now());
    }

    pub fn display_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|p| p.display_name.as_str())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Like,
    Pass,
}

/// Directional expression of interest; immutable once created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swipe {
    swipe_id: Uuid,
    from_user: Uuid,
    to_user: Uuid,
    direction: SwipeDirection,
    timestamp: DateTime<Utc>,
}

impl Swipe {
    pub fn new(from_user: Uuid, to_user: Uuid, direction: SwipeDirection) -> Self {
        Self {
            swipe_id: Uuid::new_v4(),
            from_user,
            to_user,
            direction,
            timestamp: Utc::now(),
        }
    }

    pub fn like(from_user: Uuid, to_user: Uuid) -> Self {
        Self::new(from_user, to_user, SwipeDirection::Like)
    }

    pub fn pass(from_user: Uuid, to_user: Uuid) -> Self {
        Self::new(from_user, to_user, SwipeDirection::Pass)
    }

    pub fn id(&self) -> Uuid {
        self.swipe_id
    }

    pub fn from_user(&self) -> Uuid {
        self.from_user
    }

    pub fn to_user(&self) -> Uuid {
        self.to_user
    }

    pub fn direction(&self) -> SwipeDirection {
        self.direction
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    #[inline]
    pub fn is_like(&self) -> bool {
        self.direction == SwipeDirection::Like
    }

    /// True if this is a like from `actor` to `target`
    #[inline]
    pub fn is_like_between(&self, actor: Uuid, target: Uuid) -> bool {
        self.is_like() && self.from_user == actor && self.to_user == target
    }
}

/// Mutual-like relationship between two users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub match_id: Uuid,
    pub user_a: Uuid,
    pub user_b: Uuid,
    pub created_at: DateTime<Utc>,
    pub is_active: bool,
}

impl Match {
    pub fn new(user_a: Uuid, user_b: Uuid) -> Self {
        Self {
            match_id: Uuid::new_v4(),
            user_a,
            user_b,
            created_at: Utc::now(),
            is_active: true,
        }
    }

    pub fn unmatch(&mut self) {
        self.is_active = false;
    }

    /// The partner of `user` in this match
    pub fn other(&self, user: Uuid) -> Option<Uuid> {
        if user == self.user_a {
            Some(self.user_b)
        } else if user == self.user_b {
            Some(self.user_a)
        } else {
            None
        }
    }

    #[inline]
    pub fn involves(&self, user: Uuid) -> bool {
        self.user_a == user || self.user_b == user
    }

    /// Unordered pair comparison
    #[inline]
    pub fn is_between(&self, a: Uuid, b: Uuid) -> bool {
        (self.user_a == a && self.user_b == b) || (self.user_a == b && self.user_b == a)
    }
}

/// Candidate with the score it was ranked by
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredCandidate {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub score: f64,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub gender_match: f64,
    pub gender_mismatch: f64,
    pub age_in_range: f64,
    pub shared_interest: f64,
    pub completeness: f64,
    pub distance_penalty: f64,
    pub proximity: f64,
    pub tie_breaker: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            gender_match: 20.0,
            gender_mismatch: 10.0,
            age_in_range: 15.0,
            shared_interest: 5.0,
            completeness: 0.1,
            distance_penalty: 0.2,
            proximity: 10.0,
            tie_breaker: 2.0,
        }
    }
}
