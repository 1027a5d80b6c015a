use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{ensure_finite, DomainError};

/// Probability below which a simulated charge fails
const CHARGE_FAILURE_RATE: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Free,
    Premium,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub sub_id: Uuid,
    pub user: Uuid,
    pub tier: SubscriptionTier,
    pub started_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Subscription {
    pub fn free(user: Uuid) -> Self {
        Self {
            sub_id: Uuid::new_v4(),
            user,
            tier: SubscriptionTier::Free,
            started_at: Utc::now(),
            expires_at: None,
        }
    }

    /// Premium subscription starting now and lasting `days`
    pub fn premium(user: Uuid, days: i64) -> Self {
        let started_at = Utc::now();
        Self {
            sub_id: Uuid::new_v4(),
            user,
            tier: SubscriptionTier::Premium,
            started_at,
            expires_at: Some(started_at + Duration::days(days)),
        }
    }

    /// Free tiers never lapse; paid tiers need an expiry in the future
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        match self.tier {
            SubscriptionTier::Free => true,
            SubscriptionTier::Premium => self.expires_at.map_or(false, |expires| now < expires),
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_id: Uuid,
    pub user: Uuid,
    pub amount: f64,
    pub currency: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(user: Uuid, amount: f64) -> Self {
        Self {
            payment_id: Uuid::new_v4(),
            user,
            amount,
            currency: "USD".to_string(),
            status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    /// Simulate a charge; fails fast on a non-finite amount
    pub fn charge<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<bool, DomainError> {
        ensure_finite("amount", self.amount)?;

        let success = rng.gen::<f64>() > CHARGE_FAILURE_RATE;
        self.status = if success {
            PaymentStatus::Succeeded
        } else {
            PaymentStatus::Failed
        };
        tracing::debug!(payment_id = %self.payment_id, amount = self.amount, success, "payment charged");
        Ok(success)
    }
}
