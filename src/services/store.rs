use std::collections::HashMap;
use uuid::Uuid;

use crate::core::reconciler::{self, PairState, SwipeLedger};
use crate::models::{
    Conversation, DomainError, Match, Notification, Payment, Report, Subscription, Swipe, User,
};

/// Process-local store for every entity kind
///
/// Entities are kept in identifier-keyed maps; the swipe log is append-only.
/// Nothing is persisted. Wrap the store in a single `Mutex` before sharing it
/// across threads so swipe reconciliation stays atomic.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: HashMap<Uuid, User>,
    swipes: Vec<Swipe>,
    matches: HashMap<Uuid, Match>,
    conversations: HashMap<Uuid, Conversation>,
    notifications: HashMap<Uuid, Notification>,
    reports: HashMap<Uuid, Report>,
    subscriptions: HashMap<Uuid, Subscription>,
    payments: HashMap<Uuid, Payment>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // User operations

    /// Insert or replace a user by id
    pub fn add_user(&mut self, user: User) {
        tracing::trace!(user_id = %user.user_id, "user stored");
        self.users.insert(user.user_id, user);
    }

    pub fn user(&self, user_id: Uuid) -> Option<&User> {
        self.users.get(&user_id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Case-insensitive email lookup
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        let wanted = email.to_lowercase();
        self.users.values().find(|u| u.email.to_lowercase() == wanted)
    }

    // Swipe and match operations

    /// Append a swipe and return the match it completes, if any
    pub fn record_swipe(&mut self, swipe: Swipe) -> Option<Match> {
        reconciler::record_swipe(self, swipe)
    }

    pub fn swipes(&self) -> &[Swipe] {
        &self.swipes
    }

    pub fn pair_state(&self, a: Uuid, b: Uuid) -> PairState {
        reconciler::pair_state(self, a, b)
    }

    pub fn add_match(&mut self, m: Match) {
        self.matches.insert(m.match_id, m);
    }

    pub fn get_match(&self, match_id: Uuid) -> Option<&Match> {
        self.matches.get(&match_id)
    }

    /// Delete a match outright; the pair may match again afterwards
    pub fn remove_match(&mut self, match_id: Uuid) -> Option<Match> {
        self.matches.remove(&match_id)
    }

    /// Deactivate a match; it keeps blocking new matches for the pair
    pub fn unmatch(&mut self, match_id: Uuid) -> Result<&Match, DomainError> {
        let m = self
            .matches
            .get_mut(&match_id)
            .ok_or(DomainError::NotFound("match", match_id))?;
        m.unmatch();
        tracing::debug!(%match_id, "match deactivated");
        Ok(m)
    }

    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.matches.values()
    }

    pub fn active_matches_for(&self, user_id: Uuid) -> impl Iterator<Item = &Match> {
        self.matches
            .values()
            .filter(move |m| m.is_active && m.involves(user_id))
    }

    // Bookkeeping collections

    pub fn add_conversation(&mut self, conversation: Conversation) {
        self.conversations.insert(conversation.conversation_id, conversation);
    }

    pub fn conversation(&self, conversation_id: Uuid) -> Option<&Conversation> {
        self.conversations.get(&conversation_id)
    }

    pub fn conversation_mut(&mut self, conversation_id: Uuid) -> Option<&mut Conversation> {
        self.conversations.get_mut(&conversation_id)
    }

    pub fn add_notification(&mut self, notification: Notification) {
        self.notifications.insert(notification.notification_id, notification);
    }

    pub fn notifications_for(&self, user_id: Uuid) -> impl Iterator<Item = &Notification> {
        self.notifications.values().filter(move |n| n.user == user_id)
    }

    pub fn add_report(&mut self, report: Report) {
        self.reports.insert(report.report_id, report);
    }

    pub fn report_mut(&mut self, report_id: Uuid) -> Option<&mut Report> {
        self.reports.get_mut(&report_id)
    }

    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.reports.values()
    }

    pub fn add_subscription(&mut self, subscription: Subscription) {
        self.subscriptions.insert(subscription.sub_id, subscription);
    }

    pub fn subscriptions_for(&self, user_id: Uuid) -> impl Iterator<Item = &Subscription> {
        self.subscriptions.values().filter(move |s| s.user == user_id)
    }

    pub fn add_payment(&mut self, payment: Payment) {
        self.payments.insert(payment.payment_id, payment);
    }

    pub fn payment(&self, payment_id: Uuid) -> Option<&Payment> {
        self.payments.get(&payment_id)
    }
}

impl SwipeLedger for InMemoryStore {
    fn append_swipe(&mut self, swipe: Swipe) {
        self.swipes.push(swipe);
    }

    fn swipe_log(&self) -> &[Swipe] {
        &self.swipes
    }

    fn match_exists_between(&self, a: Uuid, b: Uuid) -> bool {
        self.matches.values().any(|m| m.is_between(a, b))
    }

    fn insert_match(&mut self, m: Match) {
        self.add_match(m);
    }
}
