use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::Match;
use super::error::DomainError;

/// Chat message inside a [`Conversation`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: Uuid,
    pub sender: Uuid,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub is_read: bool,
}

impl Message {
    pub fn new(sender: Uuid, content: impl Into<String>) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            sender,
            content: content.into(),
            sent_at: Utc::now(),
            edited_at: None,
            is_read: false,
        }
    }

    pub fn edit(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.edited_at = Some(Utc::now());
    }

    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: Uuid,
    pub participants: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn new(participants: impl IntoIterator<Item = Uuid>) -> Self {
        let mut conversation = Self {
            conversation_id: Uuid::new_v4(),
            participants: Vec::new(),
            created_at: Utc::now(),
            last_message_at: None,
            messages: Vec::new(),
        };
        for user in participants {
            conversation.add_participant(user);
        }
        conversation
    }

    /// Open a conversation between the two users of a match
    pub fn from_match(m: &Match) -> Self {
        Self::new([m.user_a, m.user_b])
    }

    /// Append a message; only participants may send
    pub fn send_message(&mut self, message: Message) -> Result<&Message, DomainError> {
        if !self.participants.contains(&message.sender) {
            return Err(DomainError::InvalidOperation(format!(
                "sender {} is not a participant of conversation {}",
                message.sender, self.conversation_id
            )));
        }
        self.last_message_at = Some(message.sent_at);
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    pub fn add_participant(&mut self, user: Uuid) {
        if !self.participants.contains(&user) {
            self.participants.push(user);
        }
    }

    pub fn unread_for(&self, user: Uuid) -> usize {
        self.messages
            .iter()
            .filter(|m| m.sender != user && !m.is_read)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub notification_id: Uuid,
    pub user: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: serde_json::Value,
    pub sent_at: DateTime<Utc>,
    pub read_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(user: Uuid, kind: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            notification_id: Uuid::new_v4(),
            user,
            kind: kind.into(),
            payload,
            sent_at: Utc::now(),
            read_at: None,
        }
    }

    pub fn read(&mut self) {
        self.read_at = Some(Utc::now());
    }

    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }
}

/// Abuse report filed by one user against another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub report_id: Uuid,
    pub reporter: Uuid,
    pub reported_user: Uuid,
    pub reason: String,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolution: Option<String>,
}

impl Report {
    pub fn new(reporter: Uuid, reported_user: Uuid, reason: impl Into<String>) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            reporter,
            reported_user,
            reason: reason.into(),
            created_at: Utc::now(),
            resolved_at: None,
            resolution: None,
        }
    }

    pub fn resolve(&mut self, resolution: impl Into<String>) {
        self.resolution = Some(resolution.into());
        self.resolved_at = Some(Utc::now());
    }
}
