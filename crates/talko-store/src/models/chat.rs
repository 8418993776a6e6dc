use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum chat threads kept per user; the oldest is evicted on overflow.
pub const MAX_SESSIONS_PER_USER: usize = 50;

/// Maximum messages kept per thread; the oldest are evicted on overflow.
pub const MAX_MESSAGES_PER_SESSION: usize = 500;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_urdu: Option<bool>,
}

impl ChatMessage {
    pub fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
            is_urdu: None,
        }
    }

    pub fn with_urdu_flag(mut self, is_urdu: bool) -> Self {
        self.is_urdu = Some(is_urdu);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

/// One titled, ordered conversation between a user and the assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_active: bool,
}

impl ChatSession {
    pub fn new(user_id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.into(),
            title: title.into(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            is_active: true,
        }
    }

    /// First user-authored message, if any (source of the auto-derived title).
    pub fn first_user_message(&self) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.sender == Sender::User)
    }
}

/// Aggregate root: the per-user collection of threads plus the active
/// selection. Threads are ordered newest-first; appending a message never
/// reorders them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserChatData {
    pub user_id: String,
    pub sessions: Vec<ChatSession>,
    pub active_session_id: Option<String>,
    pub last_activity: DateTime<Utc>,
}

impl UserChatData {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            sessions: Vec::new(),
            active_session_id: None,
            last_activity: Utc::now(),
        }
    }

    pub fn session(&self, session_id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == session_id)
    }

    pub fn session_mut(&mut self, session_id: &str) -> Option<&mut ChatSession> {
        self.sessions.iter_mut().find(|s| s.id == session_id)
    }

    pub fn active_session(&self) -> Option<&ChatSession> {
        let id = self.active_session_id.as_deref()?;
        self.session(id)
    }
}
