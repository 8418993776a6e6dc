use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;

use crate::error::Result;
use crate::models::chat::{MAX_MESSAGES_PER_SESSION, MAX_SESSIONS_PER_USER};
use crate::models::{ChatMessage, ChatSession, Sender, UserChatData};
use crate::storage::StorageBackend;

const CHATS_KEY: &str = "chats";

/// Derives a short thread title: first 6 words, capped at 50 chars with an
/// ellipsis when truncated.
pub fn derive_title(source: &str) -> String {
    let words: Vec<&str> = source.split_whitespace().take(6).collect();
    let joined = words.join(" ");
    if joined.chars().count() > 50 {
        let head: String = joined.chars().take(47).collect();
        format!("{head}...")
    } else {
        joined
    }
}

/// Per-user chat threads, keyed by the `chats` collection (a map from user
/// id to that user's aggregate).
#[derive(Clone)]
pub struct ChatRepository {
    storage: Arc<dyn StorageBackend>,
}

impl ChatRepository {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self { storage }
    }

    async fn load_all(&self) -> Result<HashMap<String, UserChatData>> {
        match self.storage.read(CHATS_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(HashMap::new()),
        }
    }

    async fn save_all(&self, all: &HashMap<String, UserChatData>) -> Result<()> {
        self.storage.write(CHATS_KEY, json!(all)).await
    }

    /// The user's aggregate; a fresh empty one if nothing is stored yet.
    pub async fn user_chat_data(&self, user_id: &str) -> Result<UserChatData> {
        let all = self.load_all().await?;
        Ok(all
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| UserChatData::new(user_id)))
    }

    /// Creates a thread at the head of the list, makes it active, and evicts
    /// the oldest thread beyond the per-user cap.
    pub async fn create_session(&self, user_id: &str, title: Option<&str>) -> Result<ChatSession> {
        let mut all = self.load_all().await?;
        let data = all
            .entry(user_id.to_string())
            .or_insert_with(|| UserChatData::new(user_id));

        let title = match title {
            Some(t) => t.to_string(),
            None => format!("Chat {}", data.sessions.len() + 1),
        };
        let session = ChatSession::new(user_id, title);

        data.sessions.insert(0, session.clone());
        data.sessions.truncate(MAX_SESSIONS_PER_USER);
        data.active_session_id = Some(session.id.clone());
        data.last_activity = Utc::now();

        self.save_all(&all).await?;
        tracing::debug!(%user_id, session_id = %session.id, "created chat thread");
        Ok(session)
    }

    pub async fn sessions(&self, user_id: &str) -> Result<Vec<ChatSession>> {
        Ok(self.user_chat_data(user_id).await?.sessions)
    }

    pub async fn active_session(&self, user_id: &str) -> Result<Option<ChatSession>> {
        Ok(self.user_chat_data(user_id).await?.active_session().cloned())
    }

    /// Repoints the active thread. Does not reorder the list. Returns `None`
    /// (with no mutation) when the thread does not exist.
    pub async fn switch_session(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<ChatSession>> {
        let mut all = self.load_all().await?;
        let Some(data) = all.get_mut(user_id) else {
            return Ok(None);
        };
        let Some(session) = data.session(session_id).cloned() else {
            return Ok(None);
        };
        data.active_session_id = Some(session.id.clone());
        data.last_activity = Utc::now();
        self.save_all(&all).await?;
        Ok(Some(session))
    }

    /// Idempotent: returns the active thread, creating one first if the user
    /// has no valid active thread.
    pub async fn ensure_active_session(&self, user_id: &str) -> Result<ChatSession> {
        if let Some(session) = self.active_session(user_id).await? {
            return Ok(session);
        }
        self.create_session(user_id, None).await
    }

    /// Appends a message to the given thread, the active thread, or a newly
    /// created thread when neither exists. Never fails on a missing target.
    ///
    /// When the appended message is an assistant reply completing the first
    /// exchange (second message overall), the thread title is derived from
    /// the first user message. The log is trimmed to the newest
    /// [`MAX_MESSAGES_PER_SESSION`] entries.
    pub async fn append_message(
        &self,
        user_id: &str,
        message: ChatMessage,
        session_id: Option<&str>,
    ) -> Result<()> {
        let target = match session_id {
            Some(id) => id.to_string(),
            None => self.ensure_active_session(user_id).await?.id,
        };

        let mut all = self.load_all().await?;
        let data = all
            .entry(user_id.to_string())
            .or_insert_with(|| UserChatData::new(user_id));

        let Some(session) = data.session_mut(&target) else {
            // Target disappeared between resolution and load: recover by
            // appending into a fresh thread.
            drop(all);
            tracing::warn!(%user_id, session_id = %target, "append target missing, creating thread");
            let fresh = self.create_session(user_id, None).await?;
            return Box::pin(self.append_message(user_id, message, Some(&fresh.id))).await;
        };

        let is_assistant = message.sender == Sender::Assistant;
        session.messages.push(message);
        session.updated_at = Utc::now();

        if session.messages.len() == 2 && is_assistant {
            if let Some(first) = session.first_user_message() {
                let title = derive_title(&first.content);
                if !title.is_empty() {
                    session.title = title;
                }
            }
        }

        if session.messages.len() > MAX_MESSAGES_PER_SESSION {
            let excess = session.messages.len() - MAX_MESSAGES_PER_SESSION;
            session.messages.drain(..excess);
        }

        data.last_activity = Utc::now();
        self.save_all(&all).await?;
        Ok(())
    }

    /// Overwrites the title with one derived from the given text. Missing
    /// threads are ignored.
    pub async fn rename_session(
        &self,
        user_id: &str,
        session_id: &str,
        source_text: &str,
    ) -> Result<()> {
        let mut all = self.load_all().await?;
        let Some(data) = all.get_mut(user_id) else {
            return Ok(());
        };
        let Some(index) = data.sessions.iter().position(|s| s.id == session_id) else {
            return Ok(());
        };

        let title = derive_title(source_text);
        data.sessions[index].title = if title.is_empty() {
            format!("Chat {}", index + 1)
        } else {
            title
        };
        self.save_all(&all).await?;
        Ok(())
    }

    /// Removes a thread. If it was active, the active pointer moves to the
    /// new head of the remaining list (or null) atomically with the removal.
    pub async fn delete_session(&self, user_id: &str, session_id: &str) -> Result<()> {
        let mut all = self.load_all().await?;
        let Some(data) = all.get_mut(user_id) else {
            return Ok(());
        };
        let Some(index) = data.sessions.iter().position(|s| s.id == session_id) else {
            return Ok(());
        };

        data.sessions.remove(index);
        if data.active_session_id.as_deref() == Some(session_id) {
            data.active_session_id = data.sessions.first().map(|s| s.id.clone());
        }
        self.save_all(&all).await?;
        tracing::debug!(%user_id, %session_id, "deleted chat thread");
        Ok(())
    }

    /// Empties the thread list and nulls the active pointer. Callers are
    /// expected to create a replacement welcome thread right after.
    pub async fn clear_all(&self, user_id: &str) -> Result<()> {
        let mut all = self.load_all().await?;
        if let Some(data) = all.get_mut(user_id) {
            data.sessions.clear();
            data.active_session_id = None;
            self.save_all(&all).await?;
        }
        Ok(())
    }

    /// Removes `message_id` and everything after it, returning the message
    /// left at the tail (the one a regenerate re-sends). `None` when the
    /// thread or message does not exist.
    pub async fn truncate_from(
        &self,
        user_id: &str,
        session_id: &str,
        message_id: &str,
    ) -> Result<Option<ChatMessage>> {
        let mut all = self.load_all().await?;
        let Some(data) = all.get_mut(user_id) else {
            return Ok(None);
        };
        let Some(session) = data.session_mut(session_id) else {
            return Ok(None);
        };
        let Some(index) = session.messages.iter().position(|m| m.id == message_id) else {
            return Ok(None);
        };

        session.messages.truncate(index);
        session.updated_at = Utc::now();
        let tail = session.messages.last().cloned();
        self.save_all(&all).await?;
        Ok(tail)
    }

    /// Replaces the user's entire thread collection (data import). The
    /// active pointer is re-validated against the imported set.
    pub async fn replace_sessions(
        &self,
        user_id: &str,
        sessions: Vec<ChatSession>,
        active_session_id: Option<String>,
    ) -> Result<()> {
        let mut all = self.load_all().await?;
        let data = all
            .entry(user_id.to_string())
            .or_insert_with(|| UserChatData::new(user_id));

        data.active_session_id = active_session_id
            .filter(|id| sessions.iter().any(|s| &s.id == id))
            .or_else(|| sessions.first().map(|s| s.id.clone()));
        data.sessions = sessions;
        data.last_activity = Utc::now();
        self.save_all(&all).await?;
        Ok(())
    }
}
