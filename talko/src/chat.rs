//! Chat orchestration: thread management plus the send/regenerate flows
//! that call the model.

use std::sync::Arc;

use chrono::Utc;
use talko_llm::TextGenerator;
use talko_persona::classify::contains_urdu;
use talko_persona::compose::{compose, introduction_message};
use talko_store::error::{Result, StoreError};
use talko_store::export::{SessionExport, UserDataExport};
use talko_store::{ChatMessage, ChatRepository, ChatSession, Sender, UserRepository};

/// Chat facade. Model failures never surface as errors from `send_message`
/// or `regenerate`; each category's canned reply is appended to the thread
/// instead, so the log stays consistent and retry is just another send.
pub struct ChatService {
    chats: ChatRepository,
    users: UserRepository,
    generator: Arc<dyn TextGenerator>,
}

impl ChatService {
    pub fn new(
        chats: ChatRepository,
        users: UserRepository,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            chats,
            users,
            generator,
        }
    }

    /// Appends the user's message (auto-creating a thread when none is
    /// active), asks the model, and appends the reply. Returns the updated
    /// thread.
    pub async fn send_message(&self, user_id: &str, text: &str) -> Result<ChatSession> {
        let session = self.chats.ensure_active_session(user_id).await?;
        let first_turn = session.messages.is_empty();
        let is_urdu = contains_urdu(text);

        let user_message = ChatMessage::new(Sender::User, text).with_urdu_flag(is_urdu);
        self.chats
            .append_message(user_id, user_message, Some(&session.id))
            .await?;

        let reply = self.generate_reply(text, first_turn, is_urdu).await;
        self.chats
            .append_message(user_id, reply, Some(&session.id))
            .await?;

        self.session_by_id(user_id, &session.id).await
    }

    /// Re-answers the exchange ending at `message_id`: that message and
    /// everything after it are removed, and the preceding user message is
    /// sent to the model again. A `message_id` that is gone, or that does
    /// not follow a user message, leaves the thread untouched.
    pub async fn regenerate(
        &self,
        user_id: &str,
        session_id: &str,
        message_id: &str,
    ) -> Result<ChatSession> {
        let tail = self
            .chats
            .truncate_from(user_id, session_id, message_id)
            .await?;

        if let Some(prompt_source) = tail.filter(|m| m.sender == Sender::User) {
            let is_urdu = prompt_source.is_urdu.unwrap_or(false);
            let reply = self
                .generate_reply(&prompt_source.content, false, is_urdu)
                .await;
            self.chats
                .append_message(user_id, reply, Some(session_id))
                .await?;
        }

        self.session_by_id(user_id, session_id).await
    }

    async fn generate_reply(&self, text: &str, first_turn: bool, is_urdu: bool) -> ChatMessage {
        let prompt = compose(text, first_turn);
        let content = match self.generator.generate(&prompt).await {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("model call failed: {err}");
                err.user_message().to_string()
            }
        };
        ChatMessage::new(Sender::Assistant, content).with_urdu_flag(is_urdu)
    }

    /// Creates a thread seeded with the assistant's introduction. The first
    /// thread a user ever gets is titled "Welcome Chat".
    pub async fn new_chat(&self, user_id: &str) -> Result<ChatSession> {
        let existing = self.chats.sessions(user_id).await?;
        let title = if existing.is_empty() {
            Some("Welcome Chat")
        } else {
            None
        };
        let session = self.chats.create_session(user_id, title).await?;

        let welcome = ChatMessage::new(Sender::Assistant, introduction_message());
        self.chats
            .append_message(user_id, welcome, Some(&session.id))
            .await?;
        self.session_by_id(user_id, &session.id).await
    }

    pub async fn sessions(&self, user_id: &str) -> Result<Vec<ChatSession>> {
        self.chats.sessions(user_id).await
    }

    pub async fn active_session(&self, user_id: &str) -> Result<Option<ChatSession>> {
        self.chats.active_session(user_id).await
    }

    pub async fn switch(&self, user_id: &str, session_id: &str) -> Result<Option<ChatSession>> {
        self.chats.switch_session(user_id, session_id).await
    }

    pub async fn rename(&self, user_id: &str, session_id: &str, source_text: &str) -> Result<()> {
        self.chats
            .rename_session(user_id, session_id, source_text)
            .await
    }

    /// Deletes a thread; when it was the last one, a fresh welcome thread
    /// takes its place so the user always has somewhere to type.
    pub async fn delete(&self, user_id: &str, session_id: &str) -> Result<ChatSession> {
        self.chats.delete_session(user_id, session_id).await?;
        match self.chats.active_session(user_id).await? {
            Some(session) => Ok(session),
            None => self.new_chat(user_id).await,
        }
    }

    /// Drops every thread and starts over with a welcome thread.
    pub async fn clear_all(&self, user_id: &str) -> Result<ChatSession> {
        self.chats.clear_all(user_id).await?;
        self.new_chat(user_id).await
    }

    /// Point-in-time snapshot of the user's profile and all threads.
    pub async fn export_user_data(&self, user_id: &str) -> Result<UserDataExport> {
        let account = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(StoreError::UserNotFound)?;
        let data = self.chats.user_chat_data(user_id).await?;

        Ok(UserDataExport {
            user: (&account).into(),
            sessions: data.sessions,
            active_session_id: data.active_session_id,
            last_activity: data.last_activity,
            exported_at: Utc::now(),
        })
    }

    /// Snapshot of a single thread, or `None` if it does not exist.
    pub async fn export_session(
        &self,
        user_id: &str,
        session_id: &str,
    ) -> Result<Option<SessionExport>> {
        let account = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(StoreError::UserNotFound)?;
        let data = self.chats.user_chat_data(user_id).await?;

        Ok(data.session(session_id).map(|session| SessionExport {
            session: session.clone(),
            exported_at: Utc::now(),
            exported_by: account.name.clone(),
        }))
    }

    /// Restores a previously exported thread collection.
    pub async fn import_user_data(&self, user_id: &str, export: UserDataExport) -> Result<()> {
        self.chats
            .replace_sessions(user_id, export.sessions, export.active_session_id)
            .await
    }

    async fn session_by_id(&self, user_id: &str, session_id: &str) -> Result<ChatSession> {
        let data = self.chats.user_chat_data(user_id).await?;
        data.session(session_id)
            .cloned()
            .ok_or_else(|| StoreError::Storage(format!("session {session_id} vanished")))
    }
}
