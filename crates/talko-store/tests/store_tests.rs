use std::sync::Arc;

use chrono::Duration;
use talko_store::models::{ChatMessage, Sender};
use talko_store::repositories::ProfileUpdate;
use talko_store::{
    ChatRepository, JsonFileStorage, MemoryStorage, StoreError, TokenRepository, UserRepository,
};

fn memory() -> Arc<MemoryStorage> {
    Arc::new(MemoryStorage::new())
}

// --- accounts ---

#[tokio::test]
async fn register_then_authenticate_returns_same_account() {
    let users = UserRepository::new(memory());
    let created = users
        .create_user("alice@example.com", "Passw0rd!", "Alice")
        .await
        .unwrap();
    assert_eq!(created.name, "Alice");
    assert!(created.last_login.is_none());

    let authed = users
        .authenticate("alice@example.com", "Passw0rd!")
        .await
        .unwrap();
    assert_eq!(authed.id, created.id);
    assert!(authed.last_login.is_some());
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let users = UserRepository::new(memory());
    users
        .create_user("alice@example.com", "Passw0rd!", "Alice")
        .await
        .unwrap();

    let err = users
        .create_user("ALICE@Example.Com", "Passw0rd!", "Alice")
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateEmail));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_fail_identically() {
    let users = UserRepository::new(memory());
    users
        .create_user("alice@example.com", "Passw0rd!", "Alice")
        .await
        .unwrap();

    let wrong_password = users
        .authenticate("alice@example.com", "nope")
        .await
        .unwrap_err();
    let unknown_email = users
        .authenticate("bob@example.com", "Passw0rd!")
        .await
        .unwrap_err();
    // Same generic message for both, so accounts cannot be enumerated.
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
}

#[tokio::test]
async fn validation_rejects_bad_inputs_before_any_mutation() {
    let users = UserRepository::new(memory());
    assert!(matches!(
        users.create_user("not-an-email", "Passw0rd!", "Alice").await,
        Err(StoreError::InvalidEmail)
    ));
    assert!(matches!(
        users.create_user("a@b.com", "weak", "Alice").await,
        Err(StoreError::WeakPassword(_))
    ));
    assert!(matches!(
        users.create_user("a@b.com", "Passw0rd!", "A").await,
        Err(StoreError::InvalidName)
    ));
    // Nothing was persisted by the failed attempts.
    assert!(users.find_by_email("a@b.com").await.unwrap().is_none());
}

#[tokio::test]
async fn update_password_rotates_salt_and_digest() {
    let users = UserRepository::new(memory());
    let account = users
        .create_user("alice@example.com", "Passw0rd!", "Alice")
        .await
        .unwrap();

    users
        .update_password(&account.id, "Passw0rd!", "NewPassw0rd!")
        .await
        .unwrap();

    assert!(users
        .authenticate("alice@example.com", "Passw0rd!")
        .await
        .is_err());
    let updated = users
        .authenticate("alice@example.com", "NewPassw0rd!")
        .await
        .unwrap();
    assert_ne!(updated.salt, account.salt);
    assert_ne!(updated.password_digest, account.password_digest);
}

#[tokio::test]
async fn update_profile_sanitizes_and_merges() {
    let users = UserRepository::new(memory());
    let account = users
        .create_user("alice@example.com", "Passw0rd!", "Alice")
        .await
        .unwrap();

    let updated = users
        .update_profile(
            &account.id,
            ProfileUpdate {
                name: Some("  <Alice> Smith ".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Alice Smith");
    assert_eq!(updated.email, "alice@example.com");
}

// --- session tokens ---

#[tokio::test]
async fn token_lifecycle() {
    let tokens = TokenRepository::new(memory());
    let token = tokens.create("user-1").await.unwrap();

    assert_eq!(
        tokens.validate(&token).await.unwrap().as_deref(),
        Some("user-1")
    );

    tokens.destroy(&token).await.unwrap();
    assert!(tokens.validate(&token).await.unwrap().is_none());

    // Second logout with the same token is a no-op.
    tokens.destroy(&token).await.unwrap();
}

#[tokio::test]
async fn expired_token_is_invalid_and_swept() {
    let tokens = TokenRepository::new(memory()).with_ttl(Duration::seconds(-1));
    let token = tokens.create("user-1").await.unwrap();

    assert!(tokens.validate(&token).await.unwrap().is_none());
    assert_eq!(tokens.cleanup_expired().await.unwrap(), 1);
    assert_eq!(tokens.cleanup_expired().await.unwrap(), 0);
}

#[tokio::test]
async fn multiple_tokens_per_user_stay_valid() {
    let tokens = TokenRepository::new(memory());
    let first = tokens.create("user-1").await.unwrap();
    let second = tokens.create("user-1").await.unwrap();

    assert_ne!(first, second);
    assert!(tokens.validate(&first).await.unwrap().is_some());
    assert!(tokens.validate(&second).await.unwrap().is_some());
}

// --- chat threads ---

#[tokio::test]
async fn session_cap_keeps_fifty_most_recent() {
    let chats = ChatRepository::new(memory());
    let mut ids = Vec::new();
    for i in 0..51 {
        let session = chats
            .create_session("user-1", Some(&format!("chat {i}")))
            .await
            .unwrap();
        ids.push(session.id);
    }

    let sessions = chats.sessions("user-1").await.unwrap();
    assert_eq!(sessions.len(), 50);
    // Newest first; the very first thread fell off the tail.
    assert_eq!(sessions[0].id, ids[50]);
    assert!(sessions.iter().all(|s| s.id != ids[0]));
    assert_eq!(sessions.last().unwrap().id, ids[1]);
}

#[tokio::test]
async fn message_cap_evicts_oldest() {
    let chats = ChatRepository::new(memory());
    let session = chats.create_session("user-1", None).await.unwrap();

    for i in 0..501 {
        let msg = ChatMessage::new(Sender::User, format!("message {i}"));
        chats
            .append_message("user-1", msg, Some(&session.id))
            .await
            .unwrap();
    }

    let stored = chats.active_session("user-1").await.unwrap().unwrap();
    assert_eq!(stored.messages.len(), 500);
    assert_eq!(stored.messages[0].content, "message 1");
    assert_eq!(stored.messages.last().unwrap().content, "message 500");
}

#[tokio::test]
async fn deleting_active_thread_repoints_to_head() {
    let chats = ChatRepository::new(memory());
    let a = chats.create_session("user-1", Some("a")).await.unwrap();
    let b = chats.create_session("user-1", Some("b")).await.unwrap();

    // b is active (created last); delete it.
    chats.delete_session("user-1", &b.id).await.unwrap();
    let data = chats.user_chat_data("user-1").await.unwrap();
    assert_eq!(data.active_session_id.as_deref(), Some(a.id.as_str()));

    chats.delete_session("user-1", &a.id).await.unwrap();
    let data = chats.user_chat_data("user-1").await.unwrap();
    assert!(data.active_session_id.is_none());
    assert!(data.sessions.is_empty());
}

#[tokio::test]
async fn deleting_inactive_thread_keeps_active_pointer() {
    let chats = ChatRepository::new(memory());
    let a = chats.create_session("user-1", Some("a")).await.unwrap();
    let b = chats.create_session("user-1", Some("b")).await.unwrap();

    chats.delete_session("user-1", &a.id).await.unwrap();
    let data = chats.user_chat_data("user-1").await.unwrap();
    assert_eq!(data.active_session_id.as_deref(), Some(b.id.as_str()));
}

#[tokio::test]
async fn appending_does_not_reorder_threads() {
    let chats = ChatRepository::new(memory());
    let older = chats.create_session("user-1", Some("older")).await.unwrap();
    let newer = chats.create_session("user-1", Some("newer")).await.unwrap();

    chats
        .append_message(
            "user-1",
            ChatMessage::new(Sender::User, "hi"),
            Some(&older.id),
        )
        .await
        .unwrap();

    let sessions = chats.sessions("user-1").await.unwrap();
    assert_eq!(sessions[0].id, newer.id);
    assert_eq!(sessions[1].id, older.id);
    // updated_at moved even though the position did not.
    assert!(sessions[1].updated_at > older.updated_at);
}

#[tokio::test]
async fn switching_does_not_reorder_threads() {
    let chats = ChatRepository::new(memory());
    let older = chats.create_session("user-1", Some("older")).await.unwrap();
    let newer = chats.create_session("user-1", Some("newer")).await.unwrap();

    let switched = chats.switch_session("user-1", &older.id).await.unwrap();
    assert_eq!(switched.unwrap().id, older.id);

    let sessions = chats.sessions("user-1").await.unwrap();
    assert_eq!(sessions[0].id, newer.id);

    assert!(chats
        .switch_session("user-1", "missing-id")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn append_without_thread_auto_creates_one() {
    let chats = ChatRepository::new(memory());
    chats
        .append_message("user-1", ChatMessage::new(Sender::User, "Hello"), None)
        .await
        .unwrap();

    let data = chats.user_chat_data("user-1").await.unwrap();
    assert_eq!(data.sessions.len(), 1);
    assert!(data.active_session_id.is_some());
    assert_eq!(data.sessions[0].messages[0].content, "Hello");
}

#[tokio::test]
async fn ensure_active_session_is_idempotent() {
    let chats = ChatRepository::new(memory());
    let first = chats.ensure_active_session("user-1").await.unwrap();
    let second = chats.ensure_active_session("user-1").await.unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(chats.sessions("user-1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn title_derives_when_assistant_completes_first_exchange() {
    let chats = ChatRepository::new(memory());
    let session = chats.create_session("user-1", None).await.unwrap();

    chats
        .append_message(
            "user-1",
            ChatMessage::new(Sender::User, "Hello"),
            Some(&session.id),
        )
        .await
        .unwrap();
    chats
        .append_message(
            "user-1",
            ChatMessage::new(Sender::Assistant, "Hi! How can I help?"),
            Some(&session.id),
        )
        .await
        .unwrap();

    let stored = chats.active_session("user-1").await.unwrap().unwrap();
    assert_eq!(stored.title, "Hello");
}

#[tokio::test]
async fn rename_overwrites_with_derived_title() {
    let chats = ChatRepository::new(memory());
    let session = chats.create_session("user-1", None).await.unwrap();

    chats
        .rename_session(
            "user-1",
            &session.id,
            "please explain the borrow checker rules in depth today",
        )
        .await
        .unwrap();
    let stored = chats.active_session("user-1").await.unwrap().unwrap();
    assert_eq!(stored.title, "please explain the borrow checker rules");
}

#[tokio::test]
async fn truncate_from_returns_preceding_message() {
    let chats = ChatRepository::new(memory());
    let session = chats.create_session("user-1", None).await.unwrap();

    let user_msg = ChatMessage::new(Sender::User, "question");
    let assistant_msg = ChatMessage::new(Sender::Assistant, "bad answer");
    chats
        .append_message("user-1", user_msg.clone(), Some(&session.id))
        .await
        .unwrap();
    chats
        .append_message("user-1", assistant_msg.clone(), Some(&session.id))
        .await
        .unwrap();

    let tail = chats
        .truncate_from("user-1", &session.id, &assistant_msg.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(tail.id, user_msg.id);

    let stored = chats.active_session("user-1").await.unwrap().unwrap();
    assert_eq!(stored.messages.len(), 1);
}

#[tokio::test]
async fn clear_all_empties_threads_and_pointer() {
    let chats = ChatRepository::new(memory());
    chats.create_session("user-1", None).await.unwrap();
    chats.create_session("user-1", None).await.unwrap();

    chats.clear_all("user-1").await.unwrap();
    let data = chats.user_chat_data("user-1").await.unwrap();
    assert!(data.sessions.is_empty());
    assert!(data.active_session_id.is_none());
}

#[tokio::test]
async fn replace_sessions_preserves_ids_titles_and_order() {
    let chats = ChatRepository::new(memory());
    let a = chats.create_session("user-1", Some("a")).await.unwrap();
    let b = chats.create_session("user-1", Some("b")).await.unwrap();
    let exported = chats.user_chat_data("user-1").await.unwrap();

    chats.clear_all("user-1").await.unwrap();
    chats
        .replace_sessions(
            "user-1",
            exported.sessions.clone(),
            exported.active_session_id.clone(),
        )
        .await
        .unwrap();

    let restored = chats.user_chat_data("user-1").await.unwrap();
    let ids: Vec<_> = restored.sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![b.id.as_str(), a.id.as_str()]);
    let titles: Vec<_> = restored.sessions.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["b", "a"]);
    assert_eq!(restored.active_session_id, exported.active_session_id);
}

// --- file-backed storage ---

#[tokio::test]
async fn file_backend_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let account_id = {
        let storage = Arc::new(JsonFileStorage::new(dir.path()).unwrap());
        let users = UserRepository::new(storage.clone());
        let chats = ChatRepository::new(storage);
        let account = users
            .create_user("alice@example.com", "Passw0rd!", "Alice")
            .await
            .unwrap();
        chats
            .create_session(&account.id, Some("persisted"))
            .await
            .unwrap();
        account.id
    };

    let storage = Arc::new(JsonFileStorage::new(dir.path()).unwrap());
    let users = UserRepository::new(storage.clone());
    let chats = ChatRepository::new(storage);

    let account = users
        .authenticate("alice@example.com", "Passw0rd!")
        .await
        .unwrap();
    assert_eq!(account.id, account_id);
    let sessions = chats.sessions(&account.id).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].title, "persisted");
}
