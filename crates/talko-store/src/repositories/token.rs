use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::error::Result;
use crate::models::SessionToken;
use crate::storage::StorageBackend;

const TOKENS_KEY: &str = "tokens";

const DEFAULT_TTL_HOURS: i64 = 24;

/// Session tokens, keyed by the `tokens` collection.
///
/// A fresh token is minted on every login; older tokens are not revoked, so
/// several valid tokens per user may coexist.
#[derive(Clone)]
pub struct TokenRepository {
    storage: Arc<dyn StorageBackend>,
    ttl: Duration,
}

impl TokenRepository {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage,
            ttl: Duration::hours(DEFAULT_TTL_HOURS),
        }
    }

    /// Overrides the 24-hour default time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    async fn load_all(&self) -> Result<HashMap<String, SessionToken>> {
        match self.storage.read(TOKENS_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(HashMap::new()),
        }
    }

    async fn save_all(&self, tokens: &HashMap<String, SessionToken>) -> Result<()> {
        self.storage.write(TOKENS_KEY, json!(tokens)).await
    }

    /// Mints a new opaque token for the user.
    pub async fn create(&self, user_id: &str) -> Result<String> {
        let now = Utc::now();
        let session = SessionToken {
            token: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at: now + self.ttl,
            is_active: true,
        };

        let mut tokens = self.load_all().await?;
        let token = session.token.clone();
        tokens.insert(token.clone(), session);
        self.save_all(&tokens).await?;
        tracing::debug!(%user_id, "issued session token");
        Ok(token)
    }

    /// Resolves a token to its user id, or `None` if the token is unknown,
    /// revoked, or expired.
    pub async fn validate(&self, token: &str) -> Result<Option<String>> {
        let tokens = self.load_all().await?;
        Ok(tokens
            .get(token)
            .filter(|t| t.is_valid(Utc::now()))
            .map(|t| t.user_id.clone()))
    }

    /// Revokes a token. The record is kept (inactive) so a repeated logout
    /// with the same token is a no-op.
    pub async fn destroy(&self, token: &str) -> Result<()> {
        let mut tokens = self.load_all().await?;
        if let Some(session) = tokens.get_mut(token) {
            session.is_active = false;
            self.save_all(&tokens).await?;
        }
        Ok(())
    }

    /// Drops past-expiry entries. Storage hygiene only; `validate` already
    /// treats expired tokens as invalid.
    pub async fn cleanup_expired(&self) -> Result<usize> {
        let mut tokens = self.load_all().await?;
        let now = Utc::now();
        let before = tokens.len();
        tokens.retain(|_, t| !t.is_expired(now));
        let removed = before - tokens.len();
        if removed > 0 {
            self.save_all(&tokens).await?;
            tracing::debug!(removed, "purged expired session tokens");
        }
        Ok(removed)
    }

    /// Spawns the recurring expiry sweep. The task races only with itself
    /// and removing an already-absent entry is a no-op, so overlap is
    /// harmless.
    pub fn spawn_cleanup(&self, period: StdDuration) -> tokio::task::JoinHandle<()> {
        let repo = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                if let Err(e) = repo.cleanup_expired().await {
                    tracing::warn!("session cleanup failed: {e}");
                }
            }
        })
    }
}
