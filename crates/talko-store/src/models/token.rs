use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque bearer credential minted on every login; multiple valid tokens per
/// user may coexist (multi-device).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    pub token: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Set to false on explicit logout; the record is kept so a second
    /// logout with the same token is a no-op.
    pub is_active: bool,
}

impl SessionToken {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.is_active && !self.is_expired(now)
    }
}
