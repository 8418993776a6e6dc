//! Point-in-time export documents ("export my data" / "export chat").
//!
//! Snapshots only: non-secret profile fields plus thread content. Neither
//! the password digest nor session tokens ever leave the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Account, ChatSession, Preferences};

/// Profile fields safe to hand back to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
    pub preferences: Preferences,
}

impl From<&Account> for ExportedProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.clone(),
            email: account.email.clone(),
            name: account.name.clone(),
            avatar_url: account.avatar_url.clone(),
            created_at: account.created_at,
            preferences: account.preferences.clone(),
        }
    }
}

/// Full per-user snapshot: profile plus every thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDataExport {
    pub user: ExportedProfile,
    pub sessions: Vec<ChatSession>,
    pub active_session_id: Option<String>,
    pub last_activity: DateTime<Utc>,
    pub exported_at: DateTime<Utc>,
}

/// Single-thread snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionExport {
    pub session: ChatSession,
    pub exported_at: DateTime<Utc>,
    pub exported_by: String,
}
