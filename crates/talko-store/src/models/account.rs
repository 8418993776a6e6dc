use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    /// Normalized to lower-case; unique across active accounts.
    pub email: String,
    pub name: String,
    /// PHC-format Argon2id digest. Never the plaintext password.
    pub password_digest: String,
    /// Salt is also embedded in the digest; kept as a separate field so the
    /// stored record is self-describing.
    pub salt: String,
    pub avatar_url: String,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub preferences: Preferences,
}

impl Account {
    /// Derives the default avatar URL from a display name.
    pub fn avatar_url_for(name: &str) -> String {
        let encoded: String = name
            .chars()
            .map(|c| if c == ' ' { '+' } else { c })
            .collect();
        format!(
            "https://ui-avatars.com/api/?name={}&background=8B5CF6&color=fff&size=128",
            encoded
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub theme: Theme,
    pub language: String,
    pub notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Auto,
            language: "en".to_string(),
            notifications: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}
