//! Login, registration, and session handling on top of the repositories.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use talko_store::error::{Result, StoreError};
use talko_store::repositories::ProfileUpdate;
use talko_store::{Account, TokenRepository, UserRepository};

const MAX_FAILED_LOGINS: u32 = 5;
const LOCKOUT_WINDOW_MINUTES: i64 = 15;

struct FailedLogins {
    count: u32,
    first_at: DateTime<Utc>,
}

/// Auth facade: registration and login mint session tokens; lookups go
/// through token validation. Tracks failed logins per email in memory and
/// locks an email after [`MAX_FAILED_LOGINS`] failures inside the window.
pub struct AuthService {
    users: UserRepository,
    tokens: TokenRepository,
    failed_logins: Mutex<HashMap<String, FailedLogins>>,
}

impl AuthService {
    pub fn new(users: UserRepository, tokens: TokenRepository) -> Self {
        Self {
            users,
            tokens,
            failed_logins: Mutex::new(HashMap::new()),
        }
    }

    /// Creates the account and logs it in, returning a fresh token.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<(Account, String)> {
        let account = self.users.create_user(email, password, name).await?;
        let token = self.tokens.create(&account.id).await?;
        Ok((account, token))
    }

    /// Authenticates and mints a new token. Tokens from earlier logins stay
    /// valid (multi-device); only expiry or logout ends them.
    pub async fn login(&self, email: &str, password: &str) -> Result<(Account, String)> {
        let key = email.trim().to_lowercase();
        if self.is_locked(&key) {
            return Err(StoreError::AccountLocked);
        }

        match self.users.authenticate(email, password).await {
            Ok(account) => {
                self.clear_failures(&key);
                let token = self.tokens.create(&account.id).await?;
                Ok((account, token))
            }
            Err(StoreError::InvalidCredentials) => {
                self.record_failure(&key);
                Err(StoreError::InvalidCredentials)
            }
            Err(other) => Err(other),
        }
    }

    /// Revokes the presented token. Repeating with the same token is a
    /// no-op.
    pub async fn logout(&self, token: &str) -> Result<()> {
        self.tokens.destroy(token).await
    }

    /// Resolves a token to its account, or `None` when the token is
    /// invalid or the account no longer resolves.
    pub async fn current_user(&self, token: &str) -> Result<Option<Account>> {
        let Some(user_id) = self.tokens.validate(token).await? else {
            return Ok(None);
        };
        self.users.find_by_id(&user_id).await
    }

    pub async fn update_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        self.users
            .update_password(user_id, current_password, new_password)
            .await
    }

    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<Account> {
        self.users.update_profile(user_id, update).await
    }

    // The counter map stays consistent even if a holder panicked, so a
    // poisoned lock is recovered rather than propagated.
    fn counters(&self) -> std::sync::MutexGuard<'_, HashMap<String, FailedLogins>> {
        self.failed_logins
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn is_locked(&self, email_key: &str) -> bool {
        let mut map = self.counters();
        let Some(entry) = map.get(email_key) else {
            return false;
        };
        let window = Duration::minutes(LOCKOUT_WINDOW_MINUTES);
        if Utc::now() - entry.first_at > window {
            map.remove(email_key);
            return false;
        }
        entry.count >= MAX_FAILED_LOGINS
    }

    fn record_failure(&self, email_key: &str) {
        let mut map = self.counters();
        let entry = map.entry(email_key.to_string()).or_insert(FailedLogins {
            count: 0,
            first_at: Utc::now(),
        });
        entry.count += 1;
        if entry.count >= MAX_FAILED_LOGINS {
            tracing::warn!(email = email_key, "login throttled");
        }
    }

    fn clear_failures(&self, email_key: &str) {
        self.counters().remove(email_key);
    }
}
