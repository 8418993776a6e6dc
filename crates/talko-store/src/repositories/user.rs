use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::models::{Account, Preferences};
use crate::password::{hash_password, verify_password};
use crate::storage::StorageBackend;
use crate::validation::{sanitize, validate_email, validate_name, PasswordPolicy};

const USERS_KEY: &str = "users";

/// Partial profile update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
    pub preferences: Option<Preferences>,
}

/// Account records, keyed by the `users` collection.
#[derive(Clone)]
pub struct UserRepository {
    storage: Arc<dyn StorageBackend>,
    policy: PasswordPolicy,
}

impl UserRepository {
    pub fn new(storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            storage,
            policy: PasswordPolicy::Standard,
        }
    }

    pub fn with_policy(mut self, policy: PasswordPolicy) -> Self {
        self.policy = policy;
        self
    }

    async fn load_all(&self) -> Result<Vec<Account>> {
        match self.storage.read(USERS_KEY).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save_all(&self, users: &[Account]) -> Result<()> {
        self.storage.write(USERS_KEY, json!(users)).await
    }

    /// Validates, sanitizes, and creates a new account. The plaintext
    /// password is never stored.
    pub async fn create_user(&self, email: &str, password: &str, name: &str) -> Result<Account> {
        let email = sanitize(email).to_lowercase();
        let name = sanitize(name);

        validate_email(&email)?;
        self.policy.validate(password)?;
        validate_name(&name)?;

        let mut users = self.load_all().await?;
        if users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let hashed = hash_password(password)?;
        let account = Account {
            id: Uuid::new_v4().to_string(),
            email,
            avatar_url: Account::avatar_url_for(&name),
            name,
            password_digest: hashed.digest,
            salt: hashed.salt,
            created_at: Utc::now(),
            last_login: None,
            is_active: true,
            preferences: Preferences::default(),
        };

        users.push(account.clone());
        self.save_all(&users).await?;
        tracing::info!(user_id = %account.id, "created account");
        Ok(account)
    }

    /// Checks credentials against active accounts and bumps `last_login`.
    /// Unknown email and wrong password both surface as
    /// `InvalidCredentials`.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Account> {
        let email = sanitize(email).to_lowercase();

        let mut users = self.load_all().await?;
        let user = users
            .iter_mut()
            .find(|u| u.email == email && u.is_active)
            .ok_or(StoreError::InvalidCredentials)?;

        if !verify_password(password, &user.password_digest) {
            return Err(StoreError::InvalidCredentials);
        }

        user.last_login = Some(Utc::now());
        let account = user.clone();
        self.save_all(&users).await?;
        tracing::debug!(user_id = %account.id, "authenticated");
        Ok(account)
    }

    /// Verifies the current password, then re-salts and stores the new one.
    pub async fn update_password(
        &self,
        user_id: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<()> {
        let mut users = self.load_all().await?;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(StoreError::UserNotFound)?;

        if !verify_password(current_password, &user.password_digest) {
            return Err(StoreError::WrongCurrentPassword);
        }
        self.policy.validate(new_password)?;

        let hashed = hash_password(new_password)?;
        user.salt = hashed.salt;
        user.password_digest = hashed.digest;
        let user_id = user.id.clone();
        self.save_all(&users).await?;
        tracing::info!(%user_id, "password rotated");
        Ok(())
    }

    /// Sanitizes name/email if present and shallow-merges the rest.
    pub async fn update_profile(&self, user_id: &str, update: ProfileUpdate) -> Result<Account> {
        let mut users = self.load_all().await?;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(StoreError::UserNotFound)?;

        if let Some(name) = update.name {
            user.name = sanitize(&name);
        }
        if let Some(email) = update.email {
            user.email = sanitize(&email).to_lowercase();
        }
        if let Some(avatar_url) = update.avatar_url {
            user.avatar_url = avatar_url;
        }
        if let Some(preferences) = update.preferences {
            user.preferences = preferences;
        }

        let account = user.clone();
        self.save_all(&users).await?;
        Ok(account)
    }

    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<Account>> {
        let users = self.load_all().await?;
        Ok(users.into_iter().find(|u| u.id == user_id))
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let email = sanitize(email).to_lowercase();
        let users = self.load_all().await?;
        Ok(users.into_iter().find(|u| u.email == email))
    }
}
