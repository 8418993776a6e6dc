//! Wires storage, repositories, and the model client into [`Talko`].

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use talko_llm::{GeminiClient, TextGenerator};
use talko_store::error::{Result, StoreError};
use talko_store::{
    ChatRepository, PasswordPolicy, StorageBackend, TokenRepository, UserRepository,
};

use crate::auth::AuthService;
use crate::chat::ChatService;

/// How often [`Talko::spawn_token_cleanup`] sweeps expired tokens by
/// default.
pub const DEFAULT_CLEANUP_PERIOD: StdDuration = StdDuration::from_secs(60);

/// The assembled application: auth and chat services sharing one storage
/// backend.
pub struct Talko {
    auth: AuthService,
    chat: ChatService,
    tokens: TokenRepository,
}

impl Talko {
    pub fn builder() -> TalkoBuilder {
        TalkoBuilder::default()
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn chat(&self) -> &ChatService {
        &self.chat
    }

    /// Starts the background sweep that drops expired session tokens every
    /// [`DEFAULT_CLEANUP_PERIOD`]. Aborting the handle stops the sweep.
    pub fn spawn_token_cleanup(&self) -> tokio::task::JoinHandle<()> {
        self.tokens.spawn_cleanup(DEFAULT_CLEANUP_PERIOD)
    }
}

/// Builder for [`Talko`]. A storage backend is required, along with either
/// a Gemini API key or a custom [`TextGenerator`].
#[derive(Default)]
pub struct TalkoBuilder {
    storage: Option<Arc<dyn StorageBackend>>,
    generator: Option<Arc<dyn TextGenerator>>,
    gemini_api_key: Option<String>,
    gemini_model: Option<String>,
    password_policy: Option<PasswordPolicy>,
    token_ttl: Option<Duration>,
}

impl TalkoBuilder {
    pub fn storage(mut self, storage: Arc<dyn StorageBackend>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Supplies a ready-made model client, bypassing the Gemini setup.
    pub fn generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn gemini_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.gemini_api_key = Some(api_key.into());
        self
    }

    pub fn gemini_model(mut self, model: impl Into<String>) -> Self {
        self.gemini_model = Some(model.into());
        self
    }

    pub fn password_policy(mut self, policy: PasswordPolicy) -> Self {
        self.password_policy = Some(policy);
        self
    }

    /// Overrides the 24-hour session token lifetime.
    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    pub fn build(self) -> Result<Talko> {
        let storage = self
            .storage
            .ok_or_else(|| StoreError::Storage("no storage backend configured".to_string()))?;

        let generator: Arc<dyn TextGenerator> = match self.generator {
            Some(generator) => generator,
            None => {
                let api_key = self.gemini_api_key.ok_or_else(|| {
                    StoreError::Storage(
                        "either a Gemini API key or a generator is required".to_string(),
                    )
                })?;
                let mut client = GeminiClient::new(api_key);
                if let Some(model) = self.gemini_model {
                    client = client.with_model(model);
                }
                Arc::new(client)
            }
        };

        let mut users = UserRepository::new(Arc::clone(&storage));
        if let Some(policy) = self.password_policy {
            users = users.with_policy(policy);
        }

        let mut tokens = TokenRepository::new(Arc::clone(&storage));
        if let Some(ttl) = self.token_ttl {
            tokens = tokens.with_ttl(ttl);
        }

        let chats = ChatRepository::new(storage);

        let auth = AuthService::new(users.clone(), tokens.clone());
        let chat = ChatService::new(chats, users, generator);

        Ok(Talko { auth, chat, tokens })
    }
}
