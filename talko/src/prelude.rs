//! Convenience re-exports for application code.
//!
//! ```rust
//! use talko::prelude::*;
//! ```

pub use crate::auth::AuthService;
pub use crate::builder::{Talko, TalkoBuilder};
pub use crate::chat::ChatService;

pub use talko_llm::{GeminiClient, GenerateError, TextGenerator, DEFAULT_GEMINI_MODEL};
pub use talko_store::repositories::ProfileUpdate;
pub use talko_store::{
    Account, ChatMessage, ChatSession, JsonFileStorage, MemoryStorage, PasswordPolicy, Preferences,
    Sender, SessionExport, SessionToken, StorageBackend, StoreError, Theme, UserDataExport,
};
