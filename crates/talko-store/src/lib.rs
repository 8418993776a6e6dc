pub mod error;
pub mod export;
pub mod models;
pub mod password;
pub mod repositories;
pub mod storage;
pub mod validation;

pub use error::StoreError;
pub use export::{SessionExport, UserDataExport};
pub use models::{Account, ChatMessage, ChatSession, Preferences, Sender, SessionToken, Theme, UserChatData};
pub use repositories::{ChatRepository, TokenRepository, UserRepository};
pub use storage::{JsonFileStorage, MemoryStorage, StorageBackend};
pub use validation::PasswordPolicy;
