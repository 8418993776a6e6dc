pub mod account;
pub mod chat;
pub mod token;

pub use account::{Account, Preferences, Theme};
pub use chat::{ChatMessage, ChatSession, Sender, UserChatData};
pub use token::SessionToken;
