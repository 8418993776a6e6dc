pub mod chat;
pub mod token;
pub mod user;

pub use chat::ChatRepository;
pub use token::TokenRepository;
pub use user::{ProfileUpdate, UserRepository};
