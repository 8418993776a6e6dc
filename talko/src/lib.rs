//! # Talko - AI chat backend
//!
//! Talko is the backend core of an AI chat product:
//! - 👤 **Accounts** (validated signup, Argon2id credentials, profile updates)
//! - 🔑 **Session tokens** (opaque, 24h expiry, periodic sweep)
//! - 💬 **Multi-thread chat** (per-user threads with caps and auto-titles)
//! - 🧠 **Persona prompts** (keyword-gated founder info, language detection)
//! - 🌐 **Gemini integration** (single-completion `generateContent` calls)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use talko::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), talko::StoreError> {
//!     let app = Talko::builder()
//!         .storage(Arc::new(MemoryStorage::new()))
//!         .gemini_api_key("AIza...")
//!         .build()?;
//!
//!     let (account, _token) = app
//!         .auth()
//!         .register("alice@example.com", "Passw0rd!", "Alice")
//!         .await?;
//!
//!     let session = app.chat().send_message(&account.id, "Hello").await?;
//!     if let Some(reply) = session.messages.last() {
//!         println!("{}", reply.content);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Talko consists of several composable crates:
//!
//! - **talko-store**: models, storage backends, repositories
//! - **talko-persona**: prompt composition and keyword classification
//! - **talko-llm**: the Gemini client behind the `TextGenerator` seam
//! - **talko** (this crate): `AuthService`, `ChatService`, and the builder

pub mod auth;
pub mod builder;
pub mod chat;
pub mod prelude;

pub use auth::AuthService;
pub use builder::{Talko, TalkoBuilder};
pub use chat::ChatService;

// Re-export the member crates
pub use talko_llm as llm;
pub use talko_persona as persona;
pub use talko_store as store;

pub use talko_store::StoreError;
