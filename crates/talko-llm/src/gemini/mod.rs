pub mod client;
pub mod types;

pub use client::{GeminiClient, DEFAULT_GEMINI_MODEL, MAX_PROMPT_CHARS};
pub use types::{GenerationConfig, SafetySetting};
