pub mod error;
pub mod gemini;
pub mod traits;

pub use error::GenerateError;
pub use gemini::{GeminiClient, GenerationConfig, SafetySetting, DEFAULT_GEMINI_MODEL};
pub use traits::TextGenerator;
