use async_trait::async_trait;

use crate::error::GenerateError;

/// Seam between the chat layer and the hosted model.
///
/// One composed prompt in, one text completion out. Implemented by
/// [`crate::GeminiClient`] and by test fakes.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}
