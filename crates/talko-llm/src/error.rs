use thiserror::Error;

/// Failure modes of the generative-language call.
///
/// Each category maps to one fixed human-readable assistant message
/// ([`GenerateError::user_message`]); the caller appends that message into
/// the conversation so the thread stays consistent and a retry is just
/// another send.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("network error: {0}")]
    Network(String),

    #[error("authentication failed (401)")]
    Unauthorized,

    #[error("rate limited (429)")]
    RateLimited,

    #[error("access denied (403)")]
    Forbidden,

    #[error("upstream error: HTTP {0}")]
    Upstream(u16),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("empty completion")]
    EmptyCompletion,

    #[error("empty prompt")]
    EmptyPrompt,

    #[error("prompt exceeds the maximum length")]
    PromptTooLong,
}

impl GenerateError {
    /// The canned assistant reply for this failure category.
    pub fn user_message(&self) -> &'static str {
        match self {
            GenerateError::Network(_) => {
                "Network error. Please check your internet connection and try again."
            }
            GenerateError::Unauthorized => {
                "Authentication failed. Please contact support at +92 343 614 8715."
            }
            GenerateError::RateLimited => {
                "I'm receiving too many requests right now. Please wait a moment and try again."
            }
            GenerateError::Forbidden => {
                "Access denied. Please contact SkillUp support at +92 343 614 8715."
            }
            GenerateError::MalformedResponse(_) | GenerateError::EmptyCompletion => {
                "I apologize, but I couldn't generate a proper response. Please try again."
            }
            GenerateError::EmptyPrompt => "Please enter a message to continue our conversation.",
            GenerateError::PromptTooLong => {
                "Your message is quite long. Please keep it under 8000 characters for better processing."
            }
            GenerateError::Upstream(_) => {
                "I encountered an issue processing your request. Please try again or contact SkillUp support at +92 343 614 8715."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_category_has_a_distinct_message() {
        let messages = [
            GenerateError::Network("x".into()).user_message(),
            GenerateError::Unauthorized.user_message(),
            GenerateError::RateLimited.user_message(),
            GenerateError::Forbidden.user_message(),
            GenerateError::EmptyCompletion.user_message(),
            GenerateError::EmptyPrompt.user_message(),
            GenerateError::PromptTooLong.user_message(),
            GenerateError::Upstream(500).user_message(),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn malformed_and_empty_share_the_retry_message() {
        assert_eq!(
            GenerateError::MalformedResponse("bad".into()).user_message(),
            GenerateError::EmptyCompletion.user_message()
        );
    }
}
