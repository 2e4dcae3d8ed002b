use crate::errors::ApiError;
use crate::models::Message;

/// Trait for chat-completion backends (OpenRouter or anything OpenAI-compatible)
#[async_trait::async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Sends the whole conversation and returns the first candidate's text.
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, ApiError>;
}
