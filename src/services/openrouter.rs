use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::ai_service::ChatCompletion;
use super::transport::Transport;
use crate::errors::ApiError;
use crate::models::{Credentials, Message};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Debug, Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

pub struct OpenRouterService {
    credentials: Credentials,
    transport: Arc<dyn Transport>,
    // Only used to build requests; sending goes through `transport`.
    client: reqwest::Client,
}

impl OpenRouterService {
    pub fn new(credentials: Credentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials,
            transport,
            client: reqwest::Client::new(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.credentials.base_url.trim_end_matches('/'))
    }
}

#[async_trait::async_trait]
impl ChatCompletion for OpenRouterService {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, ApiError> {
        let request = ChatRequest { model, messages };

        log::info!("🤖 Sending {} messages to OpenRouter with model: {}", messages.len(), model);

        let http_request = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.credentials.api_key)
            .json(&request)
            .build()?;

        let response = self.transport.send(http_request).await?;

        let status = response.status();
        log::debug!("📥 OpenRouter response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ OpenRouter API error ({}): {}", status, body);
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let response_text = response.text().await?;
        log::debug!("📄 Raw OpenRouter response size: {} bytes", response_text.len());

        let chat_response: ChatResponse = serde_json::from_str(&response_text)?;
        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(ApiError::EmptyResponse)?;

        log::info!("✅ Received reply from OpenRouter");
        Ok(choice.message.content.unwrap_or_default())
    }
}
