use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::{
    entities::message::ChatTurn,
    errors::AppError,
    repositories::chat_provider::ChatProvider,
    settings::ChatSettings,
};

const BUSY_MESSAGE: &str = "Too many requests. Please wait a moment and try again.";
const AUTH_MESSAGE: &str = "API authentication error";
const UNAVAILABLE_MESSAGE: &str = "Chat service is unavailable";

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatTurn],
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionClient {
    client: Client,
    settings: ChatSettings,
}

impl ChatCompletionClient {
    pub fn new(settings: ChatSettings) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    pub fn with_client(settings: ChatSettings, client: Client) -> Self {
        Self { client, settings }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.settings.api_url)
    }
}

fn status_error(status: StatusCode) -> AppError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => AppError::UpstreamUnavailable(BUSY_MESSAGE.to_string()),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            AppError::UpstreamUnavailable(AUTH_MESSAGE.to_string())
        }
        _ => AppError::UpstreamUnavailable(UNAVAILABLE_MESSAGE.to_string()),
    }
}

#[async_trait]
impl ChatProvider for ChatCompletionClient {
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, AppError> {
        let api_key = self.settings.api_key.as_ref().ok_or_else(|| {
            AppError::UpstreamUnavailable("Chat API key is not configured".to_string())
        })?;

        let request = CompletionRequest {
            model: &self.settings.model,
            messages: turns,
            temperature: self.settings.temperature,
            max_tokens: self.settings.max_tokens,
            top_p: self.settings.top_p,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Chat completion request failed: {}", e);
                AppError::UpstreamUnavailable(UNAVAILABLE_MESSAGE.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Chat completion rejected: {}", body);
            return Err(status_error(status));
        }

        let completion: CompletionResponse = response.json().await.map_err(|e| {
            tracing::warn!("Chat completion response unreadable: {}", e);
            AppError::UpstreamUnavailable(UNAVAILABLE_MESSAGE.to_string())
        })?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}
