use std::time::Duration;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::CompletionService;
use crate::config::CompletionConfig;
use crate::error::{AppError, ProxyError};

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: [CompletionMessage<'a>; 2],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct CompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct OpenAiClient {
    client: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(config: &CompletionConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::ConfigError(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: completions_endpoint(&config.api_url)?,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProxyError> {
        let body = CompletionRequest {
            model: &self.model,
            messages: [
                CompletionMessage { role: "system", content: system },
                CompletionMessage { role: "user", content: prompt },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!("Sending completion request to {}", self.endpoint);
        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ProxyError::InvalidApiKey,
                StatusCode::TOO_MANY_REQUESTS => ProxyError::RateLimited,
                _ => ProxyError::ResponseError(format!("{}: {}", status, text)),
            });
        }

        let data: CompletionResponse = resp.json().await?;
        data.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ProxyError::ResponseError("completion contained no message".into()))
    }
}

fn completions_endpoint(api_url: &str) -> Result<Url, AppError> {
    // Url::join replaces the last path segment unless the base ends with '/'.
    let mut base = api_url.trim().to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(Url::parse(&base)?.join("chat/completions")?)
}
