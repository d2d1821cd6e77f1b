//! Proxy module for the external completion service
//!
//! The chat relay only sees [`CompletionService`]; [`OpenAiClient`] talks to
//! any OpenAI-compatible `chat/completions` endpoint.

mod openai;

use async_trait::async_trait;

use crate::error::ProxyError;

pub use openai::OpenAiClient;

/// Turns a single prompt into generated text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// `system` is sent as the system turn and `prompt` as the only user turn.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ProxyError>;
}
