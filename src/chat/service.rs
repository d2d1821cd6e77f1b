use std::sync::Arc;
use chrono::{DateTime, Utc};
use tracing::{error, info};

use crate::db::{ChatEntry, Store};
use crate::error::{AppError, AuthError};
use crate::proxy::CompletionService;

/// Generated reply for a single message.
#[derive(Debug, Clone)]
pub struct ChatReply {
    pub bot_response: String,
    pub timestamp: DateTime<Utc>,
}

pub struct ChatService {
    store: Arc<dyn Store>,
    completion: Arc<dyn CompletionService>,
    system_prompt: String,
}

impl ChatService {
    pub fn new(
        store: Arc<dyn Store>,
        completion: Arc<dyn CompletionService>,
        system_prompt: String,
    ) -> Self {
        Self {
            store,
            completion,
            system_prompt,
        }
    }

    /// Relays one message to the completion service and records the exchange.
    ///
    /// Each call is independent: no earlier history is sent upstream. Nothing is
    /// recorded when the completion fails.
    pub async fn send_message(&self, email: &str, message: &str) -> Result<ChatReply, AppError> {
        if message.trim().is_empty() {
            return Err(AppError::ValidationError("Message required".into()));
        }

        if !self.store.user_exists(email).await? {
            return Err(AuthError::UnknownUser.into());
        }

        let bot_response = self
            .completion
            .complete(&self.system_prompt, message)
            .await
            .map_err(|e| {
                error!("Completion request failed for {}: {}", email, e);
                e
            })?;

        let entry = self
            .store
            .append_chat(email, ChatEntry::new(message.to_string(), bot_response))
            .await?;
        info!("Recorded chat {} for {}", entry.id, email);

        Ok(ChatReply {
            bot_response: entry.bot_response,
            timestamp: entry.created_at,
        })
    }

    pub async fn history(&self, email: &str) -> Result<Vec<ChatEntry>, AppError> {
        Ok(self.store.get_history(email).await?)
    }
}
