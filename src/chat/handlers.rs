use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::AuthenticatedUser;
use crate::db::ChatEntry;
use crate::error::AppError;
use crate::{rfc3339_millis, AppState};

#[derive(Debug, Deserialize)]
pub struct ChatQuery {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub bot_response: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub chats: Vec<ChatEntry>,
    pub total: usize,
}

pub async fn send_message(
    user: AuthenticatedUser,
    query: web::Query<ChatQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received chat message from {}", user.email);

    match state.chat_service.send_message(&user.email, &query.message).await {
        Ok(reply) => Ok(HttpResponse::Ok().json(ChatResponse {
            bot_response: reply.bot_response,
            timestamp: rfc3339_millis(reply.timestamp),
        })),
        Err(e) => {
            warn!("Chat failed for {}: {}", user.email, e);
            Err(e)
        }
    }
}

pub async fn history(
    user: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let chats = state.chat_service.history(&user.email).await?;
    info!("Returning {} chats for {}", chats.len(), user.email);

    Ok(HttpResponse::Ok().json(HistoryResponse {
        total: chats.len(),
        chats,
    }))
}
