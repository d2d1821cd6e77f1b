pub mod auth;
pub mod chat;
pub mod config;
pub mod db;
pub mod error;
pub mod proxy;

use std::sync::Arc;
use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{DateTime, SecondsFormat, Utc};

pub use error::AppError;
pub type Result<T> = std::result::Result<T, AppError>;
pub use config::Settings;

pub use auth::{AuthService, AuthenticatedUser};
pub use chat::ChatService;
pub use db::{ChatEntry, MemoryStore, Store, User};
pub use proxy::{CompletionService, OpenAiClient};

/// Health check endpoint handler
/// Returns a JSON response with server status and timestamp
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "OK",
        "message": "ChatEch Backend is running",
        "timestamp": rfc3339_millis(Utc::now())
    }))
}

/// Fallback for every path no route matched.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "Endpoint not found"
    }))
}

/// Registers every API route and the extractor configs that keep payload
/// errors inside the `{"error": ...}` envelope.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .route("/api/health", web::get().to(health_check))
        .route("/api/auth/register", web::post().to(auth::handlers::register))
        .route("/api/auth/login", web::post().to(auth::handlers::login))
        .route("/api/chat", web::get().to(chat::handlers::send_message))
        .route("/api/chats/history", web::get().to(chat::handlers::history));
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid request body: {}", err)).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::ValidationError(format!("Invalid query string: {}", err)).into()
}

/// Timestamps on the wire match JavaScript's `toISOString()`.
pub fn rfc3339_millis(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Application state shared across all components
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub auth_service: Arc<AuthService>,
    pub chat_service: Arc<ChatService>,
}

impl AppState {
    /// Wires the in-memory store and the HTTP completion client.
    pub fn new(config: Settings) -> Result<Self> {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let completion: Arc<dyn CompletionService> = Arc::new(OpenAiClient::new(&config.completion)?);
        Ok(Self::with_components(config, store, completion))
    }

    pub fn with_components(
        config: Settings,
        store: Arc<dyn Store>,
        completion: Arc<dyn CompletionService>,
    ) -> Self {
        let auth_service = AuthService::new(
            store.clone(),
            &config.auth.jwt_secret,
            chrono::Duration::hours(config.auth.token_expiry_hours),
        );
        let chat_service = ChatService::new(
            store,
            completion,
            config.completion.system_prompt.clone(),
        );

        Self {
            config: Arc::new(config),
            auth_service: Arc::new(auth_service),
            chat_service: Arc::new(chat_service),
        }
    }
}
