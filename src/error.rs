use thiserror::Error;
use actix_web::{ResponseError, HttpResponse, http::StatusCode};
use serde_json::json;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    AuthError(#[from] AuthError),

    #[error("Proxy error: {0}")]
    ProxyError(#[from] ProxyError),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Conflict: {0}")]
    ConflictError(String),
}

impl AppError {
    /// Message placed in the `{"error": ...}` envelope.
    ///
    /// Upstream and internal failures only ever expose a generic message;
    /// their detail stays in the server log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::AuthError(e) => e.to_string(),
            AppError::ValidationError(msg) | AppError::ConflictError(msg) => msg.clone(),
            AppError::ProxyError(_) => "Failed to process message".to_string(),
            AppError::StoreError(StoreError::Duplicate) => "User already exists".to_string(),
            AppError::StoreError(StoreError::NotFound) => "Record not found".to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::ConfigError(format!("invalid completion API url: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.public_message()
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AuthError(e) => match e {
                AuthError::MissingToken => StatusCode::UNAUTHORIZED,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::UnknownUser => StatusCode::UNAUTHORIZED,
                AuthError::InvalidToken => StatusCode::FORBIDDEN,
                AuthError::TokenExpired => StatusCode::FORBIDDEN,
            },
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ConflictError(_) => StatusCode::BAD_REQUEST,
            AppError::StoreError(StoreError::Duplicate) => StatusCode::BAD_REQUEST,
            AppError::StoreError(StoreError::NotFound) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("No token provided")]
    MissingToken,

    // Expired and tampered tokens share the public message.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid token")]
    TokenExpired,

    #[error("User not found")]
    UnknownUser,
}

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API request timed out")]
    Timeout,

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("API rate limited")]
    RateLimited,

    #[error("API response error: {0}")]
    ResponseError(String),
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::Timeout
        } else if err.is_decode() {
            ProxyError::ResponseError(err.to_string())
        } else {
            ProxyError::RequestFailed(err.to_string())
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Duplicate record")]
    Duplicate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let app_err: AppError = io_err.into();
        assert!(matches!(app_err, AppError::InternalError(_)));

        let config_err = config::ConfigError::NotFound(String::from("key not found"));
        let app_err: AppError = config_err.into();
        assert!(matches!(app_err, AppError::ConfigError(_)));

        let url_err = url::Url::parse("not a url").unwrap_err();
        let app_err: AppError = url_err.into();
        assert!(matches!(app_err, AppError::ConfigError(_)));

        let app_err: AppError = StoreError::Duplicate.into();
        assert!(matches!(app_err, AppError::StoreError(StoreError::Duplicate)));
    }

    #[test]
    fn test_error_status_codes() {
        let err = AppError::AuthError(AuthError::InvalidCredentials);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = AppError::AuthError(AuthError::MissingToken);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let err = AppError::AuthError(AuthError::InvalidToken);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err = AppError::AuthError(AuthError::TokenExpired);
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);

        let err = AppError::ValidationError("invalid input".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::ConflictError("User already exists".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = AppError::ProxyError(ProxyError::Timeout);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_display() {
        let err = AppError::ValidationError("test error".to_string());
        assert_eq!(err.to_string(), "Validation error: test error");

        let err = AppError::AuthError(AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Authentication error: Invalid credentials");

        let err = AppError::StoreError(StoreError::NotFound);
        assert_eq!(err.to_string(), "Store error: Record not found");
    }

    #[test]
    fn test_public_message_hides_upstream_detail() {
        let err = AppError::ProxyError(ProxyError::ResponseError("secret upstream body".into()));
        assert_eq!(err.public_message(), "Failed to process message");

        let err = AppError::InternalError("lock poisoned".into());
        assert_eq!(err.public_message(), "Internal server error");

        let err = AppError::AuthError(AuthError::TokenExpired);
        assert_eq!(err.public_message(), "Invalid token");
    }

    #[actix_web::test]
    async fn test_error_response_envelope() {
        let err = AppError::ValidationError("Message required".into());
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, json!({ "error": "Message required" }));
    }
}
