use std::future::{ready, Ready};
use actix_web::{dev::Payload, web, FromRequest, HttpRequest};

use crate::error::{AppError, AuthError};
use crate::AppState;

/// Identity proven by a valid `Authorization: Bearer <token>` header.
///
/// Handlers that take this extractor are only reached with a verified email.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub email: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::InternalError("application state not configured".into()))?;

    let token = bearer_token(req).ok_or(AuthError::MissingToken)?;
    let email = state.auth_service.verify_token(token)?;

    Ok(AuthenticatedUser { email })
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.split_once(' '))
        // Auth schemes are case-insensitive (RFC 7235).
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}
