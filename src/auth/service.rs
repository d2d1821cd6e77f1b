use std::sync::Arc;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{encode, decode, Header, EncodingKey, DecodingKey, Validation, Algorithm};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::db::{PublicUser, Store, User};
use crate::error::{AppError, AuthError, StoreError};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub exp: i64,     // Expiration time
    pub iat: i64,     // Issued at
}

/// A freshly issued token and the user it belongs to.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user: PublicUser,
}

pub struct AuthService {
    store: Arc<dyn Store>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(store: Arc<dyn Store>, jwt_secret: &str, token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            store,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            validation,
            token_ttl,
        }
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        require_credentials(email, password)?;

        let user = User::new(email.to_string(), password.to_string());
        let public = user.public_view();

        match self.store.insert_user(user).await {
            Ok(()) => {}
            Err(StoreError::Duplicate) => {
                return Err(AppError::ConflictError("User already exists".into()));
            }
            Err(e) => return Err(e.into()),
        }

        let token = self.generate_token(email)?;
        Ok(AuthSession { token, user: public })
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        require_credentials(email, password)?;

        // Unknown email and wrong password are indistinguishable to the caller.
        let user = self.store.get_user(email).await?
            .filter(|user| user.password_matches(password))
            .ok_or(AuthError::InvalidCredentials)?;

        let token = self.generate_token(&user.email)?;
        Ok(AuthSession { token, user: user.public_view() })
    }

    /// Checks signature and expiry, returning the email the token was issued for.
    pub fn verify_token(&self, token: &str) -> Result<String, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        Ok(self.decode_token(token)?.email)
    }

    fn generate_token(&self, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            email: email.to_string(),
            exp: (now + self.token_ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to sign token: {}", e)))
    }

    fn decode_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                }
            })
    }
}

fn require_credentials(email: &str, password: &str) -> Result<(), AppError> {
    if email.is_empty() || password.is_empty() {
        return Err(AppError::ValidationError("Email and password required".into()));
    }
    Ok(())
}
