use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::db::PublicUser;
use crate::error::AppError;
use tracing::{info, warn};

// Missing fields arrive as empty strings and are rejected by the service.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
    pub message: &'static str,
}

pub async fn register(
    req: web::Json<CredentialsRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received registration request for email: {}", req.email);

    match state.auth_service.register(&req.email, &req.password).await {
        Ok(session) => {
            info!("Registration successful for email: {}", req.email);
            Ok(HttpResponse::Ok().json(AuthResponse {
                token: session.token,
                user: session.user,
                message: "User registered successfully",
            }))
        }
        Err(e) => {
            warn!("Registration failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

pub async fn login(
    req: web::Json<CredentialsRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for email: {}", req.email);

    match state.auth_service.login(&req.email, &req.password).await {
        Ok(session) => {
            info!("Login successful for email: {}", req.email);
            Ok(HttpResponse::Ok().json(AuthResponse {
                token: session.token,
                user: session.user,
                message: "Login successful",
            }))
        }
        Err(e) => {
            warn!("Login failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}
