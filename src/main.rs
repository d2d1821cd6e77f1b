use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use anyhow::Context;
use chatech_server::config::{CorsConfig, DEFAULT_JWT_SECRET};
use chatech_server::{AppState, Settings};
use dotenv::dotenv;
use std::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn build_cors(config: &CorsConfig) -> Cors {
    if !config.enabled {
        // CORS disabled - use most restrictive settings
        return Cors::default();
    }

    let cors = if config.allow_any_origin {
        Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec!["Authorization", "Content-Type"])
    };

    cors.max_age(config.max_age as usize)
}

fn warn_on_weak_settings(config: &Settings) {
    if config.completion.api_key.is_empty() {
        warn!("No completion API key configured; chat requests will fail upstream");
    }
    if config.auth.jwt_secret == DEFAULT_JWT_SECRET && !config.is_development() {
        warn!("Using the default JWT secret in environment '{}'", config.environment);
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = Settings::new().context("failed to load configuration")?;
    info!("Configuration loaded successfully ({} environment)", config.environment);
    warn_on_weak_settings(&config);

    let state = AppState::new(config.clone()).context("failed to initialise application state")?;
    let state = web::Data::new(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).with_context(|| format!("failed to bind {}", addr))?;
    info!("ChatEch backend listening on http://{}", addr);

    let cors_config = config.cors.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_config))
            .app_data(state.clone())
            .configure(chatech_server::routes)
            .default_service(web::to(chatech_server::not_found))
    })
    .listen(listener)?
    .workers(config.server.workers as usize)
    .run()
    .await
    .context("server terminated with an error")?;

    Ok(())
}
