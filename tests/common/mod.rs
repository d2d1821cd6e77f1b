#![allow(dead_code, unused_macros)]

use actix_web::web;
use chatech_server::{AppState, Settings};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Fresh, isolated state whose completion client points at `completion_url`.
pub fn test_state(completion_url: &str) -> web::Data<AppState> {
    let mut settings = Settings::new_for_test().expect("Failed to load test config");
    settings.completion.api_url = completion_url.to_string();
    web::Data::new(AppState::new(settings).expect("Failed to build state"))
}

/// Completion server that answers every request with `reply`.
pub async fn completion_server(reply: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": reply } }]
        })))
        .mount(&server)
        .await;
    server
}

macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state)
                .configure(chatech_server::routes)
                .default_service(actix_web::web::to(chatech_server::not_found)),
        )
        .await
    };
}

/// Registers a user and evaluates to the issued token.
macro_rules! register_user {
    ($app:expr, $email:expr, $password:expr) => {{
        let resp = actix_web::test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({ "email": $email, "password": $password }))
            .send_request(&$app)
            .await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = actix_web::test::read_body_json(resp).await;
        body["token"].as_str().expect("token missing").to_string()
    }};
}
