use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File, Map};
use serde::Deserialize;
use std::env;

/// Persona sent as the system turn of every completion request.
pub const DEFAULT_SYSTEM_PROMPT: &str = "Eres ChatEch, un asistente IA profesional para ayudar a dueños de tiendas con estrategia, marketing y operaciones. Sé conciso, práctico y profesional. Si necesitas mostrar una lista, hazlo con números o viñetas claras.";

pub const DEFAULT_JWT_SECRET: &str = "development_secret";

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_expiry_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CompletionConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub system_prompt: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub enabled: bool,
    pub allow_any_origin: bool,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    pub max_age: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub environment: String,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub completion: CompletionConfig,
    pub cors: CorsConfig,
}

impl Settings {
    /// Loads settings from defaults, optional `config/` files, `APP_`-prefixed
    /// environment variables and finally the bare `PORT`, `JWT_SECRET` and
    /// `OPENAI_API_KEY` variables, which win over everything else.
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Self::with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(app_environment(None));

        with_legacy_overrides(builder, |key| env::var(key).ok())?
            .build()?
            .try_deserialize()
    }

    /// Deterministic settings for tests; the process environment is ignored.
    pub fn new_for_test() -> Result<Self, ConfigError> {
        Self::with_defaults()?
            .set_override("environment", "test")?
            .set_override("server.workers", 1)?
            .set_override("auth.jwt_secret", "test_secret")?
            .set_override("completion.api_key", "test-api-key")?
            .set_override("completion.timeout_secs", 5)?
            .build()?
            .try_deserialize()
    }

    /// Environment layering of [`Settings::new`] without the `config/` files:
    /// `APP_` variables and the bare `PORT`, `JWT_SECRET` and `OPENAI_API_KEY`
    /// are all read from `vars` instead of the process environment.
    pub fn from_env_map(vars: Map<String, String>) -> Result<Self, ConfigError> {
        let builder = Self::with_defaults()?.add_source(app_environment(Some(vars.clone())));

        with_legacy_overrides(builder, |key| vars.get(key).cloned())?
            .build()?
            .try_deserialize()
    }

    pub fn is_development(&self) -> bool {
        matches!(self.environment.as_str(), "development" | "test")
    }

    fn with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", "development")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.workers", num_cpus::get() as i64)?
            .set_default("auth.jwt_secret", DEFAULT_JWT_SECRET)?
            .set_default("auth.token_expiry_hours", 24 * 7)?
            .set_default("completion.api_url", "https://api.openai.com/v1")?
            .set_default("completion.api_key", "")?
            .set_default("completion.model", "gpt-3.5-turbo")?
            .set_default("completion.max_tokens", 1000)?
            .set_default("completion.temperature", 0.7)?
            .set_default("completion.timeout_secs", 30)?
            .set_default("completion.system_prompt", DEFAULT_SYSTEM_PROMPT)?
            .set_default("cors.enabled", true)?
            .set_default("cors.allow_any_origin", true)?
            .set_default("cors.max_age", 3600)
    }
}

// Variable names the deployed frontend/backend pair already uses; they win
// over `APP_` variables and config files.
fn with_legacy_overrides(
    builder: ConfigBuilder<DefaultState>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    builder
        .set_override_option("server.port", lookup("PORT"))?
        .set_override_option("auth.jwt_secret", lookup("JWT_SECRET"))?
        .set_override_option("completion.api_key", lookup("OPENAI_API_KEY"))
}

// E.g. `APP_SERVER__PORT=5001` sets `server.port`,
// `APP_CORS__ALLOWED_ORIGINS=https://a.com,https://b.com` sets the origin list.
fn app_environment(source: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix("app")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("cors.allowed_origins")
        .try_parsing(true)
        .source(source)
}
