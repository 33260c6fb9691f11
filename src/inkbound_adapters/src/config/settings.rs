use std::time::Duration;

use http::HeaderValue;
use secrecy::Secret;
use serde::Deserialize;

use super::constants::TOKEN_TTL_SECONDS;

/// Process configuration, loaded once at startup and handed into the
/// constructors that need it.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub postgres: PostgresSettings,
    pub auth: AuthSettings,
    pub email_client: EmailClientSettings,
    pub media_client: MediaClientSettings,
}

impl Settings {
    /// Load from the environment (plus `.env` when present). Variables are
    /// nested with `__`, e.g. `INKBOUND__AUTH__JWT__SECRET`.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .add_source(
                config::Environment::with_prefix("INKBOUND")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public base URL embedded in verification links.
    pub base_url: String,
    #[serde(default)]
    pub allowed_origins: Option<AllowedOrigins>,
}

impl ApplicationSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    /// Refresh tokens fall back to `secret` when this is unset.
    #[serde(default)]
    pub refresh_secret: Option<Secret<String>>,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: i64,
    /// When set, startup refuses the access-secret fallback.
    #[serde(default)]
    pub require_distinct_secrets: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    #[serde(default = "default_client_timeout_millis")]
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MediaClientSettings {
    pub base_url: String,
    pub api_key: Secret<String>,
    #[serde(default = "default_client_timeout_millis")]
    pub timeout_millis: u64,
}

impl MediaClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

/// Comma-separated list of origins allowed by the CORS layer.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "String")]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|candidate| self.0.iter().any(|allowed| allowed == candidate))
            .unwrap_or(false)
    }
}

impl From<String> for AllowedOrigins {
    fn from(value: String) -> Self {
        Self(
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_token_ttl() -> i64 {
    TOKEN_TTL_SECONDS
}

fn default_client_timeout_millis() -> u64 {
    10_000
}
