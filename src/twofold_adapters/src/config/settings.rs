use std::sync::LazyLock;
use std::time::Duration;

use http::HeaderValue;
use secrecy::Secret;
use serde::{Deserialize, Deserializer};

use super::constants::prod;

static SETTINGS: LazyLock<Settings> =
    LazyLock::new(|| Settings::from_env().expect("configuration must load"));

/// Process-wide configuration, resolved once at startup from `.env` plus
/// `TWOFOLD_*` environment variables. Components never read this
/// themselves; `main` passes the relevant pieces into constructors.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub auth: AuthSettings,
    pub email_client: EmailClientSettings,
    pub totp: TotpSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub address: String,
    pub allowed_origins: Option<AllowedOrigins>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub jwt_secret: Secret<String>,
    pub session_ttl_seconds: i64,
    pub pending_ttl_seconds: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TotpSettings {
    pub issuer: String,
}

impl Settings {
    /// Cached accessor for call sites that only need to read.
    pub fn load() -> &'static Settings {
        &SETTINGS
    }

    pub fn from_env() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        config::Config::builder()
            .set_default("app.address", prod::APP_ADDRESS)?
            .set_default("auth.session_ttl_seconds", 60 * 60 * 24 * 7)?
            .set_default("auth.pending_ttl_seconds", 60 * 10)?
            .set_default("email_client.base_url", prod::email_client::BASE_URL)?
            .set_default("email_client.sender", prod::email_client::SENDER)?
            .set_default(
                "email_client.timeout_millis",
                prod::email_client::TIMEOUT.as_millis() as u64,
            )?
            .set_default("totp.issuer", "twofold")?
            .add_source(
                config::Environment::with_prefix("TWOFOLD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

/// Comma-separated list of origins the browser may call us from.
#[derive(Debug, Clone)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn contains(&self, origin: &HeaderValue) -> bool {
        origin
            .to_str()
            .map(|origin| self.0.iter().any(|allowed| allowed == origin))
            .unwrap_or(false)
    }
}

impl From<Vec<String>> for AllowedOrigins {
    fn from(origins: Vec<String>) -> Self {
        Self(origins)
    }
}

impl<'de> Deserialize<'de> for AllowedOrigins {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
        ))
    }
}
