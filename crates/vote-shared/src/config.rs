//! Configuration management

use config::{builder::DefaultState, Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_COOKIE_NAME, DEFAULT_SESSION_SECRET, DEFAULT_SESSION_TTL_HOURS,
    DEFAULT_SWEEP_INTERVAL_SECS,
};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub session: SessionSettings,
    pub log: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// How the session handle travels between client and server.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionStrategy {
    /// Signed cookie holding an opaque session id.
    Cookie,
    /// Token carried explicitly in the URL, a form field or a bearer header.
    Token,
}

impl SessionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cookie => "cookie",
            Self::Token => "token",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub strategy: SessionStrategy,
    pub secret: String,
    pub ttl_hours: i64,
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
    /// Daily rolling log files are written here when set.
    pub directory: Option<String>,
}

impl AppConfig {
    /// Load defaults, then `config/default`, then `config/{APP_ENV}`, then
    /// `VOTE__*` environment variables.
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("VOTE")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("session.secret", std::env::var("SESSION_SECRET").ok())?
            .set_override("app.env", env)?
            .build()?;

        Self::from_config(config)
    }

    /// Built-in defaults only, no files or environment.
    pub fn defaults() -> Result<Self, AppError> {
        Self::from_config(Self::builder()?.build()?)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 3000)?
            .set_default("app.name", "music-vote")?
            .set_default("session.strategy", "cookie")?
            .set_default("session.secret", DEFAULT_SESSION_SECRET)?
            .set_default("session.ttl_hours", DEFAULT_SESSION_TTL_HOURS)?
            .set_default("session.cookie_name", DEFAULT_COOKIE_NAME)?
            .set_default("session.cookie_secure", false)?
            .set_default("session.sweep_interval_secs", DEFAULT_SWEEP_INTERVAL_SECS)?
            .set_default("log.level", "info")?
            .set_default("log.json", true)
    }

    fn from_config(config: Config) -> Result<Self, AppError> {
        let parsed: Self = config.try_deserialize()?;
        parsed.validate()?;
        Ok(parsed)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.session.ttl_hours <= 0 {
            return Err(AppError::InvalidConfig(
                "session.ttl_hours must be positive".into(),
            ));
        }
        if self.session.sweep_interval_secs == 0 {
            return Err(AppError::InvalidConfig(
                "session.sweep_interval_secs must be positive".into(),
            ));
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(AppError::InvalidConfig(
                "session.cookie_name must not be empty".into(),
            ));
        }
        if self.session.secret.is_empty() {
            return Err(AppError::InvalidConfig(
                "session.secret must not be empty".into(),
            ));
        }
        Ok(())
    }
}
