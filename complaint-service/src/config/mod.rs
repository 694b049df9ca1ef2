use chrono::Duration;
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

use crate::services::DEFAULT_MAX_ID_ATTEMPTS;

pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;
/// Thirty days.
pub const MAX_SESSION_TTL_MINUTES: i64 = 30 * 24 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct ComplaintConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub environment: Environment,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    pub security: SecurityConfig,
    pub sessions: SessionConfig,
    pub ids: IdConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    Prod,
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(format!("Unknown ENVIRONMENT '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SecurityConfig {
    /// When set, admin routes require a matching `x-admin-api-key` header.
    pub admin_api_key: Option<String>,
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub ttl_minutes: i64,
}

impl SessionConfig {
    /// Session lifetime, kept within `1..=MAX_SESSION_TTL_MINUTES`.
    pub fn ttl(&self) -> Duration {
        Duration::minutes(self.ttl_minutes.clamp(1, MAX_SESSION_TTL_MINUTES))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdConfig {
    pub max_attempts: u32,
}

impl Default for ComplaintConfig {
    fn default() -> Self {
        Self {
            common: core_config::Config::default(),
            environment: Environment::Dev,
            service_name: "complaint-service".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            log_level: "info".to_string(),
            otlp_endpoint: None,
            security: SecurityConfig {
                admin_api_key: None,
                allowed_origins: vec!["*".to_string()],
            },
            sessions: SessionConfig {
                ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
            },
            ids: IdConfig {
                max_attempts: DEFAULT_MAX_ID_ATTEMPTS,
            },
        }
    }
}

impl ComplaintConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        let env_str = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string());
        let environment: Environment = env_str
            .parse()
            .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?;

        let is_prod = environment == Environment::Prod;

        Ok(ComplaintConfig {
            common: common_config,
            environment,
            service_name: get_env("SERVICE_NAME", Some("complaint-service"), is_prod)?,
            service_version: get_env("SERVICE_VERSION", Some(env!("CARGO_PKG_VERSION")), is_prod)?,
            log_level: get_env("LOG_LEVEL", Some("info"), is_prod)?,
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            security: SecurityConfig {
                admin_api_key: admin_api_key(is_prod)?,
                allowed_origins: get_env("ALLOWED_ORIGINS", Some("*"), false)?
                    .split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect(),
            },
            sessions: SessionConfig {
                ttl_minutes: session_ttl_minutes(parse_env(
                    "SESSION_TTL_MINUTES",
                    DEFAULT_SESSION_TTL_MINUTES,
                )?)?,
            },
            ids: IdConfig {
                max_attempts: parse_env("ID_MAX_ATTEMPTS", DEFAULT_MAX_ID_ATTEMPTS)?,
            },
        })
    }
}

fn admin_api_key(is_prod: bool) -> Result<Option<String>, AppError> {
    match env::var("ADMIN_API_KEY").ok().filter(|k| !k.is_empty()) {
        Some(key) => Ok(Some(key)),
        None if is_prod => Err(AppError::ConfigError(anyhow::anyhow!(
            "ADMIN_API_KEY is required in production but not set"
        ))),
        None => Ok(None),
    }
}

fn session_ttl_minutes(minutes: i64) -> Result<i64, AppError> {
    if (1..=MAX_SESSION_TTL_MINUTES).contains(&minutes) {
        Ok(minutes)
    } else {
        Err(AppError::ConfigError(anyhow::anyhow!(
            "SESSION_TTL_MINUTES must be between 1 and {}, got {}",
            MAX_SESSION_TTL_MINUTES,
            minutes
        )))
    }
}

fn parse_env<T: FromStr>(key: &str, default: T) -> Result<T, AppError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            AppError::ConfigError(anyhow::anyhow!("{} has an invalid value: '{}'", key, raw))
        }),
        Err(_) => Ok(default),
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environment_parses_common_spellings() {
        assert_eq!("prod".parse::<Environment>(), Ok(Environment::Prod));
        assert_eq!("Development".parse::<Environment>(), Ok(Environment::Dev));
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn defaults_listen_on_8080_with_open_admin_routes() {
        let config = ComplaintConfig::default();
        assert_eq!(config.common.port, 8080);
        assert!(config.security.admin_api_key.is_none());
        assert_eq!(config.ids.max_attempts, DEFAULT_MAX_ID_ATTEMPTS);
        assert_eq!(config.sessions.ttl(), Duration::minutes(60));
    }

    #[test]
    fn session_ttl_must_be_positive_and_bounded() {
        assert!(session_ttl_minutes(0).is_err());
        assert!(session_ttl_minutes(-5).is_err());
        assert!(session_ttl_minutes(MAX_SESSION_TTL_MINUTES + 1).is_err());
        assert!(session_ttl_minutes(200_000_000_000).is_err());

        assert_eq!(session_ttl_minutes(1).unwrap(), 1);
        assert_eq!(
            session_ttl_minutes(MAX_SESSION_TTL_MINUTES).unwrap(),
            MAX_SESSION_TTL_MINUTES
        );
    }

    #[test]
    fn out_of_range_ttl_is_clamped_when_built_directly() {
        let huge = SessionConfig {
            ttl_minutes: 200_000_000_000,
        };
        assert_eq!(huge.ttl(), Duration::minutes(MAX_SESSION_TTL_MINUTES));

        let negative = SessionConfig { ttl_minutes: -1 };
        assert_eq!(negative.ttl(), Duration::minutes(1));
    }
}
