// Application configuration
//
// Loaded once at startup from the environment (after `.env`), validated, and
// shared read-only afterwards. Any error here is fatal: the server does not bind.
//
// Decision: Parsing is a pure function over a key lookup
// Decision: Errors name the offending variable but never echo the secret

use axum::http::HeaderValue;
use std::time::Duration;
use thiserror::Error;

use crate::auth::config::{
    parse_expiry, AuthConfig, JwtConfig, SigningAlgorithm, DEFAULT_HASH_COST, MIN_SECRET_LEN,
};

const DEFAULT_PORT: u16 = 3000;
const MIN_HASH_COST: u32 = 4;
const MAX_HASH_COST: u32 = 31;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("JWT_SECRET must be at least {} characters", MIN_SECRET_LEN)]
    SecretTooShort,

    #[error("invalid value for {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(var: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            var,
            reason: reason.into(),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Some(Environment::Development),
            "production" | "prod" => Some(Environment::Production),
            "test" => Some(Environment::Test),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Allowed cross-origin callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<HeaderValue>),
}

impl CorsOrigins {
    fn parse(s: &str) -> Result<Self, ConfigError> {
        let s = s.trim();
        if s.is_empty() || s == "*" {
            return Ok(CorsOrigins::Any);
        }
        let origins = s
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(|o| {
                o.parse::<HeaderValue>()
                    .map_err(|_| ConfigError::invalid("CORS_ORIGIN", format!("bad origin '{}'", o)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CorsOrigins::List(origins))
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub port: u16,
    /// Postgres URL; `None` selects the in-memory store
    pub database_url: Option<String>,
    pub cors_origins: CorsOrigins,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let environment = match get("APP_ENV") {
            Some(v) => Environment::parse(&v).ok_or_else(|| {
                ConfigError::invalid("APP_ENV", "expected development, production or test")
            })?,
            None => Environment::default(),
        };

        let port = match get("PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("PORT", e.to_string()))?,
            None => DEFAULT_PORT,
        };

        let cors_origins = CorsOrigins::parse(&get("CORS_ORIGIN").unwrap_or_default())?;

        let secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if secret.chars().count() < MIN_SECRET_LEN {
            return Err(ConfigError::SecretTooShort);
        }

        let algorithm = match get("JWT_ALGORITHM") {
            Some(v) => SigningAlgorithm::parse(&v).ok_or_else(|| {
                ConfigError::invalid("JWT_ALGORITHM", "expected HS256, HS384 or HS512")
            })?,
            None => SigningAlgorithm::default(),
        };

        let access_token_lifetime = expiry(&get, "JWT_EXPIRES_IN", "1d")?;
        let refresh_token_lifetime = expiry(&get, "JWT_REFRESH_EXPIRES_IN", "7d")?;

        let hash_cost = match get("BCRYPT_COST") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|c| (MIN_HASH_COST..=MAX_HASH_COST).contains(c))
                .ok_or_else(|| {
                    ConfigError::invalid(
                        "BCRYPT_COST",
                        format!("expected {}..={}", MIN_HASH_COST, MAX_HASH_COST),
                    )
                })?,
            None => DEFAULT_HASH_COST,
        };

        let jwt = JwtConfig {
            secret,
            algorithm,
            access_token_lifetime,
            refresh_token_lifetime,
        };

        Ok(Self {
            environment,
            port,
            database_url: get("DATABASE_URL"),
            cors_origins,
            auth: AuthConfig {
                jwt,
                hash_cost,
                secure_cookies: environment.is_production(),
            },
        })
    }
}

fn expiry(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
) -> Result<Duration, ConfigError> {
    let raw = get(var).unwrap_or_else(|| default.to_string());
    parse_expiry(&raw).map_err(|e| ConfigError::invalid(var, e.to_string()))
}
