//! Tracker configuration loaded from environment variables.

use std::env;

use common::{AppError, AppResult, DatabaseConfig, JwtConfig, ServiceConfig};
use domain::{DEFAULT_JWT_EXPIRATION_HOURS, MIN_JWT_SECRET_LENGTH};

const DEV_JWT_SECRET: &str = "dev-secret-key-minimum-32-chars!!";

/// Tracker configuration
#[derive(Debug, Clone, Default)]
pub struct TrackerConfig {
    pub service: ServiceConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

impl TrackerConfig {
    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// `JWT_SECRET` is mandatory in release builds and must be at least
    /// [`MIN_JWT_SECRET_LENGTH`] characters long.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let secret = match env::var("JWT_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using insecure default for development");
                DEV_JWT_SECRET.to_string()
            }
            Err(_) => {
                return Err(AppError::config(
                    "JWT_SECRET environment variable must be set in production",
                ))
            }
        };

        if secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(AppError::config(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LENGTH
            )));
        }

        Ok(Self {
            service: ServiceConfig {
                service_name: defaults.service.service_name,
                host: env::var("SERVER_HOST").unwrap_or(defaults.service.host),
                port: parse_var("SERVER_PORT").unwrap_or(defaults.service.port),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or(defaults.database.url),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS")
                    .unwrap_or(defaults.database.max_connections),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS")
                    .unwrap_or(defaults.database.min_connections),
            },
            jwt: JwtConfig {
                secret,
                expiration_hours: parse_var("JWT_EXPIRATION_HOURS")
                    .unwrap_or(DEFAULT_JWT_EXPIRATION_HOURS),
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}
