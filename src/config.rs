use std::env;

use crate::error::AppError;

/// Route under which stored delivery photos are served back.
pub const UPLOADS_ROUTE: &str = "/uploads";

#[derive(Debug, Clone)]
pub struct Config {
    pub http_port: u16,
    pub log_level: String,
    pub upload_dir: String,
    pub geocode_url: String,
    pub geocode_timeout_secs: u64,
    pub auth_secret: String,
    pub token_ttl_minutes: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            http_port: parse_or_default("HTTP_PORT", 3000)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            geocode_url: env::var("GEOCODE_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org/reverse".to_string()),
            geocode_timeout_secs: parse_or_default("GEOCODE_TIMEOUT_SECS", 10)?,
            auth_secret: env::var("AUTH_SECRET")
                .unwrap_or_else(|_| "paquexpress-dev-secret".to_string()),
            token_ttl_minutes: parse_or_default("TOKEN_TTL_MINUTES", 1440)?,
        })
    }
}

fn parse_or_default<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|err| AppError::Internal(format!("invalid {key}: {err}"))),
        Err(_) => Ok(default),
    }
}
