use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

pub mod cors;

pub use cors::create_cors_layer;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3001";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub bind_addr: SocketAddr,
    pub environment: Environment,
    pub cors_allowed_origins: Option<String>,
    pub seed_sample_events: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            get("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_MAX_CONNECTIONS,
        )?;
        let acquire_timeout_secs = parse_or(
            "DATABASE_ACQUIRE_TIMEOUT_SECS",
            get("DATABASE_ACQUIRE_TIMEOUT_SECS"),
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?;
        let bind_addr = match get("BIND_ADDR") {
            Some(raw) => parse("BIND_ADDR", raw)?,
            None => parse("BIND_ADDR", DEFAULT_BIND_ADDR.to_string())?,
        };

        let environment = match get("RUST_ENV") {
            Some(value) if value.trim().eq_ignore_ascii_case("production") => {
                Environment::Production
            }
            _ => Environment::Development,
        };

        let seed_sample_events = matches!(
            get("SEED_SAMPLE_EVENTS").as_deref().map(str::trim),
            Some("1") | Some("true")
        );

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            bind_addr,
            environment,
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
            seed_sample_events,
        })
    }
}

fn parse<T: std::str::FromStr>(name: &'static str, raw: String) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value: raw })
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(raw) => parse(name, raw),
        None => Ok(default),
    }
}
