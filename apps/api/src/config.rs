use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::similarity::MalformedPolicy;

pub const DEFAULT_REMOTE_JOBS_URL: &str = "https://remotive.com/api/remote-jobs";

/// Which Resource Store backend the service runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Postgres,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Postgres => "postgres",
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if a value is present but invalid.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub remote_jobs_url: String,
    pub remote_jobs_timeout: Duration,
    pub malformed_policy: MalformedPolicy,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("postgres") => StoreBackend::Postgres,
            Some(other) => bail!("STORE_BACKEND must be 'memory' or 'postgres', got '{other}'"),
        };

        let database_url = lookup("DATABASE_URL");
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            bail!("Required environment variable 'DATABASE_URL' is not set (STORE_BACKEND=postgres)");
        }

        let malformed_policy = match lookup("MALFORMED_MATCH_POLICY").as_deref() {
            None | Some("strict") => MalformedPolicy::Strict,
            Some("lenient") => MalformedPolicy::Lenient,
            Some(other) => {
                bail!("MALFORMED_MATCH_POLICY must be 'strict' or 'lenient', got '{other}'")
            }
        };

        let timeout_secs = parse_or(&lookup, "REMOTE_JOBS_TIMEOUT_SECS", 10u64)?;
        if timeout_secs == 0 {
            bail!("REMOTE_JOBS_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            store_backend,
            database_url,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10u32)?,
            remote_jobs_url: lookup("REMOTE_JOBS_URL")
                .unwrap_or_else(|| DEFAULT_REMOTE_JOBS_URL.to_string()),
            remote_jobs_timeout: Duration::from_secs(timeout_secs),
            malformed_policy,
            port: parse_or(&lookup, "PORT", 8080u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
