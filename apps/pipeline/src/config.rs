use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use sqlx::postgres::PgSslMode;

const DEFAULT_MATCH_ENDPOINT: &str = "http://localhost:8080/match";
const DEFAULT_DOCUMENT_TIMEOUT_SECS: u64 = 60;

/// Pipeline configuration loaded from environment variables.
/// Fails at startup if a variable is set but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub match_endpoint: String,
    pub document_timeout: Duration,
    /// Maximum number of candidate records pulled per run.
    pub batch_limit: i64,
    pub rust_log: String,
}

/// Connection parameters for the submissions database.
/// Loaded separately so stages that never touch the database don't need them.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub dbname: String,
    pub ssl_mode: PgSslMode,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let batch_limit = parse_var(&lookup, "MATCH_BATCH_LIMIT", 1i64)?;
        if batch_limit < 1 {
            bail!("MATCH_BATCH_LIMIT must be at least 1, got {batch_limit}");
        }

        Ok(Config {
            match_endpoint: lookup("MATCH_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_MATCH_ENDPOINT.to_string()),
            document_timeout: Duration::from_secs(parse_var(
                &lookup,
                "DOCUMENT_TIMEOUT_SECS",
                DEFAULT_DOCUMENT_TIMEOUT_SECS,
            )?),
            batch_limit,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let ssl_mode = match lookup("PGSSLMODE") {
            Some(raw) => PgSslMode::from_str(&raw)
                .with_context(|| format!("PGSSLMODE '{raw}' is not a valid SSL mode"))?,
            None => PgSslMode::Require,
        };

        Ok(DatabaseConfig {
            host: require_var(&lookup, "PGHOST")?,
            port: parse_var(&lookup, "PGPORT", 5432u16)?,
            user: require_var(&lookup, "PGUSER")?,
            password: require_var(&lookup, "PGPASSWORD")?,
            dbname: require_var(&lookup, "PGDATABASE")?,
            ssl_mode,
        })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn require_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Reads an optional variable, falling back to `default` when unset.
/// A set but unparseable value is an error rather than a silent fallback.
fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}
