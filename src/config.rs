use anyhow::{Context, Result, anyhow, bail};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    MySql,
    Memory,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(StoreKind::MySql),
            "memory" => Ok(StoreKind::Memory),
            other => Err(anyhow!("unknown department store `{}`", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub store: StoreKind,
    /// Only required for the MySQL store
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    /// Departments preloaded into the in-memory store
    pub seed_departments: Vec<String>,

    pub api_prefix: String,
    pub rate_api_per_min: u32,

    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let store: StoreKind = or_default("DEPARTMENT_STORE", "mysql")
            .parse()
            .context("DEPARTMENT_STORE must be `mysql` or `memory`")?;

        let database_url = lookup("DATABASE_URL");
        if store == StoreKind::MySql && database_url.is_none() {
            bail!("DATABASE_URL must be set when DEPARTMENT_STORE is mysql");
        }

        Ok(Self {
            server_addr: or_default("SERVER_ADDR", "127.0.0.1:8080"),
            store,
            database_url,
            db_max_connections: or_default("DB_MAX_CONNECTIONS", "5")
                .parse()
                .context("DB_MAX_CONNECTIONS must be a positive integer")?,
            seed_departments: lookup("DEPARTMENT_SEED")
                .map(|names| parse_seed(&names))
                .unwrap_or_default(),

            api_prefix: or_default("API_PREFIX", "/api"),
            rate_api_per_min: or_default("RATE_API_PER_MIN", "1000")
                .parse()
                .context("RATE_API_PER_MIN must be a non-negative integer")?,

            log_dir: or_default("LOG_DIR", "logs"),
            log_level: or_default("LOG_LEVEL", "debug")
                .parse()
                .map_err(|_| anyhow!("LOG_LEVEL must be one of trace, debug, info, warn, error"))?,
        })
    }
}

/// Comma-separated names, blanks dropped
fn parse_seed(names: &str) -> Vec<String> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
