use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

/// Which implementation of the data access layer the service talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// Hosted store reached through its REST interface.
    Postgrest,
    /// Direct connection to the hosted Postgres database.
    Postgres,
    /// In-process store, for demos and tests.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgrest" | "supabase" => Ok(Self::Postgrest),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub store_backend: StoreBackend,
    pub supabase_url: Option<url::Url>,
    pub supabase_anon_key: Option<String>,
    pub database_url: Option<String>,
    pub run_migrations: bool,
    pub store_timeout_secs: u64,
    pub cors_allowed_origin: Option<String>,
    pub log_format: LogFormat,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let store_backend = get_env_parse_or("STORE_BACKEND", StoreBackend::Postgrest)?;

        let (supabase_url, supabase_anon_key) = if store_backend == StoreBackend::Postgrest {
            let raw = get_env("SUPABASE_URL")?;
            let url = url::Url::parse(&raw)
                .map_err(|e| Error::Config(format!("Invalid value for SUPABASE_URL: {}", e)))?;
            (Some(url), Some(get_env("SUPABASE_ANON_KEY")?))
        } else {
            (None, None)
        };

        let database_url = if store_backend == StoreBackend::Postgres {
            Some(get_env("DATABASE_URL")?)
        } else {
            None
        };

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            store_backend,
            supabase_url,
            supabase_anon_key,
            database_url,
            run_migrations: get_env_parse_or("RUN_MIGRATIONS", false)?,
            store_timeout_secs: get_env_parse_or("STORE_TIMEOUT_SECS", 30)?,
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok().filter(|v| !v.is_empty()),
            log_format: get_env_parse_or("LOG_FORMAT", LogFormat::Pretty)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
