use std::env;
use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://github.com";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(8);
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1024 * 1024;
pub const DEFAULT_CACHE_MAX_AGE: Duration = Duration::from_secs(86_400 * 30);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a valid {expected}, got {value:?}")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    /// Root of the source platform; profile and project URLs hang off it.
    pub base_url: String,
    pub fetch_timeout: Duration,
    pub cache_max_entries: usize,
    pub cache_max_age: Duration,
    pub is_production: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys take defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = match lookup("GITHUB_BASE_URL") {
            Some(raw) => {
                Url::parse(&raw).map_err(|_| ConfigError::Invalid {
                    key: "GITHUB_BASE_URL",
                    expected: "absolute URL",
                    value: raw.clone(),
                })?;
                raw.trim_end_matches('/').to_string()
            }
            None => DEFAULT_BASE_URL.to_string(),
        };

        Ok(Config {
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_or(&lookup, "SERVER_PORT", "port number", 3000)?,
            base_url,
            fetch_timeout: parse_secs(&lookup, "FETCH_TIMEOUT_SECS")?
                .unwrap_or(DEFAULT_FETCH_TIMEOUT),
            cache_max_entries: parse_or(
                &lookup,
                "CACHE_MAX_ENTRIES",
                "entry count",
                DEFAULT_CACHE_MAX_ENTRIES,
            )?,
            cache_max_age: parse_secs(&lookup, "CACHE_MAX_AGE_SECS")?
                .unwrap_or(DEFAULT_CACHE_MAX_AGE),
            is_production: lookup("APP_ENV").as_deref() == Some("production"),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

trait ParseDefault: Sized {
    fn parse_value(raw: &str) -> Option<Self>;
}

impl ParseDefault for u16 {
    fn parse_value(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

impl ParseDefault for usize {
    fn parse_value(raw: &str) -> Option<Self> {
        raw.trim().parse::<usize>().ok().filter(|n| *n > 0)
    }
}

impl ParseDefault for Option<u64> {
    fn parse_value(raw: &str) -> Option<Self> {
        raw.trim().parse::<u64>().ok().map(Some)
    }
}

fn parse_or<F, T>(
    lookup: &F,
    key: &'static str,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: ParseDefault,
{
    match lookup(key) {
        Some(raw) => T::parse_value(&raw).ok_or(ConfigError::Invalid {
            key,
            expected,
            value: raw,
        }),
        None => Ok(default),
    }
}

fn parse_secs<F>(lookup: &F, key: &'static str) -> Result<Option<Duration>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: Option<u64> = parse_or(lookup, key, "number of seconds", None)?;
    Ok(secs.map(Duration::from_secs))
}
