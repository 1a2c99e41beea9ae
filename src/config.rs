//! Client configuration and logging setup.
//!
//! Settings come from the environment (optionally seeded from a `.env` file).

use crate::error::{ForemanError, Result};
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default attempt budget for mutating host calls.
pub const DEFAULT_CLIENT_RETRIES: u32 = 3;
/// First backoff delay between retried attempts.
pub const DEFAULT_BACKOFF_MSEC: u64 = 500;
/// Upper bound for a single backoff delay.
pub const DEFAULT_MAX_BACKOFF_MSEC: u64 = 8_000;
/// Per-request timeout applied by the HTTP transport.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const ENV_SERVER_URL: &str = "FOREMAN_SERVER_URL";
pub const ENV_USERNAME: &str = "FOREMAN_USERNAME";
pub const ENV_PASSWORD: &str = "FOREMAN_PASSWORD";
pub const ENV_INSECURE: &str = "FOREMAN_INSECURE";
pub const ENV_TIMEOUT_SECS: &str = "FOREMAN_TIMEOUT_SECS";
pub const ENV_CLIENT_RETRIES: &str = "FOREMAN_CLIENT_RETRIES";
pub const ENV_BACKOFF_MSEC: &str = "FOREMAN_BACKOFF_MSEC";
pub const ENV_MAX_BACKOFF_MSEC: &str = "FOREMAN_MAX_BACKOFF_MSEC";
pub const ENV_LOG_LEVEL: &str = "FOREMAN_LOG_LEVEL";

/// Connection settings for a Foreman server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base API url, e.g. `https://foreman.example.com/api`.
    pub server_url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Accept self-signed / invalid TLS certificates.
    pub insecure: bool,
    pub timeout: Duration,
    /// Attempt budget handed to host create/update/power calls.
    pub client_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl ClientConfig {
    /// Config for `server_url` with every other setting at its default.
    pub fn new(server_url: &str) -> ClientConfig {
        ClientConfig {
            server_url: server_url.trim_end_matches('/').to_string(),
            username: None,
            password: None,
            insecure: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client_retries: DEFAULT_CLIENT_RETRIES,
            initial_backoff: Duration::from_millis(DEFAULT_BACKOFF_MSEC),
            max_backoff: Duration::from_millis(DEFAULT_MAX_BACKOFF_MSEC),
        }
    }

    /// Load settings from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<ClientConfig> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url = lookup(ENV_SERVER_URL)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ForemanError::Config(format!("{ENV_SERVER_URL} is not set")))?;
        let mut config = ClientConfig::new(server_url.trim());

        config.username = lookup(ENV_USERNAME).filter(|s| !s.is_empty());
        config.password = lookup(ENV_PASSWORD).filter(|s| !s.is_empty());

        if let Some(v) = lookup(ENV_INSECURE) {
            config.insecure = parse_bool(ENV_INSECURE, &v)?;
        }
        if let Some(v) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout = Duration::from_secs(parse_number(ENV_TIMEOUT_SECS, &v)?);
        }
        if let Some(v) = lookup(ENV_CLIENT_RETRIES) {
            config.client_retries = parse_number(ENV_CLIENT_RETRIES, &v)?;
        }
        if let Some(v) = lookup(ENV_BACKOFF_MSEC) {
            config.initial_backoff = Duration::from_millis(parse_number(ENV_BACKOFF_MSEC, &v)?);
        }
        if let Some(v) = lookup(ENV_MAX_BACKOFF_MSEC) {
            config.max_backoff = Duration::from_millis(parse_number(ENV_MAX_BACKOFF_MSEC, &v)?);
        }

        log::debug!(
            "ClientConfig server_url={} user={:?} insecure={} retries={}",
            config.server_url,
            config.username,
            config.insecure,
            config.client_retries
        );
        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ForemanError::Config(format!(
            "{key}: expected a boolean, got '{other}'"
        ))),
    }
}

/// Parse into the target width; out-of-range values are rejected, not truncated.
fn parse_number<N>(key: &str, value: &str) -> Result<N>
where
    N: FromStr,
    N::Err: fmt::Display,
{
    value
        .trim()
        .parse::<N>()
        .map_err(|e| ForemanError::Config(format!("{key}: invalid value '{value}': {e}")))
}

/// Initialise log4rs.
///
/// With a config file (usually `log4rs.yml`) the file decides everything. Without one a
/// console appender is installed at the level named by `FOREMAN_LOG_LEVEL` (default
/// `info`).
pub fn init_logging(config_file: Option<&str>) -> Result<()> {
    if let Some(file) = config_file {
        log4rs::init_file(file, Default::default())
            .map_err(|e| ForemanError::Config(format!("log4rs init from {file}: {e}")))?;
        return Ok(());
    }

    let level = std::env::var(ENV_LOG_LEVEL)
        .ok()
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))
        .map_err(|e| ForemanError::Config(format!("log4rs config: {e}")))?;
    log4rs::init_config(config).map_err(|e| ForemanError::Config(format!("log4rs init: {e}")))?;
    Ok(())
}
