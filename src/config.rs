use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_LOG_FILE: &str = "helpdesk.log";
const DEFAULT_LOG_FILTER: &str = "helpdesk_tui=info";

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub api: ApiConfig,
    pub session_file: PathBuf,
    pub log_file: PathBuf,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source. `from_env` feeds it the
    /// process environment once `.env` has been loaded.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("HELPDESK_API_URL")
            .filter(|v| !v.trim().is_empty())
            .context("HELPDESK_API_URL must be set")?;
        let base_url = base_url.trim().trim_end_matches('/').to_string();

        let timeout_secs = match lookup("HELPDESK_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("HELPDESK_TIMEOUT_SECS is not a number: {raw}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        anyhow::ensure!(
            timeout_secs > 0,
            "HELPDESK_TIMEOUT_SECS must be at least 1 second"
        );

        let session_file = lookup("HELPDESK_SESSION_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_session_file);

        let log_file = lookup("HELPDESK_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        let log_filter =
            lookup("HELPDESK_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            api: ApiConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            session_file,
            log_file,
            log_filter,
        })
    }
}

fn default_session_file() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join("helpdesk_tui").join("session.json"),
        None => PathBuf::from(".helpdesk_session.json"),
    }
}
