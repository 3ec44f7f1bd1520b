//! Dashboard configuration
//!
//! Resolved from command-line flags, then environment variables, then
//! built-in defaults. A `.env` file in the working directory is loaded into
//! the environment by `main` before this runs.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

/// Host the sandbox API is served from.
pub const DEFAULT_API_URL: &str = "https://finch-sandbox-se-interview.vercel.app";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// Environment variable names
const ENV_API_URL: &str = "HRDASH_API_URL";
const ENV_TIMEOUT_SECS: &str = "HRDASH_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    pub api_url: Url,
    pub timeout: Duration,
}

impl DashConfig {
    /// Load configuration. Flags take precedence over environment variables.
    pub fn load(api_url_flag: Option<&str>, timeout_flag: Option<u64>) -> Result<Self> {
        let env_url = env::var(ENV_API_URL).ok();
        let env_timeout = env::var(ENV_TIMEOUT_SECS).ok();
        Self::resolve(
            api_url_flag,
            env_url.as_deref(),
            timeout_flag,
            env_timeout.as_deref(),
        )
    }

    fn resolve(
        api_url_flag: Option<&str>,
        api_url_env: Option<&str>,
        timeout_flag: Option<u64>,
        timeout_env: Option<&str>,
    ) -> Result<Self> {
        let raw_url = api_url_flag
            .or(api_url_env)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_URL);
        let api_url = parse_base_url(raw_url)?;

        let timeout_secs = match timeout_flag {
            Some(secs) => secs,
            None => match timeout_env.map(str::trim).filter(|s| !s.is_empty()) {
                Some(raw) => raw
                    .parse::<u64>()
                    .with_context(|| format!("{} must be a number of seconds", ENV_TIMEOUT_SECS))?,
                None => DEFAULT_TIMEOUT_SECS,
            },
        };
        if timeout_secs == 0 {
            return Err(anyhow!("Timeout must be at least one second"));
        }

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Parse an http(s) base URL, normalizing it to end with a slash so endpoint
/// paths join beneath it.
fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw).with_context(|| format!("Invalid API URL: {}", raw))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!("API URL must use http or https: {}", raw));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
