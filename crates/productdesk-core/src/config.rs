//! Configuration module
//!
//! Client-side settings: where the API lives, how to authenticate, and how
//! long a single remote write may stay pending.

use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_GRAPHQL_PATH: &str = "/graphql";
const DEFAULT_HOME_PATH: &str = "/";
const HTTP_TIMEOUT_SECS: u64 = 60;
const SUBMIT_TIMEOUT_SECS: u64 = 30;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub graphql_path: String,
    /// Sent as `Authorization: Bearer {token}` when present.
    pub api_token: Option<String>,
    pub http_timeout: Duration,
    /// Upper bound on a single create/update/delete. `None` waits forever.
    pub submit_timeout: Option<Duration>,
    pub home_path: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            graphql_path: DEFAULT_GRAPHQL_PATH.to_string(),
            api_token: None,
            http_timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            submit_timeout: Some(Duration::from_secs(SUBMIT_TIMEOUT_SECS)),
            home_path: DEFAULT_HOME_PATH.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load from environment: PRODUCTDESK_API_URL (or API_URL), PRODUCTDESK_GRAPHQL_PATH,
    /// PRODUCTDESK_API_TOKEN, PRODUCTDESK_HTTP_TIMEOUT_SECS, PRODUCTDESK_SUBMIT_TIMEOUT_SECS
    /// (0 disables the bound) and PRODUCTDESK_HOME_PATH.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let defaults = Self::default();

        let api_url = env::var("PRODUCTDESK_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or(defaults.api_url);

        let graphql_path =
            env::var("PRODUCTDESK_GRAPHQL_PATH").unwrap_or(defaults.graphql_path);
        if !graphql_path.starts_with('/') {
            return Err(anyhow::anyhow!(
                "PRODUCTDESK_GRAPHQL_PATH must start with '/', got {}",
                graphql_path
            ));
        }

        let api_token = env::var("PRODUCTDESK_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let http_timeout = Duration::from_secs(parse_secs(
            "PRODUCTDESK_HTTP_TIMEOUT_SECS",
            HTTP_TIMEOUT_SECS,
        )?);

        let submit_timeout =
            match parse_secs("PRODUCTDESK_SUBMIT_TIMEOUT_SECS", SUBMIT_TIMEOUT_SECS)? {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            };

        let home_path = env::var("PRODUCTDESK_HOME_PATH").unwrap_or(defaults.home_path);

        Ok(Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            graphql_path,
            api_token,
            http_timeout,
            submit_timeout,
            home_path,
        })
    }

    pub fn graphql_url(&self) -> String {
        format!("{}{}", self.api_url, self.graphql_path)
    }
}

fn parse_secs(key: &str, default: u64) -> Result<u64, anyhow::Error> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {} ({})", key, raw, e)),
        Err(_) => Ok(default),
    }
}
