use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://6nh44dlchh.execute-api.us-east-1.amazonaws.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// Runtime configuration, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub request_timeout: Duration,
    pub page_size: u32,
    /// Where the session id and theme are persisted
    pub state_file: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source; unset keys take their defaults,
    /// set but invalid ones are errors.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base = get("PROPERTY_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = Url::parse(&base)
            .with_context(|| format!("PROPERTY_API_BASE_URL is not a valid url: {}", base))?;

        let request_timeout = match get("PROPERTY_API_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(
                raw.parse()
                    .with_context(|| format!("PROPERTY_API_TIMEOUT_SECS must be a number: {}", raw))?,
            ),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let page_size = match get("PROPERTY_PAGE_SIZE") {
            Some(raw) => {
                let size: u32 = raw
                    .parse()
                    .with_context(|| format!("PROPERTY_PAGE_SIZE must be a number: {}", raw))?;
                anyhow::ensure!(size > 0, "PROPERTY_PAGE_SIZE must be positive");
                size
            }
            None => DEFAULT_PAGE_SIZE,
        };

        let state_file = get("PROPERTY_STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_state_file);

        Ok(Self {
            api_base_url,
            request_timeout,
            page_size,
            state_file,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_BASE_URL).expect("default base url is valid"),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            state_file: default_state_file(),
        }
    }
}

fn default_state_file() -> PathBuf {
    ProjectDirs::from("", "", "property-browser")
        .map(|dirs| dirs.data_dir().join("state.json"))
        .unwrap_or_else(|| PathBuf::from(".property-browser.json"))
}
