//! Runtime settings resolved from command-line flags and environment.

use std::{path::PathBuf, time::Duration};

use reqwest::Url;
use thiserror::Error;

use crate::cli::GlobalArgs;
use crate::infra::steamdt::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::util::persistence::default_data_dir;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no data directory available; pass --data-dir")]
    NoDataDir,
    #[error("invalid price API URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
    #[error("request timeout must be at least 1 second")]
    ZeroTimeout,
    #[error("price API key missing; set STEAMDT_API_KEY or pass --api-key")]
    MissingApiKey,
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub base_url: Url,
    pub api_key: Option<String>,
    pub concurrency: usize,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn from_args(args: &GlobalArgs) -> Result<Self, ConfigError> {
        let data_dir = match &args.data_dir {
            Some(dir) => dir.clone(),
            None => default_data_dir().ok_or(ConfigError::NoDataDir)?,
        };

        let raw_url = args.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(raw_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: raw_url.to_string(),
            source,
        })?;

        if args.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if args.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            data_dir,
            base_url,
            api_key: args
                .api_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
            concurrency: args.concurrency,
            request_timeout: Duration::from_secs(args.timeout_secs),
        })
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> GlobalArgs {
        GlobalArgs {
            data_dir: Some(PathBuf::from("/tmp/tradeup")),
            api_key: None,
            base_url: None,
            concurrency: 8,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }

    #[test]
    fn defaults_resolve() {
        let settings = Settings::from_args(&args()).unwrap();
        assert_eq!(settings.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(settings.request_timeout, DEFAULT_TIMEOUT);
        assert!(matches!(
            settings.require_api_key(),
            Err(ConfigError::MissingApiKey)
        ));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut input = args();
        input.api_key = Some("   ".into());
        assert!(Settings::from_args(&input).unwrap().api_key.is_none());

        input.api_key = Some(" secret ".into());
        let settings = Settings::from_args(&input).unwrap();
        assert_eq!(settings.require_api_key().unwrap(), "secret");
    }

    #[test]
    fn rejects_bad_url_and_zero_concurrency() {
        let mut input = args();
        input.base_url = Some("::nope".into());
        assert!(matches!(
            Settings::from_args(&input),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));

        let mut input = args();
        input.concurrency = 0;
        assert!(matches!(
            Settings::from_args(&input),
            Err(ConfigError::ZeroConcurrency)
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut input = args();
        input.timeout_secs = 0;
        assert!(matches!(
            Settings::from_args(&input),
            Err(ConfigError::ZeroTimeout)
        ));

        input.timeout_secs = 3;
        let settings = Settings::from_args(&input).unwrap();
        assert_eq!(settings.request_timeout, Duration::from_secs(3));
    }
}
