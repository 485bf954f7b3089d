//! Client and validator configuration.
//!
//! Configuration is read once, usually from the environment, and then passed
//! explicitly to [`EurowalletClient`](crate::rest::EurowalletClient) and
//! [`Validator`](crate::server::Validator).

use std::time::Duration;

use thiserror::Error;

use crate::auth::Credentials;
use crate::rest::GLOBITEX_BASE_URL;

/// Default connect and request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Default environment variable prefix.
pub const DEFAULT_ENV_PREFIX: &str = "GLOBITEX";

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A mandatory environment variable is not set
    #[error("environment variable {0} has to be specified")]
    Missing(String),

    /// The timeout is not a whole number of milliseconds
    #[error("environment variable {var} must be a number of milliseconds, got {value:?}")]
    InvalidTimeout {
        /// Variable name
        var: String,
        /// Rejected value
        value: String,
    },

    /// The host is not a valid URL
    #[error("invalid host URL: {0}")]
    InvalidHost(#[from] url::ParseError),
}

/// Immutable settings shared by the client and the validator.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the API, without a trailing slash
    pub host: String,
    /// API key and signing secrets
    pub credentials: Credentials,
    /// Connect and overall request timeout
    pub timeout: Duration,
    /// Path prefix placed in front of every API path in the URL but left out of signatures
    pub url_prefix: String,
}

impl Config {
    /// Create a configuration with the default timeout and no URL prefix.
    pub fn new(host: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            host: normalize_host(host.into()),
            credentials,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            url_prefix: String::new(),
        }
    }

    /// Read configuration from `GLOBITEX_*` environment variables.
    ///
    /// See [`Config::from_env_with_prefix`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_prefix(DEFAULT_ENV_PREFIX)
    }

    /// Read configuration from environment variables named `{prefix}_*`.
    ///
    /// | Variable | Required | Default |
    /// |---|---|---|
    /// | `{prefix}_HOST` | no | `https://api.globitex.com` |
    /// | `{prefix}_API_KEY` | yes | |
    /// | `{prefix}_MESSAGE_SECRET` | yes | |
    /// | `{prefix}_TRANSACTION_SECRET` | yes | |
    /// | `{prefix}_CONNECT_TIMEOUT` | no | `10000` (milliseconds) |
    /// | `{prefix}_URL_PREFIX` | no | empty |
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_lookup(prefix, |name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(prefix: &str, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| format!("{prefix}_{suffix}");
        let required = |suffix: &str| {
            let name = var(suffix);
            lookup(&name).ok_or(ConfigError::Missing(name))
        };

        let host = lookup(&var("HOST")).unwrap_or_else(|| GLOBITEX_BASE_URL.to_string());
        url::Url::parse(&host)?;

        let credentials = Credentials::new(
            required("API_KEY")?,
            required("MESSAGE_SECRET")?,
            required("TRANSACTION_SECRET")?,
        );

        let timeout_var = var("CONNECT_TIMEOUT");
        let timeout_ms = match lookup(&timeout_var) {
            Some(value) => value
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout {
                    var: timeout_var,
                    value,
                })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        Ok(Self {
            host: normalize_host(host),
            credentials,
            timeout: Duration::from_millis(timeout_ms),
            url_prefix: lookup(&var("URL_PREFIX")).unwrap_or_default(),
        })
    }

    /// Set the timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the URL prefix.
    pub fn with_url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }
}

fn normalize_host(host: String) -> String {
    host.trim_end_matches('/').to_string()
}
