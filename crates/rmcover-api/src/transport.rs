// Shared transport configuration for building reqwest::Client instances.
//
// The bridge adapter takes its timeout and user agent from here so the
// device timeout configured by the user is the one every request honours.

use std::time::Duration;

use crate::error::Error;

const USER_AGENT: &str = concat!("rmcover/", env!("CARGO_PKG_VERSION"));

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Transport)
    }

    /// The timeout in whole seconds, as reported in [`Error::Timeout`].
    pub fn timeout_secs(&self) -> u64 {
        self.timeout.as_secs()
    }
}
