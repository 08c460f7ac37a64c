//! poller config

use std::time::Duration;

/// Value poller config.
///
/// Note there is deliberately no request timeout: a hung fetch only blocks
/// its own tick's result, never the next scheduled tick.
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// metrics endpoint url
    pub endpoint_url: String,
    /// opaque bearer credential, if any
    pub bearer_token: Option<String>,
    /// fixed poll period
    pub poll_interval: Duration,
}

impl PollerConfig {
    /// create new poller config with default parameters.
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            bearer_token: None,
            poll_interval: Duration::from_secs(30),
        }
    }

    /// set bearer credential.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// set poll period.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }
}
