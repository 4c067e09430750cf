use std::fmt;
use std::time::Duration;

use url::Url;

use crate::RetryPolicy;

/// Validated settings handed to a [`Connector`](crate::Connector).
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub user: String,
    pub password: String,
    pub url: Url,
    pub insecure_skip_tls_verify: bool,
    pub retries: u32,
    pub retry_delay: Duration,
}

impl ConnectionConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.retries,
            delay: self.retry_delay,
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("url", &self.url.as_str())
            .field("insecure_skip_tls_verify", &self.insecure_skip_tls_verify)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}
