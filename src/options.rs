use std::time::Duration;

/// Configures how often and how far apart connection attempts are made.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Number of retries after the initial attempt.
    pub retries: u32,
    /// Fixed delay before each retry.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Total number of attempts, counting the initial one.
    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

/// Controls when a rejected API URL stops configuration.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum UrlCheck {
    /// Reject the URL before any connection is attempted.
    #[default]
    Strict,
    /// Attempt the connection first and report the URL error only if the
    /// connection itself succeeds. A connection failure takes precedence.
    Deferred,
}
