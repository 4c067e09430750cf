use std::fmt;
use std::time::Duration;

use reqwest::{header, Method, RequestBuilder, StatusCode};
use tokio::time::sleep;
use url::Url;

use crate::{ConnectError, ConnectionConfig, Connector, RetryPolicy};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
/// Authenticated session with an Icinga2 API.
///
/// Returned by a [`Connector`] once the initial connection succeeded. The
/// resource layer issues all further requests through [`Icinga2Client::request`].
pub struct Icinga2Client {
    http: reqwest::Client,
    base_url: Url,
    user: String,
    password: String,
    insecure_skip_tls_verify: bool,
    retry_policy: RetryPolicy,
}

impl fmt::Debug for Icinga2Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icinga2Client")
            .field("base_url", &self.base_url.as_str())
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("insecure_skip_tls_verify", &self.insecure_skip_tls_verify)
            .field("retry_policy", &self.retry_policy)
            .finish()
    }
}

impl Icinga2Client {
    /// Builds a session from `config` without contacting the server.
    pub fn new(config: ConnectionConfig) -> Result<Self, ConnectError> {
        Self::with_timeout(config, DEFAULT_TIMEOUT)
    }

    /// Like [`Icinga2Client::new`], with a custom per-request timeout.
    pub fn with_timeout(config: ConnectionConfig, timeout: Duration) -> Result<Self, ConnectError> {
        let retry_policy = config.retry_policy();
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(config.insecure_skip_tls_verify)
            .build()
            .map_err(ConnectError::Client)?;

        Ok(Self {
            http,
            base_url: config.url,
            user: config.user,
            password: config.password,
            insecure_skip_tls_verify: config.insecure_skip_tls_verify,
            retry_policy,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn insecure_skip_tls_verify(&self) -> bool {
        self.insecure_skip_tls_verify
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry_policy
    }

    /// Resolves `path` (e.g. `"objects/hosts"`) below the API base URL.
    ///
    /// An empty path yields the base URL itself.
    pub fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url
    }

    /// Starts an authenticated JSON request against `path`.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.endpoint(path))
            .basic_auth(&self.user, Some(&self.password))
            .header(header::ACCEPT, "application/json")
    }

    /// Issues `GET` against the base URL until it succeeds or the retry
    /// policy is exhausted.
    pub async fn probe(&self) -> Result<(), ConnectError> {
        let mut attempt = 0u32;
        loop {
            let response = self.request(Method::GET, "").send().await;

            match response {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        return Ok(());
                    }
                    if status == StatusCode::UNAUTHORIZED {
                        return Err(ConnectError::Unauthorized {
                            user: self.user.clone(),
                        });
                    }

                    let body = response.text().await.map_err(ConnectError::Transport)?;
                    if should_retry_status(status) && attempt < self.retry_policy.retries {
                        self.wait_before_retry(attempt).await;
                        attempt += 1;
                        continue;
                    }

                    return Err(ConnectError::Http {
                        status: status.as_u16(),
                        body,
                    });
                }
                Err(err) => {
                    if should_retry_transport(&err) && attempt < self.retry_policy.retries {
                        self.wait_before_retry(attempt).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(ConnectError::Transport(err));
                }
            }
        }
    }

    async fn wait_before_retry(&self, attempt: u32) {
        let delay = self.retry_policy.delay;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            attempt = attempt + 1,
            retries = self.retry_policy.retries,
            "retrying connection to {} after {:?}",
            self.base_url,
            delay
        );
        #[cfg(not(feature = "tracing"))]
        let _ = attempt;

        if !delay.is_zero() {
            sleep(delay).await;
        }
    }
}

/// `503` is what Icinga2 answers while it reloads its configuration.
fn should_retry_status(status: StatusCode) -> bool {
    status == StatusCode::SERVICE_UNAVAILABLE
}

fn should_retry_transport(err: &reqwest::Error) -> bool {
    err.is_timeout() || err.is_connect() || err.is_request() || err.is_body()
}

/// Connects over HTTPS with `reqwest`, retrying transient failures.
#[derive(Clone, Debug)]
pub struct HttpConnector {
    timeout: Duration,
}

impl Default for HttpConnector {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl HttpConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-request timeout of the client handed out on success.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Connector for HttpConnector {
    async fn connect(&self, config: ConnectionConfig) -> Result<Icinga2Client, ConnectError> {
        let client = Icinga2Client::with_timeout(config, self.timeout)?;
        client.probe().await?;

        #[cfg(feature = "tracing")]
        tracing::debug!("connected to {} as {}", client.base_url, client.user);

        Ok(client)
    }
}
