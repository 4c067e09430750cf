/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Icinga2Error {
    /// A provider setting is missing or malformed.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// The API URL does not use the `https` scheme.
    #[error(
        "requests are only allowed to use the HTTPS protocol so that traffic remains encrypted (got scheme `{scheme}`)"
    )]
    InsecureTransport { scheme: String },
    /// The API URL path does not end in `/v1`.
    #[error("invalid API version {path} specified, only v1 is currently supported")]
    UnsupportedApiVersion { path: String },
    /// The initial connection failed, after any retries.
    #[error("connection failure: {0}")]
    Connection(#[from] ConnectError),
}

/// Malformed or missing provider settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The retry delay is neither a duration literal nor a whole number of seconds.
    #[error("invalid delay: {raw}")]
    InvalidDelay { raw: String },
    /// The retry delay parsed to a negative duration.
    #[error("delay cannot be negative: {raw}")]
    NegativeDelay { raw: String },
    /// The API URL could not be parsed.
    #[error("invalid API URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// A required setting was neither configured nor present in the environment.
    #[error("missing required setting `{field}` (set it explicitly or via {env})")]
    MissingSetting {
        field: &'static str,
        env: &'static str,
    },
    /// A setting read from the environment has the wrong type.
    #[error("invalid value `{value}` for setting `{field}`")]
    InvalidSetting { field: &'static str, value: String },
}

/// Failure reported by a [`Connector`](crate::Connector).
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// Network or request execution error from `reqwest`.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// The HTTP client could not be built from the connection settings.
    #[error("could not build HTTP client: {0}")]
    Client(reqwest::Error),
    /// The server rejected the configured credentials.
    #[error("authentication failed for user `{user}`")]
    Unauthorized { user: String },
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    Http { status: u16, body: String },
}
