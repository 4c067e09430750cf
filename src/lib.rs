//! `icinga2-provider` validates provider settings for an Icinga2 HTTP API and
//! opens the initial authenticated session.
//!
//! The entry points are:
//! - [`ProviderSettings::resolve`] / [`RawProviderConfig::from_env`] to gather settings
//! - [`configure`] to validate them and connect through a [`Connector`]
//! - [`HttpConnector`], the default `reqwest`-based connector

mod client;
mod config;
mod connector;
mod delay;
mod endpoint;
mod error;
mod options;
mod provider;
pub mod schema;
mod settings;

pub use client::{HttpConnector, Icinga2Client, DEFAULT_TIMEOUT};
pub use config::ConnectionConfig;
pub use connector::Connector;
pub use delay::parse_delay;
pub use endpoint::{validate_url, API_VERSION_SUFFIX};
pub use error::{ConfigError, ConnectError, Icinga2Error};
pub use options::{RetryPolicy, UrlCheck};
pub use provider::{configure, configure_with};
pub use settings::{ProviderSettings, RawProviderConfig};

pub type Result<T> = std::result::Result<T, Icinga2Error>;
