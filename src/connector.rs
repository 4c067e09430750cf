use std::future::Future;

use crate::{ConnectError, ConnectionConfig, Icinga2Client};

/// Establishes the initial session with an Icinga2 API.
///
/// Implementations own the retry loop: they may make up to
/// `config.retries + 1` attempts spaced by `config.retry_delay` before giving
/// up.
pub trait Connector {
    fn connect(
        &self,
        config: ConnectionConfig,
    ) -> impl Future<Output = Result<Icinga2Client, ConnectError>> + Send;
}
