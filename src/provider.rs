use crate::{
    delay::parse_delay, endpoint::validate_url, ConnectionConfig, Connector, Icinga2Client,
    RawProviderConfig, Result, UrlCheck,
};

/// Validates `raw` and opens the initial session through `connector`.
///
/// Uses [`UrlCheck::Strict`]: an invalid delay or API URL is reported
/// without `connector` ever being called.
pub async fn configure<C>(raw: &RawProviderConfig, connector: &C) -> Result<Icinga2Client>
where
    C: Connector,
{
    configure_with(raw, connector, UrlCheck::Strict).await
}

/// Like [`configure`], with an explicit URL check ordering.
pub async fn configure_with<C>(
    raw: &RawProviderConfig,
    connector: &C,
    url_check: UrlCheck,
) -> Result<Icinga2Client>
where
    C: Connector,
{
    let retry_delay = parse_delay(&raw.retry_delay)?;

    let validated = validate_url(&raw.api_url);
    let url = match (validated, url_check) {
        (Ok(url), _) => url,
        (Err(err), UrlCheck::Strict) => return Err(err),
        (Err(err), UrlCheck::Deferred) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("deferring API URL rejection until after connecting: {err}");

            // Still connect when the string parses at all; a connection
            // failure is reported in preference to the URL error.
            if let Ok(url) = url::Url::parse(&raw.api_url) {
                connector
                    .connect(connection_config(raw, url, retry_delay))
                    .await?;
            }
            return Err(err);
        }
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        retries = raw.retries,
        "connecting to {url} as {} (retry delay {retry_delay:?})",
        raw.api_user
    );

    let client = connector
        .connect(connection_config(raw, url, retry_delay))
        .await?;
    Ok(client)
}

fn connection_config(
    raw: &RawProviderConfig,
    url: url::Url,
    retry_delay: std::time::Duration,
) -> ConnectionConfig {
    ConnectionConfig {
        user: raw.api_user.clone(),
        password: raw.api_password.clone(),
        url,
        insecure_skip_tls_verify: raw.insecure_skip_tls_verify,
        retries: raw.retries,
        retry_delay,
    }
}
