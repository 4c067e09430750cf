use url::Url;

use crate::{ConfigError, Icinga2Error, Result};

/// Suffix every API URL path must end with.
pub const API_VERSION_SUFFIX: &str = "/v1";

/// Checks that `raw` is an `https` URL pointing at the v1 API.
///
/// Example of a valid value: `https://127.0.0.1:5665/v1`.
pub fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl {
        url: raw.to_owned(),
        source,
    })?;

    if url.scheme() != "https" {
        return Err(Icinga2Error::InsecureTransport {
            scheme: url.scheme().to_owned(),
        });
    }

    if !url.path().ends_with(API_VERSION_SUFFIX) {
        return Err(Icinga2Error::UnsupportedApiVersion {
            path: url.path().to_owned(),
        });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::validate_url;
    use crate::{ConfigError, Icinga2Error};

    #[test]
    fn accepts_https_v1_url() {
        let url = validate_url("https://host:4665/v1").expect("url must be valid");
        assert_eq!(url.port(), Some(4665));
    }

    #[test]
    fn accepts_prefixed_v1_path() {
        assert!(validate_url("https://monitoring.example.com/icinga/v1").is_ok());
    }

    #[test]
    fn rejects_plain_http() {
        match validate_url("http://host/v1") {
            Err(Icinga2Error::InsecureTransport { scheme }) => assert_eq!(scheme, "http"),
            other => panic!("expected insecure transport error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_other_api_versions() {
        match validate_url("https://host/v2") {
            Err(Icinga2Error::UnsupportedApiVersion { path }) => assert_eq!(path, "/v2"),
            other => panic!("expected unsupported version error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_trailing_slash_after_version() {
        assert!(matches!(
            validate_url("https://host/v1/"),
            Err(Icinga2Error::UnsupportedApiVersion { .. })
        ));
    }

    #[test]
    fn rejects_malformed_url() {
        match validate_url("not a url") {
            Err(Icinga2Error::InvalidConfiguration(ConfigError::InvalidUrl { url, .. })) => {
                assert_eq!(url, "not a url")
            }
            other => panic!("expected invalid url error, got {other:?}"),
        }
    }

    #[test]
    fn scheme_is_checked_before_path() {
        assert!(matches!(
            validate_url("ftp://host/v2"),
            Err(Icinga2Error::InsecureTransport { .. })
        ));
    }

    #[test]
    fn messages_are_actionable() {
        let err = validate_url("https://host/v2").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid API version /v2 specified, only v1 is currently supported"
        );
    }
}
