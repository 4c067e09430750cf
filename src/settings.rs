use serde::Deserialize;

use crate::{
    schema::{self, FieldSchema},
    ConfigError, Result,
};

/// Provider settings as given explicitly by the user.
///
/// Unset fields fall back to their `ICINGA2_*` environment variable and then
/// to the defaults listed in [`schema::FIELDS`]. A blank required field counts
/// as unset.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProviderSettings {
    pub api_url: Option<String>,
    pub api_user: Option<String>,
    pub api_password: Option<String>,
    pub insecure_skip_tls_verify: Option<bool>,
    pub retries: Option<u32>,
    pub retry_delay: Option<String>,
}

/// Fully resolved provider settings, before validation.
#[derive(Clone, PartialEq, Eq)]
pub struct RawProviderConfig {
    pub api_url: String,
    pub api_user: String,
    pub api_password: String,
    pub insecure_skip_tls_verify: bool,
    pub retries: u32,
    /// Empty, a duration literal, or a whole number of seconds.
    pub retry_delay: String,
}

impl std::fmt::Debug for RawProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawProviderConfig")
            .field("api_url", &self.api_url)
            .field("api_user", &self.api_user)
            .field("api_password", &"<redacted>")
            .field("insecure_skip_tls_verify", &self.insecure_skip_tls_verify)
            .field("retries", &self.retries)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

impl RawProviderConfig {
    /// Builds a configuration purely from `ICINGA2_*` environment variables.
    pub fn from_env() -> Result<Self> {
        ProviderSettings::default().resolve_from_env()
    }
}

impl ProviderSettings {
    /// Resolves missing fields from the process environment.
    pub fn resolve_from_env(self) -> Result<RawProviderConfig> {
        self.resolve(|key| std::env::var(key).ok())
    }

    /// Resolves missing fields through `env`, which maps a variable name to
    /// its value.
    pub fn resolve<F>(self, env: F) -> Result<RawProviderConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = required(self.api_url, &schema::API_URL, &env)?;
        let api_user = required(self.api_user, &schema::API_USER, &env)?;
        let api_password = required(self.api_password, &schema::API_PASSWORD, &env)?;

        // Only the literal "true" enables it.
        let insecure_skip_tls_verify = match self.insecure_skip_tls_verify {
            Some(value) => value,
            None => env(schema::INSECURE_SKIP_TLS_VERIFY.env).as_deref() == Some("true"),
        };

        let retries = match self.retries {
            Some(value) => value,
            None => match env(schema::RETRIES.env) {
                Some(value) if !value.trim().is_empty() => {
                    value
                        .trim()
                        .parse::<u32>()
                        .map_err(|_| ConfigError::InvalidSetting {
                            field: schema::RETRIES.name,
                            value,
                        })?
                }
                _ => 0,
            },
        };

        let retry_delay = self
            .retry_delay
            .or_else(|| env(schema::RETRY_DELAY.env))
            .unwrap_or_else(|| schema::RETRY_DELAY.default.unwrap_or_default().to_owned());

        Ok(RawProviderConfig {
            api_url,
            api_user,
            api_password,
            insecure_skip_tls_verify,
            retries,
            retry_delay,
        })
    }
}

fn required<F>(explicit: Option<String>, field: &FieldSchema, env: &F) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    let present = |value: &String| !value.trim().is_empty();
    explicit
        .filter(present)
        .or_else(|| env(field.env).filter(present))
        .ok_or_else(|| {
            ConfigError::MissingSetting {
                field: field.name,
                env: field.env,
            }
            .into()
        })
}
