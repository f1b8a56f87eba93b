//! Settings for talking to the NOAA access services.

use crate::error::TrackClimateError;
use bon::Builder;
use std::time::Duration;

/// Base URL of the NOAA NCEI access services.
pub const NOAA_BASE_URL: &str = "https://www.ncei.noaa.gov/access/services/";

/// Environment variable holding the NOAA API token.
pub const TOKEN_ENV: &str = "NOAA_TOKEN";
/// Environment variable overriding [`NOAA_BASE_URL`].
pub const BASE_URL_ENV: &str = "NOAA_BASE_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "NOAA_TIMEOUT_SECS";

/// Configuration of a [`crate::NoaaClient`].
///
/// # Examples
///
/// ```
/// use track_climate::ProviderConfig;
/// use std::time::Duration;
///
/// let config = ProviderConfig::builder()
///     .token("my-token")
///     .timeout(Duration::from_secs(10))
///     .build();
/// assert_eq!(config.max_attempts, 3);
/// assert_eq!(config.result_limit, 1000);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ProviderConfig {
    /// Base URL every endpoint path is joined to. Should end with `/`.
    #[builder(into, default = NOAA_BASE_URL.to_string())]
    pub base_url: String,
    /// API token, sent as the `token` header when present.
    #[builder(into)]
    pub token: Option<String>,
    /// Attempts for a request that could not be sent. Sent requests are never replayed.
    #[builder(default = 3)]
    pub max_attempts: u32,
    #[builder(default = Duration::from_secs(30))]
    pub timeout: Duration,
    /// Value of the `limit` query parameter.
    #[builder(default = 1000)]
    pub result_limit: u32,
    #[builder(into, default = concat!("track_climate/", env!("CARGO_PKG_VERSION")).to_string())]
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ProviderConfig {
    /// Reads the configuration from `NOAA_TOKEN` (required), `NOAA_BASE_URL` and
    /// `NOAA_TIMEOUT_SECS` (optional).
    ///
    /// # Errors
    ///
    /// Returns [`TrackClimateError::MissingConfig`] if the token is unset or blank, and
    /// [`TrackClimateError::InvalidConfig`] if the timeout is not a whole number of seconds.
    pub fn from_env() -> Result<Self, TrackClimateError> {
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(TrackClimateError::MissingConfig(TOKEN_ENV))?;

        let timeout = match std::env::var(TIMEOUT_ENV) {
            Ok(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|_| {
                    TrackClimateError::InvalidConfig {
                        key: TIMEOUT_ENV,
                        value: raw.clone(),
                    }
                })?;
                Some(Duration::from_secs(secs))
            }
            Err(_) => None,
        };

        Ok(Self::builder()
            .token(token)
            .maybe_base_url(std::env::var(BASE_URL_ENV).ok())
            .maybe_timeout(timeout)
            .build())
    }
}
