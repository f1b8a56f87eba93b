use crate::error::TrackClimateError;
use crate::provider::config::ProviderConfig;
use crate::provider::error::ProviderError;
use crate::provider::request::ProviderRequest;
use log::{debug, warn};
use reqwest::{Client, Response, Url};
use std::future::Future;
use std::sync::Arc;

/// Source of raw provider responses.
///
/// [`NoaaClient`] is the HTTP implementation. Implementations must be usable from
/// several retrievals at once.
pub trait WeatherProvider: Send + Sync {
    /// Executes `request` and returns the response body.
    fn fetch(
        &self,
        request: &ProviderRequest,
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}

impl<P: WeatherProvider> WeatherProvider for &P {
    fn fetch(
        &self,
        request: &ProviderRequest,
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send {
        (**self).fetch(request)
    }
}

impl<P: WeatherProvider> WeatherProvider for Arc<P> {
    fn fetch(
        &self,
        request: &ProviderRequest,
    ) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send {
        (**self).fetch(request)
    }
}

/// HTTP client for the NOAA NCEI access services.
///
/// Requests that fail before being sent (connection refused, DNS failure, ...) are
/// attempted up to [`ProviderConfig::max_attempts`] times. A request that reached the
/// server is never replayed, whatever the outcome. The inner `reqwest::Client` is pooled
/// and cheap to share.
#[derive(Debug, Clone)]
pub struct NoaaClient {
    http: Client,
    config: ProviderConfig,
}

impl NoaaClient {
    pub fn new(config: ProviderConfig) -> Result<Self, ProviderError> {
        Url::parse(&config.base_url).map_err(|e| ProviderError::InvalidBaseUrl {
            url: config.base_url.clone(),
            reason: e.to_string(),
        })?;
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .gzip(true)
            .build()
            .map_err(ProviderError::ClientBuild)?;
        Ok(Self { http, config })
    }

    /// Client configured from the environment, see [`ProviderConfig::from_env`].
    pub fn from_env() -> Result<Self, TrackClimateError> {
        Ok(Self::new(ProviderConfig::from_env()?)?)
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// GETs `url` and returns its body.
    ///
    /// # Errors
    ///
    /// * [`ProviderError::Transport`] for network failures, after the retry budget is spent
    ///   on failures that happened before the request was sent.
    /// * [`ProviderError::HttpStatus`] for any non-2xx status, carrying the body if readable.
    pub async fn get(&self, url: Url) -> Result<Vec<u8>, ProviderError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!("GET {} (attempt {}/{})", url, attempt, max_attempts);
            match self.send(url.clone()).await {
                Ok(response) => return Self::read_body(url, attempt, response).await,
                // Connect errors mean nothing was transmitted, so retrying is safe.
                Err(e) if e.is_connect() && attempt < max_attempts => {
                    warn!(
                        "Could not reach {} (attempt {}/{}): {}",
                        url, attempt, max_attempts, e
                    );
                }
                Err(e) => {
                    return Err(ProviderError::Transport {
                        url: url.to_string(),
                        attempts: attempt,
                        source: e,
                    })
                }
            }
        }
    }

    async fn send(&self, url: Url) -> Result<Response, reqwest::Error> {
        let mut request = self.http.get(url);
        if let Some(token) = &self.config.token {
            request = request.header("token", token.as_str());
        }
        request.send().await
    }

    async fn read_body(url: Url, attempts: u32, response: Response) -> Result<Vec<u8>, ProviderError> {
        let status = response.status();
        if !status.is_success() {
            let reason = status
                .canonical_reason()
                .unwrap_or("Unknown status")
                .to_string();
            let body = response.text().await.ok();
            warn!("HTTP error for {}: {} {}", url, status.as_u16(), reason);
            return Err(ProviderError::HttpStatus {
                url: url.to_string(),
                status,
                reason,
                body,
            });
        }
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::Transport {
                url: url.to_string(),
                attempts,
                source: e,
            })?;
        Ok(bytes.to_vec())
    }
}

impl WeatherProvider for NoaaClient {
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<u8>, ProviderError> {
        let url = request.to_url(&self.config.base_url, self.config.result_limit)?;
        self.get(url).await
    }
}
