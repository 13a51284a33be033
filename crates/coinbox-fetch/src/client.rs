//! HTTP client for the catalog and hourly history endpoints.

use coinbox_catalog::{CatalogError, InstrumentCatalog};
use coinbox_types::{Instrument, RawSample};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use crate::ChunkRequest;
use crate::url::{CATALOG_URL, HISTOHOUR_URL, histohour_url};

/// Configuration for the provider client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Instrument catalog endpoint.
    pub catalog_url: String,
    /// Hourly history endpoint.
    pub series_url: String,
    /// Currency prices are quoted in.
    pub quote_currency: String,
    /// Maximum samples the provider returns per call.
    pub max_limit: usize,
    /// Maximum concurrent chunk requests.
    pub concurrency: usize,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
    /// Optional provider API key.
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            catalog_url: CATALOG_URL.to_string(),
            series_url: HISTOHOUR_URL.to_string(),
            quote_currency: "EUR".to_string(),
            max_limit: 2000,
            concurrency: 8,
            timeout: Duration::from_secs(30),
            user_agent: format!("coinbox/{}", env!("CARGO_PKG_VERSION")),
            api_key: None,
        }
    }
}

/// Errors that can occur while fetching from the provider.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The response body is not the expected JSON shape.
    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// The provider answered with an error message instead of data.
    #[error("Provider error: {0}")]
    Provider(String),

    /// The catalog payload could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The whole fetch did not finish in time.
    #[error("Fetch timed out after {0:?}")]
    Timeout(Duration),
}

#[derive(Debug, Deserialize)]
struct SeriesPayload {
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Message", default)]
    message: Option<String>,
    #[serde(rename = "Data")]
    data: Option<SeriesData>,
}

#[derive(Debug, Deserialize)]
struct SeriesData {
    #[serde(rename = "Data", default)]
    data: Vec<RawSample>,
}

/// HTTP client with connection pooling for the provider API.
#[derive(Debug, Clone)]
pub struct HistoClient {
    client: Client,
    config: ClientConfig,
}

impl HistoClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_max_idle_per_host(config.concurrency)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .gzip(true)
            .build()?;
        Ok(Self { client, config })
    }

    /// Creates a client with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(ClientConfig::default())
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Downloads and normalizes the instrument catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the payload is malformed.
    pub async fn fetch_catalog(&self) -> Result<InstrumentCatalog, FetchError> {
        let body = self.get_text(&self.config.catalog_url).await?;
        Ok(InstrumentCatalog::from_json(&body)?)
    }

    /// Downloads one chunk of hourly samples, newest first.
    ///
    /// Samples outside the chunk's window are dropped, so the result holds at
    /// most `chunk.sample_limit` samples.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, provider
    /// error, or malformed payload. Failed requests are not retried.
    pub async fn download_chunk(
        &self,
        instrument: &Instrument,
        chunk: &ChunkRequest,
    ) -> Result<Vec<RawSample>, FetchError> {
        if chunk.sample_limit == 0 {
            return Ok(Vec::new());
        }

        let url = chunk_url(&self.config, instrument.symbol(), chunk);
        let body = self.get_text(&url).await?;
        let samples = decode_series(&body, chunk)?;

        if samples.len() < chunk.sample_limit {
            tracing::warn!(
                symbol = instrument.symbol(),
                requested = chunk.sample_limit,
                received = samples.len(),
                "provider returned a short chunk"
            );
        }
        Ok(samples)
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let mut request = self.client.get(url);
        if let Some(key) = &self.config.api_key {
            request = request.header("authorization", format!("Apikey {key}"));
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(FetchError::ServerError {
                status: response.status().as_u16(),
            });
        }
        Ok(response.text().await?)
    }
}

/// Builds the history URL for a non-empty chunk.
///
/// The provider answers `limit + 1` samples ending at `toTs` inclusive, so the
/// request asks for `sample_limit - 1` ending at the chunk's last hour.
fn chunk_url(config: &ClientConfig, symbol: &str, chunk: &ChunkRequest) -> String {
    histohour_url(
        &config.series_url,
        symbol,
        &config.quote_currency,
        chunk.sample_limit.saturating_sub(1),
        chunk.last_hour_ts(),
    )
}

/// Decodes a history payload into the chunk's samples, newest first.
fn decode_series(body: &str, chunk: &ChunkRequest) -> Result<Vec<RawSample>, FetchError> {
    let payload: SeriesPayload = serde_json::from_str(body)?;
    if payload.response.as_deref() == Some("Error") {
        return Err(FetchError::Provider(
            payload.message.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }
    let data = payload
        .data
        .ok_or_else(|| FetchError::Provider("response carries no data".to_string()))?;

    let mut samples: Vec<RawSample> = data
        .data
        .into_iter()
        .filter(|sample| sample.is_hour_aligned() && chunk.covers(sample.time))
        .collect();
    samples.sort_by(|a, b| b.time.cmp(&a.time));
    samples.dedup_by_key(|sample| sample.time);
    samples.truncate(chunk.sample_limit);
    Ok(samples)
}
