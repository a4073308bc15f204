//! HTTP delivery of readings to the ingestion API.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use weather_relay_core::Reading;

/// A single delivery attempt that did not succeed.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// The endpoint answered outside [200, 300). The response body is
    /// captured for diagnostics when available.
    #[error("endpoint returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The request never completed (connection refused, DNS failure,
    /// timeout).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Destination for validated readings.
///
/// Implementations make exactly one delivery attempt per call; retry is the
/// caller's concern.
#[async_trait]
pub trait ReadingSink: Send + Sync {
    async fn deliver(&self, reading: &Reading) -> Result<(), DeliveryError>;
}

/// Sink posting readings as JSON to `<base>/weather/logs`.
pub struct WeatherApiClient {
    http: Client,
    logs_url: String,
}

impl WeatherApiClient {
    /// Build a client bounded by `request_timeout` per call.
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, DeliveryError> {
        let http = Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            http,
            logs_url: format!("{}/weather/logs", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl ReadingSink for WeatherApiClient {
    async fn deliver(&self, reading: &Reading) -> Result<(), DeliveryError> {
        debug!(
            location = %reading.location,
            timestamp = %reading.timestamp,
            feels_like = reading.feels_like,
            "posting reading"
        );

        let response = self.http.post(&self.logs_url).json(reading).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
#[path = "api_client_tests.rs"]
mod tests;
