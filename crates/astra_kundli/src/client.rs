use async_trait::async_trait;
use chrono::{Datelike, Timelike};
use reqwest::Client;
use serde::Serialize;
use astra_core::{AstrologySource, BirthDetails, Error, Result, ServiceConfig};
use std::fmt;

pub(crate) const SERVICE: &str = "astrology";

#[derive(Debug, Serialize, PartialEq)]
pub struct ChartRequest {
    pub day: u32,
    pub month: u32,
    pub year: i32,
    pub hour: u32,
    pub min: u32,
    pub lat: f64,
    pub lon: f64,
    pub tzone: f64,
}

impl From<&BirthDetails> for ChartRequest {
    fn from(details: &BirthDetails) -> Self {
        Self {
            day: details.date.day(),
            month: details.date.month(),
            year: details.date.year(),
            hour: details.time.hour(),
            min: details.time.minute(),
            lat: details.latitude,
            lon: details.longitude,
            tzone: details.timezone,
        }
    }
}

/// Client for the astrologyapi.com `kundli` endpoint.
pub struct AstrologyApiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl AstrologyApiClient {
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let api_key = config.require_api_key("Astrology")?.to_string();
        Ok(Self {
            client: config.http_client()?,
            api_key,
            endpoint: config.endpoint("kundli"),
        })
    }
}

impl fmt::Debug for AstrologyApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AstrologyApiClient")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[async_trait]
impl AstrologySource for AstrologyApiClient {
    async fn fetch_chart(&self, details: &BirthDetails) -> Result<serde_json::Value> {
        let request = ChartRequest::from(details);
        tracing::info!("🔭 Fetching chart for {} {}", details.date, details.location);

        // The key is sent as-is; astrologyapi.com expects it pre-encoded.
        let response = self.client
            .post(&self.endpoint)
            .header("Authorization", format!("Basic {}", self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::from_reqwest(SERVICE, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Chart request failed: {}", body);
            return Err(Error::UpstreamStatus {
                service: SERVICE,
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::from_reqwest(SERVICE, e))?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("malformed chart response: {}", e)))
    }
}
