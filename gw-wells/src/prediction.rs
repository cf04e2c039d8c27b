//! Client for the remote groundwater prediction API.
//!
//! The service exposes `POST /predict` taking `{latitude, longitude, date}`
//! and answering `{prediction, confidence?, units?}`, plus `GET /health`.
//! The client holds an ordered list of candidate base URLs and falls back
//! to the next one when an endpoint keeps failing.

use crate::{
    error::{Result, WellsError},
    history::PredictionRecord,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "api")]
use log::{info, warn};
#[cfg(feature = "api")]
use reqwest::Client;
#[cfg(feature = "api")]
use std::time::Duration;

/// Candidate base URLs tried in order when none are configured:
/// local host, loopback, and the host as seen from an Android emulator.
pub const DEFAULT_ENDPOINTS: [&str; 3] = [
    "http://localhost:8000",
    "http://127.0.0.1:8000",
    "http://10.0.2.2:8000",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub endpoints: Vec<String>,
    pub timeout_secs: u64,
    /// Attempts per endpoint before moving on to the next one.
    pub max_tries: u32,
    /// Delay before the first retry; doubled after each failed attempt.
    pub retry_delay_ms: u64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        PredictionConfig {
            endpoints: DEFAULT_ENDPOINTS.iter().map(|e| e.to_string()).collect(),
            timeout_secs: 10,
            max_tries: 3,
            retry_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// "YYYY-MM-DD"
    pub date: String,
}

impl PredictionRequest {
    pub fn new(latitude: f64, longitude: f64, date: &str) -> Self {
        PredictionRequest {
            latitude,
            longitude,
            date: date.to_string(),
        }
    }

    /// Reject requests the service would refuse anyway.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(WellsError::InvalidRequest(format!(
                "latitude must be between -90 and 90, got {}",
                self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(WellsError::InvalidRequest(format!(
                "longitude must be between -180 and 180, got {}",
                self.longitude
            )));
        }
        if gw_utils::dates::parse_date(&self.date).is_err() {
            return Err(WellsError::InvalidRequest(format!(
                "date must be in YYYY-MM-DD format, got {:?}",
                self.date
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Predicted depth to water level.
    pub prediction: f64,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub units: Option<String>,
}

impl PredictionResponse {
    /// Pair the response with its request for the history log.
    pub fn to_record(
        &self,
        request: &PredictionRequest,
        requested_at: DateTime<Utc>,
    ) -> PredictionRecord {
        PredictionRecord {
            latitude: request.latitude,
            longitude: request.longitude,
            date: request.date.clone(),
            prediction: self.prediction,
            confidence: self.confidence,
            units: self.units.clone(),
            requested_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub model_loaded: Option<bool>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

#[cfg(feature = "api")]
#[derive(Debug, Clone)]
pub struct PredictionClient {
    client: Client,
    config: PredictionConfig,
}

#[cfg(feature = "api")]
impl PredictionClient {
    pub fn new(config: PredictionConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(PredictionClient { client, config })
    }

    pub fn endpoints(&self) -> &[String] {
        &self.config.endpoints
    }

    /// Request a prediction, trying each endpoint in order.
    pub async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResponse> {
        request.validate()?;
        if self.config.endpoints.is_empty() {
            return Err(WellsError::NoEndpoints);
        }
        for endpoint in &self.config.endpoints {
            if let Some(response) = self.predict_at(endpoint, request).await {
                info!(
                    "Prediction from {}: {:.2} for ({}, {}) on {}",
                    endpoint, response.prediction, request.latitude, request.longitude, request.date
                );
                return Ok(response);
            }
            warn!("Falling back from prediction endpoint {}", endpoint);
        }
        Err(WellsError::AllEndpointsFailed {
            tried: self.config.endpoints.len(),
        })
    }

    /// Retry one endpoint with exponential backoff.
    async fn predict_at(
        &self,
        endpoint: &str,
        request: &PredictionRequest,
    ) -> Option<PredictionResponse> {
        let max_tries = self.config.max_tries.max(1);
        let mut sleep_millis = self.config.retry_delay_ms;
        let url = format!("{}/predict", endpoint.trim_end_matches('/'));

        for attempt in 1..=max_tries {
            match self.client.post(&url).json(request).send().await {
                Ok(response) => {
                    if !response.status().is_success() {
                        warn!(
                            "Attempt {}/{}: Bad response status from {}: {}",
                            attempt,
                            max_tries,
                            endpoint,
                            response.status()
                        );
                    } else {
                        match response.json::<PredictionResponse>().await {
                            Ok(prediction) => return Some(prediction),
                            Err(e) => {
                                warn!(
                                    "Attempt {}/{}: Failed to parse response from {}: {}",
                                    attempt, max_tries, endpoint, e
                                );
                            }
                        }
                    }
                }
                Err(e) => {
                    warn!(
                        "Attempt {}/{}: Request to {} failed: {}",
                        attempt, max_tries, endpoint, e
                    );
                }
            }

            if attempt < max_tries {
                info!(
                    "Sleeping for {} milliseconds before retrying {}",
                    sleep_millis, endpoint
                );
                tokio::time::sleep(Duration::from_millis(sleep_millis)).await;
                sleep_millis *= 2;
            }
        }
        None
    }

    /// Query `GET /health` on one endpoint.
    pub async fn health(&self, endpoint: &str) -> Result<HealthStatus> {
        let url = format!("{}/health", endpoint.trim_end_matches('/'));
        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(WellsError::BadStatus {
                endpoint: endpoint.to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(response.json::<HealthStatus>().await?)
    }

    /// The first configured endpoint that reports itself healthy.
    pub async fn first_healthy_endpoint(&self) -> Option<String> {
        for endpoint in &self.config.endpoints {
            match self.health(endpoint).await {
                Ok(status) if status.is_healthy() => return Some(endpoint.clone()),
                Ok(status) => warn!("{} reports status {:?}", endpoint, status.status),
                Err(e) => warn!("Health check of {} failed: {}", endpoint, e),
            }
        }
        None
    }
}
