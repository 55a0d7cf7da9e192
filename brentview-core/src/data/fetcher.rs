//! DatasetFetcher: one fetch cycle retrieves all three datasets.
//!
//! The price series, the event list and the change-point summary are
//! requested concurrently and joined; the cycle either yields a complete
//! [`ViewSnapshot`] or fails as a whole.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;

use super::http::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::config::DashboardConfig;
use crate::domain::{ChangepointSummary, DateRange, EventRecord, PricePoint, ViewSnapshot};

/// The API resources the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Prices,
    Events,
    Changepoint,
    Health,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Prices => "/api/prices",
            Endpoint::Events => "/api/events",
            Endpoint::Changepoint => "/api/changepoint",
            Endpoint::Health => "/api/health",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Why a fetch cycle failed. Any one endpoint failing fails the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("{endpoint}: {message}")]
    Transport { endpoint: Endpoint, message: String },

    #[error("{endpoint}: HTTP {status}")]
    Status { endpoint: Endpoint, status: u16 },

    #[error("{endpoint}: malformed payload: {message}")]
    Decode { endpoint: Endpoint, message: String },

    #[error("{endpoint}: unexpected health status '{status}'")]
    Unhealthy { endpoint: Endpoint, status: String },
}

impl FetchError {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            FetchError::Transport { endpoint, .. }
            | FetchError::Status { endpoint, .. }
            | FetchError::Decode { endpoint, .. }
            | FetchError::Unhealthy { endpoint, .. } => *endpoint,
        }
    }

    /// True for failures to reach the server (as opposed to bad payloads).
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Transport { .. } | FetchError::Status { .. })
    }
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Retrieves dashboard datasets from the API.
#[derive(Clone)]
pub struct DatasetFetcher {
    base_url: String,
    timeout: Duration,
    client: Arc<dyn HttpClient>,
}

impl fmt::Debug for DatasetFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetFetcher")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl DatasetFetcher {
    pub fn new(config: &DashboardConfig, client: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: config.api_base.clone(),
            timeout: config.request_timeout,
            client,
        }
    }

    /// Fetcher over the production reqwest transport.
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config, Arc::new(ReqwestHttpClient::new()))
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    pub fn prices_url(&self, range: &DateRange) -> String {
        format!("{}?{}", self.url(Endpoint::Prices), range.query())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        url: String,
    ) -> Result<T, FetchError> {
        let response = self
            .client
            .get(HttpRequest::get(url, self.timeout))
            .await
            .map_err(|e| FetchError::Transport {
                endpoint,
                message: e.message().to_string(),
            })?;

        if !response.is_success() {
            return Err(FetchError::Status {
                endpoint,
                status: response.status,
            });
        }

        serde_json::from_str(&response.body).map_err(|e| FetchError::Decode {
            endpoint,
            message: e.to_string(),
        })
    }

    /// Price series bounded by `range` (filtered server-side).
    pub async fn fetch_prices(&self, range: &DateRange) -> Result<Vec<PricePoint>, FetchError> {
        self.get_json(Endpoint::Prices, self.prices_url(range)).await
    }

    /// The full curated event list, never range-filtered.
    pub async fn fetch_events(&self) -> Result<Vec<EventRecord>, FetchError> {
        self.get_json(Endpoint::Events, self.url(Endpoint::Events)).await
    }

    /// The change-point summary; `{}` or `null` means no model has been run.
    pub async fn fetch_changepoint(&self) -> Result<Option<ChangepointSummary>, FetchError> {
        let summary: Option<ChangepointSummary> = self
            .get_json(Endpoint::Changepoint, self.url(Endpoint::Changepoint))
            .await?;
        Ok(summary.filter(|s| !s.is_empty()))
    }

    /// Run one fetch cycle for `range`.
    pub async fn fetch(&self, range: DateRange) -> Result<ViewSnapshot, FetchError> {
        tracing::info!(%range, "fetch cycle started");

        let (prices, events, changepoint) = tokio::try_join!(
            self.fetch_prices(&range),
            self.fetch_events(),
            self.fetch_changepoint(),
        )?;

        tracing::info!(
            %range,
            prices = prices.len(),
            events = events.len(),
            changepoint = changepoint.is_some(),
            "fetch cycle complete"
        );

        Ok(ViewSnapshot {
            range,
            prices,
            events,
            changepoint,
        })
    }

    /// Probe `/api/health`, expecting `{"status":"ok"}`.
    pub async fn health(&self) -> Result<(), FetchError> {
        let resp: HealthResponse = self
            .get_json(Endpoint::Health, self.url(Endpoint::Health))
            .await?;
        if resp.status == "ok" {
            Ok(())
        } else {
            Err(FetchError::Unhealthy {
                endpoint: Endpoint::Health,
                status: resp.status,
            })
        }
    }
}
