//! Change-point model summary, as published by `/api/changepoint`.
//!
//! The model pipeline writes whatever it managed to compute, so every field
//! is independently optional. A field that is present but malformed is
//! dropped (and logged) instead of failing the whole payload.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::event::null_as_empty;

/// Raw summary of the single change-point model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangepointSummary {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tau_date_median: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tau_date_hdi_94: Option<(NaiveDate, NaiveDate)>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub nearest_event: Option<NearestEvent>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub impact_stats_usd: Option<ImpactStats>,

    // Posterior parameters, written alongside the dates by the model run.
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tau_index_median: Option<i64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub tau_index_hdi_94: Option<(i64, i64)>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub mu_before_mean: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub mu_after_mean: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sigma_before_mean: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub sigma_after_mean: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub prob_mu_after_gt_before: Option<f64>,
}

impl ChangepointSummary {
    /// True when no recognized field carries a value (e.g. the server sent `{}`).
    pub fn is_empty(&self) -> bool {
        self.tau_date_median.is_none()
            && self.tau_date_hdi_94.is_none()
            && self.nearest_event.is_none()
            && self.impact_stats_usd.is_none()
            && self.tau_index_median.is_none()
            && self.tau_index_hdi_94.is_none()
            && self.mu_before_mean.is_none()
            && self.mu_after_mean.is_none()
            && self.sigma_before_mean.is_none()
            && self.sigma_after_mean.is_none()
            && self.prob_mu_after_gt_before.is_none()
    }
}

/// The curated event closest to tau, chosen server-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NearestEvent {
    pub event_date: NaiveDate,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event_title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub event_type: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
    /// Absolute distance in days between the event and tau.
    pub abs_days: u32,
}

/// Mean price before vs. after tau, in USD.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpactStats {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pre_mean_price_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub post_mean_price_usd: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub pct_change_mean_price: Option<f64>,
}

/// Deserialize an optional field, mapping `null` and shape mismatches to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value) {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            tracing::warn!(error = %e, "dropping malformed change-point field");
            Ok(None)
        }
    }
}
