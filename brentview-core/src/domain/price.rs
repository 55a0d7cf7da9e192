use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily price observation, as served by `/api/prices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}
