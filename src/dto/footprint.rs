use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    models::FootprintEntry,
};

/// A range bound given either as a full RFC 3339 timestamp or a bare day.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum TimeBound {
    Instant(DateTime<Utc>),
    Day(NaiveDate),
}

impl TimeBound {
    /// A bare day starts at midnight UTC.
    pub fn as_start(&self) -> AppResult<DateTime<Utc>> {
        match self {
            TimeBound::Instant(at) => Ok(*at),
            TimeBound::Day(day) => day
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc())
                .ok_or(AppError::InvalidRange),
        }
    }

    /// A bare day ends at its last representable microsecond, so the whole day is included.
    pub fn as_end(&self) -> AppResult<DateTime<Utc>> {
        match self {
            TimeBound::Instant(at) => Ok(*at),
            TimeBound::Day(day) => day
                .and_hms_micro_opt(23, 59, 59, 999_999)
                .map(|dt| dt.and_utc())
                .ok_or(AppError::InvalidRange),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct FootprintRequest {
    #[schema(value_type = String, example = "2024-03-01")]
    pub start_at: TimeBound,
    #[schema(value_type = String, example = "2024-03-31T23:59:59Z")]
    pub end_at: TimeBound,
}

impl FootprintRequest {
    pub fn range(&self) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
        Ok((self.start_at.as_start()?, self.end_at.as_end()?))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FootprintReport {
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub items: Vec<FootprintEntry>,
    pub total: f64,
}
