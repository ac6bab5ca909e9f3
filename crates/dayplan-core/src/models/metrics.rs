//! Daily metrics: shutdown ritual and deep-work hours.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Upper bound for `deep_hours`.
pub const MAX_DEEP_HOURS: u32 = 24;

/// Per-date metrics. Dates without a stored row read as the default.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyMetrics {
    pub date: Date,
    pub shutdown_complete: bool,
    pub deep_hours: u32,
}

impl DailyMetrics {
    /// `{shutdownComplete: false, deepHours: 0}` for `date`.
    pub fn default_for(date: Date) -> Self {
        Self {
            date,
            shutdown_complete: false,
            deep_hours: 0,
        }
    }
}

/// Partial metrics update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsPatch {
    pub shutdown_complete: Option<bool>,
    pub deep_hours: Option<u32>,
}

impl MetricsPatch {
    pub fn validate(&self) -> Result<()> {
        match self.deep_hours {
            Some(hours) if hours > MAX_DEEP_HOURS => Err(PlannerError::invalid_input("deepHours")
                .with_reason(format!("must be between 0 and {MAX_DEEP_HOURS}"))),
            _ => Ok(()),
        }
    }

    /// Merges the patch over `current`.
    pub fn merged(&self, current: DailyMetrics) -> DailyMetrics {
        DailyMetrics {
            shutdown_complete: self.shutdown_complete.unwrap_or(current.shutdown_complete),
            deep_hours: self.deep_hours.unwrap_or(current.deep_hours),
            ..current
        }
    }
}
