//! Persisted record of a replan.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::time::TimeOfDay;

/// The minute at which control passed from one plan column to the next.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CutoverRecord {
    pub date: Date,

    /// Plan that became current
    pub resource_id: String,

    /// Plan that was current before the replan
    pub previous_resource_id: String,

    /// Minute of the day the replan took effect
    #[serde(rename = "replanTime")]
    pub cutover_time: TimeOfDay,
}
