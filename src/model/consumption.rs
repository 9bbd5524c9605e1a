use chrono::NaiveDateTime;
use serde_derive::{Deserialize, Serialize};

/// A single consumption reading from the daily or monthly history endpoints.
///
/// Immutable once parsed; meters keep ordered lists of these across refresh
/// cycles.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Consumption {
    pub meter_count: i64,
    pub date: NaiveDateTime,
    #[serde(rename = "cons")]
    pub consumption: f64,
    #[serde(default)]
    pub estimation_type: Option<String>,
    #[serde(default, rename = "commonCons")]
    pub common_consumption: Option<f64>,
    #[serde(default, rename = "statusDesc")]
    pub status_description: Option<String>,
}
