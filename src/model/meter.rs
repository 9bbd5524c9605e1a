use serde_derive::{Deserialize, Serialize};

use super::consumption::Consumption;

/// A water meter attached to the account.
///
/// The static fields come from the meters list returned during
/// initialization. The remaining fields are filled in (and refreshed) by the
/// per-meter endpoint group on every update cycle: last read and forecast are
/// replaced in place, consumption histories are appended to.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Meter {
    pub meter_count: i64,
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub full_address: Option<String>,

    #[serde(skip_deserializing)]
    pub meter_id: Option<i64>,
    #[serde(skip_deserializing)]
    pub last_read: Option<f64>,
    #[serde(skip_deserializing)]
    pub forecast: Option<f64>,
    #[serde(skip_deserializing)]
    pub daily_consumption: Vec<Consumption>,
    #[serde(skip_deserializing)]
    pub monthly_consumption: Vec<Consumption>,
}

impl Meter {
    /// Replaces the meter id and last read value from a last-read entry.
    pub fn set_last_read(&mut self, meter_id: Option<i64>, value: Option<f64>) {
        self.meter_id = meter_id;
        self.last_read = value;
    }

    /// Replaces the forecast value.
    pub fn set_forecast(&mut self, value: Option<f64>) {
        self.forecast = value;
    }

    pub fn push_daily(&mut self, entry: Consumption) {
        self.daily_consumption.push(entry);
    }

    pub fn push_monthly(&mut self, entry: Consumption) {
        self.monthly_consumption.push(entry);
    }

    /// Drops accumulated consumption history, keeping the static fields and
    /// scalar readings.
    pub fn clear_history(&mut self) {
        self.daily_consumption.clear();
        self.monthly_consumption.clear();
    }
}
