//! The client's in-memory view of the latest successfully fetched state.
//!
//! The snapshot is a plain value owned by the [`crate::client::RymPro`]
//! instance. Sections are populated additively: a failed fetch leaves the
//! previous value in place, and nothing is ever rolled back on a single
//! request failure. Only a session expiry wipes it wholesale.

use serde_json::Value;

use crate::model::{AlertSetting, Consumption, CustomerService, Meter, Profile};

#[derive(Debug, Default, Clone)]
pub struct Snapshot {
    profile: Option<Profile>,
    meters: Vec<Meter>,
    customer_service: Option<CustomerService>,
    settings: Vec<AlertSetting>,
    vacations: Vec<Value>,
    alerts: Vec<Value>,
    messages: Vec<Value>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Municipal id from the profile, if the initialization group has run.
    /// Its absence is what forces the next update to re-initialize.
    pub fn municipal_id(&self) -> Option<&str> {
        self.profile.as_ref()?.municipal_id.as_deref()
    }

    /// Wipes every section.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn meters(&self) -> &[Meter] {
        &self.meters
    }

    pub fn customer_service(&self) -> Option<&CustomerService> {
        self.customer_service.as_ref()
    }

    pub fn settings(&self) -> &[AlertSetting] {
        &self.settings
    }

    pub fn vacations(&self) -> &[Value] {
        &self.vacations
    }

    pub fn alerts(&self) -> &[Value] {
        &self.alerts
    }

    pub fn messages(&self) -> &[Value] {
        &self.messages
    }

    pub fn set_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    /// Replaces the meter list wholesale, dropping any accumulated per-meter
    /// state. Only the initialization group calls this.
    pub fn set_meters(&mut self, meters: Vec<Meter>) {
        self.meters = meters;
    }

    pub fn set_customer_service(&mut self, customer_service: CustomerService) {
        self.customer_service = Some(customer_service);
    }

    pub fn set_settings(&mut self, settings: Vec<AlertSetting>) {
        self.settings = settings;
    }

    pub fn set_vacations(&mut self, vacations: Vec<Value>) {
        self.vacations = vacations;
    }

    pub fn set_alerts(&mut self, alerts: Vec<Value>) {
        self.alerts = alerts;
    }

    pub fn set_messages(&mut self, messages: Vec<Value>) {
        self.messages = messages;
    }

    /// Meter ids to iterate during the per-meter refresh. Collected up front
    /// so the refresh loop does not hold a borrow across requests.
    pub fn meter_counts(&self) -> Vec<i64> {
        self.meters.iter().map(|m| m.meter_count).collect()
    }

    fn meter_mut(&mut self, meter_count: i64) -> Option<&mut Meter> {
        self.meters.iter_mut().find(|m| m.meter_count == meter_count)
    }

    /// Replaces the last-read scalar of the matching meter. Returns false
    /// when no meter with that count is known.
    pub fn apply_last_read(
        &mut self,
        meter_count: i64,
        meter_id: Option<i64>,
        value: Option<f64>,
    ) -> bool {
        match self.meter_mut(meter_count) {
            Some(meter) => {
                meter.set_last_read(meter_id, value);
                true
            }
            None => false,
        }
    }

    /// Replaces the forecast scalar of the matching meter.
    pub fn apply_forecast(&mut self, meter_count: i64, value: Option<f64>) -> bool {
        match self.meter_mut(meter_count) {
            Some(meter) => {
                meter.set_forecast(value);
                true
            }
            None => false,
        }
    }

    /// Appends a daily consumption record to the matching meter.
    pub fn apply_daily(&mut self, meter_count: i64, entry: Consumption) -> bool {
        match self.meter_mut(meter_count) {
            Some(meter) => {
                meter.push_daily(entry);
                true
            }
            None => false,
        }
    }

    /// Appends a monthly consumption record to the matching meter.
    pub fn apply_monthly(&mut self, meter_count: i64, entry: Consumption) -> bool {
        match self.meter_mut(meter_count) {
            Some(meter) => {
                meter.push_monthly(entry);
                true
            }
            None => false,
        }
    }

    /// Clears accumulated consumption history on every meter.
    pub fn clear_histories(&mut self) {
        for meter in &mut self.meters {
            meter.clear_history();
        }
    }
}
