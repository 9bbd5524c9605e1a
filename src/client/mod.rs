//! The RymPro client: login, snapshot refresh, alert settings mutation.
//!
//! # Refresh model
//!
//! `update` runs up to three endpoint groups, strictly sequentially:
//!
//! - **initialization** (only while the municipal id is unknown): profile,
//!   meters, customer service, vacations. The profile resolves the municipal
//!   id that the municipal endpoints interpolate into their URLs.
//! - **update** (every cycle): alert settings, alerts, messages.
//! - **meter** (every cycle, per known meter): last read, forecast, daily
//!   and monthly consumption.
//!
//! # Failure policy
//!
//! Login failures are hard errors. After login, a failed request only costs
//! that section its refresh for the cycle: the stale value stays and a
//! warning is logged. A 401 mid-session clears the token and the whole
//! snapshot (also without raising), so the next `update` logs in again and
//! re-runs initialization. This asymmetry is deliberate: fail hard at login,
//! fail soft while refreshing.

mod dates;
mod endpoint;
mod http;
mod snapshot;

pub use dates::DateContext;
pub use endpoint::Endpoint;
pub use http::HttpSession;
pub use snapshot::Snapshot;

use chrono::Local;
use serde::de::DeserializeOwned;
use serde_derive::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::config::RymProConfig;
use crate::error::{Error, Result};
use crate::model::{AlertSetting, AlertType, Consumption, CustomerService, MediaType, Meter, Profile};

/// What happens to per-meter consumption history lists across update cycles.
///
/// The portal re-serves overlapping ranges, so under `Accumulate` the lists
/// grow by the returned entries on every cycle and call sites must tolerate
/// duplicates. `ResetEachUpdate` clears the lists at the start of each meter
/// refresh so they only ever hold the latest cycle's entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPolicy {
    #[default]
    Accumulate,
    ResetEachUpdate,
}

/// One entry of the account-wide last-read payload.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct LastReadEntry {
    #[serde(default)]
    meter_id: Option<i64>,
    meter_count: i64,
    #[serde(default)]
    read: Option<f64>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Forecast {
    #[serde(default)]
    estimated_consumption: Option<f64>,
}

/// A connection to RYM Pro.
pub struct RymPro {
    http: HttpSession,
    dates: DateContext,
    snapshot: Snapshot,
    history_policy: HistoryPolicy,
}

impl RymPro {
    /// Client that owns its connection pool.
    pub fn new(config: RymProConfig) -> Self {
        Self::build(HttpSession::new(config))
    }

    /// Client over a caller-supplied `reqwest::Client`; `close` leaves the
    /// supplied client alone.
    pub fn with_client(config: RymProConfig, client: reqwest::Client) -> Self {
        Self::build(HttpSession::with_client(config, client))
    }

    fn build(http: HttpSession) -> Self {
        Self {
            http,
            dates: DateContext::new(Local::now().date_naive()),
            snapshot: Snapshot::new(),
            history_policy: HistoryPolicy::default(),
        }
    }

    /// Sets the consumption-history growth policy (default: accumulate).
    pub fn with_history_policy(mut self, policy: HistoryPolicy) -> Self {
        self.history_policy = policy;
        self
    }

    /// Logs in with the configured credentials and stores the session token.
    ///
    /// Not required before `update`, which logs in on demand; call it to
    /// validate credentials eagerly.
    pub async fn login(&mut self) -> Result<String> {
        self.http.login().await
    }

    /// Refreshes the snapshot.
    ///
    /// Logs in first if no token is held (errors from that login propagate).
    /// Everything after login degrades softly; see the module docs.
    pub async fn update(&mut self) -> Result<()> {
        if !self.http.has_token() {
            self.http.login().await?;
        }

        self.dates.refresh(Local::now().date_naive());

        if self.snapshot.municipal_id().is_none() {
            self.run_initialization_group().await;
        }
        self.run_update_group().await;

        if self.history_policy == HistoryPolicy::ResetEachUpdate {
            self.snapshot.clear_histories();
        }
        self.refresh_meters().await;

        Ok(())
    }

    /// Enables or disables a notification channel for an alert type, then
    /// reloads the settings section so the snapshot reflects what the portal
    /// actually stored. The write itself degrades softly on failure.
    pub async fn set_alert_settings(
        &mut self,
        alert_type: AlertType,
        media_type: MediaType,
        enabled: bool,
    ) -> Result<()> {
        if !self.http.has_token() {
            return Err(Error::NotLoggedIn);
        }

        let endpoint = Endpoint::AlertSettings { alert_type };
        let body = serde_json::json!([media_type.code()]);
        let result = if enabled {
            self.http.put(&endpoint, &body).await
        } else {
            self.http.delete(&endpoint, &body).await
        };
        if let Err(err) = result {
            self.degrade(&endpoint, err);
        }

        self.reload_settings().await;
        Ok(())
    }

    /// Releases the connection if this client created it. Safe to call more
    /// than once.
    pub fn close(&mut self) {
        self.http.close();
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.snapshot.profile()
    }

    pub fn meters(&self) -> &[Meter] {
        self.snapshot.meters()
    }

    pub fn customer_service(&self) -> Option<&CustomerService> {
        self.snapshot.customer_service()
    }

    pub fn settings(&self) -> &[AlertSetting] {
        self.snapshot.settings()
    }

    pub fn vacations(&self) -> &[Value] {
        self.snapshot.vacations()
    }

    pub fn alerts(&self) -> &[Value] {
        self.snapshot.alerts()
    }

    pub fn messages(&self) -> &[Value] {
        self.snapshot.messages()
    }

    async fn run_initialization_group(&mut self) {
        if let Some(profile) = self.fetch_section::<Profile>(&Endpoint::Profile).await {
            self.snapshot.set_profile(profile);
        }
        if let Some(meters) = self.fetch_section::<Vec<Meter>>(&Endpoint::Meters).await {
            self.snapshot.set_meters(meters);
        }

        // Past this point every URL interpolates the municipal id.
        let Some(municipal_id) = self.snapshot.municipal_id().map(String::from) else {
            warn!("municipal id unresolved, skipping municipal endpoints");
            return;
        };

        let endpoint = Endpoint::CustomerService {
            municipal_id: &municipal_id,
        };
        if let Some(customer_service) = self.fetch_section::<CustomerService>(&endpoint).await {
            self.snapshot.set_customer_service(customer_service);
        }

        let endpoint = Endpoint::Vacations {
            municipal_id: &municipal_id,
        };
        if let Some(vacations) = self.fetch_section::<Vec<Value>>(&endpoint).await {
            self.snapshot.set_vacations(vacations);
        }
    }

    async fn run_update_group(&mut self) {
        self.reload_settings().await;

        let Some(municipal_id) = self.snapshot.municipal_id().map(String::from) else {
            return;
        };

        let endpoint = Endpoint::Alerts {
            municipal_id: &municipal_id,
        };
        if let Some(alerts) = self.fetch_section::<Vec<Value>>(&endpoint).await {
            self.snapshot.set_alerts(alerts);
        }

        let endpoint = Endpoint::Messages {
            municipal_id: &municipal_id,
        };
        if let Some(messages) = self.fetch_section::<Vec<Value>>(&endpoint).await {
            self.snapshot.set_messages(messages);
        }
    }

    async fn reload_settings(&mut self) {
        if let Some(settings) = self
            .fetch_section::<Vec<AlertSetting>>(&Endpoint::Settings)
            .await
        {
            self.snapshot.set_settings(settings);
        }
    }

    /// Per-meter endpoint group, one meter at a time.
    ///
    /// The last-read payload covers the whole account; it is re-scanned for
    /// each meter and only entries matching the meter currently being
    /// processed are applied. Quadratic, but accounts hold a handful of
    /// meters.
    async fn refresh_meters(&mut self) {
        let counts = self.snapshot.meter_counts();
        let yesterday = self.dates.yesterday();
        let today = self.dates.today();
        let month_first = self.dates.month_first_day();
        let month_last = self.dates.month_last_day();

        for count in counts {
            if let Some(entries) = self
                .fetch_section::<Vec<LastReadEntry>>(&Endpoint::LastRead)
                .await
            {
                if let Some(entry) = entries.iter().find(|e| e.meter_count == count) {
                    self.snapshot.apply_last_read(count, entry.meter_id, entry.read);
                }
            }

            let endpoint = Endpoint::Forecast { meter_id: count };
            if let Some(forecast) = self.fetch_section::<Forecast>(&endpoint).await {
                self.snapshot.apply_forecast(count, forecast.estimated_consumption);
            }

            let endpoint = Endpoint::DailyConsumption {
                meter_id: count,
                start: yesterday,
                end: today,
            };
            if let Some(entries) = self.fetch_section::<Vec<Consumption>>(&endpoint).await {
                for entry in entries.into_iter().filter(|e| e.meter_count == count) {
                    self.snapshot.apply_daily(count, entry);
                }
            }

            let endpoint = Endpoint::MonthlyConsumption {
                meter_id: count,
                start: month_first,
                end: month_last,
            };
            if let Some(entries) = self.fetch_section::<Vec<Consumption>>(&endpoint).await {
                for entry in entries.into_iter().filter(|e| e.meter_count == count) {
                    self.snapshot.apply_monthly(count, entry);
                }
            }
        }
    }

    /// Fetches and parses one section, absorbing every failure: a malformed
    /// payload or failed request means "no update for this section this
    /// cycle", and a 401 drops the session.
    async fn fetch_section<T: DeserializeOwned>(&mut self, endpoint: &Endpoint<'_>) -> Option<T> {
        let value = match self.http.get(endpoint).await {
            Ok(value) => value,
            Err(err) => {
                self.degrade(endpoint, err);
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                warn!(
                    endpoint = %endpoint.path(),
                    error = %err,
                    "malformed payload, keeping stale data"
                );
                None
            }
        }
    }

    /// Soft-failure handling shared by reads and writes.
    fn degrade(&mut self, endpoint: &Endpoint<'_>, err: Error) {
        match err {
            Error::SessionExpired => {
                warn!(
                    endpoint = %endpoint.path(),
                    "session expired, clearing snapshot until next login"
                );
                self.http.clear_token();
                self.snapshot.clear();
            }
            err => {
                warn!(
                    endpoint = %endpoint.path(),
                    error = %err,
                    "request failed, keeping stale data"
                );
            }
        }
    }
}
