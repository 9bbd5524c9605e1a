//! Endpoint catalog for the RYM Pro portal.
//!
//! The portal splits its API over two sub-paths of one host: `/consumer`
//! for identity and account data, `/consumption` for meter data. Each
//! variant carries exactly the parameters its URL template interpolates, so
//! an endpoint can never be built with a missing parameter.

use chrono::NaiveDate;

use crate::model::AlertType;

/// A logical portal operation, resolved to a URL path by [`Endpoint::path`].
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint<'a> {
    Login,
    Profile,
    Meters,
    CustomerService { municipal_id: &'a str },
    Vacations { municipal_id: &'a str },
    Alerts { municipal_id: &'a str },
    Messages { municipal_id: &'a str },
    Settings,
    AlertSettings { alert_type: AlertType },
    LastRead,
    Forecast { meter_id: i64 },
    DailyConsumption { meter_id: i64, start: NaiveDate, end: NaiveDate },
    MonthlyConsumption { meter_id: i64, start: NaiveDate, end: NaiveDate },
}

impl Endpoint<'_> {
    /// Path component of the URL, relative to the base host.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Login => "/consumer/login".to_string(),
            Endpoint::Profile => "/consumer/me".to_string(),
            Endpoint::Meters => "/consumer/meters".to_string(),
            Endpoint::CustomerService { municipal_id } => {
                format!("/consumer/municipal/{}/customer-service", municipal_id)
            }
            Endpoint::Vacations { municipal_id } => {
                format!("/consumer/municipal/{}/vacations", municipal_id)
            }
            Endpoint::Alerts { municipal_id } => {
                format!("/consumer/municipal/{}/alerts", municipal_id)
            }
            Endpoint::Messages { municipal_id } => {
                format!("/consumer/municipal/{}/messages", municipal_id)
            }
            Endpoint::Settings => "/consumer/alerts/settings".to_string(),
            Endpoint::AlertSettings { alert_type } => {
                format!("/consumer/alerts/settings/{}", alert_type.id())
            }
            Endpoint::LastRead => "/consumption/last-read".to_string(),
            Endpoint::Forecast { meter_id } => format!("/consumption/forecast/{}", meter_id),
            Endpoint::DailyConsumption {
                meter_id,
                start,
                end,
            } => format!(
                "/consumption/daily/{}/{}/{}",
                meter_id,
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
            Endpoint::MonthlyConsumption {
                meter_id,
                start,
                end,
            } => format!(
                "/consumption/monthly/{}/{}/{}",
                meter_id,
                start.format("%Y-%m-%d"),
                end.format("%Y-%m-%d")
            ),
        }
    }

    /// Full URL against `base` (no trailing slash expected on `base`).
    pub fn url(&self, base: &str) -> String {
        format!("{}{}", base, self.path())
    }
}
