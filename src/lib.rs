//! Async client for the Read Your Meter Pro water meter customer portal.
//!
//! The portal exposes a JSON REST API over one host with two sub-paths:
//! `/consumer` for identity and account data and `/consumption` for meter
//! data. This crate wraps it in a [`RymPro`] client that logs in, keeps an
//! in-memory snapshot of account, meter and consumption state, and refreshes
//! that snapshot incrementally on every [`RymPro::update`] call.
//!
//! # Example
//!
//! ```no_run
//! use rympro::{load_config, AlertType, MediaType, RymPro};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = load_config()?; // RYMPRO_USERNAME / RYMPRO_PASSWORD / ...
//! let mut client = RymPro::new(config);
//!
//! client.update().await?;
//! for meter in client.meters() {
//!     println!("meter {}: last read {:?}", meter.meter_count, meter.last_read);
//! }
//!
//! client.set_alert_settings(AlertType::Leak, MediaType::All, true).await?;
//! client.close();
//! # Ok(())
//! # }
//! ```
//!
//! Login failures (`CannotConnect`, `Unauthorized`) are the only errors a
//! caller has to handle; once logged in, failed refresh requests leave the
//! previous data in place and emit `tracing` warnings instead of erroring.

pub mod client;
pub mod config;
pub mod error;
pub mod model;

pub use client::{HistoryPolicy, RymPro};
pub use config::{load_config, RymProConfig, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use model::{AlertSetting, AlertType, Consumption, CustomerService, MediaType, Meter, Profile};
