//! Record types mapped from the portal's JSON payloads.
//!
//! These are passive data carriers: field access plus the small merge
//! helpers the refresh cycle needs. All orchestration lives in
//! [`crate::client`].

pub mod consumption;
pub mod customer_service;
pub mod meter;
pub mod profile;
pub mod settings;
pub mod types;

pub use consumption::Consumption;
pub use customer_service::CustomerService;
pub use meter::Meter;
pub use profile::Profile;
pub use settings::AlertSetting;
pub use types::{AlertType, MediaType};
