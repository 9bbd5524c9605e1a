use serde_derive::{Deserialize, Serialize};

/// Account holder profile, returned by the `/consumer/me` endpoint.
///
/// `municipal_id` identifies the local water authority and is required to
/// build several other endpoint URLs, so the profile is always the first
/// section fetched during initialization.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub phone_number: PhoneNumberSection,
    #[serde(default)]
    pub municipal_id: Option<String>,
}

/// Nested phone-number section of the profile payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumberSection {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub additional_phone_number: Option<String>,
}
