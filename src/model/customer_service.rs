use serde_derive::{Deserialize, Serialize};

/// Contact details of the municipal water authority's customer service.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerService {
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub municipal_id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
