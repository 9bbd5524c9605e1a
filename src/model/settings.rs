use serde_derive::{Deserialize, Serialize};

use super::types::{AlertType, MediaType};

/// One alert-notification rule: which channel relays a given alert type.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AlertSetting {
    pub alert_type_id: i64,
    /// Media type code as carried on the wire ("0", "1", "3", "4").
    #[serde(default)]
    pub media_type_id: Option<String>,
}

impl AlertSetting {
    /// True when this rule is for `alert_type`.
    pub fn is_for(&self, alert_type: AlertType) -> bool {
        self.alert_type_id == alert_type.id() as i64
    }

    /// True when this rule delivers through `media` (or through all channels).
    pub fn delivers_via(&self, media: MediaType) -> bool {
        match self.media_type_id.as_deref() {
            Some(code) => code == media.code_str() || code == MediaType::All.code_str(),
            None => false,
        }
    }
}
