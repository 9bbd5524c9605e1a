use std::fmt;

/// Notification-rule categories offered by the portal.
///
/// The discriminants are the alert type ids used in URLs and in the
/// `alertTypeId` field of alert settings payloads.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum AlertType {
    /// Daily consumption above the configured threshold
    DailyException = 12,
    /// Suspected leak detected by the meter
    Leak = 23,
    /// Consumption registered while a vacation is set
    ConsumptionWhileAway = 1001,
}

impl AlertType {
    /// Numeric id as used in endpoint URLs.
    pub fn id(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AlertType::DailyException => write!(f, "daily_exception"),
            AlertType::Leak => write!(f, "leak"),
            AlertType::ConsumptionWhileAway => write!(f, "consumption_while_away"),
        }
    }
}

/// Delivery channels for alert notifications.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MediaType {
    None = 0,
    Sms = 1,
    Email = 3,
    All = 4,
}

impl MediaType {
    /// Numeric code sent in alert-settings write payloads.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// String form of the code, as carried in the `mediaTypeId` field of
    /// settings payloads.
    pub fn code_str(self) -> &'static str {
        match self {
            MediaType::None => "0",
            MediaType::Sms => "1",
            MediaType::Email => "3",
            MediaType::All => "4",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MediaType::None => write!(f, "none"),
            MediaType::Sms => write!(f, "sms"),
            MediaType::Email => write!(f, "email"),
            MediaType::All => write!(f, "all"),
        }
    }
}
