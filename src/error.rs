//! Error types for the RymPro client.
//!
//! The taxonomy mirrors the portal's failure modes: login-time failures are
//! hard errors the caller must handle, while failures of individual data
//! requests after login are absorbed by the client and only logged (the
//! affected snapshot section simply stays stale for that cycle).

use thiserror::Error;

/// Result type alias using our custom error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors surfaced by the RymPro client.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure, or an unexpected non-success login response.
    #[error("cannot connect to RYM Pro: {0}")]
    CannotConnect(String),

    /// The portal rejected the credentials (error code 5060).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// A data or write operation was attempted before a successful login.
    #[error("not logged in, call login first")]
    NotLoggedIn,

    /// An authenticated request came back with HTTP 401.
    ///
    /// `update` and `set_alert_settings` handle this internally by clearing
    /// the token and snapshot; it is never propagated out of them.
    #[error("session expired (HTTP 401)")]
    SessionExpired,

    /// Any other failed data request: non-2xx status or a malformed payload.
    #[error("request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },
}

impl Error {
    /// Creates a connection error from anything displayable.
    pub fn cannot_connect(err: impl std::fmt::Display) -> Self {
        Self::CannotConnect(err.to_string())
    }

    /// Creates a request error with endpoint context.
    pub fn request(endpoint: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Request {
            endpoint: endpoint.into(),
            message: message.to_string(),
        }
    }

    /// True for the failures that a refresh cycle absorbs instead of
    /// propagating.
    pub fn is_soft(&self) -> bool {
        matches!(self, Self::SessionExpired | Self::Request { .. })
    }
}
