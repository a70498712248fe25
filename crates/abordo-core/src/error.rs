//! Unified error types for the abordo core library.
//!
//! This module provides a unified error type [`AbordoError`] covering the
//! failure modes of the core crate. Each module also has its own specific
//! error type ([`SessionStoreError`](crate::session::SessionStoreError),
//! [`ConfigError`](crate::config::ConfigError),
//! [`QrError`](crate::tickets::QrError)) for internal use.
//!
//! Every error here is surfaced at the command that triggered the operation
//! and shown to the driver as plain text; none is fatal to the process.

use thiserror::Error;

/// The unified error type for core abordo operations.
#[derive(Debug, Error)]
pub enum AbordoError {
    // =========================================================================
    // INPUT ERRORS
    // =========================================================================
    /// A scanned QR payload could not be turned into a ticket id.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// The referenced ticket is not in the current manifest.
    #[error("Ticket {0} is not on this route sheet's manifest")]
    TicketNotFound(i64),

    // =========================================================================
    // SESSION ERRORS
    // =========================================================================
    /// No driver is logged in.
    #[error("No driver is logged in. Run 'abordo login' first.")]
    NotLoggedIn,

    /// The session could not be read from or written to durable storage.
    #[error("Session storage error: {0}")]
    SessionStorage(String),

    // =========================================================================
    // CONFIGURATION ERRORS
    // =========================================================================
    /// The configuration file exists but could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    /// The configuration could not be read from or written to disk.
    #[error("Configuration storage error: {0}")]
    ConfigStorage(String),

    // =========================================================================
    // I/O ERRORS
    // =========================================================================
    /// A low-level I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized [`Result`] type for core abordo operations.
pub type Result<T> = std::result::Result<T, AbordoError>;

impl AbordoError {
    /// Returns `true` if this error came from user-provided input.
    #[inline]
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::MalformedInput(_) | Self::TicketNotFound(_))
    }

    /// Returns `true` if this error is related to the stored session.
    #[inline]
    #[must_use]
    pub const fn is_session_error(&self) -> bool {
        matches!(self, Self::NotLoggedIn | Self::SessionStorage(_))
    }

    /// Returns `true` if this error is related to configuration.
    #[inline]
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigParse(_) | Self::ConfigStorage(_))
    }
}

// =============================================================================
// CONVERSIONS FROM MODULE-SPECIFIC ERRORS
// =============================================================================

impl From<crate::tickets::QrError> for AbordoError {
    fn from(err: crate::tickets::QrError) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

impl From<crate::session::SessionStoreError> for AbordoError {
    fn from(err: crate::session::SessionStoreError) -> Self {
        Self::SessionStorage(err.to_string())
    }
}

impl From<crate::config::ConfigError> for AbordoError {
    fn from(err: crate::config::ConfigError) -> Self {
        use crate::config::ConfigError;
        match err {
            ConfigError::Parse(e) => Self::ConfigParse(e.to_string()),
            ConfigError::Serialize(e) => Self::ConfigParse(e.to_string()),
            other => Self::ConfigStorage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tickets::QrError;

    #[test]
    fn test_input_error_classification() {
        assert!(AbordoError::MalformedInput("bad payload".into()).is_input_error());
        assert!(AbordoError::TicketNotFound(7).is_input_error());
        assert!(!AbordoError::NotLoggedIn.is_input_error());
    }

    #[test]
    fn test_session_error_classification() {
        assert!(AbordoError::NotLoggedIn.is_session_error());
        assert!(AbordoError::SessionStorage("disk full".into()).is_session_error());
        assert!(!AbordoError::MalformedInput("x".into()).is_session_error());
    }

    #[test]
    fn test_config_error_classification() {
        assert!(AbordoError::ConfigParse("syntax error".into()).is_config_error());
        assert!(AbordoError::ConfigStorage("read failed".into()).is_config_error());
        assert!(!AbordoError::NotLoggedIn.is_config_error());
    }

    #[test]
    fn test_from_qr_error() {
        let err: AbordoError = QrError::MissingTicketId.into();
        assert!(matches!(err, AbordoError::MalformedInput(_)));
        assert!(err.is_input_error());
    }

    #[test]
    fn test_error_display_messages() {
        let err = AbordoError::TicketNotFound(42);
        assert!(format!("{err}").contains("42"));

        let err = AbordoError::NotLoggedIn;
        assert!(format!("{err}").contains("abordo login"));
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<AbordoError>();
        assert_sync::<AbordoError>();
    }
}
