//! Error taxonomy for ticketing API calls.
//!
//! Every failed call maps to one of these variants; the calling screen
//! treats the fetched data as empty, shows the message once, and never
//! retries automatically.

use thiserror::Error;

/// A specialized [`Result`] type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Failure reasons for ticketing API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured API base URL is not a valid URL.
    #[error("Invalid API base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Credentials were rejected, the account is inactive, or the account
    /// lacks the driver role.
    #[error("Authentication rejected: {0}")]
    AuthenticationRejected(String),

    /// The request never produced an HTTP response.
    #[error("Network unavailable: {0}")]
    NetworkUnavailable(String),

    /// The requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The server answered with an error status.
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Message from the error envelope, or a generic fallback.
        message: String,
    },

    /// The response body did not decode into the expected shape.
    #[error("Malformed response from server: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns `true` if this error means the driver must log in again.
    #[inline]
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::AuthenticationRejected(_))
    }

    /// Returns `true` if the failure was transport-level rather than a
    /// server decision.
    #[inline]
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkUnavailable(_))
    }
}

/// Map an HTTP error status and optional envelope message to an [`ApiError`].
#[must_use]
pub fn classify_status(status: u16, message: Option<String>) -> ApiError {
    match status {
        401 => ApiError::AuthenticationRejected(
            message.unwrap_or_else(|| "Incorrect email or password".to_string()),
        ),
        404 => {
            ApiError::NotFound(message.unwrap_or_else(|| "Resource not found".to_string()))
        }
        status => ApiError::ServerError {
            status,
            message: message.unwrap_or_else(|| "Unexpected server error".to_string()),
        },
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            // Connect, timeout, and other transport failures.
            Self::NetworkUnavailable(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_401_as_authentication_rejected() {
        let err = classify_status(401, None);
        assert!(err.is_auth_error());
        assert!(format!("{err}").contains("Incorrect email or password"));
    }

    #[test]
    fn test_classify_404_as_not_found() {
        assert!(matches!(
            classify_status(404, Some("no sheet".into())),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_classify_other_statuses_as_server_error() {
        let err = classify_status(500, Some("boom".into()));
        match err {
            ApiError::ServerError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected ServerError, got {other:?}"),
        }
    }

    #[test]
    fn test_envelope_message_wins_over_fallback() {
        let err = classify_status(401, Some("cuenta bloqueada".into()));
        assert!(format!("{err}").contains("cuenta bloqueada"));
    }
}
