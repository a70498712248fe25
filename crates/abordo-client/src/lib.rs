//! # abordo-client
//!
//! REST client for the ticketing API consumed by the abordo driver tools.
//!
//! All calls go over HTTPS/HTTP with a bearer token in the `Authorization`
//! header (the token comes from the stored session). Payloads are decoded at
//! the edge by [`wire`] into the validated `abordo-core` types, and every
//! failure maps into the [`error::ApiError`] taxonomy. Calls are not
//! cancelable once issued; a caller that loses interest simply discards the
//! result.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod error;
pub mod wire;

use std::time::Duration;

use url::Url;

use abordo_core::routes::{find_sheet, RouteSheet};
use abordo_core::session::Session;
use abordo_core::tickets::Ticket;
use abordo_core::AppConfig;

pub use error::{classify_status, ApiError, ApiResult};
use wire::{ErrorEnvelope, LoginRequest, LoginResponse, SheetsEnvelope, WireTicket};

/// Role number the API assigns to driver accounts.
const DRIVER_ROLE: i64 = 3;

/// HTTP client for the ticketing API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client against the given base URL with a bounded timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NetworkUnavailable`] if the underlying HTTP
    /// client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::NetworkUnavailable(e.to_string()))?;
        Ok(Self { client, base_url })
    }

    /// Create a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] when the configured base URL
    /// does not parse.
    pub fn from_config(config: &AppConfig) -> ApiResult<Self> {
        let base = config.normalized_base_url();
        let base_url = Url::parse(&base).map_err(|_| ApiError::InvalidBaseUrl(base))?;
        Self::new(base_url, Duration::from_secs(config.request_timeout_secs))
    }

    /// Authenticate a driver and produce a session.
    ///
    /// Applies the client-side policy on top of the server's answer: the
    /// account must be active and carry the driver role. A policy rejection
    /// produces no session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::AuthenticationRejected`] for bad credentials,
    /// inactive accounts, and non-driver roles, or another taxonomy variant
    /// for transport and server failures.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let url = self.endpoint("auth/login")?;
        tracing::debug!(%url, "logging in");

        let resp = self
            .client
            .post(url)
            .json(&LoginRequest {
                email: email.trim().to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }

        let body: LoginResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let session = validate_login(body)?;
        tracing::info!(driver = %session.display_name(), "login accepted");
        Ok(session)
    }

    /// Fetch today's route sheets assigned to the authenticated driver.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] taxonomy variant; callers treat the sheet
    /// list as empty and surface the reason.
    pub async fn scheduled_sheets(&self, token: &str) -> ApiResult<Vec<RouteSheet>> {
        let url = self.endpoint("hoja-trabajo/chofer/mis-programadas")?;
        tracing::debug!(%url, "fetching scheduled sheets");

        let resp = self.client.get(url).bearer_auth(token).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }

        let envelope: SheetsEnvelope = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope
            .data
            .unwrap_or_default()
            .into_iter()
            .map(RouteSheet::from)
            .collect())
    }

    /// Fetch one route sheet by id.
    ///
    /// The API only exposes the full list, so this filters client-side and
    /// maps absence to [`ApiError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when no sheet matches, or whatever
    /// the list fetch produced.
    pub async fn sheet_by_id(&self, token: &str, sheet_id: i64) -> ApiResult<RouteSheet> {
        let sheets = self.scheduled_sheets(token).await?;
        find_sheet(&sheets, sheet_id).cloned().ok_or_else(|| {
            ApiError::NotFound(format!("No scheduled route sheet with id {sheet_id}"))
        })
    }

    /// Fetch the tickets assigned to the driver for one route sheet.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] taxonomy variant; callers treat the ticket
    /// set as empty and surface the reason. Failure never panics the render
    /// path.
    pub async fn tickets_for_sheet(&self, token: &str, sheet_id: i64) -> ApiResult<Vec<Ticket>> {
        let mut url = self.endpoint("boletos/chofer")?;
        url.set_query(Some(&format!("hojaTrabajoId={sheet_id}")));
        tracing::debug!(%url, "fetching tickets");

        let resp = self.client.get(url).bearer_auth(token).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }

        let tickets: Vec<WireTicket> = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(tickets.into_iter().map(Ticket::from).collect())
    }

    /// Mark a ticket as boarded server-side.
    ///
    /// On success the caller removes the ticket from its local manifest; on
    /// failure the manifest stays untouched and the reason is surfaced. The
    /// operation is never retried automatically.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] taxonomy variant on any non-success answer.
    pub async fn board_ticket(&self, token: &str, ticket_id: i64) -> ApiResult<()> {
        let url = self.endpoint(&format!("boletos/abordar/{ticket_id}"))?;
        tracing::debug!(%url, ticket_id, "marking ticket boarded");

        let resp = self.client.patch(url).bearer_auth(token).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }
        tracing::info!(ticket_id, "ticket boarded");
        Ok(())
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        self.base_url
            .join(path)
            .map_err(|_| ApiError::InvalidBaseUrl(format!("{}{path}", self.base_url)))
    }

    /// Read the error envelope (when there is one) and classify the status.
    async fn error_from_response(resp: reqwest::Response) -> ApiError {
        let status = resp.status().as_u16();
        let message = resp
            .json::<ErrorEnvelope>()
            .await
            .ok()
            .and_then(|envelope| envelope.message);
        classify_status(status, message)
    }
}

/// Apply the client-side login policy to a successful login response.
///
/// The server may hand out tokens to any account; this client only accepts
/// active accounts with the driver role. Anything else is rejected and no
/// session is produced.
///
/// # Errors
///
/// Returns [`ApiError::AuthenticationRejected`] when the policy fails, or
/// [`ApiError::Decode`] when the response lacks the token or user object.
pub fn validate_login(response: LoginResponse) -> ApiResult<Session> {
    let token = response
        .access_token
        .ok_or_else(|| ApiError::Decode("login response carried no access token".to_string()))?;
    let user = response
        .user
        .ok_or_else(|| ApiError::Decode("login response carried no user object".to_string()))?;

    if user.activo == Some(false) {
        return Err(ApiError::AuthenticationRejected(
            "This account is inactive. Contact the administrator.".to_string(),
        ));
    }
    if user.rol != Some(DRIVER_ROLE) {
        return Err(ApiError::AuthenticationRejected(
            "This account does not have driver access.".to_string(),
        ));
    }

    Ok(Session {
        given_name: user.nombre.unwrap_or_default(),
        family_name: user.apellido.unwrap_or_default(),
        auth_token: token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::WireUser;

    fn login_response(activo: Option<bool>, rol: Option<i64>) -> LoginResponse {
        LoginResponse {
            access_token: Some("jwt-abc".into()),
            user: Some(WireUser {
                nombre: Some("Juan".into()),
                apellido: Some("Mejía".into()),
                activo,
                rol,
            }),
        }
    }

    #[test]
    fn test_validate_login_accepts_active_driver() {
        let session = validate_login(login_response(Some(true), Some(3))).unwrap();
        assert_eq!(session.given_name, "Juan");
        assert_eq!(session.family_name, "Mejía");
        assert_eq!(session.auth_token, "jwt-abc");
    }

    #[test]
    fn test_validate_login_treats_absent_activo_as_active() {
        assert!(validate_login(login_response(None, Some(3))).is_ok());
    }

    #[test]
    fn test_validate_login_rejects_inactive_account() {
        let err = validate_login(login_response(Some(false), Some(3))).unwrap_err();
        assert!(err.is_auth_error());
        assert!(format!("{err}").contains("inactive"));
    }

    #[test]
    fn test_validate_login_rejects_non_driver_role() {
        let err = validate_login(login_response(Some(true), Some(1))).unwrap_err();
        assert!(err.is_auth_error());

        let err = validate_login(login_response(Some(true), None)).unwrap_err();
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_validate_login_rejects_missing_token_or_user() {
        let response = LoginResponse {
            access_token: None,
            user: None,
        };
        assert!(matches!(
            validate_login(response),
            Err(ApiError::Decode(_))
        ));

        let response = LoginResponse {
            access_token: Some("jwt".into()),
            user: None,
        };
        assert!(matches!(
            validate_login(response),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_endpoint_joins_relative_paths() {
        let client = ApiClient::new(
            Url::parse("http://localhost:3001/").unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.endpoint("auth/login").unwrap().as_str(),
            "http://localhost:3001/auth/login"
        );
        assert_eq!(
            client.endpoint("boletos/abordar/42").unwrap().as_str(),
            "http://localhost:3001/boletos/abordar/42"
        );
    }

    #[test]
    fn test_from_config_rejects_bad_base_url() {
        let config = AppConfig {
            api_base_url: "not a url".into(),
            ..AppConfig::default()
        };
        assert!(matches!(
            ApiClient::from_config(&config),
            Err(ApiError::InvalidBaseUrl(_))
        ));
    }
}
