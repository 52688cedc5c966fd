//! Custom Axum extractors for request authentication.
//!
//! Provides:
//! - `SessionIdentity` — resolves the `Giftex-Session` header to the caller's
//!   [`Identity`] (participant or admin).
//! - `AdminAuth` — same resolution, then requires the admin identity.
//!
//! Identity resolution happens here, once per request; handlers receive the
//! result as a plain value.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use giftex_sdk::headers::SESSION_HEADER;
use giftex_sdk::objects::Identity;
use uuid::Uuid;

use crate::state::AppState;

/// Parse the session token out of the request headers, if present and
/// well-formed.
pub(crate) fn token_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    let value = headers.get(SESSION_HEADER)?.to_str().ok()?;
    Uuid::parse_str(value).ok()
}

// ---------------------------------------------------------------------------
// SessionIdentity — any logged-in caller
// ---------------------------------------------------------------------------

/// An Axum extractor that resolves the `Giftex-Session` header to the
/// caller's identity.
pub struct SessionIdentity(pub Identity);

/// Errors that can occur during session resolution.
#[derive(Debug)]
pub enum SessionAuthError {
    MissingHeader,
    MalformedToken,
    UnknownSession,
}

impl IntoResponse for SessionAuthError {
    fn into_response(self) -> Response {
        let message = match self {
            SessionAuthError::MissingHeader => "missing Giftex-Session header",
            SessionAuthError::MalformedToken => "malformed session token",
            SessionAuthError::UnknownSession => "unknown or expired session",
        };
        (StatusCode::UNAUTHORIZED, message).into_response()
    }
}

impl FromRequestParts<AppState> for SessionIdentity {
    type Rejection = SessionAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(SESSION_HEADER)
            .ok_or(SessionAuthError::MissingHeader)?
            .to_str()
            .map_err(|_| SessionAuthError::MalformedToken)?;

        let token = Uuid::parse_str(value).map_err(|_| SessionAuthError::MalformedToken)?;

        let identity = state
            .sessions
            .resolve(token)
            .await
            .ok_or(SessionAuthError::UnknownSession)?;

        Ok(SessionIdentity(identity))
    }
}

// ---------------------------------------------------------------------------
// AdminAuth — admin-only routes
// ---------------------------------------------------------------------------

/// An Axum extractor that requires a session whose identity is the admin.
pub struct AdminAuth;

/// Errors returned by the [`AdminAuth`] extractor.
#[derive(Debug)]
pub enum AdminAuthError {
    Session(SessionAuthError),
    NotAdmin,
}

impl IntoResponse for AdminAuthError {
    fn into_response(self) -> Response {
        match self {
            AdminAuthError::Session(err) => err.into_response(),
            AdminAuthError::NotAdmin => {
                (StatusCode::FORBIDDEN, "admin access required").into_response()
            }
        }
    }
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AdminAuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionIdentity(identity) = SessionIdentity::from_request_parts(parts, state)
            .await
            .map_err(AdminAuthError::Session)?;

        if !identity.is_admin() {
            return Err(AdminAuthError::NotAdmin);
        }
        Ok(AdminAuth)
    }
}
