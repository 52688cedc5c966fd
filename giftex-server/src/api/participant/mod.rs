//! Participant API handlers.
//!
//! These endpoints are called by the frontend on behalf of participants.
//! Listing the roster and logging in are public; drawing requires a
//! participant session.
//!
//! # Endpoints
//!
//! - `GET    /participants` – public `{id, name}` listing for the login picker
//! - `POST   /session`      – log in (participant by id, admin by password)
//! - `GET    /session`      – current identity, or `null`
//! - `DELETE /session`      – log out
//! - `POST   /draw`         – draw a recipient (idempotent once assigned)

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::state::AppState;

mod current_identity;
mod draw;
mod list_participants;
mod login;
mod logout;

/// Build the Participant API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/participants", get(list_participants::list_participants))
        .route(
            "/session",
            post(login::login)
                .get(current_identity::current_identity)
                .delete(logout::logout),
        )
        .route("/draw", post(draw::draw))
}

// ---------------------------------------------------------------------------
// Shared error type
// ---------------------------------------------------------------------------

/// Errors that can occur in Participant API handlers.
#[derive(Debug)]
pub(crate) enum ParticipantApiError {
    /// A database query failed.
    Database(sqlx::Error),
    /// The referenced participant does not exist.
    NotFound,
    /// Wrong password for the admin identity.
    BadAdminPassword,
    /// The admin identity tried to draw.
    AdminCannotDraw,
    /// Every remaining participant is excluded for this requester.
    NoEligibleCandidates,
    /// A concurrent draw claimed the chosen recipient; safe to retry.
    DrawConflict,
}

impl IntoResponse for ParticipantApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ParticipantApiError::Database(e) => {
                tracing::error!(error = %e, "Participant API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            ParticipantApiError::NotFound => {
                (StatusCode::NOT_FOUND, "participant not found").into_response()
            }
            ParticipantApiError::BadAdminPassword => {
                (StatusCode::UNAUTHORIZED, "wrong admin password").into_response()
            }
            ParticipantApiError::AdminCannotDraw => {
                (StatusCode::BAD_REQUEST, "the admin identity cannot draw").into_response()
            }
            ParticipantApiError::NoEligibleCandidates => (
                StatusCode::CONFLICT,
                "no eligible candidates left to draw",
            )
                .into_response(),
            ParticipantApiError::DrawConflict => (
                StatusCode::SERVICE_UNAVAILABLE,
                "a concurrent draw interfered, please try again",
            )
                .into_response(),
        }
    }
}
