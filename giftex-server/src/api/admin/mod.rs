//! Admin API handlers.
//!
//! These endpoints require a session whose identity is the admin (see
//! [`crate::api::extractors::AdminAuth`]). They are plain roster mutations;
//! none of them need the draw engine's claim guard, but deletion performs
//! its referential cleanup transactionally in the store layer.
//!
//! # Endpoints
//!
//! - `POST   /participants`      – add a participant by name
//! - `DELETE /participants/{id}` – remove a participant (with cleanup)
//! - `PUT    /partners`          – declare two participants as partners
//! - `POST   /reset-draws`       – clear every assignment for a new cycle
//! - `GET    /roster`            – full roster including references

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

mod add_participant;
mod delete_participant;
mod list_roster;
mod reset_draws;
mod set_partners;

/// Build the Admin API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/participants", post(add_participant::add_participant))
        .route(
            "/participants/{id}",
            delete(delete_participant::delete_participant),
        )
        .route("/partners", put(set_partners::set_partners))
        .route("/reset-draws", post(reset_draws::reset_draws))
        .route("/roster", get(list_roster::list_roster))
}

// ---------------------------------------------------------------------------
// Shared error type
// ---------------------------------------------------------------------------

/// Errors that can occur in Admin API handlers.
#[derive(Debug)]
pub(crate) enum AdminApiError {
    Database(sqlx::Error),
    NotFound,
    InvalidName(&'static str),
}

impl IntoResponse for AdminApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AdminApiError::Database(e) => {
                tracing::error!(error = %e, "Admin API database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
            AdminApiError::NotFound => {
                (StatusCode::NOT_FOUND, "participant not found").into_response()
            }
            AdminApiError::InvalidName(message) => {
                (StatusCode::BAD_REQUEST, message).into_response()
            }
        }
    }
}
