//! HTTP API surface.

pub mod admin;
pub mod extractors;
pub mod participant;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` router: participant routes at the root, admin routes
/// nested under `/admin`.
pub fn router() -> Router<AppState> {
    participant::router().nest("/admin", admin::router())
}
