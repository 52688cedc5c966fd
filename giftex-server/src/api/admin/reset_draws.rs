use axum::{Json, extract::State, response::IntoResponse};
use giftex_core::entities::participant::ResetDraws;
use giftex_core::framework::DatabaseProcessor;
use giftex_sdk::objects::ResetDrawsResponse;
use kanau::processor::Processor;

use super::AdminApiError;
use crate::api::extractors::AdminAuth;
use crate::state::AppState;

/// `POST /reset-draws` — clear every assignment for a new cycle.
///
/// Partner pairings are left untouched; participants draw fresh afterwards.
pub(super) async fn reset_draws(
    state: State<AppState>,
    _auth: AdminAuth,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let cleared = processor
        .process(ResetDraws)
        .await
        .map_err(AdminApiError::Database)?;

    tracing::info!(cleared, "Draws reset");
    Ok(Json(ResetDrawsResponse { ok: true, cleared }))
}
