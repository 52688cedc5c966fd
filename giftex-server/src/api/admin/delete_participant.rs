use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use giftex_core::entities::participant::DeleteParticipant;
use giftex_core::framework::DatabaseProcessor;
use giftex_sdk::objects::Ack;
use kanau::processor::Processor;

use super::AdminApiError;
use crate::api::extractors::AdminAuth;
use crate::state::AppState;

/// `DELETE /participants/{id}` — remove a participant.
///
/// The store clears every `partner_id`/`drawn_id` referencing the deleted
/// row in the same transaction.
pub(super) async fn delete_participant(
    state: State<AppState>,
    _auth: AdminAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let deleted = processor
        .process(DeleteParticipant { id })
        .await
        .map_err(AdminApiError::Database)?;

    if !deleted {
        return Err(AdminApiError::NotFound);
    }

    tracing::info!(id, "Participant deleted");
    Ok(Json(Ack::OK))
}
