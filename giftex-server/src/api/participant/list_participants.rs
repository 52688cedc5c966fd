use axum::{Json, extract::State, response::IntoResponse};
use giftex_core::entities::participant::ListParticipants;
use giftex_core::framework::DatabaseProcessor;
use giftex_sdk::objects::ParticipantSummary;
use kanau::processor::Processor;

use super::ParticipantApiError;
use crate::state::AppState;

/// `GET /participants` — public roster listing, ordered by name.
///
/// Exposes only `{id, name}`; partner and drawn references never leave the
/// admin API.
pub(super) async fn list_participants(
    state: State<AppState>,
) -> Result<impl IntoResponse, ParticipantApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let listed = processor
        .process(ListParticipants)
        .await
        .map_err(ParticipantApiError::Database)?;

    let body: Vec<ParticipantSummary> = listed
        .into_iter()
        .map(|p| ParticipantSummary {
            id: p.id,
            name: p.name,
        })
        .collect();

    Ok(Json(body))
}
