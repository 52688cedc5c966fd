use axum::{Json, extract::State, response::IntoResponse};
use giftex_core::draw::{DrawEngine, DrawError};
use giftex_sdk::objects::DrawResponse;

use super::ParticipantApiError;
use crate::api::extractors::SessionIdentity;
use crate::state::AppState;

/// `POST /draw` — assign a recipient to the logged-in participant, or return
/// the existing assignment.
///
/// The admin identity is rejected before the engine runs; it owns no roster
/// row to draw from.
pub(super) async fn draw(
    state: State<AppState>,
    SessionIdentity(identity): SessionIdentity,
) -> Result<impl IntoResponse, ParticipantApiError> {
    let Some(participant_id) = identity.participant_id() else {
        return Err(ParticipantApiError::AdminCannotDraw);
    };

    let engine = DrawEngine::new(state.db.clone());
    let outcome = engine.draw(participant_id).await.map_err(|e| match e {
        DrawError::ParticipantNotFound(_) => ParticipantApiError::NotFound,
        DrawError::NoEligibleCandidates => ParticipantApiError::NoEligibleCandidates,
        DrawError::ClaimConflict => ParticipantApiError::DrawConflict,
        DrawError::Database(e) => ParticipantApiError::Database(e),
    })?;

    Ok(Json(DrawResponse {
        recipient_id: outcome.recipient_id,
        recipient_name: outcome.recipient_name,
        already_drawn: outcome.already_drawn,
    }))
}
