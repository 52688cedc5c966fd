use axum::{Json, extract::State, http::HeaderMap};
use giftex_core::entities::participant::GetParticipantById;
use giftex_core::framework::DatabaseProcessor;
use giftex_sdk::objects::{Identity, SessionInfo};
use kanau::processor::Processor;

use super::ParticipantApiError;
use crate::api::extractors::token_from_headers;
use crate::state::AppState;

/// `GET /session` — who the caller currently is.
///
/// Always 200: an absent, malformed, expired, or orphaned session (the
/// participant was deleted meanwhile) is reported as `null`, not an error.
pub(super) async fn current_identity(
    state: State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Option<SessionInfo>>, ParticipantApiError> {
    let Some(token) = token_from_headers(&headers) else {
        return Ok(Json(None));
    };
    let Some(identity) = state.sessions.resolve(token).await else {
        return Ok(Json(None));
    };

    let info = match identity {
        Identity::Admin => SessionInfo {
            identity,
            name: "Admin".to_string(),
        },
        Identity::Participant { id } => {
            let processor = DatabaseProcessor {
                pool: state.db.clone(),
            };
            match processor
                .process(GetParticipantById { id })
                .await
                .map_err(ParticipantApiError::Database)?
            {
                Some(participant) => SessionInfo {
                    identity,
                    name: participant.name,
                },
                None => return Ok(Json(None)),
            }
        }
    };

    Ok(Json(Some(info)))
}
