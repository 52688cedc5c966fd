use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use giftex_core::entities::participant::InsertParticipant;
use giftex_core::framework::DatabaseProcessor;
use giftex_sdk::objects::{AddParticipantRequest, AddParticipantResponse};
use kanau::processor::Processor;

use super::AdminApiError;
use crate::api::extractors::AdminAuth;
use crate::state::AppState;

/// `POST /participants` — add a participant by name.
///
/// Names are trimmed and must be unique (case-insensitive); the unique index
/// is the arbiter, so concurrent adds of the same name cannot both succeed.
pub(super) async fn add_participant(
    state: State<AppState>,
    _auth: AdminAuth,
    Json(body): Json<AddParticipantRequest>,
) -> Result<impl IntoResponse, AdminApiError> {
    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(AdminApiError::InvalidName("name must not be empty"));
    }

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    match processor.process(InsertParticipant { name }).await {
        Ok(participant) => {
            tracing::info!(id = participant.id, name = %participant.name, "Participant added");
            Ok((
                StatusCode::CREATED,
                Json(AddParticipantResponse {
                    id: participant.id,
                    name: participant.name,
                }),
            ))
        }
        Err(sqlx::Error::Database(db)) if db.is_unique_violation() => Err(
            AdminApiError::InvalidName("a participant with that name already exists"),
        ),
        Err(e) => Err(AdminApiError::Database(e)),
    }
}
