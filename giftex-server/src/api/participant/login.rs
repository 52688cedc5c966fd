use axum::{Json, extract::State, response::IntoResponse};
use giftex_core::entities::participant::GetParticipantById;
use giftex_core::framework::DatabaseProcessor;
use giftex_sdk::objects::{Identity, LoginRequest, LoginResponse};
use kanau::processor::Processor;

use super::ParticipantApiError;
use crate::state::AppState;

/// `POST /session` — authenticate and issue a session token.
///
/// Participants pick their own roster entry; the admin identity carries the
/// shared password, checked against the argon2 hash from the config file.
pub(super) async fn login(
    state: State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ParticipantApiError> {
    match body {
        LoginRequest::Admin { password } => {
            let admin = state.admin.read().await;
            let ok = admin.verify_password(&password);
            drop(admin);
            if !ok {
                return Err(ParticipantApiError::BadAdminPassword);
            }

            let token = state.sessions.create(Identity::Admin).await;
            tracing::info!("Admin session opened");
            Ok(Json(LoginResponse {
                token,
                is_admin: true,
            }))
        }
        LoginRequest::Participant { id } => {
            let processor = DatabaseProcessor {
                pool: state.db.clone(),
            };
            let participant = processor
                .process(GetParticipantById { id })
                .await
                .map_err(ParticipantApiError::Database)?
                .ok_or(ParticipantApiError::NotFound)?;

            let token = state
                .sessions
                .create(Identity::Participant { id: participant.id })
                .await;
            tracing::debug!(participant = participant.id, "Participant session opened");
            Ok(Json(LoginResponse {
                token,
                is_admin: false,
            }))
        }
    }
}
