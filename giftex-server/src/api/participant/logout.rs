use axum::{Json, extract::State, http::HeaderMap};
use giftex_sdk::objects::Ack;

use crate::api::extractors::token_from_headers;
use crate::state::AppState;

/// `DELETE /session` — end the session.
///
/// Revoking is best-effort: a missing or already-dead token still gets an
/// acknowledgement.
pub(super) async fn logout(state: State<AppState>, headers: HeaderMap) -> Json<Ack> {
    if let Some(token) = token_from_headers(&headers) {
        state.sessions.revoke(token).await;
    }
    Json(Ack::OK)
}
