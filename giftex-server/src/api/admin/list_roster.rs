use axum::{Json, extract::State, response::IntoResponse};
use giftex_core::entities::participant::ListRoster;
use giftex_core::framework::DatabaseProcessor;
use giftex_sdk::objects::RosterEntry;
use kanau::processor::Processor;

use super::AdminApiError;
use crate::api::extractors::AdminAuth;
use crate::state::AppState;

/// `GET /roster` — the full roster, including partner and drawn references.
pub(super) async fn list_roster(
    state: State<AppState>,
    _auth: AdminAuth,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let roster = processor
        .process(ListRoster)
        .await
        .map_err(AdminApiError::Database)?;

    let body: Vec<RosterEntry> = roster
        .into_iter()
        .map(|p| RosterEntry {
            id: p.id,
            name: p.name,
            partner_id: p.partner_id,
            drawn_id: p.drawn_id,
            created_at: p.created_at,
        })
        .collect();

    Ok(Json(body))
}
