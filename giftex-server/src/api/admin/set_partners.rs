use axum::{Json, extract::State, response::IntoResponse};
use giftex_core::entities::participant::SetPartnerPair;
use giftex_core::framework::DatabaseProcessor;
use giftex_sdk::objects::{Ack, SetPartnersRequest};
use kanau::processor::Processor;

use super::AdminApiError;
use crate::api::extractors::AdminAuth;
use crate::state::AppState;

/// `PUT /partners` — declare two participants as partners.
///
/// Both directions are written in one transaction. The ids are not validated
/// against the roster: an id that matches no row simply updates nothing, and
/// the draw engine tolerates the resulting one-sided pairings.
pub(super) async fn set_partners(
    state: State<AppState>,
    _auth: AdminAuth,
    Json(body): Json<SetPartnersRequest>,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    processor
        .process(SetPartnerPair {
            a: body.a,
            b: body.b,
        })
        .await
        .map_err(AdminApiError::Database)?;

    tracing::info!(a = body.a, b = body.b, "Partner pair set");
    Ok(Json(Ack::OK))
}
