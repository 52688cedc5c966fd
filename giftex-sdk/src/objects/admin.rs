//! Admin API request and response types.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// Body for `POST /api/admin/participants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddParticipantRequest {
    pub name: String,
}

/// Body for `PUT /api/admin/partners`.
///
/// Both directions are written; the caller is responsible for picking a
/// sensible pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPartnersRequest {
    pub a: i64,
    pub b: i64,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Body returned by `POST /api/admin/participants`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddParticipantResponse {
    pub id: i64,
    pub name: String,
}

/// Body returned by `POST /api/admin/reset-draws`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetDrawsResponse {
    pub ok: bool,
    /// Number of assignments that were cleared.
    pub cleared: u64,
}

/// Full roster row for the admin table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: i64,
    pub name: String,
    pub partner_id: Option<i64>,
    pub drawn_id: Option<i64>,
    pub created_at: i64,
}
