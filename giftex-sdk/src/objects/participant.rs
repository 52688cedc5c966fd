//! Participant-facing request and response types.

use serde::{Deserialize, Serialize};

/// Public roster entry: what anyone may see before logging in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantSummary {
    pub id: i64,
    pub name: String,
}

/// Response body for `POST /api/draw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResponse {
    pub recipient_id: i64,
    pub recipient_name: String,
    /// `true` when the assignment already existed and was returned as-is.
    pub already_drawn: bool,
}
