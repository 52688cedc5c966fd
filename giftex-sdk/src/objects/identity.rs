//! Caller identity and session types.
//!
//! The admin is not a participant row; it is its own identity variant with a
//! shared credential. Handlers receive the resolved [`Identity`] as an
//! explicit value, there is no ambient session state.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is making the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Identity {
    /// The synthetic admin identity. Never stored in the roster and never
    /// eligible to draw.
    Admin,
    /// A regular participant, identified by their roster id.
    Participant { id: i64 },
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        matches!(self, Identity::Admin)
    }

    /// The participant id, or `None` for the admin identity.
    pub fn participant_id(&self) -> Option<i64> {
        match self {
            Identity::Admin => None,
            Identity::Participant { id } => Some(*id),
        }
    }
}

/// Request body for `POST /api/session`.
///
/// Participants authenticate by picking their own roster entry; only the
/// admin identity carries a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoginRequest {
    Admin { password: String },
    Participant { id: i64 },
}

/// Response body for `POST /api/session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque session token, sent back in the `Giftex-Session` header.
    pub token: Uuid,
    pub is_admin: bool,
}

/// Response body for `GET /api/session`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub identity: Identity,
    /// Display name: the participant's roster name, or `"Admin"`.
    pub name: String,
}
