//! API request and response objects.

pub mod admin;
pub mod identity;
pub mod participant;

pub use admin::{AddParticipantRequest, AddParticipantResponse, ResetDrawsResponse, RosterEntry, SetPartnersRequest};
pub use identity::{Identity, LoginRequest, LoginResponse, SessionInfo};
pub use participant::{DrawResponse, ParticipantSummary};

use serde::{Deserialize, Serialize};

/// Generic acknowledgement body for operations with no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub ok: bool,
}

impl Ack {
    pub const OK: Ack = Ack { ok: true };
}
