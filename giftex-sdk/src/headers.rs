//! HTTP header names used by the Giftex API.

/// Header carrying the session token issued by `POST /api/session`.
pub const SESSION_HEADER: &str = "Giftex-Session";
