//! In-memory session store.
//!
//! Login issues an opaque v4 UUID token mapped to an [`Identity`]. Tokens
//! expire after [`SESSION_MAX_AGE`] and expired entries are swept lazily on
//! every new login. The resolved identity is handed to handlers as an
//! explicit request-scoped value; nothing else reads this map.

use giftex_sdk::objects::Identity;
use std::collections::HashMap;
use std::sync::Arc;
use time::{Duration, OffsetDateTime};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Sessions expire a day after login.
pub const SESSION_MAX_AGE: Duration = Duration::hours(24);

#[derive(Debug, Clone, Copy)]
struct Session {
    identity: Identity,
    issued_at: OffsetDateTime,
}

impl Session {
    fn is_expired(&self, now: OffsetDateTime) -> bool {
        now - self.issued_at >= SESSION_MAX_AGE
    }
}

/// Shared token → identity map.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token for `identity`, sweeping expired sessions.
    pub async fn create(&self, identity: Identity) -> Uuid {
        let now = OffsetDateTime::now_utc();
        let token = Uuid::new_v4();

        let mut sessions = self.inner.write().await;
        sessions.retain(|_, session| !session.is_expired(now));
        sessions.insert(
            token,
            Session {
                identity,
                issued_at: now,
            },
        );
        token
    }

    /// The identity behind `token`, unless unknown or expired.
    pub async fn resolve(&self, token: Uuid) -> Option<Identity> {
        let sessions = self.inner.read().await;
        let session = sessions.get(&token)?;
        if session.is_expired(OffsetDateTime::now_utc()) {
            return None;
        }
        Some(session.identity)
    }

    /// Drop `token`. Returns whether it existed.
    pub async fn revoke(&self, token: Uuid) -> bool {
        self.inner.write().await.remove(&token).is_some()
    }

    #[cfg(test)]
    async fn create_issued_at(&self, identity: Identity, issued_at: OffsetDateTime) -> Uuid {
        let token = Uuid::new_v4();
        self.inner
            .write()
            .await
            .insert(token, Session { identity, issued_at });
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_resolve_revoke() {
        let store = SessionStore::new();
        let token = store.create(Identity::Participant { id: 7 }).await;

        assert_eq!(
            store.resolve(token).await,
            Some(Identity::Participant { id: 7 })
        );
        assert!(store.revoke(token).await);
        assert_eq!(store.resolve(token).await, None);
        assert!(!store.revoke(token).await);
    }

    #[tokio::test]
    async fn test_unknown_token_resolves_to_none() {
        let store = SessionStore::new();
        assert_eq!(store.resolve(Uuid::new_v4()).await, None);
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected_and_swept() {
        let store = SessionStore::new();
        let stale = OffsetDateTime::now_utc() - SESSION_MAX_AGE - Duration::minutes(1);
        let expired = store.create_issued_at(Identity::Admin, stale).await;

        assert_eq!(store.resolve(expired).await, None);

        // The next login sweeps it out of the map entirely.
        store.create(Identity::Participant { id: 1 }).await;
        assert!(!store.revoke(expired).await);
    }
}
