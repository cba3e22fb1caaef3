//! In-memory session and token store.
//!
//! Both maps are `DashMap`s, so a session is mutated under its own entry
//! lock and concurrent resolutions of one session are serialized. Nothing
//! survives a restart.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use gateway_shared::{SessionId, Timestamp};
use tracing::debug;

use crate::domain::{IssuedToken, PaymentOutcome, PaymentSession};
use crate::error::DomainError;

/// Snapshot of store sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub payments_count: usize,
    pub tokens_count: usize,
}

pub struct SessionStore {
    payments: DashMap<SessionId, PaymentSession>,
    tokens: DashMap<String, Timestamp>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            payments: DashMap::new(),
            tokens: DashMap::new(),
        }
    }

    pub fn record_token(&self, token: &IssuedToken) {
        self.tokens.insert(token.token.clone(), token.issued_at);
        debug!("Recorded token issued at {}", token.issued_at);
    }

    pub fn token_issued_at(&self, token: &str) -> Option<Timestamp> {
        self.tokens.get(token).map(|entry| *entry.value())
    }

    /// Stores a new session together with the token issued for it. On an id
    /// collision neither is kept.
    pub fn insert_session(
        &self,
        session: PaymentSession,
        token: &IssuedToken,
    ) -> Result<(), DomainError> {
        match self.payments.entry(session.id.clone()) {
            Entry::Occupied(_) => Err(DomainError::Internal(format!(
                "session id collision: {}",
                session.id
            ))),
            Entry::Vacant(slot) => {
                debug!("Stored payment session {}", session.id);
                slot.insert(session);
                self.record_token(token);
                Ok(())
            }
        }
    }

    /// Clone of the stored session
    pub fn get_session(&self, session_id: &str) -> Option<PaymentSession> {
        self.payments.get(session_id).map(|entry| entry.value().clone())
    }

    /// Check-and-transition under the session's entry lock. Returns the
    /// session as it stands after the transition.
    pub fn resolve_session(
        &self,
        session_id: &str,
        outcome: PaymentOutcome,
        allow_overwrite: bool,
    ) -> Result<PaymentSession, DomainError> {
        let mut entry = self
            .payments
            .get_mut(session_id)
            .ok_or_else(|| DomainError::SessionNotFound(session_id.to_string()))?;

        entry.resolve(outcome, allow_overwrite)?;
        Ok(entry.value().clone())
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            payments_count: self.payments.len(),
            tokens_count: self.tokens.len(),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
