//! Simulated access tokens

use gateway_shared::{now, Timestamp};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Token handed to the caller. The ttl is advisory; nothing enforces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub issued_at: Timestamp,
    pub ttl_seconds: u64,
}

impl IssuedToken {
    pub fn generate(ttl_seconds: u64) -> Self {
        let issued_at = now();
        let salt: [u8; 16] = rand::random();

        let mut hasher = Sha256::new();
        hasher.update(Uuid::new_v4().as_bytes());
        hasher.update(salt);
        hasher.update(issued_at.to_rfc3339().as_bytes());

        Self {
            token: hex::encode(hasher.finalize()),
            issued_at,
            ttl_seconds,
        }
    }
}
