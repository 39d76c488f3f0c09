//! Opaque API tokens

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Length in bytes of the random part of a token (hex-encoded to 40 chars)
const TOKEN_BYTES: usize = 20;

/// The single API token owned by a user
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthToken {
    #[serde(rename = "token")]
    pub key: String,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
    #[serde(skip_serializing)]
    pub created: DateTime<Utc>,
}

impl AuthToken {
    /// Issue a fresh random token for `user_id`
    pub fn generate(user_id: Uuid) -> Self {
        let bytes: [u8; TOKEN_BYTES] = rand::random();
        Self {
            key: hex::encode(bytes),
            user_id,
            created: Utc::now(),
        }
    }
}
