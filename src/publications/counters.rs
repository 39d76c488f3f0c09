//! Per-author activity counters
//!
//! Called by the write path right after a publication or comment is stored.
//! The record is already committed at that point, so a failed counter update
//! is logged and swallowed instead of failing the request.

use uuid::Uuid;

use crate::core::store::{CounterKind, SocialStore};

/// Bump `counter` for `author`, logging instead of failing
pub async fn record_contribution(store: &dyn SocialStore, author: &Uuid, counter: CounterKind) {
    match store.increment_counter(author, counter).await {
        Ok(value) => {
            tracing::debug!(user_id = %author, counter = %counter, value, "counter updated");
        }
        Err(e) => {
            tracing::warn!(user_id = %author, counter = %counter, error = %e, "failed to update counter");
        }
    }
}
