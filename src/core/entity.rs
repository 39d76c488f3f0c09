//! Base trait shared by every stored record

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all records kept by a [`SocialStore`](crate::core::store::SocialStore).
///
/// Every record has:
/// - id: Unique identifier
/// - created: Creation timestamp, used for newest-first ordering
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable type name used in error messages (e.g., "User")
    fn resource_name() -> &'static str;

    /// Get the unique identifier for this record
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created(&self) -> DateTime<Utc>;
}

/// Sort records newest first.
///
/// Records must be passed in insertion order; records sharing a timestamp
/// keep reverse insertion order, so the most recently stored comes first.
pub fn newest_first<T: Entity>(records: impl DoubleEndedIterator<Item = T>) -> Vec<T> {
    let mut sorted: Vec<T> = records.rev().collect();
    sorted.sort_by_key(|record| std::cmp::Reverse(record.created()));
    sorted
}
