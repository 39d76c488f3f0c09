//! Storage trait for users, follows, tokens, publications and comments

use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

use crate::core::error::SocialResult;
use crate::core::filters::{PublicationFilter, UserFilter};
use crate::entities::{AuthToken, Publication, PublicationComment, User};

/// Per-user activity counters maintained after writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterKind {
    Publications,
    Comments,
}

impl fmt::Display for CounterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterKind::Publications => write!(f, "publications_count"),
            CounterKind::Comments => write!(f, "comments_count"),
        }
    }
}

/// Storage backend for the social graph
///
/// List operations return records already filtered and ordered; callers
/// hand the result straight to the [`Paginator`](crate::core::pagination::Paginator).
/// Lookups return `Ok(None)` for missing records; operations that reference
/// another record fail with `EntityError::NotFound` when it is missing.
#[async_trait]
pub trait SocialStore: Send + Sync {
    // === Users ===

    /// Insert a user. Fails with `EntityError::AlreadyExists` when the
    /// username or email is taken.
    async fn create_user(&self, user: User) -> SocialResult<User>;

    async fn get_user(&self, id: &Uuid) -> SocialResult<Option<User>>;

    async fn find_user_by_username(&self, username: &str) -> SocialResult<Option<User>>;

    /// Users matching `filter`, oldest account first
    async fn list_users(&self, filter: &UserFilter) -> SocialResult<Vec<User>>;

    /// Record that `user_id` follows `target_id`. Following twice is a no-op.
    async fn follow(&self, user_id: &Uuid, target_id: &Uuid) -> SocialResult<()>;

    /// Ids `user_id` follows, in the order the follows happened
    async fn following_ids(&self, user_id: &Uuid) -> SocialResult<Vec<Uuid>>;

    /// Ids following `user_id`, in the order the follows happened
    async fn follower_ids(&self, user_id: &Uuid) -> SocialResult<Vec<Uuid>>;

    /// Bump a counter and return its new value
    async fn increment_counter(&self, user_id: &Uuid, counter: CounterKind) -> SocialResult<u64>;

    async fn touch_last_login(&self, user_id: &Uuid) -> SocialResult<()>;

    // === Tokens ===

    /// Return the user's token, issuing one on first use
    async fn get_or_create_token(&self, user_id: &Uuid) -> SocialResult<AuthToken>;

    async fn user_for_token(&self, key: &str) -> SocialResult<Option<User>>;

    // === Publications ===

    /// Insert a publication. The author must exist.
    async fn create_publication(&self, publication: Publication) -> SocialResult<Publication>;

    async fn get_publication(&self, id: &Uuid) -> SocialResult<Option<Publication>>;

    /// Publications matching `filter`, newest first
    async fn list_publications(&self, filter: &PublicationFilter) -> SocialResult<Vec<Publication>>;

    // === Comments ===

    /// Insert a comment. The author and the publication must exist.
    async fn create_comment(&self, comment: PublicationComment) -> SocialResult<PublicationComment>;

    /// Comments on a publication, newest first
    async fn list_comments(&self, publication_id: &Uuid) -> SocialResult<Vec<PublicationComment>>;

    /// At most `limit` comments on a publication, newest first
    async fn latest_comments(
        &self,
        publication_id: &Uuid,
        limit: usize,
    ) -> SocialResult<Vec<PublicationComment>>;
}
