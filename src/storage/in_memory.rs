//! In-memory implementation of SocialStore for testing and development

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

use crate::core::entity::{Entity, newest_first};
use crate::core::error::{EntityError, SocialResult, StorageError};
use crate::core::filters::{PublicationFilter, UserFilter};
use crate::core::store::{CounterKind, SocialStore};
use crate::entities::{AuthToken, Publication, PublicationComment, User};

#[derive(Default)]
struct Tables {
    /// Insertion order is creation order
    users: Vec<User>,
    /// (follower, followed) edges in the order they were created
    follows: Vec<(Uuid, Uuid)>,
    tokens: HashMap<String, AuthToken>,
    token_by_user: HashMap<Uuid, String>,
    publications: Vec<Publication>,
    comments: Vec<PublicationComment>,
}

impl Tables {
    fn user(&self, id: &Uuid) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    fn user_mut(&mut self, id: &Uuid) -> Result<&mut User, EntityError> {
        self.users
            .iter_mut()
            .find(|u| &u.id == id)
            .ok_or_else(|| EntityError::not_found(User::resource_name(), *id))
    }

    fn require_user(&self, id: &Uuid) -> Result<(), EntityError> {
        self.user(id)
            .map(|_| ())
            .ok_or_else(|| EntityError::not_found(User::resource_name(), *id))
    }

    fn publication(&self, id: &Uuid) -> Option<&Publication> {
        self.publications.iter().find(|p| &p.id == id)
    }
}

/// In-memory social store
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemorySocialStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemorySocialStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StorageError> {
        self.tables.read().map_err(|e| StorageError::LockPoisoned {
            resource: format!("social tables: {}", e),
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StorageError> {
        self.tables.write().map_err(|e| StorageError::LockPoisoned {
            resource: format!("social tables: {}", e),
        })
    }
}

#[async_trait]
impl SocialStore for InMemorySocialStore {
    async fn create_user(&self, user: User) -> SocialResult<User> {
        let mut tables = self.write()?;

        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(EntityError::AlreadyExists {
                entity_type: "user".to_string(),
                field: "username".to_string(),
                value: user.username,
            }
            .into());
        }
        if tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(EntityError::AlreadyExists {
                entity_type: "user".to_string(),
                field: "email".to_string(),
                value: user.email,
            }
            .into());
        }

        tables.users.push(user.clone());
        Ok(user)
    }

    async fn get_user(&self, id: &Uuid) -> SocialResult<Option<User>> {
        Ok(self.read()?.user(id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> SocialResult<Option<User>> {
        Ok(self
            .read()?
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list_users(&self, filter: &UserFilter) -> SocialResult<Vec<User>> {
        Ok(self
            .read()?
            .users
            .iter()
            .filter(|u| filter.matches(u))
            .cloned()
            .collect())
    }

    async fn follow(&self, user_id: &Uuid, target_id: &Uuid) -> SocialResult<()> {
        let mut tables = self.write()?;
        tables.require_user(user_id)?;
        tables.require_user(target_id)?;

        let edge = (*user_id, *target_id);
        if !tables.follows.contains(&edge) {
            tables.follows.push(edge);
        }
        Ok(())
    }

    async fn following_ids(&self, user_id: &Uuid) -> SocialResult<Vec<Uuid>> {
        Ok(self
            .read()?
            .follows
            .iter()
            .filter(|(follower, _)| follower == user_id)
            .map(|(_, followed)| *followed)
            .collect())
    }

    async fn follower_ids(&self, user_id: &Uuid) -> SocialResult<Vec<Uuid>> {
        Ok(self
            .read()?
            .follows
            .iter()
            .filter(|(_, followed)| followed == user_id)
            .map(|(follower, _)| *follower)
            .collect())
    }

    async fn increment_counter(&self, user_id: &Uuid, counter: CounterKind) -> SocialResult<u64> {
        let mut tables = self.write()?;
        let user = tables.user_mut(user_id)?;

        let value = match counter {
            CounterKind::Publications => &mut user.publications_count,
            CounterKind::Comments => &mut user.comments_count,
        };
        *value += 1;
        Ok(*value)
    }

    async fn touch_last_login(&self, user_id: &Uuid) -> SocialResult<()> {
        let mut tables = self.write()?;
        tables.user_mut(user_id)?.last_login = Some(Utc::now());
        Ok(())
    }

    async fn get_or_create_token(&self, user_id: &Uuid) -> SocialResult<AuthToken> {
        let mut tables = self.write()?;
        tables.require_user(user_id)?;

        if let Some(token) = tables
            .token_by_user
            .get(user_id)
            .and_then(|key| tables.tokens.get(key))
        {
            return Ok(token.clone());
        }

        let token = AuthToken::generate(*user_id);
        tables.token_by_user.insert(*user_id, token.key.clone());
        tables.tokens.insert(token.key.clone(), token.clone());
        Ok(token)
    }

    async fn user_for_token(&self, key: &str) -> SocialResult<Option<User>> {
        let tables = self.read()?;
        Ok(tables
            .tokens
            .get(key)
            .and_then(|token| tables.user(&token.user_id))
            .cloned())
    }

    async fn create_publication(&self, publication: Publication) -> SocialResult<Publication> {
        let mut tables = self.write()?;
        tables.require_user(&publication.author)?;

        tables.publications.push(publication.clone());
        Ok(publication)
    }

    async fn get_publication(&self, id: &Uuid) -> SocialResult<Option<Publication>> {
        Ok(self.read()?.publication(id).cloned())
    }

    async fn list_publications(&self, filter: &PublicationFilter) -> SocialResult<Vec<Publication>> {
        let tables = self.read()?;
        Ok(newest_first(
            tables
                .publications
                .iter()
                .filter(|p| filter.matches(p))
                .cloned(),
        ))
    }

    async fn create_comment(&self, comment: PublicationComment) -> SocialResult<PublicationComment> {
        let mut tables = self.write()?;
        tables.require_user(&comment.author)?;
        if tables.publication(&comment.publication).is_none() {
            return Err(
                EntityError::not_found(Publication::resource_name(), comment.publication).into(),
            );
        }

        tables.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(&self, publication_id: &Uuid) -> SocialResult<Vec<PublicationComment>> {
        let tables = self.read()?;
        Ok(newest_first(
            tables
                .comments
                .iter()
                .filter(|c| &c.publication == publication_id)
                .cloned(),
        ))
    }

    async fn latest_comments(
        &self,
        publication_id: &Uuid,
        limit: usize,
    ) -> SocialResult<Vec<PublicationComment>> {
        let mut comments = self.list_comments(publication_id).await?;
        comments.truncate(limit);
        Ok(comments)
    }
}
