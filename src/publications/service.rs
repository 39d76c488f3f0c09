//! Publishing and commenting

use std::sync::Arc;
use uuid::Uuid;

use crate::core::entity::Entity;
use crate::core::error::{EntityError, SocialResult};
use crate::core::filters::PublicationFilter;
use crate::core::pagination::{Page, PageRequest, Paginator};
use crate::core::store::{CounterKind, SocialStore};
use crate::entities::{
    NewComment, NewPublication, Publication, PublicationComment, PublicationDetail, User,
};
use crate::publications::counters::record_contribution;

/// Number of comments embedded in a publication detail
pub const LATEST_COMMENTS: usize = 3;

#[derive(Clone)]
pub struct PublicationService {
    store: Arc<dyn SocialStore>,
    paginator: Paginator,
}

impl PublicationService {
    pub fn new(store: Arc<dyn SocialStore>, paginator: Paginator) -> Self {
        Self { store, paginator }
    }

    /// Store a publication written by `author`, then bump their counter
    pub async fn publish(&self, author: &Uuid, payload: NewPublication) -> SocialResult<Publication> {
        let publication = self
            .store
            .create_publication(Publication::new(*author, payload.title, payload.content))
            .await?;
        tracing::info!(publication_id = %publication.id, user_id = %author, "publication created");

        record_contribution(self.store.as_ref(), author, CounterKind::Publications).await;
        Ok(publication)
    }

    pub async fn list(
        &self,
        filter: &PublicationFilter,
        request: PageRequest,
    ) -> SocialResult<Page<Publication>> {
        let publications = self.store.list_publications(filter).await?;
        Ok(self.paginator.paginate(&publications, request)?)
    }

    /// A publication with its author and its newest comments
    pub async fn detail(&self, id: &Uuid) -> SocialResult<PublicationDetail> {
        let publication = self.require(id).await?;
        let author = self
            .store
            .get_user(&publication.author)
            .await?
            .ok_or_else(|| EntityError::not_found(User::resource_name(), publication.author))?;
        let last_3_comments = self.store.latest_comments(id, LATEST_COMMENTS).await?;

        Ok(PublicationDetail {
            publication,
            last_3_comments,
            author,
        })
    }

    /// Store a comment by `author` on publication `id`, then bump their counter
    pub async fn comment(
        &self,
        author: &Uuid,
        id: &Uuid,
        payload: NewComment,
    ) -> SocialResult<PublicationComment> {
        let comment = self
            .store
            .create_comment(PublicationComment::new(*author, *id, payload.content))
            .await?;
        tracing::info!(comment_id = %comment.id, publication_id = %id, user_id = %author, "comment created");

        record_contribution(self.store.as_ref(), author, CounterKind::Comments).await;
        Ok(comment)
    }

    pub async fn comments(
        &self,
        id: &Uuid,
        request: PageRequest,
    ) -> SocialResult<Page<PublicationComment>> {
        self.require(id).await?;
        let comments = self.store.list_comments(id).await?;
        Ok(self.paginator.paginate(&comments, request)?)
    }

    async fn require(&self, id: &Uuid) -> SocialResult<Publication> {
        self.store
            .get_publication(id)
            .await?
            .ok_or_else(|| EntityError::not_found(Publication::resource_name(), *id).into())
    }
}
