//! HTTP handlers for publications and comments

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::core::error::SocialResult;
use crate::core::filters::{PublicationFilter, PublicationFilterQuery};
use crate::core::pagination::PageEnvelope;
use crate::entities::{
    NewComment, NewPublication, Publication, PublicationComment, PublicationDetail,
};
use crate::server::extract::{CurrentUser, Paging, PathParams, QueryParams, ValidatedJson};
use crate::server::state::AppState;

/// `GET /posts`
pub async fn list_publications(
    State(state): State<AppState>,
    _caller: CurrentUser,
    QueryParams(query): QueryParams<PublicationFilterQuery>,
    paging: Paging,
) -> SocialResult<Json<PageEnvelope<Publication>>> {
    let filter = PublicationFilter::parse(&query)?;
    let page = state.publications.list(&filter, paging.request).await?;
    Ok(Json(page.into_envelope(&paging.links)))
}

/// `POST /posts`
pub async fn create_publication(
    State(state): State<AppState>,
    caller: CurrentUser,
    ValidatedJson(payload): ValidatedJson<NewPublication>,
) -> SocialResult<impl IntoResponse> {
    let publication = state.publications.publish(&caller.user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(publication)))
}

/// `GET /posts/{id}`
pub async fn get_publication(
    State(state): State<AppState>,
    _caller: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> SocialResult<Json<PublicationDetail>> {
    Ok(Json(state.publications.detail(&id).await?))
}

/// `GET /posts/{id}/comments`
pub async fn list_comments(
    State(state): State<AppState>,
    _caller: CurrentUser,
    PathParams(id): PathParams<Uuid>,
    paging: Paging,
) -> SocialResult<Json<PageEnvelope<PublicationComment>>> {
    let page = state.publications.comments(&id, paging.request).await?;
    Ok(Json(page.into_envelope(&paging.links)))
}

/// `POST /posts/{id}/comments`
pub async fn create_comment(
    State(state): State<AppState>,
    caller: CurrentUser,
    PathParams(id): PathParams<Uuid>,
    ValidatedJson(payload): ValidatedJson<NewComment>,
) -> SocialResult<impl IntoResponse> {
    let comment = state
        .publications
        .comment(&caller.user_id, &id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}
