//! HTTP handlers for accounts, following and tokens

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::core::error::SocialResult;
use crate::core::filters::{UserFilter, UserFilterQuery};
use crate::core::pagination::PageEnvelope;
use crate::entities::{AuthToken, RegisterUser, TokenCredentials, User, UserDetail};
use crate::server::extract::{CurrentUser, Paging, PathParams, QueryParams, ValidatedJson};
use crate::server::state::AppState;

/// Body returned by a successful follow
#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub message: String,
}

/// `POST /users`
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterUser>,
) -> SocialResult<impl IntoResponse> {
    let user = state.users.register(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `GET /users`
pub async fn list_users(
    State(state): State<AppState>,
    _caller: CurrentUser,
    QueryParams(query): QueryParams<UserFilterQuery>,
    paging: Paging,
) -> SocialResult<Json<PageEnvelope<User>>> {
    let filter = UserFilter::parse(&query);
    let page = state.users.list(&filter, paging.request).await?;
    Ok(Json(page.into_envelope(&paging.links)))
}

/// `GET /users/{id}`
pub async fn get_user(
    State(state): State<AppState>,
    _caller: CurrentUser,
    PathParams(id): PathParams<Uuid>,
) -> SocialResult<Json<UserDetail>> {
    Ok(Json(state.users.detail(&id).await?))
}

/// `POST /users/{id}/follow/{followed_id}`
pub async fn follow(
    State(state): State<AppState>,
    caller: CurrentUser,
    PathParams((id, followed_id)): PathParams<(Uuid, Uuid)>,
) -> SocialResult<Json<FollowResponse>> {
    state
        .users
        .follow(&caller.context(), &id, &followed_id)
        .await?;

    Ok(Json(FollowResponse {
        message: format!(
            "User with id={} is now following User with id={}.",
            id, followed_id
        ),
    }))
}

/// `POST /api-token-auth`
pub async fn obtain_token(
    State(state): State<AppState>,
    ValidatedJson(credentials): ValidatedJson<TokenCredentials>,
) -> SocialResult<Json<AuthToken>> {
    Ok(Json(state.users.obtain_token(credentials).await?))
}
