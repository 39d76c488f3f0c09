//! Request extractors
//!
//! Every extractor here rejects with [`SocialError`], so failures reach the
//! client in the same `{code, message, details}` shape as handler errors.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, OriginalUri, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::core::auth::{AuthContext, AuthPolicy};
use crate::core::error::{RequestError, SocialError};
use crate::core::pagination::{PageLinks, PageQuery, PageRequest};
use crate::server::state::AppState;

/// JSON body that is deserialized and then validated
///
/// Malformed JSON is a 400 `BAD_REQUEST`; a body that fails its `validator`
/// rules is a 400 `VALIDATION_ERROR` listing every offending field.
///
/// ```rust,ignore
/// async fn create(ValidatedJson(payload): ValidatedJson<NewPublication>) { .. }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = SocialError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| RequestError::BadRequest {
                message: rejection.body_text(),
            })?;

        payload.validate()?;
        Ok(Self(payload))
    }
}

/// Query string parameters, rejecting with a 400 `BAD_REQUEST`
pub struct QueryParams<T>(pub T);

impl<S, T> FromRequestParts<S> for QueryParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = SocialError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) =
            Query::<T>::try_from_uri(&parts.uri).map_err(|rejection| RequestError::BadRequest {
                message: rejection.body_text(),
            })?;
        Ok(Self(params))
    }
}

/// Path parameters, rejecting with a 400 `BAD_REQUEST` (e.g. a malformed id)
pub struct PathParams<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParams<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = SocialError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| RequestError::BadRequest {
                message: rejection.body_text(),
            })?;
        Ok(Self(params))
    }
}

/// The caller's auth context; anonymous when no credentials were sent
pub struct Auth(pub AuthContext);

impl FromRequestParts<AppState> for Auth {
    type Rejection = SocialError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state.auth.extract_context(&parts.headers).await.map(Auth)
    }
}

/// An authenticated caller. Rejects anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: Uuid,
    pub username: String,
}

impl CurrentUser {
    pub fn context(&self) -> AuthContext {
        AuthContext::User {
            user_id: self.user_id,
            username: self.username.clone(),
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = SocialError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Auth(context) = Auth::from_request_parts(parts, state).await?;
        AuthPolicy::Authenticated.enforce(&context)?;

        match context {
            AuthContext::User { user_id, username } => Ok(Self { user_id, username }),
            AuthContext::Anonymous => Err(RequestError::Unauthorized {
                message: "Authentication credentials were not provided.".to_string(),
            }
            .into()),
        }
    }
}

/// Page selection plus the link builder for the current request
#[derive(Debug, Clone)]
pub struct Paging {
    pub request: PageRequest,
    pub links: PageLinks,
}

impl FromRequestParts<AppState> for Paging {
    type Rejection = SocialError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let QueryParams(query) = QueryParams::<PageQuery>::from_request_parts(parts, state).await?;
        let request = state.paginator.request(&query)?;

        let links = match parts.extensions.get::<OriginalUri>() {
            Some(OriginalUri(uri)) => PageLinks::from_uri(uri),
            None => PageLinks::from_uri(&parts.uri),
        };

        Ok(Self { request, links })
    }
}
