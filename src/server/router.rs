//! Router assembly

use axum::Router;
use axum::http::Uri;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::core::error::{RequestError, SocialError};
use crate::publications;
use crate::server::state::AppState;
use crate::users;

/// Build the full API router
///
/// - users: `/users`, `/users/{id}`, `/users/{id}/follow/{followed_id}`,
///   `/api-token-auth`
/// - publications: `/posts`, `/posts/{id}`, `/posts/{id}/comments`
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(users::routes())
        .merge(publications::routes())
        .fallback(route_not_found)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

async fn route_not_found(uri: Uri) -> SocialError {
    tracing::debug!(path = %uri.path(), "no route");
    RequestError::RouteNotFound {
        path: uri.path().to_string(),
    }
    .into()
}
