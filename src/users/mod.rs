//! Users: registration, listing, follow graph and API tokens
//!
//! Routes:
//! - `POST /users` - register (public)
//! - `GET /users` - paginated list, filterable by `username`
//! - `GET /users/{id}` - detail with `following` / `followers`
//! - `POST /users/{id}/follow/{followed_id}` - follow another user
//! - `POST /api-token-auth` - exchange credentials for a token (public)

pub mod handlers;
pub mod service;

pub use service::UserService;

use axum::Router;
use axum::routing::{get, post};

use crate::server::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(handlers::register).get(handlers::list_users))
        .route("/users/{id}", get(handlers::get_user))
        .route("/users/{id}/follow/{followed_id}", post(handlers::follow))
        .route("/api-token-auth", post(handlers::obtain_token))
}
