//! Publications and their comments
//!
//! Routes (all authenticated):
//! - `GET /posts` - newest first, filterable by `author`, `from_date`, `to_date`
//! - `POST /posts` - publish as the caller
//! - `GET /posts/{id}` - publication, author and the three newest comments
//! - `GET /posts/{id}/comments` - newest first
//! - `POST /posts/{id}/comments` - comment as the caller

pub mod counters;
pub mod handlers;
pub mod service;

pub use service::PublicationService;

use axum::Router;
use axum::routing::get;

use crate::server::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts",
            get(handlers::list_publications).post(handlers::create_publication),
        )
        .route("/posts/{id}", get(handlers::get_publication))
        .route(
            "/posts/{id}/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
}
