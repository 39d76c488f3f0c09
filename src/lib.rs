//! # This-Social
//!
//! A social publishing backend: users register, follow one another, publish
//! posts and comment on them, all behind a token-authenticated JSON API.
//!
//! ## Features
//!
//! - **Generic Pagination**: one [`Paginator`](core::pagination::Paginator) for
//!   every list endpoint, with `page_number` / `page_size` and navigation links
//! - **Typed Filters**: date ranges, author and username filters parsed once
//! - **Token Auth**: `Authorization: Token <key>` issued by `/api-token-auth`
//! - **Explicit Counters**: per-author publication and comment counts updated
//!   right after each write
//! - **Pluggable Storage**: everything goes through the
//!   [`SocialStore`](core::store::SocialStore) trait
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use social::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     ServerBuilder::new()
//!         .with_config(AppConfig::load()?)
//!         .with_store(InMemorySocialStore::new())
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod publications;
pub mod server;
pub mod storage;
pub mod users;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        auth::{AuthContext, AuthPolicy, AuthProvider, TokenAuthProvider},
        entity::Entity,
        error::{SocialError, SocialResult},
        filters::{PublicationFilter, UserFilter},
        pagination::{Page, PageEnvelope, PageRequest, Paginator},
        store::{CounterKind, SocialStore},
    };

    // === Entities ===
    pub use crate::entities::{AuthToken, Publication, PublicationComment, User};

    // === Services ===
    pub use crate::publications::PublicationService;
    pub use crate::users::UserService;

    // === Storage ===
    pub use crate::storage::InMemorySocialStore;

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, build_router};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}
