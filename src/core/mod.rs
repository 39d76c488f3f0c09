//! Core module containing fundamental traits and types

pub mod auth;
pub mod entity;
pub mod error;
pub mod filters;
pub mod pagination;
pub mod store;

pub use auth::{AuthContext, AuthPolicy, AuthProvider, TokenAuthProvider};
pub use entity::Entity;
pub use error::{SocialError, SocialResult};
pub use filters::{PublicationFilter, PublicationFilterQuery, UserFilter, UserFilterQuery};
pub use pagination::{Page, PageEnvelope, PageLinks, PageQuery, PageRequest, Paginator};
pub use store::{CounterKind, SocialStore};
