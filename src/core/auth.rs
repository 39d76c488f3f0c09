//! Token authentication and authorization policies
//!
//! Clients authenticate with the header `Authorization: Token <key>`, where
//! the key comes from `POST /api-token-auth`. The `Bearer` scheme is accepted
//! as an alias.
//!
//! A request without the header is [`AuthContext::Anonymous`]; a request with
//! a header naming an unknown key is rejected outright.

use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::{RequestError, SocialResult};
use crate::core::store::SocialStore;

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthContext {
    /// Authenticated user
    User { user_id: Uuid, username: String },

    /// No credentials presented
    Anonymous,
}

impl AuthContext {
    /// Get user_id if available
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            AuthContext::User { user_id, .. } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthContext::User { .. })
    }
}

/// Authorization policy for an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,

    /// Only the user with this id
    Owner(Uuid),
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    pub fn check(&self, context: &AuthContext) -> bool {
        match self {
            AuthPolicy::Public => true,
            AuthPolicy::Authenticated => context.is_authenticated(),
            AuthPolicy::Owner(owner) => context.user_id() == Some(*owner),
        }
    }

    /// Like [`check`](Self::check), but produces the error to return:
    /// 401 for anonymous callers, 403 for authenticated callers that fail
    /// the policy.
    pub fn enforce(&self, context: &AuthContext) -> Result<(), RequestError> {
        if self.check(context) {
            return Ok(());
        }

        if context.is_authenticated() {
            Err(RequestError::Forbidden {
                message: "You do not have permission to perform this action.".to_string(),
            })
        } else {
            Err(RequestError::Unauthorized {
                message: "Authentication credentials were not provided.".to_string(),
            })
        }
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Extract auth context from request headers
    async fn extract_context(&self, headers: &HeaderMap) -> SocialResult<AuthContext>;
}

/// Resolves `Authorization: Token <key>` headers against the store
pub struct TokenAuthProvider {
    store: Arc<dyn SocialStore>,
}

impl TokenAuthProvider {
    pub fn new(store: Arc<dyn SocialStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    async fn extract_context(&self, headers: &HeaderMap) -> SocialResult<AuthContext> {
        let Some(raw) = headers.get(AUTHORIZATION) else {
            return Ok(AuthContext::Anonymous);
        };

        let raw = raw.to_str().map_err(|_| RequestError::Unauthorized {
            message: "Invalid token header. Token string should not contain invalid characters."
                .to_string(),
        })?;
        let key = parse_authorization(raw)?;

        match self.store.user_for_token(key).await? {
            Some(user) if user.is_active => Ok(AuthContext::User {
                user_id: user.id,
                username: user.username,
            }),
            Some(_) => Err(RequestError::Unauthorized {
                message: "User inactive or deleted.".to_string(),
            }
            .into()),
            None => {
                tracing::debug!("rejected unknown token");
                Err(RequestError::Unauthorized {
                    message: "Invalid token.".to_string(),
                }
                .into())
            }
        }
    }
}

/// Extract the key from an `Authorization` header value
///
/// The scheme (`Token` or `Bearer`) is case-insensitive and must be followed
/// by exactly one credential.
pub fn parse_authorization(value: &str) -> Result<&str, RequestError> {
    let mut parts = value.split_whitespace();
    let scheme = parts.next().unwrap_or_default();

    if !scheme.eq_ignore_ascii_case("token") && !scheme.eq_ignore_ascii_case("bearer") {
        return Err(RequestError::Unauthorized {
            message: "Unsupported authorization scheme.".to_string(),
        });
    }

    match (parts.next(), parts.next()) {
        (Some(key), None) => Ok(key),
        (None, _) => Err(RequestError::Unauthorized {
            message: "Invalid token header. No credentials provided.".to_string(),
        }),
        (Some(_), Some(_)) => Err(RequestError::Unauthorized {
            message: "Invalid token header. Token string should not contain spaces.".to_string(),
        }),
    }
}
