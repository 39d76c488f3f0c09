//! Account registration, lookup, following and token issuance

use std::sync::Arc;
use uuid::Uuid;

use crate::core::auth::{AuthContext, AuthPolicy};
use crate::core::entity::Entity;
use crate::core::error::{EntityError, RequestError, SocialError, SocialResult};
use crate::core::filters::UserFilter;
use crate::core::pagination::{Page, PageRequest, Paginator};
use crate::core::store::SocialStore;
use crate::entities::user::PASSWORD_MAX_BYTES;
use crate::entities::{AuthToken, RegisterUser, TokenCredentials, User, UserDetail};

/// User operations on top of a [`SocialStore`]
///
/// Payloads are expected to be validated already (see
/// [`ValidatedJson`](crate::server::extract::ValidatedJson)).
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn SocialStore>,
    paginator: Paginator,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn SocialStore>, paginator: Paginator, bcrypt_cost: u32) -> Self {
        Self {
            store,
            paginator,
            bcrypt_cost,
        }
    }

    /// Create an account. The password is stored as a bcrypt hash.
    pub async fn register(&self, payload: RegisterUser) -> SocialResult<User> {
        let password_hash = hash_password(payload.password, self.bcrypt_cost).await?;

        let user = User::new(payload.username.trim(), payload.email.trim(), password_hash)
            .with_names(payload.first_name, payload.last_name);
        let user = self.store.create_user(user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "user registered");
        Ok(user)
    }

    pub async fn list(&self, filter: &UserFilter, request: PageRequest) -> SocialResult<Page<User>> {
        let users = self.store.list_users(filter).await?;
        Ok(self.paginator.paginate(&users, request)?)
    }

    /// A user with the ids they follow and the ids following them
    pub async fn detail(&self, id: &Uuid) -> SocialResult<UserDetail> {
        let user = self.require(id).await?;
        let following = self.store.following_ids(id).await?;
        let followers = self.store.follower_ids(id).await?;

        Ok(UserDetail {
            user,
            following,
            followers,
        })
    }

    /// Make `user_id` follow `followed_id`
    ///
    /// Both users must exist. Only `user_id` itself may change whom it
    /// follows, and a user cannot follow itself.
    pub async fn follow(
        &self,
        context: &AuthContext,
        user_id: &Uuid,
        followed_id: &Uuid,
    ) -> SocialResult<()> {
        self.require(user_id).await?;
        self.require(followed_id).await?;
        AuthPolicy::Owner(*user_id).enforce(context)?;

        if user_id == followed_id {
            return Err(RequestError::BadRequest {
                message: "A user cannot follow themselves.".to_string(),
            }
            .into());
        }

        self.store.follow(user_id, followed_id).await?;
        tracing::info!(user_id = %user_id, followed_id = %followed_id, "follow recorded");
        Ok(())
    }

    /// Exchange a username and password for the user's API token
    pub async fn obtain_token(&self, credentials: TokenCredentials) -> SocialResult<AuthToken> {
        let user = self
            .store
            .find_user_by_username(&credentials.username)
            .await?
            .filter(|user| user.is_active)
            .ok_or(RequestError::InvalidCredentials)?;

        // Stored passwords never exceed the bcrypt input, so a longer one cannot match.
        let fits = credentials.password.len() <= PASSWORD_MAX_BYTES;
        if !fits || !verify_password(credentials.password, user.password_hash.clone()).await? {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(RequestError::InvalidCredentials.into());
        }

        let token = self.store.get_or_create_token(&user.id).await?;
        self.store.touch_last_login(&user.id).await?;
        Ok(token)
    }

    async fn require(&self, id: &Uuid) -> SocialResult<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| EntityError::not_found(User::resource_name(), *id).into())
    }
}

async fn hash_password(password: String, cost: u32) -> SocialResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| SocialError::Internal(format!("password hashing task failed: {}", e)))?
        .map_err(SocialError::from)
}

async fn verify_password(password: String, hash: String) -> SocialResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| SocialError::Internal(format!("password check task failed: {}", e)))?
        .map_err(SocialError::from)
}
