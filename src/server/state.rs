//! Application state shared across handlers

use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::auth::{AuthProvider, TokenAuthProvider};
use crate::core::pagination::Paginator;
use crate::core::store::SocialStore;
use crate::publications::PublicationService;
use crate::users::UserService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SocialStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub paginator: Paginator,
    pub users: UserService,
    pub publications: PublicationService,
}

impl AppState {
    /// Wire services and token authentication around `store`
    pub fn new(store: Arc<dyn SocialStore>, config: &AppConfig) -> Self {
        let paginator = config.pagination.paginator();
        Self {
            auth: Arc::new(TokenAuthProvider::new(store.clone())),
            users: UserService::new(store.clone(), paginator, config.auth.bcrypt_cost),
            publications: PublicationService::new(store.clone(), paginator),
            paginator,
            store,
        }
    }
}
