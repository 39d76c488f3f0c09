//! User accounts and their registration payload

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

use crate::core::entity::Entity;

/// bcrypt ignores everything past this many bytes of a password
pub const PASSWORD_MAX_BYTES: usize = 72;

static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("username pattern is valid"));

/// A registered user
///
/// The password hash never leaves the server.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub date_joined: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub created: DateTime<Utc>,
    pub publications_count: u64,
    pub comments_count: u64,
}

impl User {
    /// Build a new active user with zeroed counters
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            first_name: String::new(),
            last_name: String::new(),
            is_active: true,
            date_joined: now,
            last_login: None,
            created: now,
            publications_count: 0,
            comments_count: 0,
        }
    }

    pub fn with_names(mut self, first_name: Option<String>, last_name: Option<String>) -> Self {
        self.first_name = first_name.unwrap_or_default();
        self.last_name = last_name.unwrap_or_default();
        self
    }
}

impl Entity for User {
    fn resource_name() -> &'static str {
        "User"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

/// A user together with both sides of the follow graph
#[derive(Debug, Clone, Serialize)]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    pub following: Vec<Uuid>,
    pub followers: Vec<Uuid>,
}

/// Body of `POST /users`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(
        length(min = 1, max = 50, message = "must be between 1 and 50 characters"),
        custom(function = "validate_username")
    )]
    pub username: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(
        length(min = 1, max = 100, message = "must be between 1 and 100 characters"),
        custom(function = "validate_password_bytes")
    )]
    pub password: String,

    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub first_name: Option<String>,

    #[validate(length(max = 150, message = "must be at most 150 characters"))]
    pub last_name: Option<String>,
}

/// Body of `POST /api-token-auth`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TokenCredentials {
    #[validate(length(min = 1, message = "may not be blank"))]
    pub username: String,

    #[validate(length(min = 1, message = "may not be blank"))]
    pub password: String,
}

fn validate_username(username: &str) -> Result<(), validator::ValidationError> {
    if USERNAME_PATTERN.is_match(username) {
        return Ok(());
    }

    let mut err = validator::ValidationError::new("username_format");
    err.message = Some("may contain only letters, digits and @/./+/-/_ characters".into());
    Err(err)
}

fn validate_password_bytes(password: &str) -> Result<(), validator::ValidationError> {
    if password.len() <= PASSWORD_MAX_BYTES {
        return Ok(());
    }

    let mut err = validator::ValidationError::new("password_bytes");
    err.message = Some(format!("must be at most {} bytes", PASSWORD_MAX_BYTES).into());
    Err(err)
}
