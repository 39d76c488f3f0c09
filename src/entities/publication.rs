//! Publications and the comments attached to them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::core::entity::Entity;
use crate::entities::User;

/// A post written by a user
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Publication {
    pub id: Uuid,
    pub author: Uuid,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl Publication {
    pub fn new(author: Uuid, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            title: title.into(),
            content: content.into(),
            created: Utc::now(),
        }
    }
}

impl Entity for Publication {
    fn resource_name() -> &'static str {
        "Publication"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

/// A comment left on a publication
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PublicationComment {
    pub id: Uuid,
    pub author: Uuid,
    pub publication: Uuid,
    pub content: String,
    pub created: DateTime<Utc>,
}

impl PublicationComment {
    pub fn new(author: Uuid, publication: Uuid, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author,
            publication,
            content: content.into(),
            created: Utc::now(),
        }
    }
}

impl Entity for PublicationComment {
    fn resource_name() -> &'static str {
        "PublicationComment"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created(&self) -> DateTime<Utc> {
        self.created
    }
}

/// Response of `GET /posts/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct PublicationDetail {
    pub publication: Publication,
    pub last_3_comments: Vec<PublicationComment>,
    pub author: User,
}

/// Body of `POST /posts`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPublication {
    #[validate(
        length(min = 1, max = 200, message = "must be between 1 and 200 characters"),
        custom(function = "not_blank")
    )]
    pub title: String,

    #[validate(
        length(min = 1, max = 5000, message = "must be between 1 and 5000 characters"),
        custom(function = "not_blank")
    )]
    pub content: String,
}

/// Body of `POST /posts/{id}/comments`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewComment {
    #[validate(
        length(min = 1, max = 2000, message = "must be between 1 and 2000 characters"),
        custom(function = "not_blank")
    )]
    pub content: String,
}

fn not_blank(value: &str) -> Result<(), validator::ValidationError> {
    if value.trim().is_empty() {
        let mut err = validator::ValidationError::new("blank");
        err.message = Some("may not be blank".into());
        return Err(err);
    }
    Ok(())
}
