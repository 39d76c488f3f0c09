//! Typed error handling for the social backend
//!
//! Every fallible operation in the crate returns [`SocialError`], which wraps
//! a category-specific error so handlers and clients can react to specific
//! cases instead of a generic `anyhow::Error`.
//!
//! # Error Categories
//!
//! - [`EntityError`]: lookups and uniqueness of users, publications, comments
//! - [`PaginationError`]: out-of-range or malformed page selection
//! - [`FilterError`]: malformed list filter parameters
//! - [`ValidationError`]: request payload validation
//! - [`RequestError`]: authentication and authorization failures
//! - [`StorageError`]: storage backend failures
//! - [`ConfigError`]: configuration parsing and validation
//!
//! # Example
//!
//! ```rust,ignore
//! match service.detail(&id).await {
//!     Ok(detail) => println!("{:?}", detail),
//!     Err(SocialError::Entity(EntityError::NotFound { id, .. })) => {
//!         println!("no user {}", id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// The main error type of the crate
#[derive(Debug, Error)]
pub enum SocialError {
    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl SocialError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SocialError::Entity(e) => e.status_code(),
            SocialError::Pagination(_) => StatusCode::NOT_FOUND,
            SocialError::Filter(_) => StatusCode::BAD_REQUEST,
            SocialError::Validation(_) => StatusCode::BAD_REQUEST,
            SocialError::Request(e) => e.status_code(),
            SocialError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SocialError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SocialError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SocialError::Entity(e) => e.error_code(),
            SocialError::Pagination(_) => "INVALID_PAGE",
            SocialError::Filter(_) => "INVALID_FILTER",
            SocialError::Validation(_) => "VALIDATION_ERROR",
            SocialError::Request(e) => e.error_code(),
            SocialError::Storage(_) => "STORAGE_ERROR",
            SocialError::Config(_) => "CONFIG_ERROR",
            SocialError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response body
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            SocialError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            SocialError::Entity(EntityError::AlreadyExists { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            SocialError::Pagination(PaginationError::PastLast {
                page_number,
                last_page,
            }) => Some(serde_json::json!({
                "page_number": page_number,
                "last_page": last_page
            })),
            SocialError::Filter(e) => Some(serde_json::json!({ "field": e.field() })),
            SocialError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for SocialError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to user, publication and comment records
#[derive(Debug, Error)]
pub enum EntityError {
    #[error("{entity_type} with id={id} does not exist.")]
    NotFound { entity_type: String, id: Uuid },

    /// A unique field is already taken
    #[error("A {entity_type} with that {field} already exists.")]
    AlreadyExists {
        entity_type: String,
        field: String,
        value: String,
    },
}

impl EntityError {
    pub fn not_found(entity_type: &str, id: Uuid) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

// =============================================================================
// Pagination Errors
// =============================================================================

/// A page selection that cannot be served. Always surfaced as not-found.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("Invalid page '{value}': page number is not an integer")]
    NotAnInteger { value: String },

    #[error("Invalid page {page_number}: page number must be at least 1")]
    BelowFirst { page_number: usize },

    #[error("Invalid page {page_number}: that page contains no results")]
    PastLast { page_number: usize, last_page: usize },
}

// =============================================================================
// Filter Errors
// =============================================================================

/// Malformed list filter parameters
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("Invalid value '{value}' for '{field}': expected a date formatted as dd-mm-yyyy")]
    InvalidDate { field: String, value: String },

    #[error("Invalid value '{value}' for '{field}': expected an id")]
    InvalidId { field: String, value: String },
}

impl FilterError {
    /// Name of the offending query parameter
    pub fn field(&self) -> &str {
        match self {
            FilterError::InvalidDate { field, .. } | FilterError::InvalidId { field, .. } => field,
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to request payload validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Validation failed for {} field(s)", .0.len())]
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Authentication, authorization and malformed request errors
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Unable to log in with provided credentials.")]
    InvalidCredentials,

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error("No route for '{path}'")]
    RouteNotFound { path: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RequestError::Forbidden { .. } => StatusCode::FORBIDDEN,
            RequestError::InvalidCredentials => StatusCode::BAD_REQUEST,
            RequestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RequestError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::Unauthorized { .. } => "UNAUTHORIZED",
            RequestError::Forbidden { .. } => "FORBIDDEN",
            RequestError::InvalidCredentials => "INVALID_CREDENTIALS",
            RequestError::BadRequest { .. } => "BAD_REQUEST",
            RequestError::RouteNotFound { .. } => "ROUTE_NOT_FOUND",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage lock poisoned: {resource}")]
    LockPoisoned { resource: String },
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors related to configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration{}: {message}", .file.as_ref().map(|f| format!(" '{}'", f)).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    #[error("Invalid configuration value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    #[error("Failed to read configuration '{file}': {message}")]
    Io { file: String, message: String },
}

// =============================================================================
// Conversions from external error types
// =============================================================================

impl From<serde_yaml::Error> for SocialError {
    fn from(err: serde_yaml::Error) -> Self {
        SocialError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<bcrypt::BcryptError> for SocialError {
    fn from(err: bcrypt::BcryptError) -> Self {
        SocialError::Internal(format!("password hashing failed: {}", err))
    }
}

impl From<validator::ValidationErrors> for SocialError {
    fn from(errors: validator::ValidationErrors) -> Self {
        SocialError::Validation(errors.into())
    }
}

/// Result alias used across the crate
pub type SocialResult<T> = Result<T, SocialError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_not_found_display() {
        let id = Uuid::nil();
        let err = EntityError::not_found("User", id);
        assert_eq!(
            err.to_string(),
            format!("User with id={} does not exist.", id)
        );
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_invalid_page_is_not_found() {
        let err: SocialError = PaginationError::PastLast {
            page_number: 3,
            last_page: 2,
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "INVALID_PAGE");

        let body = err.to_response();
        let details = body.details.expect("past-last carries details");
        assert_eq!(details["last_page"], 2);
    }

    #[test]
    fn test_filter_error_is_bad_request() {
        let err: SocialError = FilterError::InvalidDate {
            field: "from_date".to_string(),
            value: "2024-01-01".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("dd-mm-yyyy"));
        assert_eq!(err.to_response().details.unwrap()["field"], "from_date");
    }

    #[test]
    fn test_request_error_status_codes() {
        let cases = [
            (
                RequestError::Unauthorized {
                    message: "x".to_string(),
                },
                StatusCode::UNAUTHORIZED,
            ),
            (
                RequestError::Forbidden {
                    message: "x".to_string(),
                },
                StatusCode::FORBIDDEN,
            ),
            (RequestError::InvalidCredentials, StatusCode::BAD_REQUEST),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code(), status);
        }
    }

    #[test]
    fn test_config_parse_error_display() {
        let err = ConfigError::ParseError {
            file: Some("social.yaml".to_string()),
            message: "bad indent".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse configuration 'social.yaml': bad indent"
        );

        let err = ConfigError::ParseError {
            file: None,
            message: "bad indent".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to parse configuration: bad indent");
    }

    #[test]
    fn test_error_response_omits_empty_details() {
        let err = SocialError::Internal("boom".to_string());
        let json = serde_json::to_value(err.to_response()).unwrap();
        assert_eq!(json["code"], "INTERNAL_ERROR");
        assert!(json.get("details").is_none());
    }
}
