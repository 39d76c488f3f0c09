//! List filters applied before records reach the paginator
//!
//! Each filter has a raw query form (strings, straight from the URL) and a
//! parsed form. Parsing is where malformed values are rejected; matching a
//! parsed filter against a record never fails.
//!
//! # Query parameters
//! - publications: `author` (exact id), `from_date` / `to_date`
//!   (inclusive days, `dd-mm-yyyy`)
//! - users: `username` (case-insensitive substring)

use chrono::{DateTime, Days, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::core::error::FilterError;
use crate::entities::{Publication, User};

/// Date format accepted by `from_date` / `to_date`
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Raw publication filter parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PublicationFilterQuery {
    pub author: Option<String>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

/// Parsed publication filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationFilter {
    pub author: Option<Uuid>,
    /// Inclusive lower bound (midnight UTC of `from_date`)
    pub created_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound (midnight UTC of the day after `to_date`)
    pub created_before: Option<DateTime<Utc>>,
}

impl PublicationFilter {
    pub fn parse(query: &PublicationFilterQuery) -> Result<Self, FilterError> {
        let author = non_empty(&query.author)
            .map(|raw| {
                Uuid::parse_str(raw).map_err(|_| FilterError::InvalidId {
                    field: "author".to_string(),
                    value: raw.to_string(),
                })
            })
            .transpose()?;

        let created_from = non_empty(&query.from_date)
            .map(|raw| parse_date("from_date", raw))
            .transpose()?
            .map(start_of_day);

        let created_before = non_empty(&query.to_date)
            .map(|raw| parse_date("to_date", raw))
            .transpose()?
            .map(|day| day.checked_add_days(Days::new(1)).unwrap_or(day))
            .map(start_of_day);

        Ok(Self {
            author,
            created_from,
            created_before,
        })
    }

    pub fn matches(&self, publication: &Publication) -> bool {
        self.author.is_none_or(|author| publication.author == author)
            && self
                .created_from
                .is_none_or(|from| publication.created >= from)
            && self
                .created_before
                .is_none_or(|before| publication.created < before)
    }
}

/// Raw user filter parameters
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserFilterQuery {
    pub username: Option<String>,
}

/// Parsed user filter
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Lowercased substring to look for
    pub username: Option<String>,
}

impl UserFilter {
    pub fn parse(query: &UserFilterQuery) -> Self {
        Self {
            username: non_empty(&query.username).map(str::to_lowercase),
        }
    }

    pub fn matches(&self, user: &User) -> bool {
        self.username
            .as_deref()
            .is_none_or(|needle| user.username.to_lowercase().contains(needle))
    }
}

/// Parse a `dd-mm-yyyy` date
pub fn parse_date(field: &str, raw: &str) -> Result<NaiveDate, FilterError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| FilterError::InvalidDate {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

fn start_of_day(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
