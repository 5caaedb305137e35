//! Pagination and filtering query parameters for the contact listing.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::domain::repositories::ContactFilter;
use crate::utils::flag::parse_flag;

/// Default number of contacts per page.
pub const DEFAULT_LIMIT: u32 = 5;

/// Largest page size a client may request.
pub const MAX_LIMIT: u32 = 100;

/// Boolean query flag accepting `true/false`, `1/0`, `on/off` and `yes/no`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flag(pub bool);

impl FromStr for Flag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_flag(s)
            .map(Flag)
            .ok_or_else(|| format!("invalid boolean flag `{}`", s))
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Query parameters of `GET /contacts`.
///
/// Uses `serde_with` to parse numbers and flags from their string form, so a
/// malformed value is rejected instead of silently ignored.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct ContactQueryParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub favorite: Option<Flag>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub limit: Option<u32>,
}

impl ContactQueryParams {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Validates pagination parameters and converts to database offset/limit.
    ///
    /// # Defaults
    ///
    /// - `page`: 1
    /// - `limit`: 5
    ///
    /// # Validation
    ///
    /// - Page must be > 0
    /// - Limit must be between 1 and 100
    ///
    /// # Returns
    ///
    /// `(offset, limit)` tuple for SQL queries.
    pub fn validate_and_get_offset_limit(&self) -> Result<(i64, i64), String> {
        let page = self.page();
        let limit = self.limit();

        if page == 0 {
            return Err("Page must be greater than 0".to_string());
        }

        if !(1..=MAX_LIMIT).contains(&limit) {
            return Err(format!("Limit must be between 1 and {}", MAX_LIMIT));
        }

        let offset = (page as i64 - 1) * limit as i64;

        Ok((offset, limit as i64))
    }

    /// Builds the repository filter from the query.
    pub fn to_filter(&self) -> ContactFilter {
        ContactFilter::new()
            .with_favorite(self.favorite.map(|flag| flag.0))
            .with_name(self.name.clone())
    }
}

/// Pagination metadata returned alongside a page of contacts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    pub total_records: i64,
    pub total_pages: i64,
    pub current_page: u32,
}

impl PaginationMetadata {
    pub fn new(total_records: i64, page: u32, limit: u32) -> Self {
        let total_pages = if total_records <= 0 {
            0
        } else {
            (total_records as u64).div_ceil(u64::from(limit.max(1))) as i64
        };

        Self {
            total_records,
            total_pages,
            current_page: page,
        }
    }
}
