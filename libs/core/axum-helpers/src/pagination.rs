//! Page/limit query resolution and the pagination block of list responses.
//!
//! Resolution never fails: anything missing, non-numeric or out of range
//! falls back to the defaults.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Raw `?page=&limit=` query, kept as strings so bad input can fall back to defaults.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// 1-based page number (default 1)
    pub page: Option<String>,
    /// Items per page, 1..=100 (default 10)
    pub limit: Option<String>,
}

/// Resolved pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

fn positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n > 0)
        .map(|n| n as u64)
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Self {
        Self::from_values(Some(page), Some(limit))
    }

    /// Resolves raw query values. `page <= 0` or non-numeric gives 1, a limit
    /// outside `1..=100` gives 10.
    pub fn from_raw(page: Option<&str>, limit: Option<&str>) -> Self {
        Self::from_values(positive(page), positive(limit))
    }

    fn from_values(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(DEFAULT_PAGE),
            limit: limit
                .filter(|l| (1..=MAX_LIMIT).contains(l))
                .unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        Self::from_raw(query.page.as_deref(), query.limit.as_deref())
    }
}

impl<S> FromRequestParts<S> for PageRequest
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = Query::<PaginationQuery>::try_from_uri(&parts.uri)
            .map(|Query(q)| q)
            .unwrap_or_default();
        Ok(query.into())
    }
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total_items: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total_items.div_ceil(limit)
        };

        Self {
            page,
            limit,
            total_pages,
            total_items,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    pub fn for_request(request: PageRequest, total_items: u64) -> Self {
        Self::new(request.page, request.limit, total_items)
    }
}
