// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pagination policy and the list response envelope.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest permitted page size.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Default page size for a user listing their own reservations.
pub const DEFAULT_USER_PAGE_LIMIT: u32 = 10;

/// Default page size for the admin listing of all reservations.
pub const DEFAULT_ADMIN_PAGE_LIMIT: u32 = 20;

/// Pagination policy errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryPolicyError {
    /// Page number is below 1.
    #[error("Page must be at least 1, got {page}")]
    InvalidPage { page: u32 },

    /// Page size is outside the permitted range.
    #[error("Limit must be between 1 and 100, got {limit}")]
    InvalidLimit { limit: u32 },
}

/// A validated pagination request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: u32,
    /// Page size, between 1 and [`MAX_PAGE_LIMIT`].
    pub limit: u32,
}

impl PageRequest {
    /// Resolves optional request parameters against a default limit and
    /// validates the result.
    ///
    /// # Arguments
    ///
    /// * `page` - The requested page, defaulting to 1
    /// * `limit` - The requested page size, defaulting to `default_limit`
    /// * `default_limit` - The page size used when none is requested
    ///
    /// # Errors
    ///
    /// Returns an error if the page is below 1 or the limit is outside
    /// `[1, 100]`.
    pub fn resolve(
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
    ) -> Result<Self, QueryPolicyError> {
        let page: u32 = page.unwrap_or(1);
        let limit: u32 = limit.unwrap_or(default_limit);

        if page < 1 {
            return Err(QueryPolicyError::InvalidPage { page });
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(QueryPolicyError::InvalidLimit { limit });
        }

        Ok(Self { page, limit })
    }
}

/// One page of results plus the derived pagination envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The 1-based page number.
    pub page: u32,
    /// The page size.
    pub limit: u32,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether a later page exists.
    pub has_next_page: bool,
    /// Whether an earlier page exists.
    pub has_prev_page: bool,
}

impl<T> Page<T> {
    /// Assembles the envelope for one page of results.
    #[must_use]
    pub fn assemble(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let total_pages: u32 =
            u32::try_from(total.div_ceil(u64::from(request.limit))).unwrap_or(u32::MAX);

        Self {
            items,
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
            has_next_page: request.page < total_pages,
            has_prev_page: request.page > 1,
        }
    }
}
