//! Query and pagination types shared by the store traits.

use intake_core::{Category, FormKind, SubmissionStatus};
use serde::{Deserialize, Serialize};

/// Default page size for contact listings.
pub const CONTACT_PAGE_SIZE: usize = 20;

/// Default page size for portfolio listings.
pub const PORTFOLIO_PAGE_SIZE: usize = 12;

/// Pagination summary returned alongside list data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub pages: usize,
}

impl Pagination {
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        Self {
            page,
            limit,
            total,
            pages: total.div_ceil(limit.max(1)),
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

/// Contact listing filters. Newest first, page/limit pagination.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub status: Option<SubmissionStatus>,
    pub form_kind: Option<FormKind>,
}

impl ContactQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(CONTACT_PAGE_SIZE).clamp(1, 100)
    }
}

/// Portfolio listing filters over published items.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioQuery {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub category: Option<Category>,
    pub tag: Option<String>,
    pub year: Option<i32>,
    pub featured: Option<bool>,
    /// Case-insensitive substring match over title, description, and tags.
    pub search: Option<String>,
}

impl PortfolioQuery {
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(PORTFOLIO_PAGE_SIZE).clamp(1, 100)
    }
}

/// Slice a filtered, sorted result set into the requested page.
pub fn paginate<T>(items: Vec<T>, page: usize, limit: usize) -> Page<T> {
    let total = items.len();
    let data = items
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .collect();
    Page {
        data,
        pagination: Pagination::new(page, limit, total),
    }
}
