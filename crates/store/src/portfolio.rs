//! Portfolio storage contract.

use async_trait::async_trait;
use intake_core::{PortfolioItem, Result};
use serde::Serialize;
use uuid::Uuid;

use crate::query::{Page, PortfolioQuery};

/// Public listing: one page of published items plus the distinct filter
/// values the gallery renders.
#[derive(Debug, Clone)]
pub struct PortfolioListing {
    pub page: Page<PortfolioItem>,
    pub filters: PortfolioFilters,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortfolioFilters {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub years: Vec<i32>,
}

/// Durable storage for portfolio items.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Persist a new item. Fails with a Conflict error when the slug is
    /// already taken.
    async fn create(&self, item: PortfolioItem) -> Result<Uuid>;

    async fn get(&self, id: Uuid) -> Result<Option<PortfolioItem>>;

    /// Published item by slug.
    async fn get_by_slug(&self, slug: &str) -> Result<Option<PortfolioItem>>;

    /// Published items with filters, search, and pagination, newest first.
    async fn list(&self, query: PortfolioQuery) -> Result<PortfolioListing>;

    /// Featured published items, newest first.
    async fn featured(&self, limit: usize) -> Result<Vec<PortfolioItem>>;
}
