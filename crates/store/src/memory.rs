//! In-memory document store.
//!
//! Process-lifetime storage for the single-node deployment and for tests.
//! Both traits are implemented over `parking_lot` locks; each operation is
//! one critical section.

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use intake_core::{
    Error, PortfolioItem, PortfolioStatus, Reply, Result, SubmissionRecord, SubmissionStatus,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;
use uuid::Uuid;

use crate::contact::{BreakdownEntry, ContactStatistics, ContactStore, MonthlyCount};
use crate::portfolio::{PortfolioFilters, PortfolioListing, PortfolioStore};
use crate::query::{paginate, ContactQuery, Page, PortfolioQuery};

/// In-memory store backing both resources.
#[derive(Default)]
pub struct MemoryStore {
    contacts: RwLock<Vec<SubmissionRecord>>,
    portfolio: RwLock<Vec<PortfolioItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn create(&self, record: SubmissionRecord) -> Result<Uuid> {
        let id = record.id;
        let mut contacts = self.contacts.write();
        contacts.push(record);
        debug!(%id, total = contacts.len(), "Stored contact submission");
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<SubmissionRecord>> {
        Ok(self.contacts.read().iter().find(|r| r.id == id).cloned())
    }

    async fn list(&self, query: ContactQuery) -> Result<Page<SubmissionRecord>> {
        let contacts = self.contacts.read();
        // Insertion order is creation order; newest first.
        let matching: Vec<SubmissionRecord> = contacts
            .iter()
            .rev()
            .filter(|r| query.status.map_or(true, |s| r.status == s))
            .filter(|r| query.form_kind.map_or(true, |k| r.form_kind() == k))
            .cloned()
            .map(SubmissionRecord::redacted)
            .collect();

        Ok(paginate(matching, query.page(), query.limit()))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<Option<SubmissionRecord>> {
        let mut contacts = self.contacts.write();
        let Some(record) = contacts.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        record.status = status;
        if status == SubmissionStatus::Read {
            record.last_read_at = Some(Utc::now());
        }
        Ok(Some(record.clone()))
    }

    async fn add_reply(&self, id: Uuid, reply: Reply) -> Result<Option<SubmissionRecord>> {
        let mut contacts = self.contacts.write();
        let Some(record) = contacts.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        record.replies.push(reply);
        record.status = SubmissionStatus::Replied;
        record.replied_at = Some(Utc::now());
        Ok(Some(record.clone()))
    }

    async fn statistics(&self) -> Result<ContactStatistics> {
        let contacts = self.contacts.read();

        let total = contacts.len();
        let unread = contacts
            .iter()
            .filter(|r| r.status == SubmissionStatus::Unread)
            .count();
        let spam = contacts.iter().filter(|r| r.is_spam).count();

        let mut by_status: HashMap<&'static str, usize> = HashMap::new();
        let mut by_kind: HashMap<&'static str, usize> = HashMap::new();
        let mut by_month: HashMap<(i32, u32), usize> = HashMap::new();

        for record in contacts.iter() {
            let status = match record.status {
                SubmissionStatus::Unread => "unread",
                SubmissionStatus::Read => "read",
                SubmissionStatus::Replied => "replied",
                SubmissionStatus::Archived => "archived",
            };
            *by_status.entry(status).or_default() += 1;
            *by_kind.entry(record.form_kind().as_str()).or_default() += 1;
            *by_month
                .entry((record.created_at.year(), record.created_at.month()))
                .or_default() += 1;
        }

        let mut monthly_trend: Vec<MonthlyCount> = by_month
            .into_iter()
            .map(|((year, month), count)| MonthlyCount { year, month, count })
            .collect();
        monthly_trend.sort_by_key(|m| std::cmp::Reverse((m.year, m.month)));
        monthly_trend.truncate(12);

        Ok(ContactStatistics {
            total,
            unread,
            spam,
            status_breakdown: to_breakdown(by_status),
            form_kind_breakdown: to_breakdown(by_kind),
            monthly_trend,
        })
    }
}

fn to_breakdown(counts: HashMap<&'static str, usize>) -> Vec<BreakdownEntry> {
    let mut entries: Vec<BreakdownEntry> = counts
        .into_iter()
        .map(|(key, count)| BreakdownEntry {
            key: key.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| a.key.cmp(&b.key));
    entries
}

#[async_trait]
impl PortfolioStore for MemoryStore {
    async fn create(&self, item: PortfolioItem) -> Result<Uuid> {
        let mut portfolio = self.portfolio.write();

        if portfolio.iter().any(|p| p.slug == item.slug) {
            return Err(Error::conflict("slug", &item.slug));
        }

        let id = item.id;
        portfolio.push(item);
        debug!(%id, total = portfolio.len(), "Stored portfolio item");
        Ok(id)
    }

    async fn get(&self, id: Uuid) -> Result<Option<PortfolioItem>> {
        Ok(self.portfolio.read().iter().find(|p| p.id == id).cloned())
    }

    async fn get_by_slug(&self, slug: &str) -> Result<Option<PortfolioItem>> {
        Ok(self
            .portfolio
            .read()
            .iter()
            .find(|p| p.slug == slug && p.status == PortfolioStatus::Published)
            .cloned())
    }

    async fn list(&self, query: PortfolioQuery) -> Result<PortfolioListing> {
        let portfolio = self.portfolio.read();

        let published: Vec<&PortfolioItem> = portfolio
            .iter()
            .filter(|p| p.status == PortfolioStatus::Published)
            .collect();

        // Distinct filter values come from the full published set, not the
        // filtered page.
        let mut categories: Vec<String> = published
            .iter()
            .map(|p| p.category.as_str().to_string())
            .collect();
        categories.sort();
        categories.dedup();

        let mut tags: Vec<String> = published
            .iter()
            .flat_map(|p| p.tags.iter().cloned())
            .collect();
        tags.sort();
        tags.dedup();

        let mut years: Vec<i32> = published.iter().map(|p| p.year).collect();
        years.sort_by_key(|y| std::cmp::Reverse(*y));
        years.dedup();

        let search = query.search.as_deref().map(str::to_lowercase);
        let matching: Vec<PortfolioItem> = published
            .into_iter()
            .rev()
            .filter(|p| query.category.map_or(true, |c| p.category == c))
            .filter(|p| {
                query
                    .tag
                    .as_deref()
                    .map_or(true, |t| p.tags.iter().any(|pt| pt == t))
            })
            .filter(|p| query.year.map_or(true, |y| p.year == y))
            .filter(|p| query.featured.map_or(true, |f| p.featured == f))
            .filter(|p| search.as_deref().map_or(true, |s| matches_search(p, s)))
            .cloned()
            .collect();

        Ok(PortfolioListing {
            page: paginate(matching, query.page(), query.limit()),
            filters: PortfolioFilters {
                categories,
                tags,
                years,
            },
        })
    }

    async fn featured(&self, limit: usize) -> Result<Vec<PortfolioItem>> {
        Ok(self
            .portfolio
            .read()
            .iter()
            .rev()
            .filter(|p| p.featured && p.status == PortfolioStatus::Published)
            .take(limit)
            .cloned()
            .collect())
    }
}

fn matches_search(item: &PortfolioItem, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle)
        || item.description.to_lowercase().contains(needle)
        || item.tags.iter().any(|t| t.to_lowercase().contains(needle))
}
