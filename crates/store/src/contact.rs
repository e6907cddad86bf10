//! Contact submission storage contract.

use async_trait::async_trait;
use intake_core::{Reply, Result, SubmissionRecord, SubmissionStatus};
use serde::Serialize;
use uuid::Uuid;

use crate::query::{ContactQuery, Page};

/// Aggregated contact statistics for the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactStatistics {
    pub total: usize,
    pub unread: usize,
    pub spam: usize,
    pub status_breakdown: Vec<BreakdownEntry>,
    pub form_kind_breakdown: Vec<BreakdownEntry>,
    /// Last 12 months with submissions, newest first.
    pub monthly_trend: Vec<MonthlyCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BreakdownEntry {
    pub key: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

/// Durable storage for contact submissions.
///
/// Create receives a fully scored record; the store never runs the
/// classifier. Failures surface as [`intake_core::Error`] and pass through
/// the intake layer uninterpreted.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persist a new record, returning its id.
    async fn create(&self, record: SubmissionRecord) -> Result<Uuid>;

    async fn get(&self, id: Uuid) -> Result<Option<SubmissionRecord>>;

    /// Filtered listing, newest first. Origin address and user agent are
    /// withheld from listing rows.
    async fn list(&self, query: ContactQuery) -> Result<Page<SubmissionRecord>>;

    /// Set the workflow status; stamps `last_read_at` on transition to read.
    async fn update_status(
        &self,
        id: Uuid,
        status: SubmissionStatus,
    ) -> Result<Option<SubmissionRecord>>;

    /// Append a reply, marking the record replied.
    async fn add_reply(&self, id: Uuid, reply: Reply) -> Result<Option<SubmissionRecord>>;

    async fn statistics(&self) -> Result<ContactStatistics>;
}
