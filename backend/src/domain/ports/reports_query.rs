//! Driving port for report listings and the leaderboard.

use async_trait::async_trait;

use crate::domain::{ChatIdentity, Error, LeaderboardEntry, Report, ReportId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportsQuery: Send + Sync {
    /// Reports authored by the caller, newest first.
    async fn list_mine(&self, identity: &ChatIdentity) -> Result<Vec<Report>, Error>;

    /// Every report, newest first.
    async fn list_all(&self) -> Result<Vec<Report>, Error>;

    /// Top `limit` users by points.
    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, Error>;

    /// Photo bytes attached to a report.
    async fn photo(&self, report_id: ReportId) -> Result<Vec<u8>, Error>;
}
