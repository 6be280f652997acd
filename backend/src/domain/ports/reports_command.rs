//! Driving port for report confirmation and moderation.

use async_trait::async_trait;

use crate::domain::{ChatIdentity, ConfirmedReport, Error, ExternalId, Report, ReportId};

/// Outcome of an admin removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovedReport {
    pub report: Report,
    /// Whether the photo was released from the media store.
    pub media_released: bool,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportsCommand: Send + Sync {
    /// Confirm a report and credit its author.
    async fn confirm(
        &self,
        report_id: ReportId,
        confirmer: &ChatIdentity,
    ) -> Result<ConfirmedReport, Error>;

    /// Remove a report on behalf of an admin.
    async fn remove(
        &self,
        report_id: ReportId,
        requester: &ExternalId,
    ) -> Result<RemovedReport, Error>;
}
