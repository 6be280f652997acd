//! Report confirmation, moderation, listings, and ranking.
//!
//! Implements [`ReportsCommand`] and [`ReportsQuery`]. Point credits for
//! confirmations happen inside the report repository so the count and the
//! owner's balance move together.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    MediaStore, PointsLedger, RemovedReport, ReportRepository, ReportsCommand, ReportsQuery,
    UserRepository,
};
use crate::domain::service_errors::{map_ledger_error, map_media_error, map_report_error};
use crate::domain::{
    ChatIdentity, ConfirmedReport, Error, ExternalId, IdentityService, LeaderboardEntry, Report,
    ReportId, ScoringEvent,
};

fn report_not_found(id: ReportId) -> Error {
    Error::not_found(format!("report {id} not found"))
}

/// Service behind the report commands and queries.
pub struct ReportsService<U, R, L, M> {
    identity: IdentityService<U>,
    reports: Arc<R>,
    ledger: Arc<L>,
    media: Arc<M>,
}

impl<U, R, L, M> ReportsService<U, R, L, M> {
    pub fn new(identity: IdentityService<U>, reports: Arc<R>, ledger: Arc<L>, media: Arc<M>) -> Self {
        Self {
            identity,
            reports,
            ledger,
            media,
        }
    }
}

#[async_trait]
impl<U, R, L, M> ReportsCommand for ReportsService<U, R, L, M>
where
    U: UserRepository,
    R: ReportRepository,
    L: PointsLedger,
    M: MediaStore,
{
    async fn confirm(
        &self,
        report_id: ReportId,
        confirmer: &ChatIdentity,
    ) -> Result<ConfirmedReport, Error> {
        // Confirmers are registered like any other sender. Confirming one's
        // own report, or confirming twice, is allowed.
        self.identity.get_or_create(confirmer).await?;
        self.reports
            .confirm_crediting_owner(report_id, ScoringEvent::ConfirmationReceived)
            .await
            .map_err(map_report_error)?
            .ok_or_else(|| report_not_found(report_id))
    }

    async fn remove(
        &self,
        report_id: ReportId,
        requester: &ExternalId,
    ) -> Result<RemovedReport, Error> {
        if !self.identity.is_admin(requester) {
            return Err(Error::unauthorized("only admins may delete reports"));
        }
        let report = self
            .reports
            .delete(report_id)
            .await
            .map_err(map_report_error)?
            .ok_or_else(|| report_not_found(report_id))?;
        let media_released = self.media.delete(report.image()).await.is_ok();
        Ok(RemovedReport {
            report,
            media_released,
        })
    }
}

#[async_trait]
impl<U, R, L, M> ReportsQuery for ReportsService<U, R, L, M>
where
    U: UserRepository,
    R: ReportRepository,
    L: PointsLedger,
    M: MediaStore,
{
    async fn list_mine(&self, identity: &ChatIdentity) -> Result<Vec<Report>, Error> {
        let (user, _) = self.identity.get_or_create(identity).await?;
        self.reports
            .list_by_owner(&user.id())
            .await
            .map_err(map_report_error)
    }

    async fn list_all(&self) -> Result<Vec<Report>, Error> {
        self.reports.list_all().await.map_err(map_report_error)
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, Error> {
        self.ledger.leaderboard(limit).await.map_err(map_ledger_error)
    }

    async fn photo(&self, report_id: ReportId) -> Result<Vec<u8>, Error> {
        let report = self
            .reports
            .find_by_id(report_id)
            .await
            .map_err(map_report_error)?
            .ok_or_else(|| report_not_found(report_id))?;
        self.media
            .retrieve(report.image())
            .await
            .map_err(map_media_error)
    }
}

#[cfg(test)]
#[path = "reports_service_tests.rs"]
mod tests;
