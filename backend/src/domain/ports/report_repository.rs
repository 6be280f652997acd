//! Port abstraction for report persistence.
//!
//! Mutations that move points are expressed as single operations so that an
//! adapter can apply the report change and the credit atomically.
use async_trait::async_trait;

use crate::domain::{ConfirmedReport, NewReport, Report, ReportId, ScoringEvent, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by report repository adapters.
    pub enum ReportRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "report repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "report repository query failed: {message}",
        /// The owner referenced by a new report does not exist.
        UnknownOwner { owner: String } => "report owner {owner} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportRepository: Send + Sync {
    /// Store `report` under a fresh identifier and credit its owner with
    /// `event`, both or neither.
    async fn insert_crediting_owner(
        &self,
        report: &NewReport,
        event: ScoringEvent,
    ) -> Result<Report, ReportRepositoryError>;

    async fn find_by_id(&self, id: ReportId) -> Result<Option<Report>, ReportRepositoryError>;

    /// Every stored report, newest first.
    async fn list_all(&self) -> Result<Vec<Report>, ReportRepositoryError>;

    /// Reports authored by `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Report>, ReportRepositoryError>;

    /// Increment the confirmation count of `id` and credit its owner with
    /// `event`, both or neither. `None` when the report does not exist.
    async fn confirm_crediting_owner(
        &self,
        id: ReportId,
        event: ScoringEvent,
    ) -> Result<Option<ConfirmedReport>, ReportRepositoryError>;

    /// Remove a report and return it. Points already credited stay.
    async fn delete(&self, id: ReportId) -> Result<Option<Report>, ReportRepositoryError>;
}
