//! Port for crediting points and reading the leaderboard.
use async_trait::async_trait;

use crate::domain::{LeaderboardEntry, ScoringEvent, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by points ledger adapters.
    pub enum PointsLedgerError {
        /// Ledger connection could not be established.
        Connection { message: String } => "points ledger connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "points ledger query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointsLedger: Send + Sync {
    /// Credit the points for `event` and return the new balance, or `None`
    /// when the user does not exist.
    ///
    /// Standalone entry point for points not tied to a report write. Credits
    /// for submissions and confirmations go through
    /// [`ReportRepository`](super::ReportRepository) so they commit together
    /// with the report change.
    async fn credit(
        &self,
        user: &UserId,
        event: ScoringEvent,
    ) -> Result<Option<u64>, PointsLedgerError>;

    /// Up to `limit` users with an alias, highest points first. Ties keep
    /// registration order.
    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, PointsLedgerError>;
}
