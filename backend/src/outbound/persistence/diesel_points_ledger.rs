//! PostgreSQL-backed `PointsLedger`.
//!
//! Points live on the users row. The credit helper is shared with the report
//! repository, which calls it inside its own transactions.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{PointsLedger, PointsLedgerError};
use crate::domain::{Alias, LeaderboardEntry, ScoringEvent, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the points ledger port.
#[derive(Clone)]
pub struct DieselPointsLedger {
    pool: DbPool,
}

impl DieselPointsLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PointsLedgerError {
    map_basic_pool_error(error, PointsLedgerError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PointsLedgerError {
    map_basic_diesel_error(error, PointsLedgerError::query, PointsLedgerError::connection)
}

/// Points for `event` as a column value.
pub(super) fn event_points(event: ScoringEvent) -> i64 {
    i64::try_from(event.points()).unwrap_or(i64::MAX)
}

/// Add the points for `event` to `user` and return the new balance.
pub(super) async fn credit_points(
    conn: &mut AsyncPgConnection,
    user: Uuid,
    event: ScoringEvent,
) -> QueryResult<Option<i64>> {
    diesel::update(users::table.find(user))
        .set(users::points.eq(users::points + event_points(event)))
        .returning(users::points)
        .get_result::<i64>(conn)
        .await
        .optional()
}

fn to_entry((alias, points): (Option<String>, i64)) -> Result<LeaderboardEntry, PointsLedgerError> {
    let alias = alias
        .ok_or_else(|| PointsLedgerError::query("leaderboard row without alias"))
        .and_then(|alias| Alias::new(alias).map_err(|err| PointsLedgerError::query(err.to_string())))?;
    let points = u64::try_from(points)
        .map_err(|_| PointsLedgerError::query("negative points on leaderboard"))?;
    Ok(LeaderboardEntry { alias, points })
}

#[async_trait]
impl PointsLedger for DieselPointsLedger {
    async fn credit(
        &self,
        user: &UserId,
        event: ScoringEvent,
    ) -> Result<Option<u64>, PointsLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let balance = credit_points(&mut conn, *user.as_uuid(), event)
            .await
            .map_err(map_diesel_error)?;
        balance
            .map(|points| {
                u64::try_from(points).map_err(|_| PointsLedgerError::query("negative balance"))
            })
            .transpose()
    }

    async fn leaderboard(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, PointsLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = users::table
            .filter(users::alias.is_not_null())
            .order((users::points.desc(), users::created_at.asc(), users::id.asc()))
            .limit(limit)
            .select((users::alias, users::points))
            .load::<(Option<String>, i64)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(to_entry).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rows_become_entries() {
        let entry = to_entry((Some("Alex".to_owned()), 11)).expect("valid row");
        assert_eq!(entry.alias.as_ref(), "Alex");
        assert_eq!(entry.points, 11);
    }

    #[rstest]
    #[case((None, 5))]
    #[case((Some("Alex".to_owned()), -1))]
    fn malformed_rows_are_query_errors(#[case] row: (Option<String>, i64)) {
        assert!(matches!(to_entry(row), Err(PointsLedgerError::Query { .. })));
    }

    #[rstest]
    fn event_points_match_domain_awards() {
        assert_eq!(event_points(ScoringEvent::ReportSubmitted), 5);
        assert_eq!(event_points(ScoringEvent::ConfirmationReceived), 3);
    }
}
