//! PostgreSQL-backed `ReportRepository`.
//!
//! Inserts and confirmations run in one transaction together with the
//! owner's point credit.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ReportRepository, ReportRepositoryError};
use crate::domain::{
    Address, ConfirmedReport, ImageReference, NewReport, Report, ReportId, ScoringEvent, UserId,
};

use super::diesel_basic_error_mapping::{
    is_foreign_key_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::diesel_points_ledger::credit_points;
use super::models::{NewReportRow, ReportRow};
use super::pool::{DbPool, PoolError};
use super::schema::reports;

/// Diesel-backed implementation of the report repository port.
#[derive(Clone)]
pub struct DieselReportRepository {
    pool: DbPool,
}

impl DieselReportRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReportRepositoryError {
    map_basic_pool_error(error, ReportRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReportRepositoryError {
    map_basic_diesel_error(
        error,
        ReportRepositoryError::query,
        ReportRepositoryError::connection,
    )
}

fn invalid_row(id: i64, detail: impl std::fmt::Display) -> ReportRepositoryError {
    ReportRepositoryError::query(format!("invalid report row {id}: {detail}"))
}

/// Convert a stored row into a domain report, re-validating every field.
fn row_to_report(row: ReportRow) -> Result<Report, ReportRepositoryError> {
    let ReportRow {
        id,
        owner_id,
        image_reference,
        apartment_details,
        address,
        duration_estimate,
        confirmation_count,
        created_at,
    } = row;

    let report_id = ReportId::new(id).map_err(|err| invalid_row(id, err))?;
    let image = ImageReference::new(image_reference).map_err(|err| invalid_row(id, err))?;
    let address = Address::parse(&address).map_err(|err| invalid_row(id, err))?;
    let details = NewReport::new(
        UserId::from(owner_id),
        image,
        apartment_details,
        address,
        &duration_estimate,
    )
    .map_err(|err| invalid_row(id, err))?;
    let confirmation_count =
        u32::try_from(confirmation_count).map_err(|err| invalid_row(id, err))?;

    Ok(Report::from_parts(
        report_id,
        details,
        confirmation_count,
        created_at,
    ))
}

fn rows_to_reports(rows: Vec<ReportRow>) -> Result<Vec<Report>, ReportRepositoryError> {
    rows.into_iter().map(row_to_report).collect()
}

#[async_trait]
impl ReportRepository for DieselReportRepository {
    async fn insert_crediting_owner(
        &self,
        report: &NewReport,
        event: ScoringEvent,
    ) -> Result<Report, ReportRepositoryError> {
        let owner = *report.owner().as_uuid();
        let new_row = NewReportRow {
            owner_id: owner,
            image_reference: report.image().as_ref(),
            apartment_details: report.apartment_details(),
            address: report.address().as_ref(),
            duration_estimate: report.duration_estimate(),
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = conn
            .transaction(|conn| {
                async move {
                    let row = diesel::insert_into(reports::table)
                        .values(&new_row)
                        .returning(ReportRow::as_returning())
                        .get_result::<ReportRow>(conn)
                        .await?;
                    credit_points(conn, owner, event).await?;
                    Ok::<_, diesel::result::Error>(row)
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    ReportRepositoryError::unknown_owner(owner.to_string())
                } else {
                    map_diesel_error(err)
                }
            })?;

        row_to_report(row)
    }

    async fn find_by_id(&self, id: ReportId) -> Result<Option<Report>, ReportRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = reports::table
            .find(id.get())
            .select(ReportRow::as_select())
            .first::<ReportRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_report).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Report>, ReportRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = reports::table
            .order((reports::created_at.desc(), reports::id.desc()))
            .select(ReportRow::as_select())
            .load::<ReportRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_reports(rows)
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Report>, ReportRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = reports::table
            .filter(reports::owner_id.eq(*owner.as_uuid()))
            .order((reports::created_at.desc(), reports::id.desc()))
            .select(ReportRow::as_select())
            .load::<ReportRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_reports(rows)
    }

    async fn confirm_crediting_owner(
        &self,
        id: ReportId,
        event: ScoringEvent,
    ) -> Result<Option<ConfirmedReport>, ReportRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let confirmed = conn
            .transaction(|conn| {
                async move {
                    let updated = diesel::update(reports::table.find(id.get()))
                        .set(reports::confirmation_count.eq(reports::confirmation_count + 1))
                        .returning((reports::owner_id, reports::confirmation_count))
                        .get_result::<(Uuid, i32)>(conn)
                        .await
                        .optional()?;
                    let Some((owner, count)) = updated else {
                        return Ok(None);
                    };
                    credit_points(conn, owner, event).await?;
                    Ok::<_, diesel::result::Error>(Some((owner, count)))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        confirmed
            .map(|(owner, count)| {
                let confirmation_count =
                    u32::try_from(count).map_err(|err| invalid_row(id.get(), err))?;
                Ok(ConfirmedReport {
                    report_id: id,
                    owner: UserId::from(owner),
                    confirmation_count,
                })
            })
            .transpose()
    }

    async fn delete(&self, id: ReportId) -> Result<Option<Report>, ReportRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::delete(reports::table.find(id.get()))
            .returning(ReportRow::as_returning())
            .get_result::<ReportRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_report).transpose()
    }
}
