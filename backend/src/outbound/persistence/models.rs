//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain values.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{reports, users};

/// Row read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub external_id: String,
    pub alias: Option<String>,
    pub points: i64,
    pub is_admin: bool,
}

/// Insertable registration.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub external_id: &'a str,
    pub is_admin: bool,
}

/// Row read from the reports table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = reports)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReportRow {
    pub id: i64,
    pub owner_id: Uuid,
    pub image_reference: String,
    pub apartment_details: Option<String>,
    pub address: String,
    pub duration_estimate: String,
    pub confirmation_count: i32,
    pub created_at: DateTime<Utc>,
}

/// Insertable report; id, count, and timestamp come from column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = reports)]
pub(crate) struct NewReportRow<'a> {
    pub owner_id: Uuid,
    pub image_reference: &'a str,
    pub apartment_details: Option<&'a str>,
    pub address: &'a str,
    pub duration_estimate: &'a str,
}
