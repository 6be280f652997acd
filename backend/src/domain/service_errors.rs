//! Mapping from driven-port failures to domain errors.

use super::Error;
use super::ports::{MediaStoreError, PointsLedgerError, ReportRepositoryError, UserPersistenceError};

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

pub(crate) fn map_report_error(error: ReportRepositoryError) -> Error {
    match error {
        ReportRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("report repository unavailable: {message}"))
        }
        ReportRepositoryError::Query { message } => {
            Error::internal(format!("report repository error: {message}"))
        }
        ReportRepositoryError::UnknownOwner { owner } => {
            Error::not_found(format!("user {owner} not found"))
        }
    }
}

pub(crate) fn map_ledger_error(error: PointsLedgerError) -> Error {
    match error {
        PointsLedgerError::Connection { message } => {
            Error::service_unavailable(format!("points ledger unavailable: {message}"))
        }
        PointsLedgerError::Query { message } => {
            Error::internal(format!("points ledger error: {message}"))
        }
    }
}

pub(crate) fn map_media_error(error: MediaStoreError) -> Error {
    match error {
        MediaStoreError::Io { message } => {
            Error::service_unavailable(format!("media store unavailable: {message}"))
        }
        MediaStoreError::NotFound { reference } => {
            Error::not_found(format!("media {reference} not found"))
        }
    }
}
