//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PointsLedger`], [`MediaStore`]) are
//! implemented by outbound adapters. Driving ports (`*Command`, `*Query`)
//! are implemented by domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod conversation_command;
mod media_store;
mod points_ledger;
mod report_repository;
mod reports_command;
mod reports_query;
mod user_repository;

#[cfg(test)]
pub use conversation_command::MockConversationCommand;
pub use conversation_command::ConversationCommand;
#[cfg(test)]
pub use media_store::MockMediaStore;
pub use media_store::{MediaStore, MediaStoreError};
#[cfg(test)]
pub use points_ledger::MockPointsLedger;
pub use points_ledger::{PointsLedger, PointsLedgerError};
#[cfg(test)]
pub use report_repository::MockReportRepository;
pub use report_repository::{ReportRepository, ReportRepositoryError};
#[cfg(test)]
pub use reports_command::MockReportsCommand;
pub use reports_command::{RemovedReport, ReportsCommand};
#[cfg(test)]
pub use reports_query::MockReportsQuery;
pub use reports_query::ReportsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
