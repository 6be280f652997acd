//! Domain primitives, services, and ports.
//!
//! Purpose: model reporters, vacancy reports, and the points they earn,
//! independent of the chat transport and of storage. Inbound adapters talk
//! to the services through the driving ports in [`ports`]; outbound adapters
//! implement the driven ports.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`User`], [`Alias`], [`ExternalId`]: reporter identity.
//! - [`Report`], [`Address`]: vacancy reports and their address check.
//! - [`ConversationEngine`]: the report conversation state machine.
//! - [`ReportsService`]: confirmations, moderation, listings, ranking.

pub mod address;
pub mod conversation;
pub mod error;
pub mod identity_service;
pub mod ports;
pub mod report;
pub mod reports_service;
pub mod scoring;
mod service_errors;
pub mod user;

pub use self::address::{Address, AddressError, validate_address};
pub use self::conversation::{
    ConversationEngine, ConversationInput, ConversationOutcome, ConversationStep, InputRejection,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::identity_service::{ChatIdentity, IdentityService};
pub use self::report::{
    ConfirmedReport, ImageReference, NewReport, Report, ReportId, ReportValidationError,
};
pub use self::reports_service::ReportsService;
pub use self::scoring::{
    CONFIRMATION_RECEIVED_POINTS, LeaderboardEntry, REPORT_SUBMITTED_POINTS, ScoringEvent,
    expected_points,
};
pub use self::user::{
    ALIAS_MAX, ALIAS_MIN, AdminAllowList, Alias, ExternalId, NewUser, User, UserDraft, UserId,
    UserValidationError,
};
