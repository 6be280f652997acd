//! Report conversation state machine.
//!
//! A conversation walks a user through registration and the report steps:
//!
//! ```text
//! AwaitingAlias -> ApartmentDetails -> Photo -> Address -> Duration -> done
//! ```
//!
//! Registration sessions stop after the alias. Report sessions skip the alias
//! step when the user already has one. Invalid input leaves the session on
//! the same step.

mod engine;
mod session;

pub use engine::ConversationEngine;
pub use session::{ConversationSession, ReportDraft, SessionPurpose, SessionRegistry};

use crate::domain::{AddressError, Alias, Report, UserValidationError};

/// Step a conversation is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationStep {
    AwaitingAlias,
    ApartmentDetails,
    Photo,
    Address,
    Duration,
}

/// One piece of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationInput {
    Text(String),
    Photo(Vec<u8>),
}

/// Why an input was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputRejection {
    Alias(UserValidationError),
    Address(AddressError),
    EmptyText,
    ExpectedPhoto,
    ExpectedText,
}

/// Result of feeding the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationOutcome {
    /// The session now waits on `step`.
    Prompted(ConversationStep),
    /// The input was invalid; the session still waits on `step`.
    Rejected {
        step: ConversationStep,
        reason: InputRejection,
    },
    /// A registered user returned without an open session.
    Welcome { alias: Alias },
    /// A registration-only session ended.
    Registered { alias: Alias },
    /// A report was stored and `awarded` points credited.
    Completed { report: Report, awarded: u64 },
    /// The user has no active session.
    NoSession,
}
