//! Driving port for the report conversation.
//!
//! Inbound adapters feed chat input through this port one user at a time;
//! the implementation owns the per-user session state.

use async_trait::async_trait;

use crate::domain::{ChatIdentity, ConversationInput, ConversationOutcome, Error, ExternalId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ConversationCommand: Send + Sync {
    /// Register the user if needed. Users without an alias enter a
    /// registration session; users with one are greeted.
    async fn start(&self, identity: &ChatIdentity) -> Result<ConversationOutcome, Error>;

    /// Open a report session, replacing any session already in progress.
    async fn begin_report(&self, identity: &ChatIdentity) -> Result<ConversationOutcome, Error>;

    /// Apply one input to the user's active session.
    async fn advance(
        &self,
        external_id: &ExternalId,
        input: ConversationInput,
    ) -> Result<ConversationOutcome, Error>;

    /// Drop the user's active session. Returns whether one existed.
    async fn cancel(&self, external_id: &ExternalId) -> bool;
}
