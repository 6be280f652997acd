//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Alias, ExternalId, NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Return the user registered under `user.external_id()`, registering
    /// `user` first when none exists. The flag reports whether the call
    /// created the record. Concurrent callers observe the same user.
    async fn get_or_create(&self, user: &NewUser) -> Result<(User, bool), UserPersistenceError>;

    /// Fetch a user by transport identifier.
    async fn find_by_external_id(
        &self,
        external_id: &ExternalId,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Replace the alias of an existing user. `None` when the user is unknown.
    async fn set_alias(
        &self,
        id: &UserId,
        alias: &Alias,
    ) -> Result<Option<User>, UserPersistenceError>;
}
