//! Identity resolution for chat users.
//!
//! Every inbound event is resolved to a [`User`] through this service, which
//! registers unseen external identifiers on first contact and answers admin
//! checks against the configured allow-list.

use std::sync::Arc;

use crate::domain::ports::UserRepository;
use crate::domain::service_errors::map_user_error;
use crate::domain::{AdminAllowList, Alias, Error, ExternalId, NewUser, User, UserId};

/// Who sent a chat event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatIdentity {
    pub external_id: ExternalId,
    /// Transport-supplied display name. Never used as the public alias.
    pub display_hint: Option<String>,
}

impl ChatIdentity {
    pub fn new(external_id: ExternalId) -> Self {
        Self {
            external_id,
            display_hint: None,
        }
    }

    pub fn with_display_hint(mut self, hint: impl Into<String>) -> Self {
        self.display_hint = Some(hint.into());
        self
    }
}

/// Resolves and updates chat users.
pub struct IdentityService<U> {
    users: Arc<U>,
    admins: Arc<AdminAllowList>,
}

impl<U> Clone for IdentityService<U> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            admins: Arc::clone(&self.admins),
        }
    }
}

impl<U> IdentityService<U> {
    pub fn new(users: Arc<U>, admins: Arc<AdminAllowList>) -> Self {
        Self { users, admins }
    }

    /// Whether `external_id` is on the configured admin allow-list.
    pub fn is_admin(&self, external_id: &ExternalId) -> bool {
        self.admins.contains(external_id)
    }
}

impl<U> IdentityService<U>
where
    U: UserRepository,
{
    /// Resolve the sender, registering them with zero points and no alias
    /// when unseen. The flag reports whether the user was created.
    pub async fn get_or_create(&self, identity: &ChatIdentity) -> Result<(User, bool), Error> {
        let new_user = NewUser::new(
            identity.external_id.clone(),
            self.is_admin(&identity.external_id),
        );
        self.users
            .get_or_create(&new_user)
            .await
            .map_err(map_user_error)
    }

    /// Replace the alias of an existing user.
    pub async fn set_alias(&self, user_id: &UserId, alias: &Alias) -> Result<User, Error> {
        self.users
            .set_alias(user_id, alias)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(format!("user {user_id} not found")))
    }
}
