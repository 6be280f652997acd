//! Reporter identity model.
//!
//! A user is keyed internally by a [`UserId`] and externally by the opaque
//! identifier the chat transport supplies. The public [`Alias`] is the only
//! name shown on the leaderboard.

use std::collections::HashSet;
use std::fmt;

use uuid::Uuid;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyExternalId,
    InvalidId,
    AliasTooShort { min: usize },
    AliasTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyExternalId => write!(f, "external id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::AliasTooShort { min } => write!(f, "alias must be at least {min} characters"),
            Self::AliasTooLong { max } => write!(f, "alias must be at most {max} characters"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Internal user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its canonical string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for UserId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque identifier assigned to a user by the chat transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExternalId(String);

impl ExternalId {
    /// Validate and construct an [`ExternalId`]; surrounding whitespace is dropped.
    pub fn new(id: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = id.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyExternalId);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ExternalId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ExternalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Minimum alias length in characters.
pub const ALIAS_MIN: usize = 2;
/// Maximum alias length in characters.
pub const ALIAS_MAX: usize = 30;

/// Public display name chosen by the user.
///
/// ## Invariants
/// - Between [`ALIAS_MIN`] and [`ALIAS_MAX`] characters after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias(String);

impl Alias {
    /// Validate and construct an [`Alias`] from raw chat input.
    ///
    /// # Examples
    /// ```
    /// use leerstand::domain::Alias;
    ///
    /// let alias = Alias::new("  Alex ").expect("valid alias");
    /// assert_eq!(alias.as_ref(), "Alex");
    /// assert!(Alias::new("A").is_err());
    /// ```
    pub fn new(alias: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = alias.into();
        let trimmed = raw.trim();
        let length = trimmed.chars().count();
        if length < ALIAS_MIN {
            return Err(UserValidationError::AliasTooShort { min: ALIAS_MIN });
        }
        if length > ALIAS_MAX {
            return Err(UserValidationError::AliasTooLong { max: ALIAS_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Request to register a user on first contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    id: UserId,
    external_id: ExternalId,
    is_admin: bool,
}

impl NewUser {
    /// Prepare a registration with a freshly generated [`UserId`].
    pub fn new(external_id: ExternalId, is_admin: bool) -> Self {
        Self {
            id: UserId::random(),
            external_id,
            is_admin,
        }
    }

    /// Identifier the user receives if the registration wins.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Transport identifier being registered.
    pub fn external_id(&self) -> &ExternalId {
        &self.external_id
    }

    /// Whether the user was on the admin allow-list at registration time.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

/// Stored state used to restore a [`User`] from persistence.
#[derive(Debug, Clone)]
pub struct UserDraft {
    pub id: UserId,
    pub external_id: ExternalId,
    pub alias: Option<Alias>,
    pub points: u64,
    pub is_admin: bool,
}

/// Registered reporter.
///
/// ## Invariants
/// - `points` only grows, and only through the points ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    external_id: ExternalId,
    alias: Option<Alias>,
    points: u64,
    is_admin: bool,
}

impl User {
    /// Freshly registered user with no alias and zero points.
    pub fn registered(new_user: &NewUser) -> Self {
        Self {
            id: new_user.id,
            external_id: new_user.external_id.clone(),
            alias: None,
            points: 0,
            is_admin: new_user.is_admin,
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn external_id(&self) -> &ExternalId {
        &self.external_id
    }

    pub fn alias(&self) -> Option<&Alias> {
        self.alias.as_ref()
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    /// Admin flag recorded at registration.
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub(crate) fn rename(&mut self, alias: Alias) {
        self.alias = Some(alias);
    }

    pub(crate) fn credit(&mut self, amount: u64) -> u64 {
        self.points = self.points.saturating_add(amount);
        self.points
    }
}

impl From<UserDraft> for User {
    fn from(draft: UserDraft) -> Self {
        let UserDraft {
            id,
            external_id,
            alias,
            points,
            is_admin,
        } = draft;
        Self {
            id,
            external_id,
            alias,
            points,
            is_admin,
        }
    }
}

/// External identifiers that may perform administrative actions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminAllowList(HashSet<ExternalId>);

impl AdminAllowList {
    /// Build an allow-list from already validated identifiers.
    pub fn new(ids: impl IntoIterator<Item = ExternalId>) -> Self {
        Self(ids.into_iter().collect())
    }

    /// Parse a comma-separated list, skipping blank entries.
    ///
    /// # Examples
    /// ```
    /// use leerstand::domain::{AdminAllowList, ExternalId};
    ///
    /// let admins = AdminAllowList::from_csv("42, ,ohne_u");
    /// assert_eq!(admins.len(), 2);
    /// assert!(admins.contains(&ExternalId::new("ohne_u").expect("valid id")));
    /// ```
    pub fn from_csv(raw: &str) -> Self {
        Self::new(raw.split(',').filter_map(|entry| ExternalId::new(entry).ok()))
    }

    pub fn contains(&self, external_id: &ExternalId) -> bool {
        self.0.contains(external_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
