//! Vacancy report model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

use super::address::Address;
use super::user::UserId;

/// Validation errors for report values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportValidationError {
    InvalidId,
    EmptyImageReference,
    EmptyDurationEstimate,
    MissingField { field: &'static str },
}

impl fmt::Display for ReportValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "report id must be a positive integer"),
            Self::EmptyImageReference => write!(f, "image reference must not be empty"),
            Self::EmptyDurationEstimate => write!(f, "duration estimate must not be empty"),
            Self::MissingField { field } => write!(f, "report draft is missing {field}"),
        }
    }
}

impl std::error::Error for ReportValidationError {}

/// Store-assigned report identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportId(i64);

impl ReportId {
    pub fn new(id: i64) -> Result<Self, ReportValidationError> {
        if id <= 0 {
            return Err(ReportValidationError::InvalidId);
        }
        Ok(Self(id))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for ReportId {
    type Err = ReportValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<i64>()
            .map_err(|_| ReportValidationError::InvalidId)?;
        Self::new(id)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque handle to a photo held by the media store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageReference(String);

impl ImageReference {
    pub fn new(reference: impl Into<String>) -> Result<Self, ReportValidationError> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            return Err(ReportValidationError::EmptyImageReference);
        }
        Ok(Self(reference))
    }
}

impl AsRef<str> for ImageReference {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Fully collected report waiting to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReport {
    owner: UserId,
    image: ImageReference,
    apartment_details: Option<String>,
    address: Address,
    duration_estimate: String,
}

impl NewReport {
    /// Assemble a report; the free-text fields are trimmed and blank details dropped.
    pub fn new(
        owner: UserId,
        image: ImageReference,
        apartment_details: Option<String>,
        address: Address,
        duration_estimate: &str,
    ) -> Result<Self, ReportValidationError> {
        let duration_estimate = duration_estimate.trim();
        if duration_estimate.is_empty() {
            return Err(ReportValidationError::EmptyDurationEstimate);
        }
        let apartment_details = apartment_details
            .map(|details| details.trim().to_owned())
            .filter(|details| !details.is_empty());
        Ok(Self {
            owner,
            image,
            apartment_details,
            address,
            duration_estimate: duration_estimate.to_owned(),
        })
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    pub fn image(&self) -> &ImageReference {
        &self.image
    }

    pub fn apartment_details(&self) -> Option<&str> {
        self.apartment_details.as_deref()
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn duration_estimate(&self) -> &str {
        self.duration_estimate.as_str()
    }
}

/// Persisted vacancy report.
///
/// ## Invariants
/// - `confirmation_count` only grows.
/// - `address` passed the address format check when it was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    id: ReportId,
    details: NewReport,
    confirmation_count: u32,
    created_at: DateTime<Utc>,
}

impl Report {
    /// Combine submitted details with the values the store assigned.
    pub fn from_parts(
        id: ReportId,
        details: NewReport,
        confirmation_count: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            details,
            confirmation_count,
            created_at,
        }
    }

    pub fn id(&self) -> ReportId {
        self.id
    }

    pub fn owner(&self) -> UserId {
        self.details.owner
    }

    pub fn image(&self) -> &ImageReference {
        &self.details.image
    }

    pub fn apartment_details(&self) -> Option<&str> {
        self.details.apartment_details()
    }

    pub fn address(&self) -> &Address {
        &self.details.address
    }

    pub fn duration_estimate(&self) -> &str {
        self.details.duration_estimate()
    }

    pub fn confirmation_count(&self) -> u32 {
        self.confirmation_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn confirm(&mut self) -> u32 {
        self.confirmation_count = self.confirmation_count.saturating_add(1);
        self.confirmation_count
    }
}

/// Result of a successful confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedReport {
    pub report_id: ReportId,
    pub owner: UserId,
    pub confirmation_count: u32,
}
