//! Postal address format check for reported dwellings.
//!
//! Addresses are accepted in the form `Street HouseNumber, City`. The check
//! is structural only; nothing is geocoded.

use std::fmt;

/// Reasons an address is rejected, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressError {
    /// No comma separates street and city.
    MissingComma,
    /// The street part carries no digit.
    MissingHouseNumber,
    /// Nothing but whitespace follows the comma.
    MissingCity,
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingComma => write!(f, "address must separate street and city with a comma"),
            Self::MissingHouseNumber => write!(f, "address must contain a house number"),
            Self::MissingCity => write!(f, "address must name a city after the comma"),
        }
    }
}

impl std::error::Error for AddressError {}

/// Validate that `text` looks like `Street HouseNumber, City`.
///
/// The split happens at the first comma: the part before it must contain at
/// least one digit, the part after it at least one non-whitespace token.
///
/// # Examples
/// ```
/// use leerstand::domain::{validate_address, AddressError};
///
/// assert!(validate_address("Musterstraße 12, Berlin").is_ok());
/// assert_eq!(validate_address("Musterstraße, Berlin"), Err(AddressError::MissingHouseNumber));
/// ```
pub fn validate_address(text: &str) -> Result<(), AddressError> {
    let (street, city) = text.split_once(',').ok_or(AddressError::MissingComma)?;
    if !street.chars().any(|c| c.is_ascii_digit()) {
        return Err(AddressError::MissingHouseNumber);
    }
    if city.split_whitespace().next().is_none() {
        return Err(AddressError::MissingCity);
    }
    Ok(())
}

/// Address that passed [`validate_address`], stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address(String);

impl Address {
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let trimmed = text.trim();
        validate_address(trimmed)?;
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}
