//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (e.g., non-empty tracking ids,
//! normalized/validated email) so that once a value reaches the domain layer it
//! can be sent to the backend without further checks.
use std::{ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidateEmail;

/// Longest tracking id the backend accepts.
pub const TRACKING_ID_MAX_LEN: usize = 128;
/// Longest email the backend accepts.
pub const EMAIL_MAX_LEN: usize = 320;
/// Longest campaign name the backend accepts.
pub const CAMPAIGN_NAME_MAX_LEN: usize = 256;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided email failed format validation.
    #[error("invalid email address")]
    InvalidEmail,
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided string exceeded the accepted length.
    #[error("value is longer than {0} characters")]
    TooLong(usize),
    /// Provided uuid failed format validation.
    #[error("invalid uuid value")]
    InvalidUuid,
    /// Provided event type is neither `open` nor `click`.
    #[error("event type must be \"open\" or \"click\"")]
    InvalidEventType,
}

/// Trims and validates an email string. Casing is kept as typed since the
/// backend matches emails exactly.
fn normalize_email<S: Into<String>>(email: S) -> Result<String, TypeConstraintError> {
    let normalized = email.into().trim().to_string();
    if normalized.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    if normalized.chars().count() > EMAIL_MAX_LEN {
        return Err(TypeConstraintError::TooLong(EMAIL_MAX_LEN));
    }
    if normalized.validate_email() {
        Ok(normalized)
    } else {
        Err(TypeConstraintError::InvalidEmail)
    }
}

/// Trimmed and validated email address identifying a lead.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct LeadEmail(String);

impl LeadEmail {
    /// Validates and normalizes an email string.
    pub fn new<S: Into<String>>(email: S) -> Result<Self, TypeConstraintError> {
        let normalized = normalize_email(email)?;
        Ok(Self(normalized))
    }

    /// Borrow the email as a `&str`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the owned inner `String`.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for LeadEmail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for LeadEmail {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(TypeConstraintError::EmptyString);
        }
        Ok(Self(trimmed))
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

macro_rules! bounded_string_newtype {
    ($name:ident, $max:expr, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value within the length cap.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new(value)?.into_inner();
                if inner.chars().count() > $max {
                    return Err(TypeConstraintError::TooLong($max));
                }
                Ok(Self(inner))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

bounded_string_newtype!(
    TrackingId,
    TRACKING_ID_MAX_LEN,
    "Short human-facing lead identifier used in filters and redirect URLs."
);

bounded_string_newtype!(
    CampaignName,
    CAMPAIGN_NAME_MAX_LEN,
    "Campaign attribution label enforcing trimmed, non-empty values."
);

/// Macro to generate uuid-backed identifiers assigned by the backend.
macro_rules! uuid_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(Uuid);

        impl $name {
            /// Wraps an already parsed uuid.
            pub const fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the raw uuid backing this identifier.
            pub const fn get(self) -> Uuid {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = TypeConstraintError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(
                    Uuid::parse_str(s.trim()).map_err(|_| TypeConstraintError::InvalidUuid)?,
                ))
            }
        }
    };
}

uuid_newtype!(LeadId, "Stable server-assigned identifier of a lead.");
uuid_newtype!(EventId, "Server-assigned identifier of a recorded event.");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_email_is_trimmed_but_keeps_case() {
        let email = LeadEmail::new("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "Alice@Example.COM");
    }

    #[test]
    fn lead_email_rejects_garbage() {
        assert_eq!(
            LeadEmail::new("not-an-email"),
            Err(TypeConstraintError::InvalidEmail)
        );
        assert_eq!(LeadEmail::new("   "), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn tracking_id_enforces_bounds() {
        assert_eq!(TrackingId::new(" t1 ").unwrap().as_str(), "t1");
        assert_eq!(TrackingId::new(""), Err(TypeConstraintError::EmptyString));
        assert_eq!(
            TrackingId::new("x".repeat(TRACKING_ID_MAX_LEN + 1)),
            Err(TypeConstraintError::TooLong(TRACKING_ID_MAX_LEN))
        );
    }

    #[test]
    fn lead_id_parses_uuid_strings() {
        let raw = "7f1d3c9e-2b64-4c1e-9a55-0c2f7c1d8e90";
        let id: LeadId = raw.parse().unwrap();
        assert_eq!(id.to_string(), raw);
        assert_eq!(
            "t99".parse::<LeadId>(),
            Err(TypeConstraintError::InvalidUuid)
        );
    }
}
