use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::organisation::errors::OrganisationIdError;
use crate::domain::organisation::errors::OrganisationNameError;

/// Organisation unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrganisationId(pub Uuid);

impl OrganisationId {
    /// Generate a new random organisation ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an organisation ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, OrganisationIdError> {
        Uuid::parse_str(s)
            .map(OrganisationId)
            .map_err(|e| OrganisationIdError::InvalidFormat(e.to_string()))
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for OrganisationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OrganisationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Organisation name value object.
///
/// Non-empty after trimming, at most 255 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganisationName(String);

impl OrganisationName {
    const MAX_LENGTH: usize = 255;

    /// # Errors
    /// * `Empty` - Name is empty or whitespace
    /// * `TooLong` - Name longer than 255 characters
    pub fn new(name: String) -> Result<Self, OrganisationNameError> {
        let trimmed = name.trim();
        let length = trimmed.chars().count();

        if length == 0 {
            return Err(OrganisationNameError::Empty);
        }

        if length > Self::MAX_LENGTH {
            return Err(OrganisationNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Organisation aggregate.
///
/// Membership is stored alongside but not loaded with the aggregate.
#[derive(Debug, Clone)]
pub struct Organisation {
    pub id: OrganisationId,
    pub name: OrganisationName,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Command to create an organisation
#[derive(Debug)]
pub struct CreateOrganisationCommand {
    pub name: OrganisationName,
    pub description: Option<String>,
}
