//! User directory types and validation rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use servicedesk_core::{AppError, AppResult, NonEmptyString, Role, UserId};

use crate::catalog::CatalogValue;

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// Performs basic structural validation: non-empty, contains exactly one `@`,
    /// local part and domain are non-empty, domain contains at least one `.`.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim().to_lowercase();

        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "email address must not be empty".to_owned(),
            ));
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        };

        if domain.contains('@') {
            return Err(AppError::Validation(
                "email address must contain exactly one '@'".to_owned(),
            ));
        }

        if local.is_empty() {
            return Err(AppError::Validation(
                "email local part must not be empty".to_owned(),
            ));
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err(AppError::Validation(
                "email domain must contain at least one '.'".to_owned(),
            ));
        }

        if trimmed.len() > 254 {
            return Err(AppError::Validation(
                "email address must not exceed 254 characters".to_owned(),
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the validated email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Display projection of a user embedded in tickets and assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    /// Referenced user.
    pub id: UserId,
    /// Display name at fetch time.
    pub name: String,
    /// Email at fetch time.
    pub email: String,
}

/// Directory entry listed on the user administration page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Canonical email address.
    pub email: String,
    /// Role as reported by the backend.
    pub role: CatalogValue<Role>,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
    /// Number of tickets raised by the user.
    pub ticket_count: u32,
    /// Number of assets assigned to the user.
    pub asset_count: u32,
}

impl UserRecord {
    /// Returns the embedded reference form of this user.
    #[must_use]
    pub fn to_ref(&self) -> UserRef {
        UserRef {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Validated input for adding a user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: NonEmptyString,
    email: EmailAddress,
    role: Role,
}

impl NewUser {
    /// Validates raw form values.
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> AppResult<Self> {
        let name = NonEmptyString::new(name.into().trim().to_owned())
            .map_err(|_| AppError::Validation("user name must not be empty".to_owned()))?;

        Ok(Self {
            name,
            email: EmailAddress::new(email)?,
            role,
        })
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the canonical email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns the initial role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}
