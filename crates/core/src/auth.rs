use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AppError, AppResult, UserId};

/// Closed set of roles a principal can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Regular employee raising tickets and tracking their own assets.
    EndUser,
    /// Service desk operator with access to every ticket and user.
    Admin,
}

impl Role {
    /// Returns the stable transport value for this role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EndUser => "END_USER",
            Self::Admin => "ADMIN",
        }
    }

    /// Returns the human-readable label for this role.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::EndUser => "End User",
            Self::Admin => "Admin",
        }
    }

    /// Returns whether this role carries service desk administration rights.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        match self {
            Self::Admin => true,
            Self::EndUser => false,
        }
    }

    /// Returns all known roles in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Role] = &[Role::EndUser, Role::Admin];

        ALL
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "END_USER" => Ok(Self::EndUser),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(AppError::Validation(format!("unknown role value '{value}'"))),
        }
    }
}

/// Authenticated actor persisted in the session.
///
/// A principal is fixed for the lifetime of a session; signing in as a
/// different user or with a different role creates a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: UserId,
    role: Role,
    display_name: String,
    email: String,
}

impl Principal {
    /// Creates a principal from directory data.
    #[must_use]
    pub fn new(
        id: UserId,
        role: Role,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id,
            role,
            display_name: display_name.into(),
            email: email.into(),
        }
    }

    /// Returns the user identifier of the principal.
    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the role held for this session.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the sign-in email.
    #[must_use]
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Returns whether the principal may use administrative controls.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Returns the principal of the same account holding `role` instead.
    #[must_use]
    pub fn with_role(&self, role: Role) -> Self {
        Self {
            role,
            ..self.clone()
        }
    }

    /// Fails with `Forbidden` unless the principal holds `role`.
    pub fn require_role(&self, role: Role) -> AppResult<()> {
        if self.role == role {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "user '{}' holds role '{}' but '{}' is required",
            self.id, self.role, role
        )))
    }
}
