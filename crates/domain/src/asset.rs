use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use servicedesk_core::{AppError, AppResult, NonEmptyString};
use uuid::Uuid;

use crate::catalog::{ASSET_TYPES, CatalogEntry, CatalogValue, Tone};
use crate::user::UserRef;

/// Unique identifier for an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(Uuid);

impl AssetId {
    /// Creates a random asset identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an asset identifier from an existing UUID value.
    #[must_use]
    pub fn from_uuid(value: Uuid) -> Self {
        Self(value)
    }

    /// Returns the underlying UUID value.
    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for AssetId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Availability of a tracked asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    /// In stock.
    Available,
    /// Handed out to a user.
    Assigned,
    /// Temporarily out of service.
    UnderMaintenance,
    /// Decommissioned.
    Retired,
}

impl CatalogEntry for AssetStatus {
    fn all() -> &'static [Self] {
        const ALL: &[AssetStatus] = &[
            AssetStatus::Available,
            AssetStatus::Assigned,
            AssetStatus::UnderMaintenance,
            AssetStatus::Retired,
        ];

        ALL
    }

    fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Assigned => "ASSIGNED",
            Self::UnderMaintenance => "UNDER_MAINTENANCE",
            Self::Retired => "RETIRED",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Assigned => "Assigned",
            Self::UnderMaintenance => "Under Maintenance",
            Self::Retired => "Retired",
        }
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Available => Tone::Green,
            Self::Assigned => Tone::Blue,
            Self::UnderMaintenance => Tone::Yellow,
            Self::Retired => Tone::Gray,
        }
    }
}

impl FromStr for AssetStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
            .ok_or_else(|| AppError::Validation(format!("unknown asset status value '{value}'")))
    }
}

/// Hardware or software asset as last fetched from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique asset identifier.
    pub id: AssetId,
    /// Inventory name.
    pub name: String,
    /// Asset type label.
    pub asset_type: String,
    /// Manufacturer serial number, if recorded.
    pub serial_number: Option<String>,
    /// Availability as reported by the backend.
    pub status: CatalogValue<AssetStatus>,
    /// Registration time.
    pub created_at: DateTime<Utc>,
    /// Current holder, if any.
    pub assignee: Option<UserRef>,
}

impl Asset {
    /// Returns whether the asset is handed out.
    #[must_use]
    pub fn is_assigned(&self) -> bool {
        self.status.known() == Some(AssetStatus::Assigned)
    }
}

/// Validated input for registering an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    name: NonEmptyString,
    asset_type: String,
    serial_number: Option<String>,
}

impl NewAsset {
    /// Validates raw form values.
    pub fn new(
        name: impl Into<String>,
        asset_type: impl Into<String>,
        serial_number: Option<String>,
    ) -> AppResult<Self> {
        let name = NonEmptyString::new(name.into().trim().to_owned())
            .map_err(|_| AppError::Validation("asset name must not be empty".to_owned()))?;

        let asset_type = asset_type.into();
        if !ASSET_TYPES.contains(&asset_type.as_str()) {
            return Err(AppError::Validation(format!(
                "unknown asset type '{asset_type}'"
            )));
        }

        let serial_number = serial_number
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty());

        Ok(Self {
            name,
            asset_type,
            serial_number,
        })
    }

    /// Returns the inventory name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the asset type label.
    #[must_use]
    pub fn asset_type(&self) -> &str {
        self.asset_type.as_str()
    }

    /// Returns the serial number, if one was entered.
    #[must_use]
    pub fn serial_number(&self) -> Option<&str> {
        self.serial_number.as_deref()
    }
}
