//! Constant display catalogues keyed by closed enums.
//!
//! Backend payloads can carry values this build does not know about. Those
//! are kept as [`CatalogValue::Unrecognized`] and rendered with the neutral
//! [`Tone::Gray`] badge instead of failing the whole list.

use std::fmt::{Display, Formatter};

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use servicedesk_core::Role;

/// Colour family used by badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    /// Positive or idle state.
    Green,
    /// Work in progress or attention soon.
    Yellow,
    /// Elevated urgency.
    Orange,
    /// Highest urgency.
    Red,
    /// Informational state.
    Blue,
    /// Neutral fallback and terminal states.
    Gray,
    /// Privileged role marker.
    Purple,
}

impl Tone {
    /// Returns the utility classes the browser client applies for this tone.
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::Green => "bg-green-100 text-green-800",
            Self::Yellow => "bg-yellow-100 text-yellow-800",
            Self::Orange => "bg-orange-100 text-orange-800",
            Self::Red => "bg-red-100 text-red-800",
            Self::Blue => "bg-blue-100 text-blue-800",
            Self::Gray => "bg-gray-100 text-gray-800",
            Self::Purple => "bg-purple-100 text-purple-800",
        }
    }
}

/// Label and tone pair shown next to a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Badge {
    /// Text shown inside the badge.
    pub label: String,
    /// Colour family of the badge.
    pub tone: Tone,
}

impl Badge {
    /// Creates a badge with an explicit label and tone.
    #[must_use]
    pub fn new(label: impl Into<String>, tone: Tone) -> Self {
        Self {
            label: label.into(),
            tone,
        }
    }

    /// Returns the fallback badge for a value outside the catalogue.
    #[must_use]
    pub fn unrecognized(raw_value: &str) -> Self {
        Self::new(raw_value, Tone::Gray)
    }
}

/// Closed enum with a stable transport value, a label and a tone.
pub trait CatalogEntry: Copy + Eq + 'static {
    /// Returns every entry in display order.
    fn all() -> &'static [Self];

    /// Returns the stable transport value.
    fn as_str(&self) -> &'static str;

    /// Returns the human-readable label.
    fn label(&self) -> &'static str;

    /// Returns the badge tone.
    fn tone(&self) -> Tone;

    /// Looks up an entry by transport value.
    fn parse(value: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|entry| entry.as_str() == value)
    }

    /// Returns the badge for this entry.
    fn badge(&self) -> Badge {
        Badge::new(self.label(), self.tone())
    }
}

/// One selectable option in a drop-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    /// Transport value submitted when chosen.
    pub value: String,
    /// Text shown for the option.
    pub label: String,
}

impl SelectOption {
    /// Creates an option from a value and label.
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Returns drop-down options for every entry of a catalogue.
#[must_use]
pub fn catalog_options<T: CatalogEntry>() -> Vec<SelectOption> {
    T::all()
        .iter()
        .map(|entry| SelectOption::new(entry.as_str(), entry.label()))
        .collect()
}

/// Value received from the backend for a catalogued field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogValue<T> {
    /// Value present in the catalogue.
    Known(T),
    /// Raw value the catalogue does not contain.
    Unrecognized(String),
}

impl<T: CatalogEntry> CatalogValue<T> {
    /// Classifies a raw transport value.
    #[must_use]
    pub fn from_raw(value: &str) -> Self {
        T::parse(value)
            .map(Self::Known)
            .unwrap_or_else(|| Self::Unrecognized(value.to_owned()))
    }

    /// Returns the catalogue entry, if recognised.
    #[must_use]
    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(entry) => Some(*entry),
            Self::Unrecognized(_) => None,
        }
    }

    /// Returns the raw transport value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(entry) => entry.as_str(),
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Returns the display label, falling back to the raw value.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Known(entry) => entry.label(),
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Returns the badge, falling back to the neutral style.
    #[must_use]
    pub fn badge(&self) -> Badge {
        match self {
            Self::Known(entry) => entry.badge(),
            Self::Unrecognized(raw) => Badge::unrecognized(raw),
        }
    }
}

impl<T> From<T> for CatalogValue<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T: CatalogEntry> Display for CatalogValue<T> {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl<T: CatalogEntry> Serialize for CatalogValue<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T: CatalogEntry> Deserialize<'de> for CatalogValue<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_raw(raw.as_str()))
    }
}

impl CatalogEntry for Role {
    fn all() -> &'static [Self] {
        Role::all()
    }

    fn as_str(&self) -> &'static str {
        Role::as_str(self)
    }

    fn label(&self) -> &'static str {
        Role::label(self)
    }

    fn tone(&self) -> Tone {
        match self {
            Self::Admin => Tone::Purple,
            Self::EndUser => Tone::Blue,
        }
    }
}

/// Ticket categories offered when raising a ticket.
pub const TICKET_CATEGORIES: &[&str] = &["Hardware", "Software", "Network", "Access", "Other"];

/// Asset types offered when registering an asset.
pub const ASSET_TYPES: &[&str] = &[
    "Computer",
    "Monitor",
    "Keyboard",
    "Mouse",
    "Network Equipment",
    "Printer",
    "Other",
];
