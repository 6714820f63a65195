//! Localised interface strings.

use std::str::FromStr;

use serde::Serialize;
use servicedesk_core::AppError;

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// German.
    De,
}

impl Locale {
    /// Returns the language tag.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }
}

impl FromStr for Locale {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let language = value
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match language.as_str() {
            "en" => Ok(Self::En),
            "de" => Ok(Self::De),
            _ => Err(AppError::Validation(format!("unsupported locale '{value}'"))),
        }
    }
}

/// Strings shared by every page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommonStrings {
    /// Search button.
    pub search: &'static str,
    /// Clear-search button.
    pub clear_search: &'static str,
    /// Label of the "nobody" assignment option.
    pub unassigned: &'static str,
}

/// Strings of one list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListStrings {
    /// Shown while the first fetch runs.
    pub loading: &'static str,
    /// Shown when the collection is empty.
    pub empty: &'static str,
    /// Shown when a query matches nothing.
    pub no_matches: &'static str,
    /// Placeholder of the search box.
    pub search_placeholder: &'static str,
}

/// Captions of the dashboard statistics cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStrings {
    /// Total tickets title.
    pub total_tickets: &'static str,
    /// Open tickets title.
    pub open_tickets: &'static str,
    /// Total assets title.
    pub total_assets: &'static str,
    /// Assigned assets title.
    pub assigned_assets: &'static str,
    /// Caption when there are no tickets.
    pub no_tickets_yet: &'static str,
    /// Caption suffix after the open ticket count.
    pub open_suffix: &'static str,
    /// Caption when no ticket is open.
    pub no_open_tickets: &'static str,
    /// Caption when tickets are open.
    pub requires_attention: &'static str,
    /// Caption when there are no assets.
    pub no_assets_yet: &'static str,
    /// Caption when assets exist.
    pub hardware_and_software: &'static str,
    /// Caption when no asset is assigned.
    pub no_assigned_assets: &'static str,
    /// Caption when assets are assigned.
    pub currently_in_use: &'static str,
}

/// Complete string table for one locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Strings {
    /// Shared strings.
    pub common: CommonStrings,
    /// Ticket list strings.
    pub tickets: ListStrings,
    /// Asset list strings.
    pub assets: ListStrings,
    /// User list strings.
    pub users: ListStrings,
    /// Dashboard strings.
    pub dashboard: DashboardStrings,
}

const ENGLISH: Strings = Strings {
    common: CommonStrings {
        search: "Search",
        clear_search: "Clear",
        unassigned: "Unassigned",
    },
    tickets: ListStrings {
        loading: "Loading tickets...",
        empty: "No tickets found. Create your first ticket to get started.",
        no_matches: "No tickets match your search.",
        search_placeholder: "Search tickets by title, description, category, or user...",
    },
    assets: ListStrings {
        loading: "Loading assets...",
        empty: "No assets found. Add your first asset to get started.",
        no_matches: "No assets match your search.",
        search_placeholder: "Search assets by name, type, serial number, or holder...",
    },
    users: ListStrings {
        loading: "Loading users...",
        empty: "No users found. Add your first user to get started.",
        no_matches: "No users match your search.",
        search_placeholder: "Search users by name or email...",
    },
    dashboard: DashboardStrings {
        total_tickets: "Total Tickets",
        open_tickets: "Open Tickets",
        total_assets: "Total Assets",
        assigned_assets: "Assigned Assets",
        no_tickets_yet: "No tickets yet",
        open_suffix: "open",
        no_open_tickets: "No open tickets",
        requires_attention: "Requires attention",
        no_assets_yet: "No assets yet",
        hardware_and_software: "Hardware & software",
        no_assigned_assets: "No assigned assets",
        currently_in_use: "Currently in use",
    },
};

const GERMAN: Strings = Strings {
    common: CommonStrings {
        search: "Suchen",
        clear_search: "Zurücksetzen",
        unassigned: "Nicht zugewiesen",
    },
    tickets: ListStrings {
        loading: "Tickets werden geladen...",
        empty: "Keine Tickets vorhanden. Erstellen Sie Ihr erstes Ticket.",
        no_matches: "Keine Tickets entsprechen Ihrer Suche.",
        search_placeholder: "Tickets nach Titel, Beschreibung, Kategorie oder Person suchen...",
    },
    assets: ListStrings {
        loading: "Geräte werden geladen...",
        empty: "Keine Geräte vorhanden. Fügen Sie Ihr erstes Gerät hinzu.",
        no_matches: "Keine Geräte entsprechen Ihrer Suche.",
        search_placeholder: "Geräte nach Name, Typ, Seriennummer oder Person suchen...",
    },
    users: ListStrings {
        loading: "Benutzer werden geladen...",
        empty: "Keine Benutzer vorhanden. Fügen Sie Ihren ersten Benutzer hinzu.",
        no_matches: "Keine Benutzer entsprechen Ihrer Suche.",
        search_placeholder: "Benutzer nach Name oder E-Mail suchen...",
    },
    dashboard: DashboardStrings {
        total_tickets: "Tickets gesamt",
        open_tickets: "Offene Tickets",
        total_assets: "Geräte gesamt",
        assigned_assets: "Zugewiesene Geräte",
        no_tickets_yet: "Noch keine Tickets",
        open_suffix: "offen",
        no_open_tickets: "Keine offenen Tickets",
        requires_attention: "Benötigt Aufmerksamkeit",
        no_assets_yet: "Noch keine Geräte",
        hardware_and_software: "Hardware & Software",
        no_assigned_assets: "Keine zugewiesenen Geräte",
        currently_in_use: "Derzeit in Verwendung",
    },
};

/// Application service resolving string tables, created once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringCatalog {
    default_locale: Locale,
}

impl StringCatalog {
    /// Creates a catalogue falling back to `default_locale`.
    #[must_use]
    pub fn new(default_locale: Locale) -> Self {
        Self { default_locale }
    }

    /// Returns the fallback locale.
    #[must_use]
    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    /// Returns the table for `locale`.
    #[must_use]
    pub fn strings(&self, locale: Locale) -> &'static Strings {
        match locale {
            Locale::En => &ENGLISH,
            Locale::De => &GERMAN,
        }
    }

    /// Returns the table for an `Accept-Language` style tag, or the default.
    #[must_use]
    pub fn strings_for_tag(&self, tag: Option<&str>) -> &'static Strings {
        let locale = tag
            .and_then(|value| value.split(',').next())
            .and_then(|value| value.split(';').next())
            .and_then(|value| Locale::from_str(value.trim()).ok())
            .unwrap_or(self.default_locale);

        self.strings(locale)
    }
}

impl Default for StringCatalog {
    fn default() -> Self {
        Self::new(Locale::default())
    }
}
