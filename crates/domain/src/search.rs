//! Free-text matching used by list views.

use serde::Serialize;

use crate::asset::Asset;
use crate::ticket::Ticket;
use crate::user::UserRecord;

/// Normalised free-text query.
///
/// Leading and trailing whitespace is ignored; a query that is empty after
/// trimming matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchQuery {
    raw: String,
    needle: String,
}

impl SearchQuery {
    /// Creates a query from user input.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let needle = raw.trim().to_lowercase();
        Self { raw, needle }
    }

    /// Returns the text as typed, for echoing back into the search box.
    #[must_use]
    pub fn raw(&self) -> &str {
        self.raw.as_str()
    }

    /// Returns whether the query restricts nothing.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.needle.is_empty()
    }

    /// Returns whether both queries select the same records.
    #[must_use]
    pub fn selects_same_as(&self, other: &Self) -> bool {
        self.needle == other.needle
    }

    /// Returns whether `haystack` contains the query, ignoring case.
    #[must_use]
    pub fn found_in(&self, haystack: &str) -> bool {
        haystack.to_lowercase().contains(self.needle.as_str())
    }

    /// Returns whether `record` matches this query.
    #[must_use]
    pub fn matches<T: Searchable + ?Sized>(&self, record: &T) -> bool {
        self.is_blank() || record.search_fields().into_iter().any(|field| self.found_in(field))
    }
}

/// Record exposing the text fields a list search looks at.
pub trait Searchable {
    /// Returns the fields compared against the query.
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for Ticket {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.description.as_str(),
            self.category.as_str(),
            self.creator.name.as_str(),
        ]
    }
}

impl Searchable for Asset {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.asset_type.as_str()];
        fields.extend(self.serial_number.as_deref());
        fields.extend(self.assignee.as_ref().map(|assignee| assignee.name.as_str()));
        fields
    }
}

impl Searchable for UserRecord {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}

/// Returns the records matching `query`, preserving input order.
#[must_use]
pub fn filter_records<'a, T: Searchable>(records: &'a [T], query: &SearchQuery) -> Vec<&'a T> {
    records.iter().filter(|record| query.matches(*record)).collect()
}

#[cfg(test)]
mod tests;
