//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod asset;
mod catalog;
mod navigation;
mod search;
mod ticket;
mod time;
mod user;

pub use asset::{Asset, AssetId, AssetStatus, NewAsset};
pub use catalog::{
    ASSET_TYPES, Badge, CatalogEntry, CatalogValue, SelectOption, TICKET_CATEGORIES, Tone,
    catalog_options,
};
pub use navigation::{Destination, QuickAction};
pub use search::{SearchQuery, Searchable, filter_records};
pub use ticket::{
    DESCRIPTION_EXCERPT_CHARS, NewTicket, Ticket, TicketId, TicketPriority, TicketStatus, excerpt,
};
pub use time::relative_age;
pub use user::{EmailAddress, NewUser, UserRecord, UserRef};
pub use servicedesk_core::{Principal, Role, UserId};
