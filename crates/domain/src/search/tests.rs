use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use servicedesk_core::UserId;

use super::{SearchQuery, Searchable, filter_records};
use crate::catalog::CatalogValue;
use crate::ticket::{Ticket, TicketId, TicketPriority, TicketStatus};
use crate::user::UserRef;

fn ticket(title: &str, description: &str, category: &str, creator: &str) -> Ticket {
    Ticket {
        id: TicketId::new(),
        title: title.to_owned(),
        description: description.to_owned(),
        priority: CatalogValue::from(TicketPriority::Medium),
        category: category.to_owned(),
        status: CatalogValue::from(TicketStatus::Open),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).single().unwrap_or_default(),
        creator: UserRef {
            id: UserId::new(),
            name: creator.to_owned(),
            email: format!("{}@corp.test", creator.to_lowercase()),
        },
        assignee: None,
    }
}

fn sample() -> Vec<Ticket> {
    vec![
        ticket("Printer jam", "Third floor printer eats paper", "Hardware", "Alice"),
        ticket("VPN drops", "Tunnel disconnects hourly", "Network", "Bob"),
        ticket("Licence request", "Need a design tool seat", "Software", "Carol"),
    ]
}

#[test]
fn queries_differing_in_case_and_padding_select_the_same_records() {
    assert!(SearchQuery::new("  Printer ").selects_same_as(&SearchQuery::new("printer")));
    assert!(SearchQuery::new("   ").selects_same_as(&SearchQuery::default()));
    assert!(!SearchQuery::new("printer").selects_same_as(&SearchQuery::default()));
}

#[test]
fn blank_query_returns_collection_unchanged() {
    let tickets = sample();

    for raw in ["", "   ", "\t"] {
        let filtered = filter_records(&tickets, &SearchQuery::new(raw));
        let expected: Vec<&Ticket> = tickets.iter().collect();
        assert_eq!(filtered, expected);
    }
}

#[test]
fn matches_each_searchable_field_case_insensitively() {
    let tickets = sample();

    for (raw, expected_title) in [
        ("PRINTER", "Printer jam"),
        ("tunnel", "VPN drops"),
        ("software", "Licence request"),
        ("carol", "Licence request"),
    ] {
        let filtered = filter_records(&tickets, &SearchQuery::new(raw));
        let titles: Vec<&str> = filtered.iter().map(|ticket| ticket.title.as_str()).collect();
        assert_eq!(titles, vec![expected_title], "query {raw:?}");
    }
}

#[test]
fn assignee_and_email_are_not_searched_for_tickets() {
    let tickets = sample();
    let filtered = filter_records(&tickets, &SearchQuery::new("corp.test"));
    assert!(filtered.is_empty());
}

#[test]
fn query_is_trimmed_before_matching() {
    let tickets = sample();
    let filtered = filter_records(&tickets, &SearchQuery::new("  vpn  "));

    assert_eq!(filtered.len(), 1);
    assert_eq!(SearchQuery::new("  vpn  ").raw(), "  vpn  ");
}

#[test]
fn unmatched_query_yields_nothing() {
    let tickets = sample();
    assert!(filter_records(&tickets, &SearchQuery::new("zzz")).is_empty());
}

fn arb_ticket() -> impl Strategy<Value = Ticket> {
    (
        "[a-zA-Z ]{0,12}",
        "[a-zA-Z ]{0,24}",
        prop::sample::select(&["Hardware", "Software", "Network", "Access", "Other"][..]),
        "[A-Z][a-z]{2,6}",
    )
        .prop_map(|(title, description, category, creator)| {
            ticket(&title, &description, category, &creator)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Every returned ticket contains the query in one of its searchable fields.
    #[test]
    fn prop_filter_is_sound(tickets in prop::collection::vec(arb_ticket(), 0..12), raw in "[a-zA-Z]{1,3}") {
        let query = SearchQuery::new(raw.as_str());
        let needle = raw.to_lowercase();

        for ticket in filter_records(&tickets, &query) {
            prop_assert!(ticket
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())));
        }
    }

    /// Every ticket left out contains the query in none of its fields.
    #[test]
    fn prop_filter_is_complete(tickets in prop::collection::vec(arb_ticket(), 0..12), raw in "[a-zA-Z]{1,3}") {
        let query = SearchQuery::new(raw.as_str());
        let needle = raw.to_lowercase();
        let kept = filter_records(&tickets, &query);

        for ticket in &tickets {
            let contains = ticket
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str()));
            prop_assert_eq!(contains, kept.iter().any(|kept| kept.id == ticket.id));
        }
    }
}
