//! Turns a person list into reply text.
//!
//! # Responsibility
//! - Choose detail cards or a compact list by result count.
//! - Fetch contacts and cards only for small result sets.
//! - Bound the final reply to the transport payload limit.
//!
//! # Invariants
//! - 0 results render [`NOT_FOUND_MESSAGE`] without store access.
//! - 1..=[`DETAIL_THRESHOLD`] results render one detail block each.
//! - Larger sets render one `name / birthdate` line each, with no detail
//!   lookups.
//! - [`truncate_reply`] output never exceeds [`MAX_REPLY_CHARS`].

use crate::model::person::{Card, Person};
use crate::repo::person_repo::{PersonStore, StoreResult};

pub const NOT_FOUND_MESSAGE: &str = "Not found";
/// Largest result set rendered with per-person details.
pub const DETAIL_THRESHOLD: usize = 3;
/// Transport payload limit in characters.
pub const MAX_REPLY_CHARS: usize = 4096;
pub const TRUNCATION_MARKER: &str = "...";

/// Renders `persons` as detail blocks or list lines.
///
/// # Errors
/// - Propagates store failures from detail lookups.
pub fn render_persons<S: PersonStore + ?Sized>(
    persons: &[Person],
    store: &S,
) -> StoreResult<String> {
    if persons.is_empty() {
        return Ok(NOT_FOUND_MESSAGE.to_string());
    }

    if persons.len() <= DETAIL_THRESHOLD {
        let mut blocks = Vec::with_capacity(persons.len());
        for person in persons {
            let contacts = store.contacts_of(person.id)?;
            let cards = store.cards_of(person.id)?;
            blocks.push(render_detail_block(person, &contacts, &cards));
        }
        return Ok(blocks.join("\n\n"));
    }

    Ok(persons
        .iter()
        .map(render_list_line)
        .collect::<Vec<_>>()
        .join("\n"))
}

/// Multi-line card with contacts and payment cards.
pub fn render_detail_block(person: &Person, contacts: &[String], cards: &[Card]) -> String {
    let mut lines = Vec::with_capacity(contacts.len() + cards.len() + 3);
    lines.push(render_list_line(person));
    lines.push("Contacts:".to_string());
    lines.extend(contacts.iter().cloned());
    lines.push("Cards:".to_string());
    lines.extend(
        cards
            .iter()
            .map(|card| format!("{} until {}", card.card_number, card.expiry_month_year())),
    );
    lines.join("\n")
}

/// Compact `name / birthdate` line.
pub fn render_list_line(person: &Person) -> String {
    format!("{} / {}", person.full_name, person.birthdate)
}

/// Cuts `text` to at most [`MAX_REPLY_CHARS`] characters.
///
/// Longer text keeps its first `MAX_REPLY_CHARS - 3` characters followed by
/// [`TRUNCATION_MARKER`].
pub fn truncate_reply(text: String) -> String {
    if text.chars().count() <= MAX_REPLY_CHARS {
        return text;
    }

    let keep = MAX_REPLY_CHARS - TRUNCATION_MARKER.chars().count();
    let cut = text
        .char_indices()
        .nth(keep)
        .map_or(text.len(), |(index, _)| index);

    let mut truncated = text;
    truncated.truncate(cut);
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}
