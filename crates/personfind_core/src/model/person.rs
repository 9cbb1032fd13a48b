//! Person and payment card records.

use serde::{Deserialize, Serialize};

/// Stable person identifier taken from the source export.
pub type PersonId = i64;

/// One person as stored in `persons`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    /// Upper-cased full name; lookups upper-case the query to match.
    pub full_name: String,
    /// `YYYY-MM-DD`, or a prefix of it when the source was partial.
    pub birthdate: String,
}

impl Person {
    /// Creates a person, normalizing `full_name` to its stored case.
    pub fn new(id: PersonId, full_name: &str, birthdate: impl Into<String>) -> Self {
        Self {
            id,
            full_name: normalize_full_name(full_name),
            birthdate: birthdate.into(),
        }
    }
}

/// Payment card attached to a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub card_number: String,
    /// `YYYY-MM-DD` as exported.
    pub expiry_date: String,
}

impl Card {
    pub fn new(card_number: impl Into<String>, expiry_date: impl Into<String>) -> Self {
        Self {
            card_number: card_number.into(),
            expiry_date: expiry_date.into(),
        }
    }

    /// Returns the expiry as `MM/YYYY`.
    ///
    /// Dates too short to carry a month are returned as stored.
    pub fn expiry_month_year(&self) -> String {
        let date = self.expiry_date.as_str();
        match (date.get(0..4), date.get(4..5), date.get(5..7)) {
            (Some(year), Some("-"), Some(month)) => format!("{month}/{year}"),
            _ => date.to_string(),
        }
    }
}

/// Case normalization applied to names on both write and lookup paths.
pub fn normalize_full_name(name: &str) -> String {
    name.to_uppercase()
}
