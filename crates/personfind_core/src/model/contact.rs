//! Contact identifiers (phone numbers, emails) and the reversed-column rule.

use crate::model::person::PersonId;
use serde::{Deserialize, Serialize};

/// One row of `contacts`.
///
/// `info_reversed` exists only so a suffix lookup on `info` can run as an
/// indexed prefix lookup. Writers must keep it equal to `reverse_info(info)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub person_id: PersonId,
    pub info: String,
    pub info_reversed: String,
}

impl ContactRecord {
    /// Builds a record with `info_reversed` derived from `info`.
    pub fn new(person_id: PersonId, info: impl Into<String>) -> Self {
        let info = info.into();
        let info_reversed = reverse_info(&info);
        Self {
            person_id,
            info,
            info_reversed,
        }
    }

    /// Returns whether `reverse(info_reversed) == info` holds.
    pub fn is_consistent(&self) -> bool {
        reverse_info(&self.info_reversed) == self.info
    }
}

/// Reverses text by Unicode scalar value.
pub fn reverse_info(value: &str) -> String {
    value.chars().rev().collect()
}
