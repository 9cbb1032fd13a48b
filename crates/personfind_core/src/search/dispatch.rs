//! Query dispatcher over an injected [`PersonStore`].
//!
//! # Invariants
//! - No lookup returns more than [`MAX_RESULT_ROWS`] persons.
//! - Name lookups upper-case the query to match the stored case.
//! - Suffix lookups reverse the query and run as prefix lookups on
//!   `info_reversed`.
//! - Store failures propagate unchanged.

use crate::command::parser::SearchRequest;
use crate::model::contact::reverse_info;
use crate::model::person::{normalize_full_name, Person};
use crate::repo::person_repo::{ContactColumn, PersonStore, StoreResult};

/// Row cap shared by every lookup form.
pub const MAX_RESULT_ROWS: u32 = 100;

/// Executes lookup requests against a person store.
pub struct QueryDispatcher<S: PersonStore> {
    store: S,
}

impl<S: PersonStore> QueryDispatcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Store used for lookups; renderers fetch details through it.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persons whose name starts with `upper(name)`.
    pub fn find_by_name(&self, name: &str) -> StoreResult<Vec<Person>> {
        let name_prefix = normalize_full_name(name);
        let persons = self
            .store
            .persons_by_name_prefix(&name_prefix, None, MAX_RESULT_ROWS)?;
        Ok(cap_rows(persons))
    }

    /// Persons whose name starts with `upper(name)` and whose birthdate
    /// starts with `dob_prefix`.
    pub fn find_by_name_and_dob(&self, name: &str, dob_prefix: &str) -> StoreResult<Vec<Person>> {
        let name_prefix = normalize_full_name(name);
        let persons =
            self.store
                .persons_by_name_prefix(&name_prefix, Some(dob_prefix), MAX_RESULT_ROWS)?;
        Ok(cap_rows(persons))
    }

    /// Persons with at least one contact ending with `suffix`.
    pub fn find_by_phone_suffix(&self, suffix: &str) -> StoreResult<Vec<Person>> {
        let reversed = reverse_info(suffix);
        let persons = self.store.persons_by_contact_prefix(
            ContactColumn::InfoReversed,
            &reversed,
            MAX_RESULT_ROWS,
        )?;
        Ok(cap_rows(persons))
    }

    /// Persons with at least one contact starting with `prefix`, compared
    /// case-sensitively.
    pub fn find_by_contact_prefix(&self, prefix: &str) -> StoreResult<Vec<Person>> {
        let persons =
            self.store
                .persons_by_contact_prefix(ContactColumn::Info, prefix, MAX_RESULT_ROWS)?;
        Ok(cap_rows(persons))
    }

    /// Routes a request to its lookup form.
    pub fn dispatch(&self, request: &SearchRequest) -> StoreResult<Vec<Person>> {
        match request {
            SearchRequest::ByName { name } => self.find_by_name(name),
            SearchRequest::ByNameAndDob { name, dob_prefix } => {
                self.find_by_name_and_dob(name, dob_prefix)
            }
            SearchRequest::ByPhoneSuffix { suffix } => self.find_by_phone_suffix(suffix),
            SearchRequest::ByContactPrefix { prefix } => self.find_by_contact_prefix(prefix),
        }
    }
}

// The cap holds for every store implementation, not only SQLite.
fn cap_rows(mut persons: Vec<Person>) -> Vec<Person> {
    persons.truncate(MAX_RESULT_ROWS as usize);
    persons
}
