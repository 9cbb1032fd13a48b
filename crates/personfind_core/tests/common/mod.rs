#![allow(dead_code)]

use personfind_core::db::open_db_in_memory;
use personfind_core::{
    Card, ContactColumn, ContactRecord, Person, PersonId, PersonStore, StoreError, StoreResult,
};
use rusqlite::{params, Connection};
use std::collections::BTreeSet;

pub fn fixture_persons() -> Vec<Person> {
    vec![
        Person::new(1, "Иванов Иван Иванович", "1980-05-01"),
        Person::new(2, "Иванов Иван Петрович", "1980-05-17"),
        Person::new(3, "Иванов Иван Сергеевич", "1991-12-30"),
        Person::new(4, "Иванова Мария", "1985-02-02"),
        Person::new(5, "Smith John", "1970-01-01"),
        Person::new(6, "Smith John", "1965-07-04"),
        Person::new(7, "Petrov-Vodkin Kuzma", "1878-11-05"),
    ]
}

pub fn fixture_contacts() -> Vec<ContactRecord> {
    vec![
        ContactRecord::new(1, "79161234567"),
        ContactRecord::new(1, "ivanov@mail.ru"),
        ContactRecord::new(2, "79031234567"),
        ContactRecord::new(2, "Ivan.Petrovich@Example.com"),
        ContactRecord::new(3, "84951112233"),
        ContactRecord::new(4, "79161234567"),
        ContactRecord::new(4, "maria*star@mail.ru"),
        ContactRecord::new(5, "15551234567"),
        ContactRecord::new(5, "john.smith@example.com"),
        ContactRecord::new(6, "john@example.org"),
    ]
}

pub fn fixture_cards() -> Vec<(PersonId, Card)> {
    vec![
        (1, Card::new("4111111111111111", "2025-01-31")),
        (1, Card::new("5500000000000004", "2027-06-30")),
        (2, Card::new("4276000011112222", "2026-11-30")),
    ]
}

/// In-memory database loaded with the fixture data.
pub fn fixture_db() -> Connection {
    let conn = open_db_in_memory().unwrap();
    seed(
        &conn,
        &fixture_persons(),
        &fixture_contacts(),
        &fixture_cards(),
    );
    conn
}

pub fn seed(conn: &Connection, persons: &[Person], contacts: &[ContactRecord], cards: &[(PersonId, Card)]) {
    for person in persons {
        conn.execute(
            "INSERT INTO persons (id, full_name, birthdate) VALUES (?1, ?2, ?3);",
            params![person.id, person.full_name, person.birthdate],
        )
        .unwrap();
    }
    for contact in contacts {
        conn.execute(
            "INSERT INTO contacts (person_id, info, info_reversed) VALUES (?1, ?2, ?3);",
            params![contact.person_id, contact.info, contact.info_reversed],
        )
        .unwrap();
    }
    for (person_id, card) in cards {
        conn.execute(
            "INSERT INTO cards (person_id, card_number, expiry_date) VALUES (?1, ?2, ?3);",
            params![person_id, card.card_number, card.expiry_date],
        )
        .unwrap();
    }
}

/// Person store over plain vectors, with the same matching rules as SQLite.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersonStore {
    pub persons: Vec<Person>,
    pub contacts: Vec<ContactRecord>,
    pub cards: Vec<(PersonId, Card)>,
}

impl MemoryPersonStore {
    pub fn fixture() -> Self {
        Self {
            persons: fixture_persons(),
            contacts: fixture_contacts(),
            cards: fixture_cards(),
        }
    }

    fn sorted(mut persons: Vec<Person>) -> Vec<Person> {
        persons.sort_by(|a, b| {
            (&a.full_name, &a.birthdate, a.id).cmp(&(&b.full_name, &b.birthdate, b.id))
        });
        persons
    }
}

impl PersonStore for MemoryPersonStore {
    fn persons_by_name_prefix(
        &self,
        name_prefix: &str,
        dob_prefix: Option<&str>,
        limit: u32,
    ) -> StoreResult<Vec<Person>> {
        let matched = self
            .persons
            .iter()
            .filter(|person| person.full_name.starts_with(name_prefix))
            .filter(|person| dob_prefix.map_or(true, |dob| person.birthdate.starts_with(dob)))
            .cloned()
            .collect();
        let mut persons = Self::sorted(matched);
        persons.truncate(limit as usize);
        Ok(persons)
    }

    fn persons_by_contact_prefix(
        &self,
        column: ContactColumn,
        prefix: &str,
        limit: u32,
    ) -> StoreResult<Vec<Person>> {
        let mut owners = BTreeSet::new();
        for contact in &self.contacts {
            let value = match column {
                ContactColumn::Info => &contact.info,
                ContactColumn::InfoReversed => &contact.info_reversed,
            };
            if value.starts_with(prefix) {
                owners.insert(contact.person_id);
            }
            if owners.len() == limit as usize {
                break;
            }
        }
        let matched = self
            .persons
            .iter()
            .filter(|person| owners.contains(&person.id))
            .cloned()
            .collect();
        Ok(Self::sorted(matched))
    }

    fn contacts_of(&self, person_id: PersonId) -> StoreResult<Vec<String>> {
        let mut contacts: Vec<String> = self
            .contacts
            .iter()
            .filter(|contact| contact.person_id == person_id)
            .map(|contact| contact.info.clone())
            .collect();
        contacts.sort();
        Ok(contacts)
    }

    fn cards_of(&self, person_id: PersonId) -> StoreResult<Vec<Card>> {
        let mut cards: Vec<Card> = self
            .cards
            .iter()
            .filter(|(owner, _)| *owner == person_id)
            .map(|(_, card)| card.clone())
            .collect();
        cards.sort_by(|a, b| {
            b.expiry_date
                .cmp(&a.expiry_date)
                .then_with(|| a.card_number.cmp(&b.card_number))
        });
        Ok(cards)
    }
}

/// Store whose every lookup fails.
pub struct FailingStore;

impl PersonStore for FailingStore {
    fn persons_by_name_prefix(
        &self,
        _name_prefix: &str,
        _dob_prefix: Option<&str>,
        _limit: u32,
    ) -> StoreResult<Vec<Person>> {
        Err(StoreError::InvalidData("store offline".to_string()))
    }

    fn persons_by_contact_prefix(
        &self,
        _column: ContactColumn,
        _prefix: &str,
        _limit: u32,
    ) -> StoreResult<Vec<Person>> {
        Err(StoreError::InvalidData("store offline".to_string()))
    }

    fn contacts_of(&self, _person_id: PersonId) -> StoreResult<Vec<String>> {
        Err(StoreError::InvalidData("store offline".to_string()))
    }

    fn cards_of(&self, _person_id: PersonId) -> StoreResult<Vec<Card>> {
        Err(StoreError::InvalidData("store offline".to_string()))
    }
}
