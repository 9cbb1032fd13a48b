//! Person store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the read-only lookup primitives the query dispatcher composes.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every lookup is an anchored prefix match; user text never acts as a
//!   wildcard.
//! - Lookups never write; a connection can serve them without a transaction.
//! - Store failures surface as errors, never as empty results.

use crate::db::migrations::ensure_schema_ready;
use crate::db::DbError;
use crate::model::person::{Card, Person, PersonId};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by person store implementations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted person data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Contact column a prefix lookup runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactColumn {
    /// `info` as written; used for contact prefix lookups.
    Info,
    /// `info_reversed`; a prefix here is a suffix of `info`.
    InfoReversed,
}

impl ContactColumn {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::InfoReversed => "info_reversed",
        }
    }
}

/// Read-only store capability injected into the query dispatcher.
///
/// Person lists are ordered by `(full_name, birthdate)` ascending.
pub trait PersonStore {
    /// Persons whose `full_name` starts with `name_prefix` and, when given,
    /// whose `birthdate` starts with `dob_prefix`. At most `limit` rows.
    fn persons_by_name_prefix(
        &self,
        name_prefix: &str,
        dob_prefix: Option<&str>,
        limit: u32,
    ) -> StoreResult<Vec<Person>>;

    /// Owners of contacts whose `column` starts with `prefix`.
    ///
    /// The distinct matching owners are capped at `limit` before the join.
    fn persons_by_contact_prefix(
        &self,
        column: ContactColumn,
        prefix: &str,
        limit: u32,
    ) -> StoreResult<Vec<Person>>;

    /// Contact identifiers of one person, ordered by `info`.
    fn contacts_of(&self, person_id: PersonId) -> StoreResult<Vec<String>>;

    /// Cards of one person, latest expiry first.
    fn cards_of(&self, person_id: PersonId) -> StoreResult<Vec<Card>>;
}

/// SQLite-backed person store.
pub struct SqlitePersonStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonStore<'conn> {
    /// Wraps a connection whose migrations are already applied.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_schema_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PersonStore for SqlitePersonStore<'_> {
    fn persons_by_name_prefix(
        &self,
        name_prefix: &str,
        dob_prefix: Option<&str>,
        limit: u32,
    ) -> StoreResult<Vec<Person>> {
        let mut sql = String::from(
            "SELECT id, full_name, birthdate
             FROM persons
             WHERE full_name GLOB ?",
        );
        let mut bind_values: Vec<Value> = vec![Value::Text(glob_prefix_pattern(name_prefix))];

        if let Some(dob_prefix) = dob_prefix {
            sql.push_str(" AND birthdate GLOB ?");
            bind_values.push(Value::Text(glob_prefix_pattern(dob_prefix)));
        }

        sql.push_str(" ORDER BY full_name ASC, birthdate ASC, id ASC LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));

        self.query_persons(&sql, bind_values)
    }

    fn persons_by_contact_prefix(
        &self,
        column: ContactColumn,
        prefix: &str,
        limit: u32,
    ) -> StoreResult<Vec<Person>> {
        let sql = format!(
            "SELECT p.id AS id, p.full_name AS full_name, p.birthdate AS birthdate
             FROM (
                SELECT DISTINCT person_id
                FROM contacts
                WHERE {column} GLOB ?
                LIMIT ?
             ) AS matched
             JOIN persons AS p ON p.id = matched.person_id
             ORDER BY p.full_name ASC, p.birthdate ASC, p.id ASC",
            column = column.as_sql()
        );
        let bind_values = vec![
            Value::Text(glob_prefix_pattern(prefix)),
            Value::Integer(i64::from(limit)),
        ];

        self.query_persons(&sql, bind_values)
    }

    fn contacts_of(&self, person_id: PersonId) -> StoreResult<Vec<String>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT info
             FROM contacts
             WHERE person_id = ?1
             ORDER BY info ASC;",
        )?;
        let contacts = stmt
            .query_map([person_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contacts)
    }

    fn cards_of(&self, person_id: PersonId) -> StoreResult<Vec<Card>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT card_number, expiry_date
             FROM cards
             WHERE person_id = ?1
             ORDER BY expiry_date DESC, card_number ASC;",
        )?;
        let cards = stmt
            .query_map([person_id], |row| {
                Ok(Card {
                    card_number: row.get(0)?,
                    expiry_date: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }
}

impl SqlitePersonStore<'_> {
    fn query_persons(&self, sql: &str, bind_values: Vec<Value>) -> StoreResult<Vec<Person>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut persons = Vec::new();

        while let Some(row) = rows.next()? {
            persons.push(parse_person_row(row)?);
        }

        Ok(persons)
    }
}

// Rows render as stored; an empty name is not a store failure.
fn parse_person_row(row: &Row<'_>) -> StoreResult<Person> {
    Ok(Person {
        id: row.get("id")?,
        full_name: row.get("full_name")?,
        birthdate: row.get::<_, Option<String>>("birthdate")?.unwrap_or_default(),
    })
}

/// Builds a `GLOB` pattern matching values that start with `prefix`.
///
/// `*`, `?` and `[` are wrapped in brackets so they match literally.
pub(crate) fn glob_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        match ch {
            '*' | '?' | '[' => {
                pattern.push('[');
                pattern.push(ch);
                pattern.push(']');
            }
            _ => pattern.push(ch),
        }
    }
    pattern.push('*');
    pattern
}
