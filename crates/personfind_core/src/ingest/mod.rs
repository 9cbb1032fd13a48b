//! Offline ingestion into the person store.
//!
//! # Responsibility
//! - Load `;`-delimited exports into `persons`, `contacts` and `cards`.
//! - Repair `contacts.info_reversed` after out-of-band edits to `info`.
//!
//! # Invariants
//! - Every contact written here satisfies `info_reversed == reverse(info)`.
//! - An import either commits completely or not at all.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod import;
mod reverse;

pub use import::{import_file, import_reader, ImportOptions, ImportReport, ImportRow};
pub use reverse::rebuild_reversed_contacts;

pub type IngestResult<T> = Result<T, IngestError>;

#[derive(Debug)]
pub enum IngestError {
    Io(std::io::Error),
    Csv(csv::Error),
    Db(DbError),
    /// Record that parses but cannot be stored.
    InvalidRow { line: u64, message: String },
}

impl Display for IngestError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Csv(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidRow { line, message } => {
                write!(f, "invalid import row at line {line}: {message}")
            }
        }
    }
}

impl Error for IngestError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Csv(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for IngestError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for IngestError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<DbError> for IngestError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for IngestError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}
