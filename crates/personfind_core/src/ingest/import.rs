//! Import of `;`-delimited person exports.
//!
//! Expected layout: one header line, then six columns per record:
//! `person id; full name; birthdate; contact info; card number; card expiry`.
//! One person can span many records, one per contact/card pair.

use super::{IngestError, IngestResult};
use crate::model::contact::ContactRecord;
use crate::model::person::{normalize_full_name, PersonId};
use log::info;
use rusqlite::{params, Connection};
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Instant;

/// Dates are cut to `YYYY-MM-DD`; exports may carry a time part.
const DATE_CHARS: usize = 10;
const PROGRESS_EVERY_ROWS: u64 = 100_000;

const PURGE_SQL: &str = "DELETE FROM cards;
DELETE FROM contacts;
DELETE FROM persons;";

/// One record of the export, by column position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportRow {
    pub person_id: PersonId,
    pub full_name: String,
    pub birthdate: String,
    pub contact_info: String,
    pub card_number: String,
    pub card_expiry: String,
}

impl ImportRow {
    /// Applies the stored-form rules: upper-cased name, date-only fields.
    pub fn normalized(self) -> Self {
        Self {
            full_name: normalize_full_name(&self.full_name),
            birthdate: first_chars(&self.birthdate, DATE_CHARS),
            card_expiry: first_chars(&self.card_expiry, DATE_CHARS),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOptions {
    /// Delete all persons, contacts and cards before importing.
    pub purge: bool,
}

/// Counts of records read and rows newly inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub rows: u64,
    pub persons: u64,
    pub contacts: u64,
    pub cards: u64,
}

/// Imports an export file. See [`import_reader`].
pub fn import_file(
    conn: &mut Connection,
    path: impl AsRef<Path>,
    options: ImportOptions,
) -> IngestResult<ImportReport> {
    let file = File::open(path)?;
    import_reader(conn, BufReader::new(file), options)
}

/// Imports export records from `reader` in a single transaction.
///
/// Existing rows are kept; duplicates are skipped. Empty contact or card
/// columns add no contact or card.
///
/// # Errors
/// - Malformed records and store failures abort the import; nothing is
///   committed.
pub fn import_reader<R: Read>(
    conn: &mut Connection,
    reader: R,
    options: ImportOptions,
) -> IngestResult<ImportReport> {
    let started_at = Instant::now();
    info!(
        "event=import module=ingest status=start purge={}",
        options.purge
    );

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let tx = conn.transaction()?;
    if options.purge {
        tx.execute_batch(PURGE_SQL)?;
    }

    let mut report = ImportReport::default();
    {
        let mut insert_person = tx.prepare_cached(
            "INSERT OR IGNORE INTO persons (id, full_name, birthdate) VALUES (?1, ?2, ?3);",
        )?;
        let mut insert_contact = tx.prepare_cached(
            "INSERT OR IGNORE INTO contacts (person_id, info, info_reversed) VALUES (?1, ?2, ?3);",
        )?;
        let mut insert_card = tx.prepare_cached(
            "INSERT OR IGNORE INTO cards (person_id, card_number, expiry_date) VALUES (?1, ?2, ?3);",
        )?;

        for record in csv_reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |position| position.line());
            let row: ImportRow = record.deserialize(None)?;
            let row = row.normalized();

            if row.full_name.is_empty() {
                return Err(IngestError::InvalidRow {
                    line,
                    message: format!("person {} has an empty name", row.person_id),
                });
            }

            report.rows += 1;
            report.persons += insert_person.execute(params![
                row.person_id,
                row.full_name,
                row.birthdate
            ])? as u64;

            if !row.contact_info.is_empty() {
                let contact = ContactRecord::new(row.person_id, row.contact_info);
                report.contacts += insert_contact.execute(params![
                    contact.person_id,
                    contact.info,
                    contact.info_reversed
                ])? as u64;
            }

            if !row.card_number.is_empty() {
                report.cards += insert_card.execute(params![
                    row.person_id,
                    row.card_number,
                    row.card_expiry
                ])? as u64;
            }

            if report.rows % PROGRESS_EVERY_ROWS == 0 {
                info!(
                    "event=import module=ingest status=progress rows={}",
                    report.rows
                );
            }
        }
    }
    tx.commit()?;

    info!(
        "event=import module=ingest status=ok rows={} persons={} contacts={} cards={} duration_ms={}",
        report.rows,
        report.persons,
        report.contacts,
        report.cards,
        started_at.elapsed().as_millis()
    );
    Ok(report)
}

fn first_chars(value: &str, max_chars: usize) -> String {
    value.chars().take(max_chars).collect()
}
