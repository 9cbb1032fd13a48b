//! Ingestion commands.
//!
//! Usage: personfind --db <PATH> import <INPUT> [--purge]
//!        personfind --db <PATH> reverse-contacts

use clap::Args;
use personfind_core::db::open_db;
use personfind_core::ingest::{import_file, rebuild_reversed_contacts, ImportOptions};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// `;`-delimited export with a header line
    pub input: PathBuf,

    /// Delete existing persons, contacts and cards first
    #[arg(long)]
    pub purge: bool,
}

/// Execute import
pub fn execute_import(db_path: &Path, args: ImportArgs) -> Result<(), Box<dyn Error>> {
    let mut conn = open_db(db_path)?;
    let report = import_file(&mut conn, &args.input, ImportOptions { purge: args.purge })?;

    println!(
        "Imported {} rows: {} persons, {} contacts, {} cards added",
        report.rows, report.persons, report.contacts, report.cards
    );
    Ok(())
}

/// Execute reversed-column rebuild
pub fn execute_reverse_contacts(db_path: &Path) -> Result<(), Box<dyn Error>> {
    let conn = open_db(db_path)?;
    let updated = rebuild_reversed_contacts(&conn)?;

    println!("Updated info_reversed for {updated} contacts");
    Ok(())
}
