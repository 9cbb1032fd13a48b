//! Rebuild of the reversed contact column.

use super::IngestResult;
use crate::model::contact::reverse_info;
use log::info;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;
use std::time::Instant;

/// Recomputes `info_reversed` from `info` for every contact.
///
/// Returns the number of rows updated.
pub fn rebuild_reversed_contacts(conn: &Connection) -> IngestResult<usize> {
    let started_at = Instant::now();

    conn.create_scalar_function(
        "strrev",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<String>(0)?;
            Ok(reverse_info(&value))
        },
    )?;
    let updated = conn.execute("UPDATE contacts SET info_reversed = strrev(info);", [])?;

    info!(
        "event=reverse_contacts module=ingest status=ok rows={} duration_ms={}",
        updated,
        started_at.elapsed().as_millis()
    );
    Ok(updated)
}
