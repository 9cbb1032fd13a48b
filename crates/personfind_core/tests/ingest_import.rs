use personfind_core::db::open_db_in_memory;
use personfind_core::ingest::{
    import_file, import_reader, rebuild_reversed_contacts, ImportOptions, ImportReport,
    IngestError,
};
use personfind_core::{reverse_info, QueryDispatcher, SqlitePersonStore};
use rusqlite::Connection;
use std::io::Write;

const EXPORT: &str = "client;name;birthdate;contact;card;expiry
1;Иванов Иван Иванович;1980-05-01 00:00:00;79161234567;4111111111111111;2025-01-31 00:00:00
1;Иванов Иван Иванович;1980-05-01 00:00:00;ivanov@mail.ru;5500000000000004;2027-06-30 00:00:00
2;Smith John;1965-07-04;john@example.org;;
3;Petrova Anna;1990-02-03;;4276000011112222;2026-11-30
";

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table};"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn import_normalizes_and_links_rows() {
    let mut conn = open_db_in_memory().unwrap();

    let report = import_reader(&mut conn, EXPORT.as_bytes(), ImportOptions::default()).unwrap();
    assert_eq!(
        report,
        ImportReport {
            rows: 4,
            persons: 3,
            contacts: 3,
            cards: 3,
        }
    );

    let (name, birthdate): (String, String) = conn
        .query_row(
            "SELECT full_name, birthdate FROM persons WHERE id = 1;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(name, "ИВАНОВ ИВАН ИВАНОВИЧ");
    assert_eq!(birthdate, "1980-05-01");

    let expiry: String = conn
        .query_row(
            "SELECT expiry_date FROM cards WHERE card_number = '4111111111111111';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(expiry, "2025-01-31");
}

#[test]
fn import_stores_fields_untrimmed() {
    let mut conn = open_db_in_memory().unwrap();
    let export = "client;name;birthdate;contact;card;expiry
7;Smith John;1965-07-04; john@example.org ;;
";

    import_reader(&mut conn, export.as_bytes(), ImportOptions::default()).unwrap();

    let (info, info_reversed): (String, String) = conn
        .query_row(
            "SELECT info, info_reversed FROM contacts WHERE person_id = 7;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(info, " john@example.org ");
    assert_eq!(info_reversed, reverse_info(" john@example.org "));
}

#[test]
fn imported_contacts_support_suffix_lookup() {
    let mut conn = open_db_in_memory().unwrap();
    import_reader(&mut conn, EXPORT.as_bytes(), ImportOptions::default()).unwrap();

    let mut stmt = conn
        .prepare("SELECT info, info_reversed FROM contacts;")
        .unwrap();
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    for (info, info_reversed) in rows {
        assert_eq!(reverse_info(&info_reversed), info);
    }
    drop(stmt);

    let dispatcher = QueryDispatcher::new(SqlitePersonStore::try_new(&conn).unwrap());
    let persons = dispatcher.find_by_phone_suffix("1234567").unwrap();
    assert_eq!(persons.len(), 1);
    assert_eq!(persons[0].id, 1);
}

#[test]
fn reimport_skips_duplicates_and_purge_replaces_data() {
    let mut conn = open_db_in_memory().unwrap();
    import_reader(&mut conn, EXPORT.as_bytes(), ImportOptions::default()).unwrap();

    let again = import_reader(&mut conn, EXPORT.as_bytes(), ImportOptions::default()).unwrap();
    assert_eq!(again.rows, 4);
    assert_eq!((again.persons, again.contacts, again.cards), (0, 0, 0));
    assert_eq!(count(&conn, "persons"), 3);

    let replacement = "id;name;dob;contact;card;expiry\n9;New Person;2001-01-01;+100;;\n";
    let report = import_reader(
        &mut conn,
        replacement.as_bytes(),
        ImportOptions { purge: true },
    )
    .unwrap();
    assert_eq!(report.persons, 1);
    assert_eq!(count(&conn, "persons"), 1);
    assert_eq!(count(&conn, "contacts"), 1);
    assert_eq!(count(&conn, "cards"), 0);
}

#[test]
fn malformed_row_aborts_without_partial_commit() {
    let mut conn = open_db_in_memory().unwrap();
    let export = "id;name;dob;contact;card;expiry
1;Valid Person;1980-01-01;111;;
not-a-number;Broken;1980-01-01;222;;
";

    let err = import_reader(&mut conn, export.as_bytes(), ImportOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::Csv(_)));
    assert_eq!(count(&conn, "persons"), 0);
}

#[test]
fn empty_name_is_rejected_with_line_number() {
    let mut conn = open_db_in_memory().unwrap();
    let export = "id;name;dob;contact;card;expiry\n1;;1980-01-01;111;;\n";

    let err = import_reader(&mut conn, export.as_bytes(), ImportOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::InvalidRow { line: 2, .. }));
}

#[test]
fn import_file_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.txt");
    std::fs::File::create(&path)
        .unwrap()
        .write_all(EXPORT.as_bytes())
        .unwrap();

    let mut conn = open_db_in_memory().unwrap();
    let report = import_file(&mut conn, &path, ImportOptions::default()).unwrap();
    assert_eq!(report.persons, 3);

    let missing = import_file(&mut conn, dir.path().join("missing.txt"), ImportOptions::default())
        .unwrap_err();
    assert!(matches!(missing, IngestError::Io(_)));
}

#[test]
fn rebuild_repairs_stale_reversed_column() {
    let mut conn = open_db_in_memory().unwrap();
    import_reader(&mut conn, EXPORT.as_bytes(), ImportOptions::default()).unwrap();

    // Out-of-band edit of `info` that leaves `info_reversed` stale.
    conn.execute(
        "UPDATE contacts SET info = '79997654321' WHERE info = '79161234567';",
        [],
    )
    .unwrap();
    {
        let dispatcher = QueryDispatcher::new(SqlitePersonStore::try_new(&conn).unwrap());
        assert!(dispatcher.find_by_phone_suffix("7654321").unwrap().is_empty());
    }

    let updated = rebuild_reversed_contacts(&conn).unwrap();
    assert_eq!(updated, 3);

    let dispatcher = QueryDispatcher::new(SqlitePersonStore::try_new(&conn).unwrap());
    let persons = dispatcher.find_by_phone_suffix("7654321").unwrap();
    assert_eq!(persons.len(), 1);
    assert_eq!(persons[0].id, 1);
}
