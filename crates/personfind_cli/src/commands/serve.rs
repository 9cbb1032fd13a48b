//! Console transport.
//!
//! Usage: personfind --db <PATH> serve
//!        personfind --db <PATH> query <COMMAND TEXT>...

use clap::Args;
use log::info;
use personfind_core::db::open_db;
use personfind_core::{LookupService, PersonStore, SqlitePersonStore};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::Path;

#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Command text, e.g. `/phone 9161234567`
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

/// Serves commands from stdin until end of input.
pub fn execute_serve(db_path: &Path) -> Result<(), Box<dyn Error>> {
    let conn = open_db(db_path)?;
    let service = LookupService::new(SqlitePersonStore::try_new(&conn)?);

    info!("event=serve module=cli status=start");
    let stdin = io::stdin();
    let stdout = io::stdout();
    let handled = serve_lines(&service, stdin.lock(), &mut stdout.lock())?;
    info!("event=serve module=cli status=ok commands={handled}");
    Ok(())
}

/// Answers one command given on the command line.
pub fn execute_query(db_path: &Path, args: QueryArgs) -> Result<(), Box<dyn Error>> {
    let conn = open_db(db_path)?;
    let service = LookupService::new(SqlitePersonStore::try_new(&conn)?);

    let text = args.text.join(" ");
    match service.handle(&text) {
        Some(reply) => {
            println!("{reply}");
            Ok(())
        }
        None => Err("command failed; see log for details".into()),
    }
}

/// Feeds each non-blank input line to `service` and writes replies
/// separated by a blank line. Returns the number of commands handled.
///
/// Invalid UTF-8 is decoded lossily; one bad line never ends the session.
pub fn serve_lines<S: PersonStore, R: BufRead, W: Write>(
    service: &LookupService<S>,
    mut input: R,
    output: &mut W,
) -> io::Result<usize> {
    let mut handled = 0;
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        handled += 1;
        if let Some(reply) = service.handle(text) {
            writeln!(output, "{reply}\n")?;
            output.flush()?;
        }
    }
    Ok(handled)
}

#[cfg(test)]
mod tests {
    use super::serve_lines;
    use personfind_core::{
        Card, ContactColumn, LookupService, Person, PersonId, PersonStore, StoreResult,
        COMMANDS_ONLY_MESSAGE, HELP_TEXT, NOT_FOUND_MESSAGE,
    };

    struct EmptyStore;

    impl PersonStore for EmptyStore {
        fn persons_by_name_prefix(
            &self,
            _name_prefix: &str,
            _dob_prefix: Option<&str>,
            _limit: u32,
        ) -> StoreResult<Vec<Person>> {
            Ok(Vec::new())
        }

        fn persons_by_contact_prefix(
            &self,
            _column: ContactColumn,
            _prefix: &str,
            _limit: u32,
        ) -> StoreResult<Vec<Person>> {
            Ok(Vec::new())
        }

        fn contacts_of(&self, _person_id: PersonId) -> StoreResult<Vec<String>> {
            Ok(Vec::new())
        }

        fn cards_of(&self, _person_id: PersonId) -> StoreResult<Vec<Card>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn serve_lines_answers_each_command_and_skips_blank_lines() {
        let service = LookupService::new(EmptyStore);
        let input = "/search Smith\n\n   \nhello\n";
        let mut output = Vec::new();

        let handled = serve_lines(&service, input.as_bytes(), &mut output).unwrap();

        assert_eq!(handled, 2);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("{NOT_FOUND_MESSAGE}\n\n{COMMANDS_ONLY_MESSAGE}\n\n")
        );
    }

    #[test]
    fn serve_lines_keeps_serving_after_invalid_utf8_line() {
        let service = LookupService::new(EmptyStore);
        let mut input = b"/help\n".to_vec();
        input.extend_from_slice(b"\xff\xfe\n");
        input.extend_from_slice(b"/search Smith");
        let mut output = Vec::new();

        let handled = serve_lines(&service, input.as_slice(), &mut output).unwrap();

        assert_eq!(handled, 3);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            format!("{HELP_TEXT}\n\n{COMMANDS_ONLY_MESSAGE}\n\n{NOT_FOUND_MESSAGE}\n\n")
        );
    }
}
