//! Lookup command handlers.
//!
//! # Responsibility
//! - Provide one handler per command kind returning finished reply text.
//! - Convert failures into the fixed operator-facing outcomes.
//!
//! # Invariants
//! - Syntax errors become [`SYNTAX_ERROR_MESSAGE`] and are logged at `info`.
//! - Unexpected errors are logged at `error` and produce no reply.
//! - Every reply passes through [`truncate_reply`].

use crate::command::error::CommandError;
use crate::command::parser::{
    command_word, parse_command, parse_contact_request, parse_phone_request,
    parse_search_request, Command, SearchRequest,
};
use crate::logging::sanitize_message;
use crate::render::reply::{render_persons, truncate_reply};
use crate::repo::person_repo::PersonStore;
use crate::search::dispatch::QueryDispatcher;
use log::{error, info};
use std::error::Error;
use std::time::Instant;

pub const HELP_TEXT: &str = "Search formats:
/search Last First Middle / YYYY-MM-DD
The date may be shortened to YYYY-MM or YYYY. Without a date every person whose name starts with the given text is listed:
/search Last First Middle
/phone 9161234567 - persons with a phone number ending in the given digits (at least 7)
/contact user@example - persons with a contact starting with the given text";
pub const COMMANDS_ONLY_MESSAGE: &str =
    "Messages are ignored; only known commands are answered. Try /help.";
pub const SYNTAX_ERROR_MESSAGE: &str =
    "Probably an error. Check that the search format is correct.";

const MAX_LOGGED_COMMAND_CHARS: usize = 32;

/// Command handlers over an injected person store.
pub struct LookupService<S: PersonStore> {
    dispatcher: QueryDispatcher<S>,
}

impl<S: PersonStore> LookupService<S> {
    pub fn new(store: S) -> Self {
        Self {
            dispatcher: QueryDispatcher::new(store),
        }
    }

    /// Handles `/search <name>` and `/search <name> / <date-prefix>`.
    pub fn search(&self, text: &str) -> Result<String, CommandError> {
        let request = parse_search_request(text)?;
        self.execute(&request)
    }

    /// Handles `/phone <digits>`.
    pub fn phone(&self, text: &str) -> Result<String, CommandError> {
        let request = parse_phone_request(text)?;
        self.execute(&request)
    }

    /// Handles `/contact <prefix>`.
    pub fn contact(&self, text: &str) -> Result<String, CommandError> {
        let request = parse_contact_request(text)?;
        self.execute(&request)
    }

    /// Runs a validated request and renders the bounded reply.
    pub fn execute(&self, request: &SearchRequest) -> Result<String, CommandError> {
        let started_at = Instant::now();
        info!(
            "event=search module=service status=start kind={}",
            request.kind()
        );

        let persons = self.dispatcher.dispatch(request)?;
        let reply = render_persons(&persons, self.dispatcher.store())?;

        info!(
            "event=search module=service status=ok kind={} rows={} duration_ms={}",
            request.kind(),
            persons.len(),
            started_at.elapsed().as_millis()
        );
        Ok(truncate_reply(reply))
    }

    /// Single entry point for transports.
    ///
    /// Returns `None` only when the command failed unexpectedly.
    pub fn handle(&self, text: &str) -> Option<String> {
        info!(
            "event=command_received module=service command={} chars={}",
            sanitize_message(command_word(text).unwrap_or("-"), MAX_LOGGED_COMMAND_CHARS),
            text.chars().count()
        );

        let outcome = match parse_command(text) {
            Ok(Command::Help) => Ok(HELP_TEXT.to_string()),
            Ok(Command::Unrecognized) => Ok(COMMANDS_ONLY_MESSAGE.to_string()),
            Ok(Command::Search(request)) => self.execute(&request),
            Err(err) => Err(CommandError::Syntax(err)),
        };

        match outcome {
            Ok(reply) => Some(reply),
            Err(err) => recover(err),
        }
    }
}

/// Maps a command failure onto the reply the operator sees, if any.
pub fn recover(err: CommandError) -> Option<String> {
    match err {
        CommandError::Syntax(syntax) => {
            info!(
                "event=command_rejected module=service status=syntax_error error_code={}",
                syntax.code()
            );
            Some(SYNTAX_ERROR_MESSAGE.to_string())
        }
        CommandError::Unexpected(cause) => {
            error!(
                "event=command_failed module=service status=error error_code=unexpected error={}",
                error_chain(&cause)
            );
            None
        }
    }
}

fn error_chain(err: &dyn Error) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if !chain.ends_with(&message) {
            chain.push_str(": ");
            chain.push_str(&message);
        }
        source = cause.source();
    }
    chain
}
