//! Core lookup logic for personfind.
//! Parses operator commands, runs anchored prefix/suffix lookups against the
//! person store and renders size-bounded replies.

pub mod command;
pub mod db;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod search;
pub mod service;

pub use command::error::{CommandError, SyntaxError};
pub use command::parser::{parse_command, Command, SearchRequest};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{reverse_info, ContactRecord};
pub use model::person::{Card, Person, PersonId};
pub use render::reply::{
    render_persons, truncate_reply, DETAIL_THRESHOLD, MAX_REPLY_CHARS, NOT_FOUND_MESSAGE,
};
pub use repo::person_repo::{
    ContactColumn, PersonStore, SqlitePersonStore, StoreError, StoreResult,
};
pub use search::dispatch::{QueryDispatcher, MAX_RESULT_ROWS};
pub use service::lookup_service::{
    LookupService, COMMANDS_ONLY_MESSAGE, HELP_TEXT, SYNTAX_ERROR_MESSAGE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
