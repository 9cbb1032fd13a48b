//! Error kinds surfaced by command handling.

use crate::repo::person_repo::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Operator input does not match the grammar of its command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// No argument after the command word.
    EmptyArgument,
    /// Date part is not `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
    InvalidDateFormat,
    /// Name is not letter-only words separated by single spaces.
    InvalidNameFormat,
    /// Phone suffix is not at least 7 digits.
    InvalidPhoneFormat,
}

impl SyntaxError {
    /// Stable code used in log events.
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyArgument => "empty_argument",
            Self::InvalidDateFormat => "invalid_date_format",
            Self::InvalidNameFormat => "invalid_name_format",
            Self::InvalidPhoneFormat => "invalid_phone_format",
        }
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyArgument => write!(f, "command argument is empty"),
            Self::InvalidDateFormat => {
                write!(f, "date must be YYYY, YYYY-MM or YYYY-MM-DD")
            }
            Self::InvalidNameFormat => {
                write!(f, "name must be letter-only words separated by single spaces")
            }
            Self::InvalidPhoneFormat => write!(f, "phone must be at least 7 digits"),
        }
    }
}

impl Error for SyntaxError {}

/// Failure of a single command.
#[derive(Debug)]
pub enum CommandError {
    /// Recovered locally with a fixed user-facing message.
    Syntax(SyntaxError),
    /// Store or other failure; logged in full, never shown to the operator.
    Unexpected(StoreError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Syntax(err) => write!(f, "syntax error: {err}"),
            Self::Unexpected(err) => write!(f, "unexpected error: {err}"),
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Syntax(err) => Some(err),
            Self::Unexpected(err) => Some(err),
        }
    }
}

impl From<SyntaxError> for CommandError {
    fn from(value: SyntaxError) -> Self {
        Self::Syntax(value)
    }
}

impl From<StoreError> for CommandError {
    fn from(value: StoreError) -> Self {
        Self::Unexpected(value)
    }
}
