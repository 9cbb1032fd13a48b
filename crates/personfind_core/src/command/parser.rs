//! Parser for `/search`, `/phone` and `/contact` command text.
//!
//! # Invariants
//! - Parsers never touch the store.
//! - Returned strings are trimmed but otherwise as typed; case folding and
//!   reversal belong to the dispatcher.

use crate::command::error::SyntaxError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Shortest accepted phone suffix.
pub const MIN_PHONE_DIGITS: usize = 7;

static DATE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}(?:-[0-9]{2}(?:-[0-9]{2})?)?$").expect("valid date prefix regex")
});
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{L}+(?: \p{L}+)*$").expect("valid name regex"));

/// Validated lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    ByName { name: String },
    ByNameAndDob { name: String, dob_prefix: String },
    ByPhoneSuffix { suffix: String },
    ByContactPrefix { prefix: String },
}

impl SearchRequest {
    /// Stable label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ByName { .. } => "name",
            Self::ByNameAndDob { .. } => "name_dob",
            Self::ByPhoneSuffix { .. } => "phone_suffix",
            Self::ByContactPrefix { .. } => "contact_prefix",
        }
    }
}

/// One recognized line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search(SearchRequest),
    /// `/help` or `/start`.
    Help,
    /// Plain text or an unknown command.
    Unrecognized,
}

/// Returns the text after the first whitespace, trimmed.
///
/// # Errors
/// - [`SyntaxError::EmptyArgument`] when there is no whitespace or nothing
///   but whitespace follows it.
pub fn extract_argument(text: &str) -> Result<&str, SyntaxError> {
    let Some(cut) = text.find(char::is_whitespace) else {
        return Err(SyntaxError::EmptyArgument);
    };

    let argument = text[cut..].trim();
    if argument.is_empty() {
        return Err(SyntaxError::EmptyArgument);
    }
    Ok(argument)
}

/// Splits a `/search` argument into a name and an optional date prefix.
///
/// - `name / date`: the date must be `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
/// - `name`: after dropping hyphens, letter-only words separated by single
///   spaces.
pub fn parse_search_by_name_or_dob(
    argument: &str,
) -> Result<(String, Option<String>), SyntaxError> {
    if let Some((name, dob)) = argument.split_once('/') {
        let (name, dob) = (name.trim(), dob.trim());
        if !DATE_PREFIX_RE.is_match(dob) {
            return Err(SyntaxError::InvalidDateFormat);
        }
        if name.is_empty() {
            return Err(SyntaxError::InvalidNameFormat);
        }
        return Ok((name.to_string(), Some(dob.to_string())));
    }

    let name = argument.trim();
    if !NAME_RE.is_match(&name.replace('-', "")) {
        return Err(SyntaxError::InvalidNameFormat);
    }
    Ok((name.to_string(), None))
}

/// Validates a phone suffix: ASCII digits only, at least [`MIN_PHONE_DIGITS`].
pub fn parse_phone_suffix(argument: &str) -> Result<String, SyntaxError> {
    if argument.len() < MIN_PHONE_DIGITS || !argument.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SyntaxError::InvalidPhoneFormat);
    }
    Ok(argument.to_string())
}

/// Contact prefixes are free text and pass through unchanged.
pub fn parse_contact_prefix(argument: &str) -> String {
    argument.to_string()
}

/// Parses full `/search ...` text.
pub fn parse_search_request(text: &str) -> Result<SearchRequest, SyntaxError> {
    let argument = extract_argument(text)?;
    let request = match parse_search_by_name_or_dob(argument)? {
        (name, Some(dob_prefix)) => SearchRequest::ByNameAndDob { name, dob_prefix },
        (name, None) => SearchRequest::ByName { name },
    };
    Ok(request)
}

/// Parses full `/phone ...` text.
pub fn parse_phone_request(text: &str) -> Result<SearchRequest, SyntaxError> {
    let suffix = parse_phone_suffix(extract_argument(text)?)?;
    Ok(SearchRequest::ByPhoneSuffix { suffix })
}

/// Parses full `/contact ...` text.
pub fn parse_contact_request(text: &str) -> Result<SearchRequest, SyntaxError> {
    let prefix = parse_contact_prefix(extract_argument(text)?);
    Ok(SearchRequest::ByContactPrefix { prefix })
}

/// Returns the command word without a trailing `@botname` mention.
///
/// `None` when the text does not start with `/`.
pub fn command_word(text: &str) -> Option<&str> {
    let word = text.split_whitespace().next()?;
    if !word.starts_with('/') {
        return None;
    }
    Some(word.split_once('@').map_or(word, |(command, _)| command))
}

/// Recognizes the command in one line of input and parses its argument.
pub fn parse_command(text: &str) -> Result<Command, SyntaxError> {
    let command = match command_word(text) {
        Some("/search") => Command::Search(parse_search_request(text)?),
        Some("/phone") => Command::Search(parse_phone_request(text)?),
        Some("/contact") => Command::Search(parse_contact_request(text)?),
        Some("/help") | Some("/start") => Command::Help,
        _ => Command::Unrecognized,
    };
    Ok(command)
}
