//! Reply rendering for lookup results.

pub mod reply;
