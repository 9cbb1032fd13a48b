//! Command text interpretation.
//!
//! # Responsibility
//! - Turn one line of operator input into a typed, validated request.
//! - Classify failures into syntax errors and unexpected errors.
//!
//! # Invariants
//! - Validation happens here once; downstream code assumes well-formed input.

pub mod error;
pub mod parser;
