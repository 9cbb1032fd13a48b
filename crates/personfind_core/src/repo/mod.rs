//! Store access abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the read-only person store capability used by lookups.
//! - Isolate SQLite query details from dispatch and rendering.
//!
//! # Invariants
//! - Store APIs report transport and decoding failures as errors; callers
//!   never see them as "no results".

pub mod person_repo;
