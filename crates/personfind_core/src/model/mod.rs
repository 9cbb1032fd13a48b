//! Domain model for person lookups.
//!
//! # Responsibility
//! - Define the records returned by the store and consumed by rendering.
//! - Own the text normalizations shared by queries and ingestion.
//!
//! # Invariants
//! - `Person::full_name` is stored upper-cased.
//! - `ContactRecord::info_reversed` is the character-reverse of `info`.

pub mod contact;
pub mod person;
