//! Lookup query dispatch.
//!
//! # Responsibility
//! - Map validated requests onto anchored prefix lookups in the store.
//! - Apply the shared row cap and query-side normalization.

pub mod dispatch;
