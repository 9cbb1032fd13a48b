//! Command handler services.
//!
//! # Responsibility
//! - Compose parsing, dispatch and rendering into one call per command.
//! - Keep transports decoupled from storage and formatting details.

pub mod lookup_service;
