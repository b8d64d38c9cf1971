//! Domain logic for raw performance-log standardization.
//!
//! Holds the value types, the date-rollover alignment algorithm, the common
//! output schema, the CLI settings, and the shared error taxonomy. This crate
//! performs no file I/O; ingestion and emission live in `powerlog-data`.

pub mod align;
pub mod error;
pub mod models;
pub mod schema;
pub mod settings;
