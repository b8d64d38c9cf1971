//! Ingestion and emission layer for powerlog standardization.
//!
//! Responsible for recognising raw export file names, discovering and reading
//! the raw tables, running the per-file alignment pipeline, and writing the
//! standardized CSV tables plus their JSON summary records.

pub mod filename;
pub mod reader;
pub mod standardize;
pub mod writer;

pub use powerlog_core as core;
