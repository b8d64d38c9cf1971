use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the standardization pipeline.
#[derive(Error, Debug)]
pub enum StandardizeError {
    /// An anchor, time-of-day value, or measurement sequence failed to
    /// parse or was empty. The only error the alignment core itself emits.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A raw export could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file name does not follow the raw-export naming convention.
    #[error("Filename not in the expected raw-export format: {0}")]
    UnrecognizedFilename(String),

    /// An error from the CSV reader or writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A summary record could not be serialized to JSON.
    #[error("Failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),

    /// No raw export files were found under the given directory.
    #[error("No raw export files found in {0}")]
    NoInputFiles(PathBuf),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the powerlog crates.
pub type Result<T> = std::result::Result<T, StandardizeError>;
