//! Error types for presentation conversion and viewing.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting or viewing a presentation.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read or write a file.
    #[error("Failed to access file: {0}")]
    Io(#[from] std::io::Error),

    /// The output directory could not be created.
    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The external tool could not be started at all.
    #[error("Failed to start {tool}: {source}")]
    ToolSpawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The external tool ran but exited unsuccessfully.
    #[error("{tool} failed ({status}): {diagnostics}")]
    ToolFailed {
        tool: String,
        status: ExitStatus,
        diagnostics: String,
    },

    /// The rasterizer exited cleanly but left no page images behind.
    #[error("No images generated from {}", pdf.display())]
    NoImagesGenerated { pdf: PathBuf },

    /// The input was rejected before any conversion started.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The file format is not supported or could not be detected.
    #[error("Unsupported or unrecognized file format: {0}")]
    UnsupportedFormat(String),

    /// A result arrived with no conversion in flight.
    #[error("No conversion is in progress")]
    NotConverting,

    /// A conversion is already in flight.
    #[error("A conversion is already in progress")]
    Busy,

    /// The saved session could not be written.
    #[error("Session storage error: {0}")]
    Session(String),
}
