//! Error types for VTF handling.

use thiserror::Error;

/// Errors that can occur when decoding VTF headers.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] veles_common::Error),

    /// The file does not start with the VTF magic bytes.
    #[error("not a VTF file: magic {0:?}")]
    NotAVtfFile([u8; 4]),
}

/// Result type for VTF operations.
pub type Result<T> = std::result::Result<T, Error>;
