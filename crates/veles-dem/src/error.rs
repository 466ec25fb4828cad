//! Error types for demo decoding.

use thiserror::Error;

/// Errors that can occur when decoding a demo file.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file does not start with the demo magic bytes.
    #[error("not a demo file: magic {0:?}")]
    NotADemoFile([u8; 8]),

    /// A fixed-size string buffer had no null terminator.
    #[error("broken demo file: unterminated string field")]
    BrokenFile,

    /// A frame carried a command byte the format does not define.
    #[error("unknown frame command: {0:#04x}")]
    UnknownCommand(u8),
}

/// Result type for demo operations.
pub type Result<T> = std::result::Result<T, Error>;
