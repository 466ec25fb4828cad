//! Error types for the VPK crate.

use thiserror::Error;

/// Errors that can occur when working with VPK archives.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] veles_common::Error),

    /// The file does not start with the VPK magic signature.
    #[error("not a VPK file: signature {signature:#010x}")]
    NotAVpkFile { signature: u32 },

    /// Header version other than 1 or 2.
    #[error("unsupported VPK version: {0}")]
    UnsupportedVersion(u32),

    /// A directory entry was missing its terminator; the remaining tree
    /// offsets cannot be trusted.
    #[error("broken archive: entry {name:?} missing its terminator")]
    BrokenArchive { name: String },

    /// An entry references a companion archive that was not found on disk.
    #[error("archive part {index:03} not found for entry {name:?}")]
    ArchivePartNotFound { name: String, index: u16 },

    /// Payload bytes did not match the checksum stored in the directory.
    #[error("checksum mismatch for {name:?}: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        name: String,
        expected: u32,
        actual: u32,
    },

    /// The stream was used after being closed.
    #[error("stream is closed")]
    StreamClosed,
}

/// Result type for VPK operations.
pub type Result<T> = std::result::Result<T, Error>;
