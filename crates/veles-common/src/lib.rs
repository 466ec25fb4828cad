//! Common utilities for Veles.
//!
//! This crate provides the foundational pieces shared by the Veles readers:
//!
//! - [`BinaryReader`] - Sequential little-endian reading from byte slices
//! - [`crc`] - CRC-32 (IEEE) hashing utilities
//! - [`Error`] - Common error type for low-level parsing

mod error;
mod reader;

pub mod crc;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Re-export memchr for byte searching
pub use memchr;
