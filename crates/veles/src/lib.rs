//! Veles - Source engine game file reading library.
//!
//! This crate provides a unified interface to the Veles library ecosystem
//! for working with Source engine game files.
//!
//! # Crates
//!
//! - [`veles_common`] - Common utilities (binary reading, CRC-32)
//! - [`veles_vpk`] - VPK archive reading (directory tree + multi-part payloads)
//! - [`veles_dem`] - Demo recording frame-sequence decoding
//! - [`veles_vtf`] - VTF texture header decoding
//!
//! # Example
//!
//! ```no_run
//! use std::io::Read;
//! use veles::prelude::*;
//!
//! // Open a multi-part VPK archive set
//! let archive = VpkArchive::open("pak01_dir.vpk")?;
//!
//! // Find and extract a file, checksum-verified while streaming
//! if let Some(entry) = archive.find("scripts/game_sounds.txt") {
//!     let mut data = Vec::new();
//!     archive.open_stream(entry)?.read_to_end(&mut data)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use veles_common as common;
pub use veles_dem as dem;
pub use veles_vpk as vpk;
pub use veles_vtf as vtf;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use veles_common::{crc, BinaryReader};
    pub use veles_dem::{Demo, DemoHeader, Frame, FramePayload};
    pub use veles_vpk::{EntryStream, VpkArchive, VpkEntry};
    pub use veles_vtf::{decode_config, decode_header, ImageFormat, VtfHeader};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
