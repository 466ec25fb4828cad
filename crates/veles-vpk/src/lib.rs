//! VPK archive reader for Source engine game files.
//!
//! The VPK format is a directory-indexed archive container: a header and a
//! nested string tree describing every file, followed by payload bytes that
//! either live inline in the same file or in numbered companion archives
//! (`pak01_001.vpk`, `pak01_002.vpk`, ...) next to the `_dir.vpk` index.
//!
//! Payloads are stored uncompressed. Every directory entry carries a CRC-32
//! checksum, and [`EntryStream`] verifies it incrementally as the payload is
//! read, so extraction never has to buffer a whole file.
//!
//! # Example
//!
//! ```no_run
//! use std::io::Read;
//! use veles_vpk::VpkArchive;
//!
//! let archive = VpkArchive::open("pak01_dir.vpk")?;
//!
//! for entry in archive.iter() {
//!     println!("{}: {} bytes", entry.name(), entry.len());
//! }
//!
//! // Stream a specific file, checksum-verified on the way out
//! if let Some(entry) = archive.find("scripts/soundscapes_manifest.txt") {
//!     let mut data = Vec::new();
//!     archive.open_stream(entry)?.read_to_end(&mut data)?;
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod archive;
mod directory;
mod entry;
mod error;
mod header;
mod stream;

pub use archive::VpkArchive;
pub use directory::{DirectoryEntry, ENTRY_TERMINATOR};
pub use entry::{VpkEntry, INLINE_ARCHIVE_INDEX};
pub use error::{Error, Result};
pub use header::{VpkHeader, SIGNATURE};
pub use stream::EntryStream;
