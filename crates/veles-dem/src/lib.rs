//! Source engine demo recording decoder.
//!
//! A demo file is a fixed header followed by a sequence of tick-stamped
//! frames. This crate decodes the header and splits the frame sequence
//! into typed payloads without interpreting the network data inside them.
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use veles_dem::Demo;
//!
//! let demo = Demo::decode(File::open("match.dem")?)?;
//! println!("{} on {}", demo.header().server_name, demo.header().map_name);
//! println!("{} frames", demo.frames().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decode;
mod error;
mod header;

pub use decode::{Demo, Frame, FramePayload};
pub use error::{Error, Result};
pub use header::DemoHeader;

/// Demo file magic bytes.
pub const DEM_MAGIC: &[u8; 8] = b"HL2DEMO\0";
