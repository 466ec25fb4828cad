//! Checksum-verifying payload streams.
//!
//! An [`EntryStream`] borrows one of the archive's backing stores and reads
//! the payload sequentially. Backing stores are shared between streams, so
//! every read takes the store lock for the whole seek+read pair; a stream
//! never assumes the store's cursor is where it left it.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};

use parking_lot::Mutex;
use veles_common::crc::Crc32;

use crate::Error;

/// A sequential, checksum-verifying reader over one entry's payload.
///
/// Implements [`std::io::Read`]. The stored CRC-32 is compared against the
/// running checksum the first time end-of-stream is reached; a mismatch
/// surfaces as an [`io::ErrorKind::InvalidData`] error wrapping
/// [`Error::ChecksumMismatch`]. A stream dropped or closed before being
/// fully consumed is never verified.
#[derive(Debug)]
pub struct EntryStream<'a> {
    store: &'a Mutex<File>,
    name: &'a str,
    expected: u32,
    offset: u64,
    remaining: u64,
    crc: Crc32,
    closed: bool,
    verified: bool,
}

impl<'a> EntryStream<'a> {
    pub(crate) fn new(store: &'a Mutex<File>, name: &'a str, expected: u32, offset: u64, length: u64) -> Self {
        Self {
            store,
            name,
            expected,
            offset,
            remaining: length,
            crc: Crc32::new(),
            closed: false,
            verified: false,
        }
    }

    /// Number of payload bytes left to read.
    #[inline]
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Close the stream. Further reads fail with [`Error::StreamClosed`],
    /// and no checksum verification happens on an unfinished stream.
    pub fn close(&mut self) {
        self.closed = true;
    }
}

impl Read for EntryStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.closed {
            return Err(io::Error::other(Error::StreamClosed));
        }

        if self.remaining == 0 {
            if !self.verified {
                self.verified = true;
                let actual = self.crc.finalize();
                if actual != self.expected {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidData,
                        Error::ChecksumMismatch {
                            name: self.name.to_string(),
                            expected: self.expected,
                            actual,
                        },
                    ));
                }
            }
            return Ok(0);
        }

        if buf.is_empty() {
            return Ok(0);
        }

        let want = buf.len().min(usize::try_from(self.remaining).unwrap_or(usize::MAX));
        let read = {
            let mut store = self.store.lock();
            store.seek(SeekFrom::Start(self.offset))?;
            store.read(&mut buf[..want])?
        };

        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "payload for {:?} truncated with {} bytes unread",
                    self.name, self.remaining
                ),
            ));
        }

        self.crc.update(&buf[..read]);
        self.offset += read as u64;
        self.remaining -= read as u64;
        Ok(read)
    }
}
