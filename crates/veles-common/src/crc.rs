//! CRC-32 (IEEE) hashing utilities.
//!
//! Source engine containers store CRC-32 checksums computed with the IEEE
//! polynomial, the same one used by zip and gzip.

/// Streaming CRC-32 accumulator.
///
/// Feed payload bytes through [`Crc32::update`] as they arrive and call
/// [`Crc32::finalize`] once the input is exhausted.
#[derive(Debug, Clone, Default)]
pub struct Crc32 {
    hasher: crc32fast::Hasher,
}

impl Crc32 {
    /// Create a new accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed bytes into the running checksum.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
    }

    /// Get the checksum of everything fed so far.
    ///
    /// Non-consuming, so a stream can check the value at end-of-input
    /// without giving up the accumulator.
    #[inline]
    pub fn finalize(&self) -> u32 {
        self.hasher.clone().finalize()
    }
}

/// Compute the CRC-32 of a byte slice in one call.
#[inline]
pub fn hash_bytes(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}
