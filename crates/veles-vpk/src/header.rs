//! VPK header parsing.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::{Error, Result};

/// VPK magic signature.
pub const SIGNATURE: u32 = 0x55AA1234;

/// Version-keyed header sizes used as the payload base for inline entries.
///
/// Inline payload offsets in the directory are relative to the end of the
/// tree, and the tree itself sits behind the header, so these constants
/// participate in every inline offset computation.
const HEADER_SIZE_V1: u32 = 0x0D;
const HEADER_SIZE_V2: u32 = 0x1B;

/// Parsed VPK archive header.
///
/// Version 1 carries only the tree length; version 2 adds a footer length
/// and two reserved fields that are format padding and discarded on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VpkHeader {
    /// Format version, 1 or 2.
    pub version: u32,
    /// Size in bytes of the directory tree following the header.
    pub tree_length: u32,
    /// Size in bytes of the version 2 footer (zero for version 1).
    pub footer_length: u32,
}

impl VpkHeader {
    /// Read and validate a header from the start of an archive.
    ///
    /// Fails with [`Error::NotAVpkFile`] on a signature mismatch and with
    /// [`Error::UnsupportedVersion`] for any version other than 1 or 2,
    /// in both cases before touching any directory bytes.
    pub fn read_from<R: Read>(r: &mut R) -> Result<Self> {
        let signature = r.read_u32::<LittleEndian>()?;
        if signature != SIGNATURE {
            return Err(Error::NotAVpkFile { signature });
        }

        let version = r.read_u32::<LittleEndian>()?;
        if version != 1 && version != 2 {
            return Err(Error::UnsupportedVersion(version));
        }

        let tree_length = r.read_u32::<LittleEndian>()?;

        let mut footer_length = 0;
        if version == 2 {
            footer_length = r.read_u32::<LittleEndian>()?;
            r.read_u32::<LittleEndian>()?;
            r.read_u32::<LittleEndian>()?;
        }

        Ok(Self {
            version,
            tree_length,
            footer_length,
        })
    }

    /// Version-dependent header size used in inline payload offset
    /// arithmetic.
    #[inline]
    pub fn header_size(&self) -> u32 {
        match self.version {
            1 => HEADER_SIZE_V1,
            _ => HEADER_SIZE_V2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(version: u32, tree_length: u32) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&SIGNATURE.to_le_bytes());
        data.extend_from_slice(&version.to_le_bytes());
        data.extend_from_slice(&tree_length.to_le_bytes());
        if version == 2 {
            data.extend_from_slice(&0x30u32.to_le_bytes()); // footer
            data.extend_from_slice(&0u32.to_le_bytes());
            data.extend_from_slice(&0u32.to_le_bytes());
        }
        data
    }

    #[test]
    fn test_parse_v1() {
        let data = header_bytes(1, 0x100);
        let header = VpkHeader::read_from(&mut data.as_slice()).unwrap();
        assert_eq!(header.version, 1);
        assert_eq!(header.tree_length, 0x100);
        assert_eq!(header.footer_length, 0);
        assert_eq!(header.header_size(), 13);
    }

    #[test]
    fn test_parse_v2() {
        let data = header_bytes(2, 0x2000);
        let header = VpkHeader::read_from(&mut data.as_slice()).unwrap();
        assert_eq!(header.version, 2);
        assert_eq!(header.tree_length, 0x2000);
        assert_eq!(header.footer_length, 0x30);
        assert_eq!(header.header_size(), 27);
    }

    #[test]
    fn test_bad_signature() {
        let mut data = header_bytes(1, 0);
        data[3] = 0x44;
        let err = VpkHeader::read_from(&mut data.as_slice()).unwrap_err();
        assert!(matches!(err, Error::NotAVpkFile { .. }));
    }

    #[test]
    fn test_unsupported_version() {
        let data = header_bytes(3, 0);
        let err = VpkHeader::read_from(&mut data.as_slice()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedVersion(3)));
    }
}
