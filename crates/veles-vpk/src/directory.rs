//! VPK directory tree parsing.
//!
//! The directory is a three-level hierarchy of NUL-terminated strings,
//! extension then path then base name, with an empty string closing each
//! level. Every (extension, path, name) triple is followed by one fixed
//! [`DirectoryEntry`] record and a mandatory terminator word.

use veles_common::BinaryReader;

use crate::entry::VpkEntry;
use crate::{Error, Result};

/// Terminator word closing every directory entry record.
pub const ENTRY_TERMINATOR: u16 = 0xFFFF;

/// The fixed-size record stored after each file name in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// CRC-32 (IEEE) of the payload bytes.
    pub crc32: u32,
    /// Bytes of payload embedded in the tree right after this record.
    /// Parsed but not consumed by the read path.
    pub preload_bytes: u16,
    /// Companion archive index, or [`crate::INLINE_ARCHIVE_INDEX`] when the
    /// payload lives in the primary store.
    pub archive_index: u16,
    /// Payload offset within the selected store.
    pub entry_offset: u32,
    /// Payload length in bytes.
    pub entry_length: u32,
}

/// Walk the directory tree and produce the flat entry list.
///
/// Entries come out in traversal order. Duplicate synthesized names are
/// kept as-is, so name lookup resolves to the first occurrence.
pub fn parse_directory(reader: &mut BinaryReader) -> Result<Vec<VpkEntry>> {
    let mut entries = Vec::new();

    loop {
        let extension = reader.read_cstring()?;
        if extension.is_empty() {
            break;
        }
        loop {
            let path = reader.read_cstring()?;
            if path.is_empty() {
                break;
            }
            loop {
                let name = reader.read_cstring()?;
                if name.is_empty() {
                    break;
                }
                let full_name = format!("{path}/{name}.{extension}");
                let record = read_record(reader, &full_name)?;
                entries.push(VpkEntry::new(full_name, record));
            }
        }
    }

    Ok(entries)
}

fn read_record(reader: &mut BinaryReader, name: &str) -> Result<DirectoryEntry> {
    let crc32 = reader.read_u32()?;
    let preload_bytes = reader.read_u16()?;
    let archive_index = reader.read_u16()?;
    let entry_offset = reader.read_u32()?;
    let entry_length = reader.read_u32()?;

    let terminator = reader.read_u16()?;
    if terminator != ENTRY_TERMINATOR {
        return Err(Error::BrokenArchive {
            name: name.to_string(),
        });
    }

    Ok(DirectoryEntry {
        crc32,
        preload_bytes,
        archive_index,
        entry_offset,
        entry_length,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::INLINE_ARCHIVE_INDEX;

    pub(crate) fn push_cstr(tree: &mut Vec<u8>, s: &str) {
        tree.extend_from_slice(s.as_bytes());
        tree.push(0);
    }

    pub(crate) fn push_record(tree: &mut Vec<u8>, record: &DirectoryEntry) {
        tree.extend_from_slice(&record.crc32.to_le_bytes());
        tree.extend_from_slice(&record.preload_bytes.to_le_bytes());
        tree.extend_from_slice(&record.archive_index.to_le_bytes());
        tree.extend_from_slice(&record.entry_offset.to_le_bytes());
        tree.extend_from_slice(&record.entry_length.to_le_bytes());
        tree.extend_from_slice(&ENTRY_TERMINATOR.to_le_bytes());
    }

    pub(crate) fn record(crc32: u32, archive_index: u16, offset: u32, length: u32) -> DirectoryEntry {
        DirectoryEntry {
            crc32,
            preload_bytes: 0,
            archive_index,
            entry_offset: offset,
            entry_length: length,
        }
    }

    #[test]
    fn test_empty_directory() {
        let tree = [0u8];
        let entries = parse_directory(&mut BinaryReader::new(&tree)).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_traversal_order_and_names() {
        let mut tree = Vec::new();
        push_cstr(&mut tree, "txt");
        push_cstr(&mut tree, "scripts");
        push_cstr(&mut tree, "manifest");
        push_record(&mut tree, &record(1, INLINE_ARCHIVE_INDEX, 0, 4));
        push_cstr(&mut tree, "readme");
        push_record(&mut tree, &record(2, INLINE_ARCHIVE_INDEX, 4, 8));
        push_cstr(&mut tree, ""); // end of names in scripts/
        push_cstr(&mut tree, ""); // end of paths under txt
        push_cstr(&mut tree, "vmt");
        push_cstr(&mut tree, "materials");
        push_cstr(&mut tree, "concrete");
        push_record(&mut tree, &record(3, 0, 0, 16));
        push_cstr(&mut tree, "");
        push_cstr(&mut tree, "");
        push_cstr(&mut tree, ""); // end of extensions

        let entries = parse_directory(&mut BinaryReader::new(&tree)).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name()).collect();
        assert_eq!(
            names,
            [
                "scripts/manifest.txt",
                "scripts/readme.txt",
                "materials/concrete.vmt"
            ]
        );
        assert_eq!(entries[2].archive_index(), 0);
        assert_eq!(entries[2].len(), 16);
    }

    #[test]
    fn test_duplicate_names_preserved() {
        let mut tree = Vec::new();
        push_cstr(&mut tree, "txt");
        push_cstr(&mut tree, "cfg");
        push_cstr(&mut tree, "autoexec");
        push_record(&mut tree, &record(0xAAAA, INLINE_ARCHIVE_INDEX, 0, 4));
        push_cstr(&mut tree, "autoexec");
        push_record(&mut tree, &record(0xBBBB, INLINE_ARCHIVE_INDEX, 4, 4));
        push_cstr(&mut tree, "");
        push_cstr(&mut tree, "");
        push_cstr(&mut tree, "");

        let entries = parse_directory(&mut BinaryReader::new(&tree)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name(), entries[1].name());
        assert_eq!(entries[0].crc32(), 0xAAAA);
        assert_eq!(entries[1].crc32(), 0xBBBB);
    }

    #[test]
    fn test_missing_terminator_is_broken_archive() {
        let mut tree = Vec::new();
        push_cstr(&mut tree, "txt");
        push_cstr(&mut tree, "cfg");
        push_cstr(&mut tree, "autoexec");
        push_record(&mut tree, &record(0, INLINE_ARCHIVE_INDEX, 0, 4));
        let last = tree.len() - 1;
        tree[last] = 0x7F; // corrupt the terminator

        let err = parse_directory(&mut BinaryReader::new(&tree)).unwrap_err();
        match err {
            Error::BrokenArchive { name } => assert_eq!(name, "cfg/autoexec.txt"),
            other => panic!("expected BrokenArchive, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_is_idempotent_over_same_bytes() {
        let mut tree = Vec::new();
        push_cstr(&mut tree, "txt");
        push_cstr(&mut tree, "cfg");
        push_cstr(&mut tree, "autoexec");
        push_record(&mut tree, &record(7, INLINE_ARCHIVE_INDEX, 0, 4));
        push_cstr(&mut tree, "");
        push_cstr(&mut tree, "");
        push_cstr(&mut tree, "");

        let first = parse_directory(&mut BinaryReader::new(&tree)).unwrap();
        let second = parse_directory(&mut BinaryReader::new(&tree)).unwrap();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.name(), b.name());
            assert_eq!(a.record(), b.record());
        }
    }
}
