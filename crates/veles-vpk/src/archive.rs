//! VPK archive reader.

use std::collections::HashMap;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use parking_lot::Mutex;
use veles_common::BinaryReader;

use crate::directory;
use crate::entry::VpkEntry;
use crate::header::VpkHeader;
use crate::stream::EntryStream;
use crate::{Error, Result};

/// Suffix marking the index file of a multi-part archive set.
const DIR_SUFFIX: &str = "_dir.vpk";

/// Upper bound on the companion part scan.
const PART_SCAN_LIMIT: u16 = 1000;

/// An opened VPK archive.
///
/// Holds the parsed directory and every backing store: the primary archive
/// file plus, for `_dir.vpk` archive sets, the numbered companion parts
/// found next to it. The entry list is immutable after open.
///
/// Streams returned by [`VpkArchive::open_stream`] borrow the archive, so
/// the borrow checker guarantees no stream outlives [`VpkArchive::close`].
pub struct VpkArchive {
    /// Archive file name, kept for error context.
    name: String,
    header: VpkHeader,
    entries: Vec<VpkEntry>,
    primary: Mutex<File>,
    parts: HashMap<u16, Mutex<File>>,
}

impl VpkArchive {
    /// Open a VPK archive.
    ///
    /// Accepts either a standalone archive (`misc.vpk`) or the index file
    /// of a multi-part set (`pak01_dir.vpk`). For the latter, companion
    /// parts (`pak01_001.vpk`, `pak01_002.vpk`, ...) are probed with
    /// 1-based zero-padded indices and the scan stops at the first index
    /// with no file on disk. A part that is missing entirely only fails
    /// later, when a stream for one of its entries is opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)?;

        let header = VpkHeader::read_from(&mut file)?;

        let mut tree = vec![0u8; header.tree_length as usize];
        file.read_exact(&mut tree)?;
        let entries = directory::parse_directory(&mut BinaryReader::new(&tree))?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let parts = Self::open_parts(path)?;

        Ok(Self {
            name,
            header,
            entries,
            primary: Mutex::new(file),
            parts,
        })
    }

    /// Get the archive file name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the parsed header.
    #[inline]
    pub fn header(&self) -> &VpkHeader {
        &self.header
    }

    /// Get the number of entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over entries in directory traversal order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &VpkEntry> {
        self.entries.iter()
    }

    /// Get an entry by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&VpkEntry> {
        self.entries.get(index)
    }

    /// Find an entry by its full `path/name.extension` name.
    ///
    /// Names are not unique in the directory; the first entry in traversal
    /// order wins.
    pub fn find(&self, name: &str) -> Option<&VpkEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    /// Open a checksum-verifying stream over an entry's payload.
    ///
    /// Inline entries resolve to the primary store behind the header and
    /// directory tree; all other entries resolve to the companion part
    /// registered under their archive index, failing with
    /// [`Error::ArchivePartNotFound`] when that part was never found on
    /// disk. Other entries of the archive stay readable after such a
    /// failure.
    pub fn open_stream<'a>(&'a self, entry: &'a VpkEntry) -> Result<EntryStream<'a>> {
        let record = entry.record();

        let (store, offset) = if entry.is_inline() {
            let offset = u64::from(record.entry_offset)
                + u64::from(self.header.tree_length)
                + u64::from(self.header.header_size());
            (&self.primary, offset)
        } else {
            let store = self.parts.get(&record.archive_index).ok_or_else(|| {
                Error::ArchivePartNotFound {
                    name: entry.name().to_string(),
                    index: record.archive_index,
                }
            })?;
            (store, u64::from(record.entry_offset))
        };

        Ok(EntryStream::new(
            store,
            entry.name(),
            record.crc32,
            offset,
            u64::from(record.entry_length),
        ))
    }

    /// Close the archive, releasing the primary store and every companion
    /// part. Outstanding streams borrow the archive, so none can exist at
    /// this point.
    pub fn close(self) {}

    fn open_parts(path: &Path) -> Result<HashMap<u16, Mutex<File>>> {
        let mut parts = HashMap::new();

        let path_str = path.to_string_lossy();
        let Some(base) = path_str.strip_suffix(DIR_SUFFIX) else {
            return Ok(parts);
        };

        for index in 1..PART_SCAN_LIMIT {
            let part_path = format!("{base}_{index:03}.vpk");
            match File::open(&part_path) {
                Ok(file) => {
                    parts.insert(index, Mutex::new(file));
                }
                Err(err) if err.kind() == ErrorKind::NotFound => break,
                Err(err) => return Err(err.into()),
            }
        }

        Ok(parts)
    }
}

impl std::fmt::Debug for VpkArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VpkArchive")
            .field("name", &self.name)
            .field("version", &self.header.version)
            .field("entries", &self.entries.len())
            .field("parts", &self.parts.len())
            .finish()
    }
}
