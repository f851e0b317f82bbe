//! Memory-mapped input files
//!
//! Avoids buffered reads entirely: the file is mapped read-only and the OS
//! handles paging, which is what large inputs want. The hashing core only
//! ever sees a borrowed view of the mapping.

use crate::error::{IoResultExt, Result, SumScanError};
use crate::hash::ByteSource;
use memmap2::Mmap;
use std::fs::File;
use std::path::{Path, PathBuf};

/// A read-only memory-mapped file
#[derive(Debug)]
pub struct MappedFile {
    path: PathBuf,
    map: Mmap,
}

impl MappedFile {
    /// Open and map a file read-only
    ///
    /// Zero-length files are rejected up front: mapping them is not
    /// portable and hashing them is refused anyway.
    pub fn open(path: impl AsRef<Path>) -> Result<MappedFile> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SumScanError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path).with_path(path)?;
        let len = file.metadata().with_path(path)?.len();
        if len == 0 {
            return Err(SumScanError::EmptySource);
        }

        // SAFETY: the map is read-only; the file must not be truncated
        // while the map is alive.
        let map = unsafe { Mmap::map(&file) }.with_path(path)?;

        Ok(MappedFile {
            path: path.to_path_buf(),
            map,
        })
    }

    /// Path the file was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Mapped length in bytes
    pub fn len(&self) -> u64 {
        self.map.len() as u64
    }

    /// Whether the mapping is zero-length
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Borrow the mapped bytes as a hashing source
    pub fn source(&self) -> ByteSource<'_> {
        ByteSource::new(&self.map)
    }
}
