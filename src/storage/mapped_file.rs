//! File-backed store
//!
//! One file, grown by one region per created accessor and truncated when
//! trailing regions are given back.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use memmap2::MmapOptions;

use crate::error::{HugeArrayError, Result};

use super::{MemoryMap, MmapAccessor};

/// Backing store over a single file on disk
pub struct MappedFile {
    /// Path of the backing file
    path: PathBuf,
    /// Open handle, read/write
    file: File,
    /// Current file length; the next region starts here
    len: u64,
}

impl MappedFile {
    /// Create (or truncate) the backing file at `path`
    pub fn create(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        tracing::debug!(path = %path.display(), "created backing file");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            len: 0,
        })
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Bytes allocated in the backing file so far
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl MemoryMap for MappedFile {
    type Accessor = MmapAccessor;

    fn create_accessor(&mut self, size_in_bytes: u64) -> Result<MmapAccessor> {
        let len = usize::try_from(size_in_bytes).map_err(|_| {
            HugeArrayError::Storage(format!("cannot map {} bytes", size_in_bytes))
        })?;
        let offset = self.len;
        let new_len = offset.checked_add(size_in_bytes).ok_or_else(|| {
            HugeArrayError::Storage(format!(
                "backing file {} would exceed u64 bytes",
                self.path.display()
            ))
        })?;

        // Grow first: mapping past EOF faults on access
        self.file.set_len(new_len)?;

        // SAFETY: the region [offset, new_len) was just allocated by this store
        // and is handed out to exactly one accessor.
        #[allow(unsafe_code)]
        let map = unsafe {
            MmapOptions::new()
                .offset(offset)
                .len(len)
                .map_mut(&self.file)
                .map_err(|e| {
                    HugeArrayError::Storage(format!(
                        "failed to map {} bytes at {} of {}: {}",
                        size_in_bytes,
                        offset,
                        self.path.display(),
                        e
                    ))
                })?
        };
        self.len = new_len;

        tracing::trace!(offset, size = size_in_bytes, "mapped file region");

        Ok(MmapAccessor::new(map))
    }

    fn release_tail(&mut self, size_in_bytes: u64) -> Result<()> {
        let new_len = self.len.checked_sub(size_in_bytes).ok_or_else(|| {
            HugeArrayError::Storage(format!(
                "cannot release {} bytes from {} of {} bytes",
                size_in_bytes,
                self.path.display(),
                self.len
            ))
        })?;
        self.file.set_len(new_len)?;
        self.len = new_len;

        tracing::trace!(released = size_in_bytes, len = new_len, "truncated backing file");
        Ok(())
    }

    fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        tracing::debug!(path = %self.path.display(), bytes = self.len, "released backing file");
        Ok(())
    }
}
