//! Mapped Accessor
//!
//! Bounds-checked bulk byte access over one mapped region.

use memmap2::MmapMut;

use crate::error::{HugeArrayError, Result};

/// Raw byte-range access to one mapped region
pub trait MappedAccessor {
    /// Region size in bytes
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fill `dst` from the region starting at `byte_offset`
    fn read_range(&self, byte_offset: u64, dst: &mut [u8]) -> Result<()>;

    /// Copy `src` into the region starting at `byte_offset`
    fn write_range(&mut self, byte_offset: u64, src: &[u8]) -> Result<()>;

    /// Push modified pages to the backing store
    fn flush(&self) -> Result<()>;
}

/// Accessor over a `memmap2` mutable mapping (file-backed or anonymous)
pub struct MmapAccessor {
    map: MmapMut,
}

impl MmapAccessor {
    pub(crate) fn new(map: MmapMut) -> Self {
        Self { map }
    }

    /// Byte range `[byte_offset, byte_offset + count)` if it fits the region
    fn range(&self, byte_offset: u64, count: usize) -> Result<std::ops::Range<usize>> {
        let start = usize::try_from(byte_offset).map_err(|_| {
            HugeArrayError::Storage(format!("offset {} exceeds address space", byte_offset))
        })?;
        match start.checked_add(count) {
            Some(end) if end <= self.map.len() => Ok(start..end),
            _ => Err(HugeArrayError::Storage(format!(
                "range {}+{} outside mapped region of {} bytes",
                byte_offset,
                count,
                self.map.len()
            ))),
        }
    }
}

impl MappedAccessor for MmapAccessor {
    fn len(&self) -> u64 {
        self.map.len() as u64
    }

    fn read_range(&self, byte_offset: u64, dst: &mut [u8]) -> Result<()> {
        let range = self.range(byte_offset, dst.len())?;
        dst.copy_from_slice(&self.map[range]);
        Ok(())
    }

    fn write_range(&mut self, byte_offset: u64, src: &[u8]) -> Result<()> {
        let range = self.range(byte_offset, src.len())?;
        self.map[range].copy_from_slice(src);
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.map.flush()?;
        Ok(())
    }
}
