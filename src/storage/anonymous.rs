//! Anonymous backing store
//!
//! Swap-backed mappings with no file behind them. Used for scratch arrays.

use memmap2::MmapMut;

use crate::error::{HugeArrayError, Result};

use super::{MemoryMap, MmapAccessor};

/// Provider of anonymous mappings
#[derive(Debug, Default)]
pub struct AnonymousMap {
    /// Bytes currently handed out (for testing/debugging)
    mapped_bytes: u64,
}

impl AnonymousMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes currently mapped by live accessors
    pub fn mapped_bytes(&self) -> u64 {
        self.mapped_bytes
    }
}

impl MemoryMap for AnonymousMap {
    type Accessor = MmapAccessor;

    fn create_accessor(&mut self, size_in_bytes: u64) -> Result<MmapAccessor> {
        let len = usize::try_from(size_in_bytes).map_err(|_| {
            HugeArrayError::Storage(format!("cannot map {} bytes", size_in_bytes))
        })?;
        let map = MmapMut::map_anon(len)?;
        self.mapped_bytes += size_in_bytes;
        Ok(MmapAccessor::new(map))
    }

    fn release_tail(&mut self, size_in_bytes: u64) -> Result<()> {
        self.mapped_bytes = self.mapped_bytes.saturating_sub(size_in_bytes);
        Ok(())
    }

    fn sync(&mut self) -> Result<()> {
        Ok(())
    }

    fn release(&mut self) -> Result<()> {
        Ok(())
    }
}
