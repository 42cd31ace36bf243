//! Buffer window
//!
//! The single cached range of a mapped array, plus its counters.

/// Snapshot of the buffer window (for testing/debugging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowState {
    /// First logical index cached, or `None` when unset
    pub start: Option<u64>,
    /// Window holds writes not yet written back to its segment
    pub dirty: bool,
}

/// Window traffic counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowStats {
    /// Accesses served from the cached window
    pub hits: u64,
    /// Accesses that had to move the window
    pub misses: u64,
    /// Windows read from a segment
    pub loads: u64,
    /// Dirty windows written back to a segment
    pub flushes: u64,
}

/// Cached bytes of `buffer_size` consecutive elements
pub(crate) struct BufferWindow {
    pub(crate) start: Option<u64>,
    pub(crate) dirty: bool,
    pub(crate) bytes: Vec<u8>,
}

impl BufferWindow {
    pub(crate) fn new(window_bytes: usize) -> Self {
        Self {
            start: None,
            dirty: false,
            bytes: vec![0u8; window_bytes],
        }
    }

    /// Byte offset of `index` inside the window, if cached
    #[inline]
    pub(crate) fn slot(&self, index: u64, buffer_size: u64, element_size: usize) -> Option<usize> {
        let start = self.start?;
        if index >= start && index - start < buffer_size {
            Some((index - start) as usize * element_size)
        } else {
            None
        }
    }

    pub(crate) fn invalidate(&mut self) {
        self.start = None;
        self.dirty = false;
    }

    pub(crate) fn state(&self) -> WindowState {
        WindowState {
            start: self.start,
            dirty: self.dirty,
        }
    }
}
