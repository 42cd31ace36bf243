//! Segmented Mapped Array
//!
//! A huge array split into fixed-capacity segments, each backed by one
//! mapped accessor, with a single buffer window caching one aligned range.
//!
//! ## Access Path
//! ```text
//!   get(i) / set(i, v)
//!          │
//!          ▼
//!   ┌──────────────┐  hit   ┌─────────────────────────┐
//!   │ window has i?├───────►│ read/write window bytes │
//!   └──────┬───────┘        └─────────────────────────┘
//!          │ miss
//!          ▼
//!   write back dirty window ──► load aligned window from owning segment
//! ```
//!
//! ## Concurrency
//! Single-threaded. Every mutable piece of state (length, segment list,
//! window and its dirty flag) is unsynchronized; wrap the array in a
//! `SharedArray` to use it from several threads.

use std::marker::PhantomData;
use std::path::Path;

use crate::config::ArrayConfig;
use crate::element::Element;
use crate::error::{HugeArrayError, Result};
use crate::layout::SegmentLayout;
use crate::storage::{AnonymousMap, MappedAccessor, MappedFile, MemoryMap};

use super::window::{BufferWindow, WindowState, WindowStats};
use super::HugeArray;

/// Segmented memory-mapped array of `T`
///
/// Writes land in the buffer window and reach the mapping only when the
/// window is evicted, on `flush()`, on resize or on release. Dropping the
/// array without calling `release()` still writes back, but can only log
/// a failure.
pub struct MappedHugeArray<T: Element, M: MemoryMap> {
    /// Backing store; owns the mapped file
    store: M,

    /// One accessor per segment, in logical order
    segments: Vec<M::Accessor>,

    /// Segment/window geometry
    layout: SegmentLayout,

    /// Logical element count
    len: u64,

    /// The single cached range
    window: BufferWindow,

    /// Window traffic counters
    stats: WindowStats,

    /// Msync segments and sync the store on release
    flush_on_release: bool,

    /// Set once release has run (explicitly or from Drop)
    released: bool,

    _marker: PhantomData<T>,
}

impl<T: Element> MappedHugeArray<T, MappedFile> {
    /// Create a file-backed array at `path` (the file is truncated)
    pub fn create(path: &Path, len: u64, config: &ArrayConfig) -> Result<Self> {
        let store = MappedFile::create(path)?;
        Self::with_config(store, len, config)
    }
}

impl<T: Element> MappedHugeArray<T, AnonymousMap> {
    /// Create an array over anonymous memory
    pub fn anonymous(len: u64, config: &ArrayConfig) -> Result<Self> {
        Self::with_config(AnonymousMap::new(), len, config)
    }
}

impl<T: Element, M: MemoryMap> MappedHugeArray<T, M> {
    /// Create an array of `len` elements with `segment_capacity` elements per segment
    ///
    /// Fails with `Config` if `segment_capacity` is not a power of two.
    pub fn new(store: M, len: u64, segment_capacity: u64) -> Result<Self> {
        let config = ArrayConfig::builder()
            .segment_capacity(segment_capacity)
            .build();
        Self::with_config(store, len, &config)
    }

    /// Create an array from a full config
    ///
    /// Segments for the initial length are allocated eagerly.
    pub fn with_config(mut store: M, len: u64, config: &ArrayConfig) -> Result<Self> {
        let layout = SegmentLayout::from_config(T::SIZE, config)?;

        let count = layout.segment_count(len);
        let mut segments = Vec::with_capacity(count);
        for _ in 0..count {
            segments.push(store.create_accessor(layout.bytes_per_segment())?);
        }

        tracing::debug!(
            len,
            element_size = layout.element_size(),
            segment_capacity = layout.segment_capacity(),
            buffer_size = layout.buffer_size(),
            segments = count,
            "created mapped array"
        );

        Ok(Self {
            store,
            segments,
            layout,
            len,
            window: BufferWindow::new(layout.window_bytes()),
            stats: WindowStats::default(),
            flush_on_release: config.flush_on_release,
            released: false,
            _marker: PhantomData,
        })
    }

    /// Write back the window, msync every segment and sync the store
    pub fn flush(&mut self) -> Result<()> {
        self.write_back()?;
        for segment in &self.segments {
            segment.flush()?;
        }
        self.store.sync()
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Number of allocated segments
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Segment/window geometry
    pub fn layout(&self) -> &SegmentLayout {
        &self.layout
    }

    /// Current window position and dirty flag
    pub fn window(&self) -> WindowState {
        self.window.state()
    }

    /// Window traffic counters
    pub fn stats(&self) -> WindowStats {
        self.stats
    }

    /// Backing store
    pub fn store(&self) -> &M {
        &self.store
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn check_bounds(&self, index: u64) -> Result<()> {
        if index >= self.len {
            return Err(HugeArrayError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    /// Make the window cover `index`; returns the byte offset inside it
    fn sync(&mut self, index: u64) -> Result<usize> {
        self.check_bounds(index)?;

        if let Some(slot) = self.window.slot(index, self.layout.buffer_size(), T::SIZE) {
            self.stats.hits += 1;
            return Ok(slot);
        }
        self.stats.misses += 1;

        self.write_back()?;
        self.window.invalidate();

        let start = self.layout.window_start(index);
        let (segment, offset) = self.layout.locate(start);
        self.segments[segment].read_range(offset, &mut self.window.bytes)?;
        self.window.start = Some(start);
        self.stats.loads += 1;

        tracing::trace!(start, segment, offset, "loaded window");

        Ok((index - start) as usize * T::SIZE)
    }

    /// Write a dirty window back to the offset it was loaded from
    fn write_back(&mut self) -> Result<()> {
        let start = match self.window.start {
            Some(start) if self.window.dirty => start,
            _ => return Ok(()),
        };

        let (segment, offset) = self.layout.locate(start);
        self.segments[segment].write_range(offset, &self.window.bytes)?;
        self.window.dirty = false;
        self.stats.flushes += 1;

        tracing::trace!(start, segment, offset, "flushed window");
        Ok(())
    }

    /// Drop trailing segments down to `count` and give their bytes back
    fn truncate_segments(&mut self, count: usize) -> Result<()> {
        let removed = self.segments.len().saturating_sub(count);
        if removed == 0 {
            return Ok(());
        }
        self.segments.truncate(count);
        self.store
            .release_tail(removed as u64 * self.layout.bytes_per_segment())
    }

    /// Append segments up to `count`; on failure nothing is kept
    fn grow_segments(&mut self, count: usize) -> Result<()> {
        let bytes = self.layout.bytes_per_segment();
        let mut grown = Vec::with_capacity(count.saturating_sub(self.segments.len()));
        for _ in self.segments.len()..count {
            match self.store.create_accessor(bytes) {
                Ok(accessor) => grown.push(accessor),
                Err(e) => {
                    let allocated = grown.len() as u64;
                    drop(grown);
                    if allocated > 0 {
                        self.store.release_tail(allocated * bytes)?;
                    }
                    return Err(e);
                }
            }
        }
        self.segments.extend(grown);
        Ok(())
    }

    /// Shared body of `release()` and `Drop`; runs at most once
    fn release_inner(&mut self) -> Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        self.write_back()?;
        self.window.invalidate();

        if self.flush_on_release {
            for segment in &self.segments {
                segment.flush()?;
            }
            self.store.sync()?;
        }

        // Views go before the store that owns them
        let segments = self.segments.len();
        self.segments.clear();
        self.store.release()?;

        tracing::debug!(len = self.len, segments, "released mapped array");
        Ok(())
    }
}

impl<T: Element, M: MemoryMap> HugeArray<T> for MappedHugeArray<T, M> {
    fn len(&self) -> u64 {
        self.len
    }

    /// Resize, keeping the segment list at `ceil(new_len / segment_capacity)`
    ///
    /// Trailing segments removed by a shrink are handed back to the store.
    /// Newly exposed indices are explicitly written with `T::default()`:
    /// a shrink that keeps a segment leaves its old bytes mapped.
    fn resize(&mut self, new_len: u64) -> Result<()> {
        self.write_back()?;
        self.window.invalidate();

        let old_len = self.len;
        let old_count = self.segments.len();
        let needed = self.layout.segment_count(new_len);

        if needed < old_count {
            self.truncate_segments(needed)?;
        } else {
            self.grow_segments(needed)?;
        }
        self.len = new_len;

        tracing::debug!(old_len, new_len, segments = needed, "resized mapped array");

        for index in old_len..new_len {
            if let Err(e) = self.set(index, T::default()) {
                // The window only holds defaults past old_len; discard it
                self.window.invalidate();
                self.len = old_len;
                self.truncate_segments(old_count)?;
                return Err(e);
            }
        }
        Ok(())
    }

    fn get(&mut self, index: u64) -> Result<T> {
        let slot = self.sync(index)?;
        Ok(T::read_from(&self.window.bytes[slot..slot + T::SIZE]))
    }

    fn set(&mut self, index: u64, value: T) -> Result<()> {
        let slot = self.sync(index)?;
        value.write_to(&mut self.window.bytes[slot..slot + T::SIZE]);
        self.window.dirty = true;
        Ok(())
    }

    fn release(mut self) -> Result<()> {
        self.release_inner()
    }
}

impl<T: Element, M: MemoryMap> Drop for MappedHugeArray<T, M> {
    fn drop(&mut self) {
        if let Err(e) = self.release_inner() {
            tracing::warn!("Failed to release mapped array on drop: {}", e);
        }
    }
}
