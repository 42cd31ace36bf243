//! Storage Module
//!
//! Memory-mapped backing stores and the accessors they hand out.
//!
//! ## Responsibilities
//! - Create one mapped byte range (accessor) per array segment
//! - Bulk read/write raw element bytes at a byte offset
//! - Own the underlying file; an array drops every accessor before it
//!   releases the store
//!
//! ## File Layout (MappedFile)
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ Region 0  (segment 0, bytes_per_segment)     │
//! ├──────────────────────────────────────────────┤
//! │ Region 1  (segment 1, bytes_per_segment)     │
//! ├──────────────────────────────────────────────┤
//! │ ... appended on every create_accessor() ...  │
//! └──────────────────────────────────────────────┘
//! ```
//! Segments map onto regions in order, so a shrink gives back space by
//! truncating the file tail.

mod accessor;
mod anonymous;
mod mapped_file;

pub use accessor::{MappedAccessor, MmapAccessor};
pub use anonymous::AnonymousMap;
pub use mapped_file::MappedFile;

use crate::error::Result;

/// Provider of mapped byte ranges (the backing store of an array)
///
/// The store owns the underlying resource. Accessors it creates are views
/// into it and are released by dropping them.
pub trait MemoryMap {
    type Accessor: MappedAccessor;

    /// Create a new accessor over `size_in_bytes` fresh bytes
    fn create_accessor(&mut self, size_in_bytes: u64) -> Result<Self::Accessor>;

    /// Give back the last `size_in_bytes` bytes handed out
    ///
    /// Callers drop the accessors over that tail first.
    fn release_tail(&mut self, size_in_bytes: u64) -> Result<()>;

    /// Push everything written so far to durable storage
    fn sync(&mut self) -> Result<()>;

    /// Release the store's own resources
    fn release(&mut self) -> Result<()>;
}
