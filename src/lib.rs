//! # hugearray
//!
//! Randomly indexable arrays of fixed-size elements that can grow past what
//! one memory mapping (or available RAM) can hold:
//! - Segmented address space, one mapped region per segment
//! - Single buffer window batching reads/writes to a segment
//! - Dirty tracking with write-back on eviction, resize and release
//! - Interchangeable backends behind one `HugeArray` contract
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    HugeArray<T> contract                     │
//! │         len / resize / get / set / release / copy_from       │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌───────────────────┐
//!   │ MemoryArray │          │  MappedHugeArray  │
//!   │   (Vec<T>)  │          │ (buffer window)   │
//!   └─────────────┘          └─────────┬─────────┘
//!                                      │ SegmentLayout
//!                                      ▼
//!                      ┌───────────────────────────────┐
//!                      │ Segment 0 │ Segment 1 │ ...   │
//!                      │ (MappedAccessor per segment)  │
//!                      └───────────────┬───────────────┘
//!                                      ▼
//!                           ┌─────────────────────┐
//!                           │ MemoryMap (store)   │
//!                           │ MappedFile / Anon   │
//!                           └─────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod element;
pub mod layout;
pub mod storage;
pub mod array;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{HugeArrayError, Result};
pub use config::ArrayConfig;
pub use element::Element;
pub use array::{HugeArray, MappedHugeArray, MemoryArray, SharedArray};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of hugearray
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
