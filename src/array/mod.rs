//! Array Module
//!
//! The huge-array contract and its backends.
//!
//! ## Backends
//! - `MappedHugeArray`: segmented, memory-mapped, one cached buffer window
//! - `MemoryArray`: plain `Vec` on the heap
//! - `SharedArray`: mutex wrapper for use from several threads
//!
//! All backends expose the same `HugeArray` surface, so data can be moved
//! between them with `copy_from`.

mod mapped;
mod memory;
mod shared;
mod window;

pub use mapped::MappedHugeArray;
pub use memory::MemoryArray;
pub use shared::SharedArray;
pub use window::{WindowState, WindowStats};

use crate::element::Element;
use crate::error::Result;

/// A randomly indexable array of fixed-size elements
///
/// Indices are `u64` so arrays may exceed the address space of one mapping.
/// Accessing an index `>= len()` returns `IndexOutOfRange`.
pub trait HugeArray<T: Element> {
    /// Current number of elements
    fn len(&self) -> u64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Change the length
    ///
    /// Values below `min(old_len, new_len)` are kept. Growing fills new
    /// indices with `T::default()`. Shrinking releases the storage behind
    /// removed indices.
    fn resize(&mut self, new_len: u64) -> Result<()>;

    /// Read the element at `index`
    ///
    /// Takes `&mut self` because a read may move the mapped backend's
    /// buffer window.
    fn get(&mut self, index: u64) -> Result<T>;

    /// Write the element at `index`
    fn set(&mut self, index: u64, value: T) -> Result<()>;

    /// Release every resource held by the array
    fn release(self) -> Result<()>
    where
        Self: Sized;

    /// Copy `other[i]` into `self[i]` for every `i < other.len()`
    ///
    /// Element-by-element fallback that works across any two backends.
    /// `self` must already be at least `other.len()` long.
    fn copy_from<A>(&mut self, other: &mut A) -> Result<()>
    where
        Self: Sized,
        A: HugeArray<T> + ?Sized,
    {
        for index in 0..other.len() {
            let value = other.get(index)?;
            self.set(index, value)?;
        }
        Ok(())
    }
}
