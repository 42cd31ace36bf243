//! Segment Layout
//!
//! Pure offset arithmetic for the segmented address space.
//!
//! ```text
//!  logical index i
//!        │
//!        ▼
//!  window_start = i - (i mod buffer_size)
//!        │
//!        ├── segment     = window_start / segment_capacity
//!        └── byte_offset = (window_start mod segment_capacity) * element_size
//! ```
//!
//! `segment_capacity` is a power of two and `buffer_size` divides it, so a
//! window never crosses a segment boundary.

use crate::config::ArrayConfig;
use crate::error::{HugeArrayError, Result};

/// Buffer window size is `segment_capacity / BUFFER_DIVISOR` elements
pub const BUFFER_DIVISOR: u64 = 64;

/// Immutable geometry of a segmented array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentLayout {
    element_size: u64,
    segment_capacity: u64,
    buffer_size: u64,
}

impl SegmentLayout {
    /// Validate and derive the layout for `element_size`-byte elements
    pub fn new(element_size: usize, segment_capacity: u64) -> Result<Self> {
        if element_size == 0 {
            return Err(HugeArrayError::Config(
                "element size must be greater than zero".to_string(),
            ));
        }
        if !segment_capacity.is_power_of_two() {
            return Err(HugeArrayError::Config(format!(
                "segment capacity must be a power of two, got {}",
                segment_capacity
            )));
        }
        let element_size = element_size as u64;
        if segment_capacity.checked_mul(element_size).is_none() {
            return Err(HugeArrayError::Config(format!(
                "segment of {} elements x {} bytes overflows",
                segment_capacity, element_size
            )));
        }

        Ok(Self {
            element_size,
            segment_capacity,
            buffer_size: (segment_capacity / BUFFER_DIVISOR).max(1),
        })
    }

    /// Derive the layout from a validated config
    pub fn from_config(element_size: usize, config: &ArrayConfig) -> Result<Self> {
        config.validate()?;
        Self::new(element_size, config.segment_capacity)
    }

    pub fn element_size(&self) -> u64 {
        self.element_size
    }

    pub fn segment_capacity(&self) -> u64 {
        self.segment_capacity
    }

    /// Elements per buffer window
    pub fn buffer_size(&self) -> u64 {
        self.buffer_size
    }

    /// Bytes backing one segment
    pub fn bytes_per_segment(&self) -> u64 {
        self.segment_capacity * self.element_size
    }

    /// Bytes backing one buffer window
    pub fn window_bytes(&self) -> usize {
        (self.buffer_size * self.element_size) as usize
    }

    /// Segments needed to hold `len` elements: `ceil(len / segment_capacity)`
    pub fn segment_count(&self, len: u64) -> usize {
        len.div_ceil(self.segment_capacity) as usize
    }

    /// First index of the window containing `index`
    #[inline]
    pub fn window_start(&self, index: u64) -> u64 {
        index - (index % self.buffer_size)
    }

    /// Owning segment and byte offset inside it for a window start
    #[inline]
    pub fn locate(&self, window_start: u64) -> (usize, u64) {
        let segment = (window_start / self.segment_capacity) as usize;
        let offset = (window_start % self.segment_capacity) * self.element_size;
        (segment, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scenario_geometry() {
        let layout = SegmentLayout::new(4, 1024).unwrap();
        assert_eq!(layout.buffer_size(), 16);
        assert_eq!(layout.bytes_per_segment(), 4096);
        assert_eq!(layout.window_bytes(), 64);
        assert_eq!(layout.segment_count(2000), 2);
    }

    #[test]
    fn test_segment_count_edges() {
        let layout = SegmentLayout::new(8, 64).unwrap();
        assert_eq!(layout.segment_count(0), 0);
        assert_eq!(layout.segment_count(1), 1);
        assert_eq!(layout.segment_count(64), 1);
        assert_eq!(layout.segment_count(65), 2);
    }

    #[test]
    fn test_small_capacity_keeps_one_element_window() {
        let layout = SegmentLayout::new(2, 8).unwrap();
        assert_eq!(layout.buffer_size(), 1);
        assert_eq!(layout.window_start(5), 5);
        assert_eq!(layout.locate(9), (1, 2));
    }

    #[test]
    fn test_boundary_windows() {
        let layout = SegmentLayout::new(4, 1024).unwrap();
        assert_eq!(layout.window_start(1023), 1008);
        assert_eq!(layout.locate(1008), (0, 1008 * 4));
        assert_eq!(layout.window_start(1024), 1024);
        assert_eq!(layout.locate(1024), (1, 0));
    }

    #[test]
    fn test_rejects_invalid_geometry() {
        assert!(matches!(
            SegmentLayout::new(4, 100),
            Err(HugeArrayError::Config(_))
        ));
        assert!(matches!(
            SegmentLayout::new(4, 0),
            Err(HugeArrayError::Config(_))
        ));
        assert!(matches!(
            SegmentLayout::new(0, 1024),
            Err(HugeArrayError::Config(_))
        ));
        assert!(matches!(
            SegmentLayout::new(16, 1 << 63),
            Err(HugeArrayError::Config(_))
        ));
    }

    proptest! {
        /// A window contains its index and never straddles two segments
        #[test]
        fn window_stays_inside_one_segment(
            shift in 0u32..24,
            element_size in 1usize..64,
            index in 0u64..(1u64 << 40),
        ) {
            let layout = SegmentLayout::new(element_size, 1u64 << shift).unwrap();
            let start = layout.window_start(index);

            prop_assert!(start <= index);
            prop_assert!(index < start + layout.buffer_size());
            prop_assert_eq!(start % layout.buffer_size(), 0);

            let last = start + layout.buffer_size() - 1;
            prop_assert_eq!(
                start / layout.segment_capacity(),
                last / layout.segment_capacity()
            );

            let (segment, offset) = layout.locate(start);
            prop_assert_eq!(segment as u64, index / layout.segment_capacity());
            prop_assert!(offset + layout.window_bytes() as u64 <= layout.bytes_per_segment());
        }
    }

    proptest! {
        /// Segment count is the smallest count covering every index
        #[test]
        fn segment_count_is_ceiling(shift in 0u32..20, len in 0u64..(1u64 << 32)) {
            let layout = SegmentLayout::new(4, 1u64 << shift).unwrap();
            let count = layout.segment_count(len) as u64;

            prop_assert!(count * layout.segment_capacity() >= len);
            if count > 0 {
                prop_assert!((count - 1) * layout.segment_capacity() < len);
            }
        }
    }
}
