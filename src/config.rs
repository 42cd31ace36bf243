//! Configuration for hugearray
//!
//! Centralized configuration with sensible defaults.

use crate::error::{HugeArrayError, Result};

/// Default number of elements per segment (1M elements)
pub const DEFAULT_SEGMENT_CAPACITY: u64 = 1 << 20;

/// Configuration for a segmented mapped array
#[derive(Debug, Clone)]
pub struct ArrayConfig {
    // -------------------------------------------------------------------------
    // Segment Configuration
    // -------------------------------------------------------------------------
    /// Elements per segment. Must be a power of two.
    ///
    /// The buffer window holds `segment_capacity / 64` elements (at least one).
    pub segment_capacity: u64,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// Msync every segment and sync the backing store on release
    ///
    /// When disabled, release still writes the buffer window back into the
    /// mapping; the OS persists it on its own schedule.
    pub flush_on_release: bool,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        Self {
            segment_capacity: DEFAULT_SEGMENT_CAPACITY,
            flush_on_release: true,
        }
    }
}

impl ArrayConfig {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check the segment capacity constraint
    pub fn validate(&self) -> Result<()> {
        if !self.segment_capacity.is_power_of_two() {
            return Err(HugeArrayError::Config(format!(
                "segment capacity must be a power of two, got {}",
                self.segment_capacity
            )));
        }
        Ok(())
    }
}

/// Builder for ArrayConfig
#[derive(Default)]
pub struct ConfigBuilder {
    config: ArrayConfig,
}

impl ConfigBuilder {
    /// Set the number of elements per segment
    pub fn segment_capacity(mut self, capacity: u64) -> Self {
        self.config.segment_capacity = capacity;
        self
    }

    /// Enable or disable syncing to the backing store on release
    pub fn flush_on_release(mut self, enabled: bool) -> Self {
        self.config.flush_on_release = enabled;
        self
    }

    pub fn build(self) -> ArrayConfig {
        self.config
    }
}
