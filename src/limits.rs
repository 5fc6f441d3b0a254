//! Resource limits for buffer allocation.
//!
//! [`ResourceLimits`] caps what a single buffer may allocate. [`LimitExceeded`]
//! is returned when a check fails. Checks run before any storage is
//! allocated, so a hostile header cannot force a huge allocation.

use crate::dimension::Shape;
use crate::pixel::PixelType;

/// Resource limits for pixel buffer allocation.
///
/// All fields are optional; `None` means no limit for that resource.
///
/// # Example
///
/// ```
/// use zenraster::ResourceLimits;
///
/// let limits = ResourceLimits::none()
///     .with_max_elements(100_000_000)
///     .with_max_memory(512 * 1024 * 1024);
/// assert!(limits.has_any());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct ResourceLimits {
    /// Maximum number of samples (product of all extents).
    pub max_elements: Option<u64>,
    /// Maximum storage in bytes (elements × sample width).
    pub max_memory_bytes: Option<u64>,
    /// Maximum size of any single dimension.
    pub max_extent: Option<u64>,
}

impl ResourceLimits {
    /// No limits (all fields `None`).
    pub fn none() -> Self {
        Self::default()
    }

    /// Set maximum sample count.
    pub fn with_max_elements(mut self, max: u64) -> Self {
        self.max_elements = Some(max);
        self
    }

    /// Set maximum storage in bytes.
    pub fn with_max_memory(mut self, bytes: u64) -> Self {
        self.max_memory_bytes = Some(bytes);
        self
    }

    /// Set maximum size of any single dimension.
    pub fn with_max_extent(mut self, max: u64) -> Self {
        self.max_extent = Some(max);
        self
    }

    /// Whether any limits are set.
    pub fn has_any(&self) -> bool {
        self.max_elements.is_some() || self.max_memory_bytes.is_some() || self.max_extent.is_some()
    }

    /// Check a shape and sample type against every configured limit.
    ///
    /// Checks: `max_extent` per dimension, then `max_elements`, then
    /// `max_memory_bytes`.
    pub fn check_shape(&self, shape: &Shape, pixel_type: PixelType) -> Result<(), LimitExceeded> {
        if let Some(max) = self.max_extent {
            for (dimension, &extent) in shape.extents().iter().enumerate() {
                if extent as u64 > max {
                    return Err(LimitExceeded::Extent {
                        dimension,
                        actual: extent as u64,
                        max,
                    });
                }
            }
        }
        let elements = shape.num_elements() as u64;
        if let Some(max) = self.max_elements
            && elements > max
        {
            return Err(LimitExceeded::Elements {
                actual: elements,
                max,
            });
        }
        if let Some(max) = self.max_memory_bytes {
            let bytes = elements.saturating_mul(pixel_type.byte_size() as u64);
            if bytes > max {
                return Err(LimitExceeded::Memory { actual: bytes, max });
            }
        }
        Ok(())
    }
}

/// A resource limit was exceeded.
///
/// Each variant carries the actual value and the limit that was exceeded.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LimitExceeded {
    /// One dimension exceeded `max_extent`.
    #[error("extent {actual} of dimension {dimension} exceeds limit {max}")]
    Extent {
        /// Dimension index (0-8).
        dimension: usize,
        /// Actual extent.
        actual: u64,
        /// Maximum allowed.
        max: u64,
    },
    /// Sample count exceeded `max_elements`.
    #[error("element count {actual} exceeds limit {max}")]
    Elements {
        /// Actual sample count.
        actual: u64,
        /// Maximum allowed.
        max: u64,
    },
    /// Storage exceeded `max_memory_bytes`.
    #[error("memory {actual} bytes exceeds limit {max}")]
    Memory {
        /// Required storage in bytes.
        actual: u64,
        /// Maximum allowed.
        max: u64,
    },
}
