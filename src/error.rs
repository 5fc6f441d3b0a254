//! Recoverable errors from buffer construction and decoding.
//!
//! Stream I/O reports through [`std::io::Result`] instead, and precondition
//! failures on element access panic (see the crate docs).

use crate::limits::LimitExceeded;

/// Errors from pixel buffer operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BufferError {
    /// An extent is zero, or the element count overflows `usize`.
    #[error("extents {extents:?} are zero or overflow the address space")]
    InvalidDimensions {
        /// The rejected extents.
        extents: [usize; 9],
    },
    /// Fewer elements or bytes were supplied than the buffer holds.
    #[error("expected {expected} {unit}, got {actual}")]
    InsufficientData {
        /// Required count.
        expected: usize,
        /// Supplied count.
        actual: usize,
        /// What was counted (`"elements"` or `"bytes"`).
        unit: &'static str,
    },
    /// More elements or bytes were supplied than the buffer holds.
    #[error("expected {expected} {unit}, got {actual}")]
    ExcessData {
        /// Required count.
        expected: usize,
        /// Supplied count.
        actual: usize,
        /// What was counted (`"elements"` or `"bytes"`).
        unit: &'static str,
    },
    /// A pixel type name did not match any known sample type.
    #[error("unknown pixel type {0:?}")]
    UnknownPixelType(String),
    /// Allocation would exceed a configured resource limit.
    #[error(transparent)]
    Limit(#[from] LimitExceeded),
}

impl BufferError {
    /// Classify a length mismatch as too little or too much data.
    pub(crate) fn length_mismatch(expected: usize, actual: usize, unit: &'static str) -> Self {
        if actual < expected {
            Self::InsufficientData {
                expected,
                actual,
                unit,
            }
        } else {
            Self::ExcessData {
                expected,
                actual,
                unit,
            }
        }
    }
}
