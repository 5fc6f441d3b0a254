//! Variant multidimensional pixel buffers for zen* bioimage codecs.
//!
//! This crate holds the raster data of a bioimage: a rank-9 array of
//! samples (X, Y, Z, T, channel, three modulo sub-dimensions and
//! sub-channel) in any of the eleven OME pixel types.
//!
//! - [`PixelBuffer<T>`]: dense typed storage with bounds-checked indexing,
//!   bulk assignment and an endian-aware byte codec
//! - [`VariantPixelBuffer`]: one [`PixelBuffer`] chosen at runtime by a
//!   [`PixelType`], with a uniform call surface for all of them
//! - [`PixelVisitor`] / [`PixelVisitorMut`]: type-generic operations
//!   dispatched to whichever buffer is live
//! - [`Shape`] / [`Dimension`]: fixed-rank extents and stride arithmetic
//! - [`ResourceLimits`]: allocation caps checked before any storage exists
//!
//! # Errors and contract violations
//!
//! Construction problems are [`BufferError`]s and stream failures are
//! [`std::io::Error`]s. Out-of-range indices and wrong-length assignment are
//! caller bugs: they panic when contract checks are on (debug builds, or the
//! `contract-checks` feature) and are not checked otherwise. Typed access
//! with the wrong sample type always panics.
//!
//! File-format readers and writers live in the individual codecs, not here.

#![forbid(unsafe_code)]

extern crate alloc;

mod buffer;
mod contract;
mod dimension;
mod error;
mod limits;
mod pixel;
mod sample;
mod variant;
mod visit;

pub use buffer::PixelBuffer;
pub use contract::CONTRACT_CHECKS;
pub use dimension::{DIMENSIONS, Dimension, Extents, Indices, Shape};
pub use error::BufferError;
pub use limits::{LimitExceeded, ResourceLimits};
pub use pixel::{EndianType, PixelType};
pub use sample::Sample;
pub use variant::{PixelData, VariantPixelBuffer};
pub use visit::{PixelVisitor, PixelVisitorMut};

// Re-export for users of the complex pixel types.
pub use num_complex::Complex;
