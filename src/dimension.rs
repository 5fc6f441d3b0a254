//! Fixed-rank shape and index model.
//!
//! Every buffer has exactly [`DIMENSIONS`] axes. Dimension 0 varies fastest
//! in linear storage, dimension 8 slowest.

use core::fmt;

use crate::contract::contract_assert;
use crate::error::BufferError;

/// Number of dimensions of every pixel buffer.
pub const DIMENSIONS: usize = 9;

/// Size of each dimension.
pub type Extents = [usize; DIMENSIONS];

/// Coordinate of one element.
pub type Indices = [usize; DIMENSIONS];

/// Named axes, in storage order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Dimension {
    /// Image width.
    SpatialX = 0,
    /// Image height.
    SpatialY = 1,
    /// Focal plane.
    SpatialZ = 2,
    /// Timepoint.
    TemporalT = 3,
    /// Logical channel.
    Channel = 4,
    /// Sub-division of Z (e.g. angles of a light-sheet acquisition).
    ModuloZ = 5,
    /// Sub-division of T (e.g. lifetime bins).
    ModuloT = 6,
    /// Sub-division of C (e.g. spectral bins).
    ModuloC = 7,
    /// Samples within one channel (e.g. the R, G, B of an interleaved plane).
    Subchannel = 8,
}

impl Dimension {
    /// All dimensions, in storage order.
    pub const ALL: [Dimension; DIMENSIONS] = [
        Self::SpatialX,
        Self::SpatialY,
        Self::SpatialZ,
        Self::TemporalT,
        Self::Channel,
        Self::ModuloZ,
        Self::ModuloT,
        Self::ModuloC,
        Self::Subchannel,
    ];

    /// Position of this dimension in an [`Extents`] or [`Indices`] array.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Extents plus precomputed strides.
///
/// Invariant: every extent is at least 1 and the element count fits in
/// `usize`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    extents: Extents,
    strides: [usize; DIMENSIONS],
    len: usize,
}

impl Shape {
    /// Validate extents and compute strides.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidDimensions`] if any extent is zero or
    /// the element count overflows.
    pub fn new(extents: Extents) -> Result<Self, BufferError> {
        let mut strides = [0usize; DIMENSIONS];
        let mut len = 1usize;
        for (stride, &extent) in strides.iter_mut().zip(extents.iter()) {
            if extent == 0 {
                return Err(BufferError::InvalidDimensions { extents });
            }
            *stride = len;
            len = len
                .checked_mul(extent)
                .ok_or(BufferError::InvalidDimensions { extents })?;
        }
        Ok(Self {
            extents,
            strides,
            len,
        })
    }

    /// Product of all extents.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.len
    }

    /// Size of every dimension.
    #[inline]
    pub fn extents(&self) -> &Extents {
        &self.extents
    }

    /// Size of one named dimension.
    #[inline]
    pub fn extent(&self, dimension: Dimension) -> usize {
        self.extents[dimension.index()]
    }

    /// Linear distance between neighbours along each dimension.
    #[inline]
    pub fn strides(&self) -> &[usize; DIMENSIONS] {
        &self.strides
    }

    /// Whether every index component is within its extent.
    #[inline]
    pub fn contains(&self, indices: &Indices) -> bool {
        indices.iter().zip(self.extents.iter()).all(|(i, e)| i < e)
    }

    /// Linear storage offset of `indices`.
    ///
    /// # Panics
    ///
    /// With contract checks enabled, panics if any component is out of
    /// range. Without them the result is unspecified.
    #[inline]
    pub fn offset(&self, indices: &Indices) -> usize {
        let mut offset = 0;
        for d in 0..DIMENSIONS {
            contract_assert!(
                indices[d] < self.extents[d],
                "index {} out of bounds for dimension {d} (extent {}) at {indices:?}",
                indices[d],
                self.extents[d]
            );
            offset += indices[d] * self.strides[d];
        }
        offset
    }

    /// Linear storage offset of `indices`, or `None` if out of range.
    #[inline]
    pub fn checked_offset(&self, indices: &Indices) -> Option<usize> {
        self.contains(indices).then(|| {
            indices
                .iter()
                .zip(self.strides.iter())
                .map(|(i, s)| i * s)
                .sum()
        })
    }

    /// Inverse of [`offset`](Self::offset).
    ///
    /// # Panics
    ///
    /// With contract checks enabled, panics if `offset >= num_elements()`.
    pub fn indices_of(&self, offset: usize) -> Indices {
        contract_assert!(
            offset < self.len,
            "offset {offset} out of bounds (elements: {})",
            self.len
        );
        let mut indices = [0usize; DIMENSIONS];
        let mut rest = offset;
        for (index, &extent) in indices.iter_mut().zip(self.extents.iter()) {
            *index = rest % extent;
            rest /= extent;
        }
        indices
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            extents: [1; DIMENSIONS],
            strides: [1; DIMENSIONS],
            len: 1,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Shape({:?})", self.extents)
    }
}
