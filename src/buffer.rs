//! Dense typed sample storage.
//!
//! [`PixelBuffer<T>`] owns `shape.num_elements()` samples of one concrete
//! [`Sample`] type in a flat `Vec`, dimension 0 varying fastest.

use alloc::vec::Vec;
use core::fmt;
use core::ops::{Index, IndexMut};
use std::io::{Read, Write};

use crate::contract::contract_assert;
use crate::dimension::{Extents, Indices, Shape};
use crate::error::BufferError;
use crate::pixel::{EndianType, PixelType};
use crate::sample::Sample;

/// Samples converted per stream read or write call.
const STREAM_CHUNK_ELEMENTS: usize = 8192;

/// Owned multidimensional buffer of one sample type.
///
/// Two buffers are equal when their shapes and every sample are equal.
/// Floating-point samples compare with IEEE semantics, so a buffer holding
/// a NaN is unequal to itself.
#[derive(Clone, PartialEq)]
pub struct PixelBuffer<T: Sample> {
    data: Vec<T>,
    shape: Shape,
}

impl<T: Sample> PixelBuffer<T> {
    /// Allocate a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidDimensions`] if an extent is zero or
    /// the element count overflows.
    pub fn new(extents: Extents) -> Result<Self, BufferError> {
        Ok(Self::from_shape(Shape::new(extents)?))
    }

    /// Allocate a zero-filled buffer for an already validated shape.
    pub fn from_shape(shape: Shape) -> Self {
        tracing::debug!(
            pixel_type = %T::PIXEL_TYPE,
            extents = ?shape.extents(),
            elements = shape.num_elements(),
            "allocating pixel buffer"
        );
        Self {
            data: alloc::vec![T::default(); shape.num_elements()],
            shape,
        }
    }

    /// Wrap existing samples, in linear storage order.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidDimensions`] for bad extents, or
    /// [`BufferError::InsufficientData`] / [`BufferError::ExcessData`] if
    /// `data.len()` differs from the element count.
    pub fn from_vec(extents: Extents, data: Vec<T>) -> Result<Self, BufferError> {
        let shape = Shape::new(extents)?;
        if data.len() != shape.num_elements() {
            return Err(BufferError::length_mismatch(
                shape.num_elements(),
                data.len(),
                "elements",
            ));
        }
        Ok(Self { data, shape })
    }

    /// Consume the buffer and return its samples.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Sample type tag of `T`.
    #[inline]
    pub fn pixel_type(&self) -> PixelType {
        T::PIXEL_TYPE
    }

    /// Shape of the buffer.
    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Size of every dimension.
    #[inline]
    pub fn extents(&self) -> &Extents {
        self.shape.extents()
    }

    /// Product of the extents.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.data.len()
    }

    /// All samples in linear storage order.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// All samples in linear storage order, mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Pointer to the first sample. Never null.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.data.as_ptr()
    }

    /// Iterate samples in linear storage order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Sample at `indices`.
    ///
    /// # Panics
    ///
    /// With contract checks enabled, panics naming the first index
    /// component that is out of range. Use [`get`](Self::get) for a
    /// non-panicking lookup.
    #[inline]
    pub fn at(&self, indices: &Indices) -> &T {
        &self.data[self.shape.offset(indices)]
    }

    /// Mutable sample at `indices`.
    ///
    /// # Panics
    ///
    /// Same as [`at`](Self::at).
    #[inline]
    pub fn at_mut(&mut self, indices: &Indices) -> &mut T {
        let offset = self.shape.offset(indices);
        &mut self.data[offset]
    }

    /// Sample at `indices`, or `None` if any component is out of range.
    #[inline]
    pub fn get(&self, indices: &Indices) -> Option<&T> {
        self.shape.checked_offset(indices).map(|o| &self.data[o])
    }

    /// Mutable sample at `indices`, or `None` if any component is out of range.
    #[inline]
    pub fn get_mut(&mut self, indices: &Indices) -> Option<&mut T> {
        let offset = self.shape.checked_offset(indices)?;
        Some(&mut self.data[offset])
    }

    /// Overwrite every sample from `values`, taken in linear storage order.
    ///
    /// # Panics
    ///
    /// With contract checks enabled, panics unless `values` yields exactly
    /// [`num_elements()`](Self::num_elements) samples. Without them, extra
    /// values are ignored and missing ones leave the tail untouched.
    ///
    /// When the iterator's size hint already rules out an exact fit, the
    /// check fires before any sample is written.
    pub fn assign<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let expected = self.data.len();
        let mut values = values.into_iter();
        let (lower, upper) = values.size_hint();
        contract_assert!(
            upper.is_none_or(|upper| upper >= expected),
            "assign supplied {} elements, buffer holds {expected}",
            upper.unwrap_or(lower)
        );
        contract_assert!(
            lower <= expected,
            "assign supplied more than {expected} elements"
        );
        let mut written = 0usize;
        for (slot, value) in self.data.iter_mut().zip(values.by_ref()) {
            *slot = value;
            written += 1;
        }
        contract_assert!(
            written == expected,
            "assign supplied {written} elements, buffer holds {expected}"
        );
        contract_assert!(
            values.next().is_none(),
            "assign supplied more than {expected} elements"
        );
    }

    /// Set every sample to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Serialized size in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.data.len() * T::BYTE_SIZE
    }

    /// Serialize every sample in linear storage order.
    pub fn to_bytes(&self, order: EndianType) -> Vec<u8> {
        let order = order.resolve();
        let mut out = alloc::vec![0u8; self.byte_len()];
        for (value, raw) in self.data.iter().zip(out.chunks_exact_mut(T::BYTE_SIZE)) {
            value.encode(raw, order);
        }
        out
    }

    /// Replace every sample by decoding `bytes` in `order`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InsufficientData`] or [`BufferError::ExcessData`]
    /// if `bytes.len()` is not exactly [`byte_len()`](Self::byte_len). The
    /// buffer is untouched on error.
    pub fn decode_bytes(&mut self, bytes: &[u8], order: EndianType) -> Result<(), BufferError> {
        if bytes.len() != self.byte_len() {
            return Err(BufferError::length_mismatch(
                self.byte_len(),
                bytes.len(),
                "bytes",
            ));
        }
        let order = order.resolve();
        for (slot, raw) in self.data.iter_mut().zip(bytes.chunks_exact(T::BYTE_SIZE)) {
            *slot = T::decode(raw, order);
        }
        Ok(())
    }

    /// Fill the buffer from `reader`, `byte_len()` bytes in `order`.
    ///
    /// # Errors
    ///
    /// Propagates reader errors; a short stream is
    /// [`UnexpectedEof`](std::io::ErrorKind::UnexpectedEof). Samples already
    /// decoded before the failure stay overwritten.
    pub fn read_from<R: Read + ?Sized>(
        &mut self,
        reader: &mut R,
        order: EndianType,
    ) -> std::io::Result<()> {
        let order = order.resolve();
        let total = self.byte_len();
        let chunk_bytes = STREAM_CHUNK_ELEMENTS.min(self.data.len()) * T::BYTE_SIZE;
        let mut scratch = alloc::vec![0u8; chunk_bytes];
        let mut consumed = 0usize;
        for block in self.data.chunks_mut(STREAM_CHUNK_ELEMENTS) {
            let bytes = &mut scratch[..block.len() * T::BYTE_SIZE];
            if let Err(err) = reader.read_exact(bytes) {
                tracing::warn!(
                    pixel_type = %T::PIXEL_TYPE,
                    consumed,
                    expected = total,
                    error = %err,
                    "pixel stream read failed"
                );
                return Err(err);
            }
            for (slot, raw) in block.iter_mut().zip(bytes.chunks_exact(T::BYTE_SIZE)) {
                *slot = T::decode(raw, order);
            }
            consumed += bytes.len();
        }
        tracing::debug!(pixel_type = %T::PIXEL_TYPE, bytes = total, %order, "read pixel stream");
        Ok(())
    }

    /// Write every sample to `writer`, `byte_len()` bytes in `order`.
    ///
    /// # Errors
    ///
    /// Propagates writer errors.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        writer: &mut W,
        order: EndianType,
    ) -> std::io::Result<()> {
        let order = order.resolve();
        let chunk_bytes = STREAM_CHUNK_ELEMENTS.min(self.data.len()) * T::BYTE_SIZE;
        let mut scratch = alloc::vec![0u8; chunk_bytes];
        for block in self.data.chunks(STREAM_CHUNK_ELEMENTS) {
            let bytes = &mut scratch[..block.len() * T::BYTE_SIZE];
            for (value, raw) in block.iter().zip(bytes.chunks_exact_mut(T::BYTE_SIZE)) {
                value.encode(raw, order);
            }
            writer.write_all(bytes)?;
        }
        tracing::debug!(
            pixel_type = %T::PIXEL_TYPE,
            bytes = self.byte_len(),
            %order,
            "wrote pixel stream"
        );
        Ok(())
    }
}

impl<T: Sample> Default for PixelBuffer<T> {
    /// One zero sample.
    fn default() -> Self {
        Self::from_shape(Shape::default())
    }
}

impl<T: Sample> Index<Indices> for PixelBuffer<T> {
    type Output = T;

    #[inline]
    fn index(&self, indices: Indices) -> &T {
        self.at(&indices)
    }
}

impl<T: Sample> IndexMut<Indices> for PixelBuffer<T> {
    #[inline]
    fn index_mut(&mut self, indices: Indices) -> &mut T {
        self.at_mut(&indices)
    }
}

impl<'a, T: Sample> IntoIterator for &'a PixelBuffer<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: Sample> fmt::Debug for PixelBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PixelBuffer<{}>({:?})",
            T::PIXEL_TYPE,
            self.shape.extents()
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
