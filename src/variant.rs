//! Runtime-typed pixel buffers.
//!
//! [`PixelData`] is the closed sum over the eleven [`PixelBuffer`]
//! instantiations. [`VariantPixelBuffer`] pairs one with the byte order
//! used for serialization and exposes a single call surface for all of
//! them.

use core::fmt;
use std::io::{Read, Write};

use num_complex::Complex;

use crate::buffer::PixelBuffer;
use crate::dimension::{Extents, Indices, Shape};
use crate::error::BufferError;
use crate::limits::ResourceLimits;
use crate::pixel::{EndianType, PixelType};
use crate::sample::Sample;
use crate::visit::{PixelVisitor, PixelVisitorMut, dispatch};

/// A typed buffer of whichever sample type was chosen at runtime.
///
/// The variant is the sample type tag; the two can never disagree.
/// Buffers of different variants compare unequal.
#[derive(Clone, PartialEq)]
pub enum PixelData {
    Int8(PixelBuffer<i8>),
    Int16(PixelBuffer<i16>),
    Int32(PixelBuffer<i32>),
    Uint8(PixelBuffer<u8>),
    Uint16(PixelBuffer<u16>),
    Uint32(PixelBuffer<u32>),
    Float(PixelBuffer<f32>),
    Double(PixelBuffer<f64>),
    Bit(PixelBuffer<bool>),
    Complex(PixelBuffer<Complex<f32>>),
    DoubleComplex(PixelBuffer<Complex<f64>>),
}

impl PixelData {
    /// Allocate a zero-filled buffer of `pixel_type`.
    pub fn new(shape: Shape, pixel_type: PixelType) -> Self {
        match pixel_type {
            PixelType::Int8 => Self::Int8(PixelBuffer::from_shape(shape)),
            PixelType::Int16 => Self::Int16(PixelBuffer::from_shape(shape)),
            PixelType::Int32 => Self::Int32(PixelBuffer::from_shape(shape)),
            PixelType::Uint8 => Self::Uint8(PixelBuffer::from_shape(shape)),
            PixelType::Uint16 => Self::Uint16(PixelBuffer::from_shape(shape)),
            PixelType::Uint32 => Self::Uint32(PixelBuffer::from_shape(shape)),
            PixelType::Float => Self::Float(PixelBuffer::from_shape(shape)),
            PixelType::Double => Self::Double(PixelBuffer::from_shape(shape)),
            PixelType::Bit => Self::Bit(PixelBuffer::from_shape(shape)),
            PixelType::Complex => Self::Complex(PixelBuffer::from_shape(shape)),
            PixelType::DoubleComplex => Self::DoubleComplex(PixelBuffer::from_shape(shape)),
        }
    }

    /// Sample type tag of the active buffer.
    pub fn pixel_type(&self) -> PixelType {
        dispatch!(self, buffer => buffer.pixel_type())
    }

    /// Shape of the active buffer.
    pub fn shape(&self) -> &Shape {
        dispatch!(self, buffer => buffer.shape())
    }

    /// Product of the extents.
    pub fn num_elements(&self) -> usize {
        dispatch!(self, buffer => buffer.num_elements())
    }

    /// Serialized size in bytes.
    pub fn byte_len(&self) -> usize {
        dispatch!(self, buffer => buffer.byte_len())
    }

    /// Untyped pointer to the first sample. Never null.
    pub fn as_ptr(&self) -> *const u8 {
        dispatch!(self, buffer => buffer.as_ptr().cast::<u8>())
    }

    /// Run `visitor` on the active buffer.
    pub fn apply<V: PixelVisitor>(&self, visitor: V) -> V::Output {
        dispatch!(self, buffer => visitor.visit(buffer))
    }

    /// Run `visitor` on the active buffer, mutably.
    pub fn apply_mut<V: PixelVisitorMut>(&mut self, visitor: V) -> V::Output {
        dispatch!(self, buffer => visitor.visit(buffer))
    }
}

impl<T: Sample> From<PixelBuffer<T>> for PixelData {
    fn from(buffer: PixelBuffer<T>) -> Self {
        T::into_data(buffer)
    }
}

impl fmt::Debug for PixelData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, buffer => fmt::Debug::fmt(buffer, f))
    }
}

/// Multidimensional pixel buffer whose sample type is chosen at runtime.
///
/// Holds exactly one [`PixelBuffer`] matching its [`PixelType`], plus the
/// byte order used by [`read_from`](Self::read_from) and
/// [`write_to`](Self::write_to). The byte order never affects in-memory
/// samples.
///
/// Two buffers are equal when the pixel type, extents, byte order and every
/// sample match. `Native` is resolved at construction, so a `Native` buffer
/// equals one built with the host's explicit order.
///
/// Float and complex samples compare with IEEE semantics: a buffer that
/// holds a NaN is unequal to itself and to its clone. Compare
/// [`to_bytes`](Self::to_bytes) output when bitwise identity is wanted.
///
/// # Typed access
///
/// Typed methods take the element type as a parameter. The `Option`
/// returning ones ([`buffer`](Self::buffer), [`data`](Self::data),
/// [`get`](Self::get)) yield `None` on a type mismatch. [`at`](Self::at),
/// [`at_mut`](Self::at_mut) and [`assign`](Self::assign) treat a mismatch
/// as a contract violation and always panic; their bounds and length
/// checks follow the crate's contract-check setting.
///
/// ```
/// use zenraster::{EndianType, PixelType, VariantPixelBuffer};
///
/// let mut buf = VariantPixelBuffer::new(
///     [10, 10, 1, 1, 1, 1, 1, 1, 1],
///     PixelType::Uint16,
///     EndianType::Big,
/// )
/// .unwrap();
/// *buf.at_mut::<u16>(&[3, 2, 0, 0, 0, 0, 0, 0, 0]) = 513;
/// assert_eq!(buf.data::<u16>().unwrap()[23], 513);
/// assert!(buf.data::<f32>().is_none());
///
/// let bytes = buf.to_bytes();
/// assert_eq!(&bytes[46..48], &[0x02, 0x01]);
/// ```
#[derive(Clone, PartialEq)]
pub struct VariantPixelBuffer {
    data: PixelData,
    endian: EndianType,
}

impl VariantPixelBuffer {
    /// Allocate a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidDimensions`] if an extent is zero or
    /// the element count overflows.
    pub fn new(
        extents: Extents,
        pixel_type: PixelType,
        endian: EndianType,
    ) -> Result<Self, BufferError> {
        let shape = Shape::new(extents)?;
        Ok(Self::from_data(PixelData::new(shape, pixel_type), endian))
    }

    /// Allocate a zero-filled buffer after checking `limits`.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidDimensions`] for bad extents or
    /// [`BufferError::Limit`] if the buffer would exceed `limits`. Nothing is
    /// allocated on error.
    pub fn with_limits(
        extents: Extents,
        pixel_type: PixelType,
        endian: EndianType,
        limits: &ResourceLimits,
    ) -> Result<Self, BufferError> {
        let shape = Shape::new(extents)?;
        limits.check_shape(&shape, pixel_type)?;
        Ok(Self::from_data(PixelData::new(shape, pixel_type), endian))
    }

    /// Wrap existing pixel data.
    pub fn from_data(data: PixelData, endian: EndianType) -> Self {
        Self {
            data,
            endian: endian.resolve(),
        }
    }

    /// Consume the buffer and return its pixel data.
    pub fn into_data(self) -> PixelData {
        self.data
    }

    /// The active typed buffer, as the sum type.
    #[inline]
    pub fn pixel_data(&self) -> &PixelData {
        &self.data
    }

    /// Sample type tag, fixed at construction.
    #[inline]
    pub fn pixel_type(&self) -> PixelType {
        self.data.pixel_type()
    }

    /// Serialization byte order. Never `Native`.
    #[inline]
    pub fn endian(&self) -> EndianType {
        self.endian
    }

    /// Shape of the buffer.
    #[inline]
    pub fn shape(&self) -> &Shape {
        self.data.shape()
    }

    /// Size of every dimension.
    #[inline]
    pub fn extents(&self) -> &Extents {
        self.shape().extents()
    }

    /// Product of the extents.
    #[inline]
    pub fn num_elements(&self) -> usize {
        self.data.num_elements()
    }

    /// Serialized size in bytes.
    #[inline]
    pub fn byte_len(&self) -> usize {
        self.data.byte_len()
    }

    /// Untyped pointer to the first sample. Never null.
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    /// The typed buffer, if the sample type is `T`.
    #[inline]
    pub fn buffer<T: Sample>(&self) -> Option<&PixelBuffer<T>> {
        T::buffer(&self.data)
    }

    /// The typed buffer, mutably, if the sample type is `T`.
    #[inline]
    pub fn buffer_mut<T: Sample>(&mut self) -> Option<&mut PixelBuffer<T>> {
        T::buffer_mut(&mut self.data)
    }

    /// All samples in linear storage order, if the sample type is `T`.
    #[inline]
    pub fn data<T: Sample>(&self) -> Option<&[T]> {
        self.buffer::<T>().map(PixelBuffer::data)
    }

    /// All samples in linear storage order, mutably, if the sample type is `T`.
    #[inline]
    pub fn data_mut<T: Sample>(&mut self) -> Option<&mut [T]> {
        self.buffer_mut::<T>().map(PixelBuffer::data_mut)
    }

    /// Sample at `indices`.
    ///
    /// # Panics
    ///
    /// Always panics if `T` is not the active sample type. With contract
    /// checks enabled, also panics if `indices` is out of range.
    #[inline]
    #[track_caller]
    pub fn at<T: Sample>(&self, indices: &Indices) -> &T {
        match T::buffer(&self.data) {
            Some(buffer) => buffer.at(indices),
            None => type_mismatch::<T>(self.pixel_type()),
        }
    }

    /// Mutable sample at `indices`.
    ///
    /// # Panics
    ///
    /// Same as [`at`](Self::at).
    #[inline]
    #[track_caller]
    pub fn at_mut<T: Sample>(&mut self, indices: &Indices) -> &mut T {
        let actual = self.pixel_type();
        match T::buffer_mut(&mut self.data) {
            Some(buffer) => buffer.at_mut(indices),
            None => type_mismatch::<T>(actual),
        }
    }

    /// Sample at `indices`, or `None` on a type mismatch or out-of-range index.
    #[inline]
    pub fn get<T: Sample>(&self, indices: &Indices) -> Option<&T> {
        self.buffer::<T>()?.get(indices)
    }

    /// Mutable sample at `indices`, or `None` on a type mismatch or
    /// out-of-range index.
    #[inline]
    pub fn get_mut<T: Sample>(&mut self, indices: &Indices) -> Option<&mut T> {
        self.buffer_mut::<T>()?.get_mut(indices)
    }

    /// Overwrite every sample from `values`, taken in linear storage order.
    ///
    /// # Panics
    ///
    /// Always panics if `T` is not the active sample type. With contract
    /// checks enabled, also panics unless `values` yields exactly
    /// [`num_elements()`](Self::num_elements) samples.
    #[track_caller]
    pub fn assign<T, I>(&mut self, values: I)
    where
        T: Sample,
        I: IntoIterator<Item = T>,
    {
        let actual = self.pixel_type();
        match T::buffer_mut(&mut self.data) {
            Some(buffer) => buffer.assign(values),
            None => type_mismatch::<T>(actual),
        }
    }

    /// Run `visitor` on the active buffer.
    #[inline]
    pub fn apply<V: PixelVisitor>(&self, visitor: V) -> V::Output {
        self.data.apply(visitor)
    }

    /// Run `visitor` on the active buffer, mutably.
    #[inline]
    pub fn apply_mut<V: PixelVisitorMut>(&mut self, visitor: V) -> V::Output {
        self.data.apply_mut(visitor)
    }

    /// Serialize every sample in the buffer's byte order.
    pub fn to_bytes(&self) -> Vec<u8> {
        let endian = self.endian;
        dispatch!(&self.data, buffer => buffer.to_bytes(endian))
    }

    /// Replace every sample by decoding `bytes` in the buffer's byte order.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InsufficientData`] or [`BufferError::ExcessData`]
    /// if `bytes.len()` is not exactly [`byte_len()`](Self::byte_len).
    pub fn decode_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        let endian = self.endian;
        dispatch!(&mut self.data, buffer => buffer.decode_bytes(bytes, endian))
    }

    /// Fill the buffer from `reader` in the buffer's byte order.
    ///
    /// # Errors
    ///
    /// Propagates reader errors; a short stream is
    /// [`UnexpectedEof`](std::io::ErrorKind::UnexpectedEof).
    pub fn read_from<R: Read + ?Sized>(&mut self, reader: &mut R) -> std::io::Result<()> {
        let endian = self.endian;
        dispatch!(&mut self.data, buffer => buffer.read_from(reader, endian))
    }

    /// Write every sample to `writer` in the buffer's byte order.
    ///
    /// # Errors
    ///
    /// Propagates writer errors.
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> std::io::Result<()> {
        let endian = self.endian;
        dispatch!(&self.data, buffer => buffer.write_to(writer, endian))
    }
}

impl Default for VariantPixelBuffer {
    /// One zero `Uint8` sample in native byte order.
    fn default() -> Self {
        Self::from_data(
            PixelData::new(Shape::default(), PixelType::default()),
            EndianType::Native,
        )
    }
}

impl<T: Sample> From<PixelBuffer<T>> for VariantPixelBuffer {
    /// Wrap a typed buffer with native byte order.
    fn from(buffer: PixelBuffer<T>) -> Self {
        Self::from_data(buffer.into(), EndianType::Native)
    }
}

impl fmt::Debug for VariantPixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VariantPixelBuffer({}, {:?}, {})",
            self.pixel_type(),
            self.extents(),
            self.endian
        )
    }
}

#[cold]
#[track_caller]
fn type_mismatch<T: Sample>(actual: PixelType) -> ! {
    panic!(
        "contract violation: requested {} samples from a {actual} buffer",
        T::PIXEL_TYPE
    )
}
