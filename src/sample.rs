//! Element types a pixel buffer can hold.
//!
//! [`Sample`] is sealed: exactly one Rust type exists per [`PixelType`], and
//! each knows which [`PixelData`] variant stores it. That pairing is what
//! lets typed access on a [`VariantPixelBuffer`](crate::VariantPixelBuffer)
//! return `None` on a tag mismatch instead of reinterpreting memory.

use core::fmt::Debug;

use num_complex::Complex;

use crate::buffer::PixelBuffer;
use crate::pixel::{EndianType, PixelType};
use crate::variant::PixelData;

mod sealed {
    pub trait Sealed {}
}

/// A single sample of one of the eleven pixel types.
///
/// | Pixel type      | Rust type       | Serialized bytes |
/// |-----------------|-----------------|------------------|
/// | `Int8`          | `i8`            | 1 |
/// | `Int16`         | `i16`           | 2 |
/// | `Int32`         | `i32`           | 4 |
/// | `Uint8`         | `u8`            | 1 |
/// | `Uint16`        | `u16`           | 2 |
/// | `Uint32`        | `u32`           | 4 |
/// | `Float`         | `f32`           | 4 |
/// | `Double`        | `f64`           | 8 |
/// | `Bit`           | `bool`          | 1 (0 or 1) |
/// | `Complex`       | `Complex<f32>`  | 8 (real, imaginary) |
/// | `DoubleComplex` | `Complex<f64>`  | 16 (real, imaginary) |
pub trait Sample:
    sealed::Sealed + Copy + Default + PartialEq + Debug + Send + Sync + 'static
{
    /// The tag for this element type.
    const PIXEL_TYPE: PixelType;

    /// Serialized width in bytes. Equal to `PIXEL_TYPE.byte_size()`.
    const BYTE_SIZE: usize;

    /// Numeric cast from `f64`.
    ///
    /// Integers saturate (Rust `as` semantics), `bool` is `v != 0.0`, and
    /// complex types get a zero imaginary part.
    fn from_f64(v: f64) -> Self;

    /// Decode one sample from exactly `BYTE_SIZE` bytes in `order`.
    fn decode(bytes: &[u8], order: EndianType) -> Self;

    /// Encode one sample into exactly `BYTE_SIZE` bytes in `order`.
    fn encode(self, out: &mut [u8], order: EndianType);

    /// Borrow the buffer of this type, if `data` holds one.
    fn buffer(data: &PixelData) -> Option<&PixelBuffer<Self>>;

    /// Mutably borrow the buffer of this type, if `data` holds one.
    fn buffer_mut(data: &mut PixelData) -> Option<&mut PixelBuffer<Self>>;

    /// Wrap a buffer of this type in its [`PixelData`] variant.
    fn into_data(buffer: PixelBuffer<Self>) -> PixelData;
}

macro_rules! impl_variant_access {
    ($variant:ident) => {
        #[inline]
        fn buffer(data: &PixelData) -> Option<&PixelBuffer<Self>> {
            match data {
                PixelData::$variant(buffer) => Some(buffer),
                _ => None,
            }
        }

        #[inline]
        fn buffer_mut(data: &mut PixelData) -> Option<&mut PixelBuffer<Self>> {
            match data {
                PixelData::$variant(buffer) => Some(buffer),
                _ => None,
            }
        }

        #[inline]
        fn into_data(buffer: PixelBuffer<Self>) -> PixelData {
            PixelData::$variant(buffer)
        }
    };
}

macro_rules! impl_sample_scalar {
    ($t:ty, $variant:ident) => {
        impl sealed::Sealed for $t {}

        impl Sample for $t {
            const PIXEL_TYPE: PixelType = PixelType::$variant;
            const BYTE_SIZE: usize = core::mem::size_of::<$t>();

            #[inline]
            fn from_f64(v: f64) -> Self {
                v as $t
            }

            #[inline]
            fn decode(bytes: &[u8], order: EndianType) -> Self {
                let mut raw = [0u8; core::mem::size_of::<$t>()];
                raw.copy_from_slice(bytes);
                match order.resolve() {
                    EndianType::Big => <$t>::from_be_bytes(raw),
                    _ => <$t>::from_le_bytes(raw),
                }
            }

            #[inline]
            fn encode(self, out: &mut [u8], order: EndianType) {
                let raw = match order.resolve() {
                    EndianType::Big => self.to_be_bytes(),
                    _ => self.to_le_bytes(),
                };
                out.copy_from_slice(&raw);
            }

            impl_variant_access!($variant);
        }
    };
}

impl_sample_scalar!(i8, Int8);
impl_sample_scalar!(i16, Int16);
impl_sample_scalar!(i32, Int32);
impl_sample_scalar!(u8, Uint8);
impl_sample_scalar!(u16, Uint16);
impl_sample_scalar!(u32, Uint32);
impl_sample_scalar!(f32, Float);
impl_sample_scalar!(f64, Double);

impl sealed::Sealed for bool {}

// One byte per sample; byte order never applies.
impl Sample for bool {
    const PIXEL_TYPE: PixelType = PixelType::Bit;
    const BYTE_SIZE: usize = 1;

    #[inline]
    fn from_f64(v: f64) -> Self {
        v != 0.0
    }

    #[inline]
    fn decode(bytes: &[u8], _order: EndianType) -> Self {
        bytes[0] != 0
    }

    #[inline]
    fn encode(self, out: &mut [u8], _order: EndianType) {
        out[0] = u8::from(self);
    }

    impl_variant_access!(Bit);
}

macro_rules! impl_sample_complex {
    ($part:ty, $variant:ident) => {
        impl sealed::Sealed for Complex<$part> {}

        // Real part first, each part swapped on its own.
        impl Sample for Complex<$part> {
            const PIXEL_TYPE: PixelType = PixelType::$variant;
            const BYTE_SIZE: usize = 2 * <$part as Sample>::BYTE_SIZE;

            #[inline]
            fn from_f64(v: f64) -> Self {
                Complex::new(v as $part, 0.0)
            }

            #[inline]
            fn decode(bytes: &[u8], order: EndianType) -> Self {
                let (re, im) = bytes.split_at(<$part as Sample>::BYTE_SIZE);
                Complex::new(<$part>::decode(re, order), <$part>::decode(im, order))
            }

            #[inline]
            fn encode(self, out: &mut [u8], order: EndianType) {
                let (re, im) = out.split_at_mut(<$part as Sample>::BYTE_SIZE);
                self.re.encode(re, order);
                self.im.encode(im, order);
            }

            impl_variant_access!($variant);
        }
    };
}

impl_sample_complex!(f32, Complex);
impl_sample_complex!(f64, DoubleComplex);
