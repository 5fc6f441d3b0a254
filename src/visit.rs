//! Type-generic dispatch over the active [`PixelData`] variant.
//!
//! Implement [`PixelVisitor`] (or [`PixelVisitorMut`]) once with a generic
//! `visit::<T>` and [`PixelData::apply`] calls it with whichever buffer is
//! live, so callers never branch over the eleven pixel types themselves.
//!
//! ```
//! use zenraster::{PixelBuffer, PixelType, PixelVisitorMut, Sample, VariantPixelBuffer};
//!
//! /// Fill every sample with its linear offset.
//! struct Ramp;
//!
//! impl PixelVisitorMut for Ramp {
//!     type Output = ();
//!     fn visit<T: Sample>(self, buffer: &mut PixelBuffer<T>) {
//!         for (i, v) in buffer.data_mut().iter_mut().enumerate() {
//!             *v = T::from_f64(i as f64);
//!         }
//!     }
//! }
//!
//! let mut buf = VariantPixelBuffer::new(
//!     [4, 1, 1, 1, 1, 1, 1, 1, 1],
//!     PixelType::Int16,
//!     Default::default(),
//! )
//! .unwrap();
//! buf.apply_mut(Ramp);
//! assert_eq!(buf.data::<i16>(), Some(&[0, 1, 2, 3][..]));
//! ```
//!
//! [`PixelData`]: crate::PixelData
//! [`PixelData::apply`]: crate::PixelData::apply

use crate::buffer::PixelBuffer;
use crate::sample::Sample;

/// An operation over a borrowed buffer of any sample type.
pub trait PixelVisitor {
    /// Result type, the same for every sample type.
    type Output;

    /// Run the operation on the active buffer.
    fn visit<T: Sample>(self, buffer: &PixelBuffer<T>) -> Self::Output;
}

/// An operation over a mutably borrowed buffer of any sample type.
pub trait PixelVisitorMut {
    /// Result type, the same for every sample type.
    type Output;

    /// Run the operation on the active buffer.
    fn visit<T: Sample>(self, buffer: &mut PixelBuffer<T>) -> Self::Output;
}

/// Expand `$body` once per [`PixelData`](crate::PixelData) variant, with
/// `$buffer` bound to the typed buffer inside.
macro_rules! dispatch {
    ($data:expr, $buffer:ident => $body:expr) => {
        match $data {
            $crate::variant::PixelData::Int8($buffer) => $body,
            $crate::variant::PixelData::Int16($buffer) => $body,
            $crate::variant::PixelData::Int32($buffer) => $body,
            $crate::variant::PixelData::Uint8($buffer) => $body,
            $crate::variant::PixelData::Uint16($buffer) => $body,
            $crate::variant::PixelData::Uint32($buffer) => $body,
            $crate::variant::PixelData::Float($buffer) => $body,
            $crate::variant::PixelData::Double($buffer) => $body,
            $crate::variant::PixelData::Bit($buffer) => $body,
            $crate::variant::PixelData::Complex($buffer) => $body,
            $crate::variant::PixelData::DoubleComplex($buffer) => $body,
        }
    };
}

pub(crate) use dispatch;
