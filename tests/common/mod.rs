//! Shared fixtures for the pixel buffer integration tests.

#![allow(dead_code)]

use zenraster::{
    EndianType, Extents, PixelBuffer, PixelData, PixelType, PixelVisitor, PixelVisitorMut, Sample,
    Shape, VariantPixelBuffer,
};

/// 5×2 plane, 10 samples.
pub const SMALL: Extents = [5, 2, 1, 1, 1, 1, 1, 1, 1];
/// 10×10 plane, 100 samples.
pub const PLANE: Extents = [10, 10, 1, 1, 1, 1, 1, 1, 1];
/// 2×2×3×4 stack, 48 samples.
pub const STACK: Extents = [2, 2, 3, 4, 1, 1, 1, 1, 1];

/// Every (pixel type, byte order) combination.
pub fn params() -> impl Iterator<Item = (PixelType, EndianType)> {
    PixelType::ALL.into_iter().flat_map(|t| {
        [EndianType::Big, EndianType::Little, EndianType::Native]
            .into_iter()
            .map(move |e| (t, e))
    })
}

/// Deterministic sample value for linear position `i`.
///
/// Bits alternate so neighbouring samples differ.
pub fn pixel_value<T: Sample>(i: usize) -> T {
    if T::PIXEL_TYPE == PixelType::Bit {
        T::from_f64((i % 2) as f64)
    } else {
        T::from_f64(i as f64)
    }
}

/// Fills a buffer with [`pixel_value`] in linear order.
pub struct Fill;

impl PixelVisitorMut for Fill {
    type Output = ();

    fn visit<T: Sample>(self, buffer: &mut PixelBuffer<T>) {
        let n = buffer.num_elements();
        buffer.assign((0..n).map(pixel_value::<T>));
    }
}

/// A check that needs the sample type of a [`VariantPixelBuffer`] as a
/// type parameter.
pub trait TypedCheck {
    fn run<T: Sample>(self, buf: &mut VariantPixelBuffer);
}

/// Run `check` with `T` bound to the sample type of `buf`.
pub fn with_sample_type<C: TypedCheck>(buf: &mut VariantPixelBuffer, check: C) {
    let pixel_type = buf.pixel_type();
    with_sample_type_as(pixel_type, buf, check);
}

/// Run `check` on `buf` with `T` bound to `pixel_type`, which need not be
/// the buffer's own sample type.
pub fn with_sample_type_as<C: TypedCheck>(
    pixel_type: PixelType,
    buf: &mut VariantPixelBuffer,
    check: C,
) {
    struct Witness<'a, C> {
        buf: &'a mut VariantPixelBuffer,
        check: C,
    }

    impl<C: TypedCheck> PixelVisitor for Witness<'_, C> {
        type Output = ();

        fn visit<T: Sample>(self, _witness: &PixelBuffer<T>) {
            self.check.run::<T>(self.buf);
        }
    }

    let witness = PixelData::new(Shape::default(), pixel_type);
    witness.apply(Witness { buf, check });
}

/// Indices with the first two components set.
pub fn idx2(i: usize, j: usize) -> [usize; 9] {
    [i, j, 0, 0, 0, 0, 0, 0, 0]
}

/// Panic message of a caught panic payload.
pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        String::new()
    }
}
