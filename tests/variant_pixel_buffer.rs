//! Behaviour of `VariantPixelBuffer` across every pixel type and byte order.

mod common;

use std::io::{Cursor, ErrorKind};
use std::panic::{self, AssertUnwindSafe};

use common::{
    Fill, PLANE, SMALL, STACK, TypedCheck, idx2, panic_message, params, pixel_value,
    with_sample_type, with_sample_type_as,
};
use rayon::prelude::*;
use zenraster::{
    CONTRACT_CHECKS, EndianType, PixelBuffer, PixelType, PixelVisitor, Sample, VariantPixelBuffer,
};

fn new_buf(extents: [usize; 9], t: PixelType, e: EndianType) -> VariantPixelBuffer {
    VariantPixelBuffer::new(extents, t, e).unwrap()
}

/// Visit linear offsets of `STACK` with dimension 0 fastest, through
/// explicit nested loops.
fn stack_indices() -> Vec<[usize; 9]> {
    let mut out = Vec::with_capacity(48);
    for k3 in 0..4 {
        for k2 in 0..3 {
            for k1 in 0..2 {
                for k0 in 0..2 {
                    out.push([k0, k1, k2, k3, 0, 0, 0, 0, 0]);
                }
            }
        }
    }
    out
}

#[test]
fn default_construct() {
    let buf = VariantPixelBuffer::default();
    assert_eq!(buf.num_elements(), 1);
    assert!(!buf.as_ptr().is_null());
}

#[test]
fn construct_size() {
    for (t, e) in params() {
        let buf = new_buf(SMALL, t, e);
        assert_eq!(buf.num_elements(), 10, "{t}/{e}");
        assert!(!buf.as_ptr().is_null());
        assert_eq!(buf.pixel_type(), t);
        assert_eq!(buf.endian(), e.resolve());
    }
}

#[test]
fn construct_various_extents() {
    let cases: [[usize; 9]; 3] = [
        [1, 1, 1, 1, 1, 1, 1, 1, 1],
        [3, 1, 1, 1, 1, 1, 1, 1, 7],
        [2, 3, 4, 5, 1, 2, 1, 1, 3],
    ];
    for extents in cases {
        let buf = new_buf(extents, PixelType::Float, EndianType::Native);
        assert_eq!(buf.num_elements(), extents.iter().product::<usize>());
    }
}

struct AssignCheck;

impl TypedCheck for AssignCheck {
    fn run<T: Sample>(self, buf: &mut VariantPixelBuffer) {
        let n = buf.num_elements();
        buf.assign((0..n).map(pixel_value::<T>));

        assert!(!buf.as_ptr().is_null());
        assert!(buf.buffer::<T>().is_some());
        let data = buf.data::<T>().expect("typed data for active type");
        assert_eq!(data.len(), n);
        for (i, v) in data.iter().enumerate() {
            assert_eq!(*v, pixel_value::<T>(i), "{} at {i}", T::PIXEL_TYPE);
        }
    }
}

#[test]
fn construct_range() {
    for (t, e) in params() {
        let mut buf = new_buf(SMALL, t, e);
        with_sample_type(&mut buf, AssignCheck);
    }
}

#[test]
#[allow(clippy::eq_op)]
fn construct_copy() {
    for (t, e) in params() {
        let mut buf1 = new_buf(SMALL, t, e);
        buf1.apply_mut(Fill);
        let buf2 = new_buf(SMALL, t, e);

        assert_eq!(buf1, buf1);
        assert_eq!(buf2, buf2);
        assert_ne!(buf1, buf2, "{t}/{e}");

        let mut buf3 = buf2.clone();
        assert_eq!(buf2, buf3);
        assert_ne!(buf1, buf3);

        // The copy owns its own storage.
        buf3.apply_mut(Fill);
        assert_eq!(buf1, buf3);
        assert_ne!(buf2, buf3);
        assert_ne!(buf2.as_ptr(), buf3.as_ptr());
    }
}

struct GetIndexCheck;

impl TypedCheck for GetIndexCheck {
    fn run<T: Sample>(self, buf: &mut VariantPixelBuffer) {
        assert_eq!(buf.num_elements(), 100);
        for i in 0..10 {
            for j in 0..10 {
                let idx = idx2(i, j);
                let val = pixel_value::<T>(j * 10 + i);
                assert_eq!(val, *buf.at_mut::<T>(&idx));
                let cbuf: &VariantPixelBuffer = buf;
                assert_eq!(val, *cbuf.at::<T>(&idx));
                assert_eq!(Some(&val), cbuf.get::<T>(&idx));
            }
        }
    }
}

#[test]
fn get_index() {
    for (t, e) in params() {
        let mut buf = new_buf(PLANE, t, e);
        buf.apply_mut(Fill);
        with_sample_type(&mut buf, GetIndexCheck);
    }
}

struct SetIndexCheck;

impl TypedCheck for SetIndexCheck {
    fn run<T: Sample>(self, buf: &mut VariantPixelBuffer) {
        for i in 0..10 {
            for j in 0..10 {
                let idx = idx2(i, j);
                let val = pixel_value::<T>(i + j + j);
                *buf.at_mut::<T>(&idx) = val;
                assert_eq!(val, *buf.at_mut::<T>(&idx));
                let cbuf: &VariantPixelBuffer = buf;
                assert_eq!(val, *cbuf.at::<T>(&idx));
            }
        }
    }
}

#[test]
fn set_index() {
    for (t, e) in params() {
        let mut buf = new_buf(PLANE, t, e);
        with_sample_type(&mut buf, SetIndexCheck);
    }
}

struct OutOfBoundsCheck;

impl TypedCheck for OutOfBoundsCheck {
    fn run<T: Sample>(self, buf: &mut VariantPixelBuffer) {
        let bad = idx2(13, 2);

        let write = panic::catch_unwind(AssertUnwindSafe(|| {
            *buf.at_mut::<T>(&bad) = T::from_f64(4.0);
        }));
        let err = write.expect_err("out-of-bounds write must panic");
        assert!(panic_message(&*err).contains("contract violation"));

        let cbuf: &VariantPixelBuffer = buf;
        let read = panic::catch_unwind(AssertUnwindSafe(|| *cbuf.at::<T>(&bad)));
        let err = read.expect_err("out-of-bounds read must panic");
        let msg = panic_message(&*err);
        assert!(msg.contains("index 13 out of bounds for dimension 0"), "{msg}");

        assert!(cbuf.get::<T>(&bad).is_none());
    }
}

#[test]
#[cfg_attr(
    not(any(debug_assertions, feature = "contract-checks")),
    ignore = "contract checks compiled out"
)]
fn set_index_out_of_bounds() {
    assert!(CONTRACT_CHECKS);
    for (t, e) in params() {
        let mut buf = new_buf(PLANE, t, e);
        with_sample_type(&mut buf, OutOfBoundsCheck);
    }
}

struct WrongTypeCheck;

impl TypedCheck for WrongTypeCheck {
    fn run<T: Sample>(self, buf: &mut VariantPixelBuffer) {
        let t = buf.pixel_type();
        let expected = format!("from a {t} buffer");
        let origin = idx2(0, 0);

        let cbuf: &VariantPixelBuffer = buf;
        let read = panic::catch_unwind(AssertUnwindSafe(|| *cbuf.at::<T>(&origin)));
        let msg = panic_message(&*read.expect_err("mismatched read must panic"));
        assert!(msg.contains(&expected), "{msg}");
        assert!(cbuf.get::<T>(&origin).is_none());

        let write = panic::catch_unwind(AssertUnwindSafe(|| {
            *buf.at_mut::<T>(&origin) = T::default();
        }));
        let msg = panic_message(&*write.expect_err("mismatched write must panic"));
        assert!(msg.contains(&expected), "{msg}");
        assert!(buf.get_mut::<T>(&origin).is_none());
        assert!(buf.data_mut::<T>().is_none());
    }
}

#[test]
fn wrong_type_access_panics() {
    for t in PixelType::ALL {
        let mut buf = new_buf(PLANE, t, EndianType::Native);
        // Any tag other than `t` serves as the mismatched sample type.
        let other = if t == PixelType::Uint8 {
            PixelType::Int8
        } else {
            PixelType::Uint8
        };
        with_sample_type_as(other, &mut buf, WrongTypeCheck);
    }
}

struct StreamInputCheck;

impl TypedCheck for StreamInputCheck {
    fn run<T: Sample>(self, buf: &mut VariantPixelBuffer) {
        let order = buf.endian();
        let mut stream = Vec::new();
        let mut raw = vec![0u8; T::BYTE_SIZE];
        for i in 0..buf.num_elements() {
            pixel_value::<T>(i).encode(&mut raw, order);
            stream.extend_from_slice(&raw);
        }

        buf.read_from(&mut Cursor::new(stream)).unwrap();

        for (i, idx) in stack_indices().iter().enumerate() {
            assert_eq!(pixel_value::<T>(i), *buf.at::<T>(idx), "{} at {i}", T::PIXEL_TYPE);
        }
    }
}

#[test]
fn stream_input() {
    for (t, e) in params() {
        let mut buf = new_buf(STACK, t, e);
        assert_eq!(buf.num_elements(), 48);
        with_sample_type(&mut buf, StreamInputCheck);
    }
}

struct StreamOutputCheck;

impl TypedCheck for StreamOutputCheck {
    fn run<T: Sample>(self, buf: &mut VariantPixelBuffer) {
        let n = buf.num_elements();
        buf.assign((0..n).map(pixel_value::<T>));

        let mut sink = Vec::new();
        buf.write_to(&mut sink).unwrap();
        assert_eq!(sink.len(), n * T::BYTE_SIZE);
        assert_eq!(sink, buf.to_bytes());

        let order = buf.endian();
        let mut samples = sink.chunks_exact(T::BYTE_SIZE);
        for (i, idx) in stack_indices().iter().enumerate() {
            assert_eq!(pixel_value::<T>(i), *buf.at::<T>(idx));
            let raw = samples.next().expect("one serialized sample per element");
            assert_eq!(T::decode(raw, order), pixel_value::<T>(i));
        }
        assert!(samples.next().is_none());
    }
}

#[test]
fn stream_output() {
    for (t, e) in params() {
        let mut buf = new_buf(STACK, t, e);
        with_sample_type(&mut buf, StreamOutputCheck);
    }
}

#[test]
fn stream_round_trip() {
    for (t, e) in params() {
        let mut src = new_buf(STACK, t, e);
        src.apply_mut(Fill);
        let mut sink = Vec::new();
        src.write_to(&mut sink).unwrap();

        let mut dst = new_buf(STACK, t, e);
        dst.read_from(&mut sink.as_slice()).unwrap();
        assert_eq!(src, dst, "{t}/{e}");
    }
}

#[test]
fn swapped_byte_order_does_not_round_trip() {
    for t in PixelType::ALL {
        let mut big = new_buf(STACK, t, EndianType::Big);
        big.apply_mut(Fill);
        let bytes = big.to_bytes();

        let mut little = new_buf(STACK, t, EndianType::Little);
        little.decode_bytes(&bytes).unwrap();

        if t.byte_size() == 1 {
            assert_eq!(big.pixel_data(), little.pixel_data(), "{t}");
        } else {
            assert_ne!(big.pixel_data(), little.pixel_data(), "{t}");
        }
        assert_ne!(big, little);
    }
}

#[test]
fn short_stream_fails_without_panicking() {
    for (t, e) in params() {
        let mut buf = new_buf(STACK, t, e);
        let bytes = vec![0u8; buf.byte_len() - 1];
        let err = buf.read_from(&mut bytes.as_slice()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedEof, "{t}/{e}");
    }
}

#[test]
fn visitor_sees_only_the_active_type() {
    struct Tag;

    impl PixelVisitor for Tag {
        type Output = (PixelType, usize);

        fn visit<T: Sample>(self, buffer: &PixelBuffer<T>) -> (PixelType, usize) {
            (T::PIXEL_TYPE, buffer.byte_len())
        }
    }

    for (t, e) in params() {
        let buf = new_buf(STACK, t, e);
        assert_eq!(buf.apply(Tag), (t, 48 * t.byte_size()));
    }
}

#[test]
fn concurrent_reads() {
    let mut buf = new_buf(PLANE, PixelType::Uint16, EndianType::Little);
    buf.apply_mut(Fill);
    let buf = &buf;

    (0..100usize).into_par_iter().for_each(|k| {
        let (i, j) = (k % 10, k / 10);
        assert_eq!(*buf.at::<u16>(&idx2(i, j)), pixel_value::<u16>(k));
        assert_eq!(buf.get::<u16>(&idx2(i, j)), Some(&(k as u16)));
    });

    let copies: Vec<VariantPixelBuffer> = (0..8).into_par_iter().map(|_| buf.clone()).collect();
    assert!(copies.iter().all(|c| c == buf));
}
