//! Sample type and byte order descriptors.

use core::fmt;
use core::str::FromStr;

use crate::error::BufferError;

/// Storage type of a single sample.
///
/// Names follow the OME data model pixel types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PixelType {
    /// Signed 8-bit integer.
    Int8,
    /// Signed 16-bit integer.
    Int16,
    /// Signed 32-bit integer.
    Int32,
    /// Unsigned 8-bit integer.
    #[default]
    Uint8,
    /// Unsigned 16-bit integer.
    Uint16,
    /// Unsigned 32-bit integer.
    Uint32,
    /// 32-bit IEEE float.
    Float,
    /// 64-bit IEEE float.
    Double,
    /// Single bit, stored one per byte-sized slot.
    Bit,
    /// Pair of 32-bit floats (real, imaginary).
    Complex,
    /// Pair of 64-bit floats (real, imaginary).
    DoubleComplex,
}

impl PixelType {
    /// Every pixel type, in declaration order.
    pub const ALL: [PixelType; 11] = [
        Self::Int8,
        Self::Int16,
        Self::Int32,
        Self::Uint8,
        Self::Uint16,
        Self::Uint32,
        Self::Float,
        Self::Double,
        Self::Bit,
        Self::Complex,
        Self::DoubleComplex,
    ];

    /// Bytes occupied by one sample in storage and in serialized form.
    #[inline]
    pub const fn byte_size(self) -> usize {
        match self {
            Self::Int8 | Self::Uint8 | Self::Bit => 1,
            Self::Int16 | Self::Uint16 => 2,
            Self::Int32 | Self::Uint32 | Self::Float => 4,
            Self::Double | Self::Complex => 8,
            Self::DoubleComplex => 16,
        }
    }

    /// Significant bits per sample.
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bit => 1,
            other => other.byte_size() as u32 * 8,
        }
    }

    /// Whether the type can represent negative values.
    #[inline]
    pub const fn is_signed(self) -> bool {
        matches!(
            self,
            Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Float
                | Self::Double
                | Self::Complex
                | Self::DoubleComplex
        )
    }

    /// Whether samples are IEEE floats (including complex pairs).
    #[inline]
    pub const fn is_floating_point(self) -> bool {
        matches!(
            self,
            Self::Float | Self::Double | Self::Complex | Self::DoubleComplex
        )
    }

    /// Whether samples are complex pairs.
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex | Self::DoubleComplex)
    }

    /// OME data model name (`"uint16"`, `"double-complex"`, ...).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bit => "bit",
            Self::Complex => "complex",
            Self::DoubleComplex => "double-complex",
        }
    }
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelType {
    type Err = BufferError;

    /// Parse an OME data model name, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BufferError::UnknownPixelType(s.into()))
    }
}

/// Byte order of serialized samples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EndianType {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    Little,
    /// Whatever the host uses; resolved to `Big` or `Little` on use.
    #[default]
    Native,
}

impl EndianType {
    /// The host byte order.
    #[inline]
    pub const fn native() -> Self {
        if cfg!(target_endian = "big") {
            Self::Big
        } else {
            Self::Little
        }
    }

    /// Replace `Native` with the host order. Never returns `Native`.
    #[inline]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Native => Self::native(),
            other => other,
        }
    }

    /// Whether this order matches the host, so no byte swap is needed.
    #[inline]
    pub const fn is_native(self) -> bool {
        matches!(
            (self.resolve(), Self::native()),
            (Self::Big, Self::Big) | (Self::Little, Self::Little)
        )
    }
}

impl fmt::Display for EndianType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Big => "big",
            Self::Little => "little",
            Self::Native => "native",
        })
    }
}
