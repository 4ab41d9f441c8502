//! # Fixed-Layout Binary Values
//!
//! The [`FixedBinary`] trait marks types with a constant, known-ahead-of-time
//! encoded width, and gives them append/decode hooks against a [`ByteBuffer`].
//!
//! The RLE codec is generic over this trait: a run record is one count byte
//! followed by one `FixedBinary` encoding, and the decoder relies on the
//! width being identical on both sides of the wire. Implementations are
//! explicit per type; there is no runtime reflection or byte reinterpretation.
//!
//! # Examples
//!
//! ```
//! use rlewire::{ByteBuffer, FixedBinary};
//!
//! let mut buf = ByteBuffer::new();
//! 0xABCDu16.encode_into(&mut buf);
//! assert_eq!(buf.as_bytes(), &[0xCD, 0xAB]); // little-endian
//!
//! let back = u16::decode(buf.as_bytes()).unwrap();
//! assert_eq!(back, 0xABCD);
//! ```

use crate::buffer::ByteBuffer;
use crate::error::{WireError, WireResult};

/// A value with a constant encoded byte width.
///
/// Multi-byte implementations encode little-endian. `SIZE` must equal the
/// number of bytes `encode_into` appends, and `decode` must reject any window
/// whose length differs from `SIZE`.
pub trait FixedBinary: Sized {
    /// Encoded width in bytes.
    const SIZE: usize;

    /// Appends this value's encoding to the buffer.
    fn encode_into(&self, buf: &mut ByteBuffer);

    /// Decodes a value from a window of exactly [`Self::SIZE`] bytes.
    ///
    /// # Errors
    ///
    /// Returns `WireError::SizeMismatch` if `bytes.len() != Self::SIZE`.
    fn decode(bytes: &[u8]) -> WireResult<Self>;
}

fn check_window(len: usize, expected: usize) -> WireResult<()> {
    if len == expected {
        Ok(())
    } else {
        Err(WireError::size_mismatch(expected, len))
    }
}

macro_rules! impl_fixed_binary_le {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FixedBinary for $ty {
                const SIZE: usize = size_of::<$ty>();

                fn encode_into(&self, buf: &mut ByteBuffer) {
                    buf.write_bytes(&self.to_le_bytes());
                }

                fn decode(bytes: &[u8]) -> WireResult<Self> {
                    check_window(bytes.len(), Self::SIZE)?;
                    let mut raw = [0u8; Self::SIZE];
                    raw.copy_from_slice(bytes);
                    Ok(<$ty>::from_le_bytes(raw))
                }
            }
        )*
    };
}

impl_fixed_binary_le!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);

impl FixedBinary for bool {
    const SIZE: usize = 1;

    fn encode_into(&self, buf: &mut ByteBuffer) {
        buf.write_u8(u8::from(*self));
    }

    fn decode(bytes: &[u8]) -> WireResult<Self> {
        check_window(bytes.len(), Self::SIZE)?;
        Ok(bytes.first().copied().unwrap_or(0) != 0)
    }
}

/// Opaque fixed-layout blob: the bytes are the encoding.
impl<const N: usize> FixedBinary for [u8; N] {
    const SIZE: usize = N;

    fn encode_into(&self, buf: &mut ByteBuffer) {
        buf.write_bytes(self);
    }

    fn decode(bytes: &[u8]) -> WireResult<Self> {
        check_window(bytes.len(), N)?;
        let mut raw = [0u8; N];
        raw.copy_from_slice(bytes);
        Ok(raw)
    }
}
