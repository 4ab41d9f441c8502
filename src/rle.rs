//! # Run-Length Codec
//!
//! Run-length compression for sequences of fixed-layout values, with a raw
//! fallback when compression would not pay off.
//!
//! Wire format:
//!
//! ```text
//! stream := mode_byte body
//! mode_byte := 0x00 (raw) | 0x01 (compressed)
//! body(raw)        := element*            // count implicit from stream length
//! body(compressed) := (count:u8 element)* // count implicit from stream length
//! ```
//!
//! The stream carries no type tag and no record count: both sides terminate
//! on end-of-stream, so producer and consumer must agree on the element
//! type's encoded width or decoding desynchronizes.
//!
//! # Examples
//!
//! ```
//! use rlewire::rle;
//!
//! let values = [5i32, 5, 5, 7, 7, 9];
//! let stream = rle::compress(&values).unwrap();
//! assert_eq!(stream.len(), 16); // mode + 3 records of (count + i32)
//!
//! let back: Vec<i32> = rle::decompress(&stream).unwrap();
//! assert_eq!(back, values);
//! ```

use crate::buffer::ByteBuffer;
use crate::error::{WireError, WireResult};
use crate::fixed::FixedBinary;
use crate::reader::BufferReader;

/// Mode byte marking a flat, uncompressed body.
pub const MODE_RAW: u8 = 0;

/// Mode byte marking a run-length compressed body.
pub const MODE_COMPRESSED: u8 = 1;

/// Longest run one record can carry; longer runs split into several records.
pub const MAX_RUN: usize = u8::MAX as usize;

/// Compresses a sequence of fixed-layout values into a mode-prefixed stream.
///
/// Every element is emitted as a `(count, value)` run record, count 1..=255;
/// a run of identical values longer than 255 splits into consecutive maximal
/// records. If the flat encoding would be no larger than the compressed body,
/// the body is rebuilt flat under mode byte 0 instead.
///
/// # Errors
///
/// Returns `WireError::ZeroWidthElement` if `T` encodes to zero bytes; such
/// elements cannot be framed on the wire. No other input fails.
pub fn compress<T: FixedBinary + PartialEq>(values: &[T]) -> WireResult<Vec<u8>> {
    if T::SIZE == 0 {
        return Err(WireError::ZeroWidthElement);
    }

    let mut buf = ByteBuffer::with_capacity(values.len() * (1 + T::SIZE) + 1);

    let mut i = 0;
    while let Some(value) = values.get(i) {
        // Extend only while in bounds, equal, and below the count cap.
        let mut run = 1;
        while run < MAX_RUN && values.get(i + run) == Some(value) {
            run += 1;
        }
        buf.write_u8(run as u8);
        buf.write_value(value);
        i += run;
    }

    let raw_size = values.len() * T::SIZE;
    if raw_size <= buf.len() {
        tracing::debug!(
            elements = values.len(),
            raw_size,
            compressed_size = buf.len(),
            "storing raw, compression does not pay off"
        );
        buf.clear();
        buf.write_u8(MODE_RAW);
        for value in values {
            buf.write_value(value);
        }
    } else {
        tracing::debug!(
            elements = values.len(),
            raw_size,
            compressed_size = buf.len(),
            "storing run-length compressed"
        );
        buf.insert_byte(0, MODE_COMPRESSED)?;
    }

    Ok(buf.into_vec())
}

/// Decompresses a mode-prefixed stream back into a sequence of values.
///
/// `T` must have the same encoded width the producer used; the stream does
/// not carry it.
///
/// # Errors
///
/// Returns `WireError::OutOfRange` on an empty or truncated stream,
/// `WireError::InvalidMode` if the mode byte is neither 0 nor 1, and
/// `WireError::ZeroWidthElement` if `T` encodes to zero bytes (a raw body
/// of such elements would never advance the cursor). No partial sequence is
/// ever returned.
pub fn decompress<T: FixedBinary + Clone>(stream: &[u8]) -> WireResult<Vec<T>> {
    if T::SIZE == 0 {
        return Err(WireError::ZeroWidthElement);
    }

    let mut reader = BufferReader::new(stream);
    let mode = reader.read_u8()?;

    let mut values = Vec::new();
    match mode {
        MODE_COMPRESSED => {
            while !reader.is_at_end() {
                let count = reader.read_u8()?;
                let value: T = reader.read_value()?;
                values.extend(std::iter::repeat_n(value, usize::from(count)));
            }
        }
        MODE_RAW => {
            while !reader.is_at_end() {
                values.push(reader.read_value()?);
            }
        }
        other => return Err(WireError::InvalidMode(other)),
    }

    Ok(values)
}
