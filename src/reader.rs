//! # Buffer Reader
//!
//! Sequential cursor over a borrowed byte buffer.
//!
//! The reader borrows any byte-backed source — a [`ByteBuffer`], a
//! `Vec<u8>`, or a plain `&[u8]` — and reads it in place without copying.
//! Each typed read validates the window at the current cursor, decodes it
//! with the same fixed-width rules as [`ByteBuffer`]'s positional reads, then
//! advances by that type's encoded width. A failed read leaves the cursor
//! where it was, so the caller can inspect the position at which decoding
//! stopped. The reader never mutates the underlying bytes.
//!
//! # Examples
//!
//! ```
//! use rlewire::{BufferReader, ByteBuffer};
//!
//! let mut buf = ByteBuffer::new();
//! buf.write_u8(1);
//! buf.write_u32(500);
//!
//! let mut reader = BufferReader::new(&buf);
//! assert_eq!(reader.read_u8().unwrap(), 1);
//! assert_eq!(reader.read_u32().unwrap(), 500);
//! assert!(reader.is_at_end());
//! ```

use crate::buffer::{self, CHAR_SIZE, SIZED_STR_PREFIX};
use crate::error::{WireError, WireResult};
use crate::fixed::FixedBinary;

/// A read cursor over borrowed bytes.
///
/// # Invariants
///
/// - `position` stays within `[0, len]`; `position == len` is end-of-data.
/// - A read of `k` bytes validates `position + k <= len` before advancing.
#[derive(Debug, Clone)]
pub struct BufferReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> BufferReader<'a> {
    /// Creates a reader positioned at the start of the bytes.
    #[must_use]
    pub fn new(buffer: &'a (impl AsRef<[u8]> + ?Sized)) -> Self {
        Self {
            bytes: buffer.as_ref(),
            position: 0,
        }
    }

    /// Current cursor offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left between the cursor and the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bytes.len().saturating_sub(self.position)
    }

    /// Returns true once the cursor has consumed every byte.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.bytes.len()
    }

    /// Moves the cursor to an arbitrary offset.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if `position > len`.
    pub fn set_position(&mut self, position: usize) -> WireResult<()> {
        if position > self.bytes.len() {
            return Err(WireError::out_of_range(position, 0, self.bytes.len()));
        }
        self.position = position;
        Ok(())
    }

    fn window(&self, len: usize) -> WireResult<&'a [u8]> {
        buffer::slice_window(self.bytes, self.position, len)
    }

    /// Reads one byte and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` at end of buffer.
    pub fn read_u8(&mut self) -> WireResult<u8> {
        self.read_value()
    }

    /// Reads one signed byte and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` at end of buffer.
    pub fn read_i8(&mut self) -> WireResult<i8> {
        self.read_value()
    }

    /// Reads a little-endian `u16` and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than 2 bytes remain.
    pub fn read_u16(&mut self) -> WireResult<u16> {
        self.read_value()
    }

    /// Reads a little-endian `i16` and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than 2 bytes remain.
    pub fn read_i16(&mut self) -> WireResult<i16> {
        self.read_value()
    }

    /// Reads a little-endian `u32` and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than 4 bytes remain.
    pub fn read_u32(&mut self) -> WireResult<u32> {
        self.read_value()
    }

    /// Reads a little-endian `i32` and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than 4 bytes remain.
    pub fn read_i32(&mut self) -> WireResult<i32> {
        self.read_value()
    }

    /// Reads a little-endian `u64` and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than 8 bytes remain.
    pub fn read_u64(&mut self) -> WireResult<u64> {
        self.read_value()
    }

    /// Reads a little-endian `i64` and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than 8 bytes remain.
    pub fn read_i64(&mut self) -> WireResult<i64> {
        self.read_value()
    }

    /// Reads a little-endian `f32` and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than 4 bytes remain.
    pub fn read_f32(&mut self) -> WireResult<f32> {
        self.read_value()
    }

    /// Reads a little-endian `f64` and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than 8 bytes remain.
    pub fn read_f64(&mut self) -> WireResult<f64> {
        self.read_value()
    }

    /// Reads a bool and advances (nonzero is true).
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` at end of buffer.
    pub fn read_bool(&mut self) -> WireResult<bool> {
        Ok(self.read_u8()? != 0)
    }

    /// Reads a 2-byte char and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than 2 bytes remain, or
    /// `WireError::InvalidChar` on a surrogate code unit.
    pub fn read_char(&mut self) -> WireResult<char> {
        let unit = u16::decode(self.window(CHAR_SIZE)?)?;
        let value = buffer::char_from_unit(unit)?;
        self.position += CHAR_SIZE;
        Ok(value)
    }

    /// Reads `len` raw bytes and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than `len` bytes remain.
    pub fn read_bytes(&mut self, len: usize) -> WireResult<&'a [u8]> {
        let window = self.window(len)?;
        self.position += len;
        Ok(window)
    }

    /// Reads `len` bytes as a UTF-8 string and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than `len` bytes remain, or
    /// `WireError::InvalidString` on invalid UTF-8.
    pub fn read_str(&mut self, len: usize) -> WireResult<String> {
        let value = buffer::decode_utf8(self.window(len)?)?;
        self.position += len;
        Ok(value)
    }

    /// Reads `len` bytes as little-endian UTF-16 code units and advances.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than `len` bytes remain, or
    /// `WireError::InvalidString` on odd length or malformed UTF-16.
    pub fn read_utf16_str(&mut self, len: usize) -> WireResult<String> {
        let value = buffer::decode_utf16(self.window(len)?)?;
        self.position += len;
        Ok(value)
    }

    /// Reads a u32-length-prefixed UTF-8 string and advances by
    /// 4 + decoded byte length.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if the prefix or payload is truncated,
    /// or `WireError::InvalidString` on invalid UTF-8.
    pub fn read_sized_str(&mut self) -> WireResult<String> {
        let len = u32::decode(self.window(SIZED_STR_PREFIX)?)? as usize;
        let payload =
            buffer::slice_window(self.bytes, self.position + SIZED_STR_PREFIX, len)?;
        let value = buffer::decode_utf8(payload)?;
        self.position += SIZED_STR_PREFIX + len;
        Ok(value)
    }

    /// Decodes a fixed-layout value and advances by `T::SIZE`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than `T::SIZE` bytes remain.
    pub fn read_value<T: FixedBinary>(&mut self) -> WireResult<T> {
        let value = T::decode(self.window(T::SIZE)?)?;
        self.position += T::SIZE;
        Ok(value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::buffer::ByteBuffer;

    fn sample() -> ByteBuffer {
        let mut buf = ByteBuffer::new();
        buf.write_u8(0xFF);
        buf.write_u32(1234);
        buf.write_sized_str("cursor");
        buf.write_bool(true);
        buf
    }

    #[test]
    fn sequential_reads_advance_by_width() {
        let buf = sample();
        let mut reader = BufferReader::new(&buf);

        assert_eq!(reader.read_u8().unwrap(), 0xFF);
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.read_u32().unwrap(), 1234);
        assert_eq!(reader.position(), 5);
        assert_eq!(reader.read_sized_str().unwrap(), "cursor");
        assert_eq!(reader.position(), 5 + SIZED_STR_PREFIX + "cursor".len());
        assert!(reader.read_bool().unwrap());
        assert!(reader.is_at_end());
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn reads_borrow_the_source_in_place() {
        // Plain slices and arrays work without wrapping in a ByteBuffer.
        let bytes = [7u8, 0, 0, 0, b'h', b'i'];
        let mut reader = BufferReader::new(&bytes);
        assert_eq!(reader.read_u32().unwrap(), 7);

        let tail = reader.read_bytes(2).unwrap();
        // The borrowed window outlives the reader.
        drop(reader);
        assert_eq!(tail, b"hi");

        let mut reader = BufferReader::new(bytes.as_slice());
        assert_eq!(reader.read_u32().unwrap(), 7);
    }

    #[test]
    fn failed_read_leaves_cursor() {
        let mut buf = ByteBuffer::new();
        buf.write_u16(3);
        let mut reader = BufferReader::new(&buf);

        let err = reader.read_u64().unwrap_err();
        assert_eq!(err, WireError::out_of_range(0, 8, 2));
        assert_eq!(reader.position(), 0);
        // The narrower read still succeeds afterwards.
        assert_eq!(reader.read_u16().unwrap(), 3);
    }

    #[test]
    fn failed_char_read_leaves_cursor() {
        let mut buf = ByteBuffer::new();
        buf.write_u16(0xD800);
        let mut reader = BufferReader::new(&buf);

        let err = reader.read_char().unwrap_err();
        assert_eq!(err, WireError::InvalidChar(0xD800));
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_at_end_fails() {
        let buf = ByteBuffer::new();
        let mut reader = BufferReader::new(&buf);
        assert!(reader.is_at_end());
        assert!(reader.read_u8().unwrap_err().is_truncation());
    }

    #[test]
    fn seek_allows_rereading() {
        let mut buf = ByteBuffer::new();
        buf.write_u32(42);
        let mut reader = BufferReader::new(&buf);

        assert_eq!(reader.read_u32().unwrap(), 42);
        reader.set_position(0).unwrap();
        assert_eq!(reader.read_u32().unwrap(), 42);
    }

    #[test]
    fn seek_past_end_fails() {
        let mut buf = ByteBuffer::new();
        buf.write_u8(0);
        let mut reader = BufferReader::new(&buf);

        // Seeking exactly to len is the end-of-data state.
        reader.set_position(1).unwrap();
        assert!(reader.is_at_end());
        assert!(reader.set_position(2).unwrap_err().is_truncation());
    }

    #[test]
    fn generic_read_matches_typed_read() {
        let mut buf = ByteBuffer::new();
        buf.write_i64(-9);
        let mut reader = BufferReader::new(&buf);
        assert_eq!(reader.read_value::<i64>().unwrap(), -9);
        assert!(reader.is_at_end());
    }
}
