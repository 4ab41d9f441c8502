//! # Byte Buffer
//!
//! Growable, exclusively-owned byte sequence with typed little-endian appends
//! and positional (cursorless) typed reads.
//!
//! Writes always append to the end, except [`ByteBuffer::insert_byte`], which
//! exists so a codec can retrofit a header byte at offset 0 after the body has
//! been built. Positional reads are pure functions of the buffer contents:
//! they validate the window against the current length and never mutate
//! anything, so a buffer can be read at arbitrary offsets in any order.
//!
//! # Examples
//!
//! ```
//! use rlewire::ByteBuffer;
//!
//! let mut buf = ByteBuffer::new();
//! buf.write_u32(0xDEAD_BEEF);
//! buf.write_bool(true);
//!
//! assert_eq!(buf.len(), 5);
//! assert_eq!(buf.read_u32(0).unwrap(), 0xDEAD_BEEF);
//! assert!(buf.read_bool(4).unwrap());
//! ```

use crate::error::{WireError, WireResult};
use crate::fixed::FixedBinary;

/// Length prefix width used by the sized-string encoding.
pub const SIZED_STR_PREFIX: usize = 4;

/// Encoded width of a `char`: one UTF-16 code unit.
pub const CHAR_SIZE: usize = 2;

// Slice-level decode cores, shared between the buffer's positional reads and
// the sequential reader.

pub(crate) fn slice_window(bytes: &[u8], position: usize, len: usize) -> WireResult<&[u8]> {
    let end = position
        .checked_add(len)
        .filter(|end| *end <= bytes.len())
        .ok_or_else(|| WireError::out_of_range(position, len, bytes.len()))?;
    bytes
        .get(position..end)
        .ok_or_else(|| WireError::out_of_range(position, len, bytes.len()))
}

pub(crate) fn decode_utf8(window: &[u8]) -> WireResult<String> {
    String::from_utf8(window.to_vec()).map_err(|e| WireError::InvalidString(e.to_string()))
}

#[allow(clippy::indexing_slicing)]
pub(crate) fn decode_utf16(window: &[u8]) -> WireResult<String> {
    let chunks = window.chunks_exact(2);
    if !chunks.remainder().is_empty() {
        return Err(WireError::InvalidString(format!(
            "odd UTF-16 byte length {}",
            window.len()
        )));
    }
    let units: Vec<u16> = chunks
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16(&units).map_err(|e| WireError::InvalidString(e.to_string()))
}

pub(crate) fn char_from_unit(unit: u16) -> WireResult<char> {
    char::from_u32(u32::from(unit)).ok_or(WireError::InvalidChar(u32::from(unit)))
}

/// An owned, append-oriented byte sequence.
///
/// # Invariants
///
/// - `len()` always equals the number of bytes written so far.
/// - Reads never mutate; out-of-bounds access is a checked
///   [`WireError::OutOfRange`], never a panic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    bytes: Vec<u8>,
}

impl ByteBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    /// Creates an empty buffer with preallocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Creates a buffer over existing bytes.
    #[must_use]
    pub fn from_vec(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Number of bytes in the buffer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the buffer holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Borrows the buffer contents.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the buffer, returning the underlying bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Resets length to zero, keeping the allocation.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Inserts one byte at `index`, shifting the tail right.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if `index > len()`.
    pub fn insert_byte(&mut self, index: usize, value: u8) -> WireResult<()> {
        if index > self.bytes.len() {
            return Err(WireError::out_of_range(index, 1, self.bytes.len()));
        }
        self.bytes.insert(index, value);
        Ok(())
    }

    // --- typed appends -------------------------------------------------

    /// Appends one byte.
    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    /// Appends one signed byte.
    pub fn write_i8(&mut self, value: i8) {
        self.bytes.push(value as u8);
    }

    /// Appends a `u16`, little-endian.
    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends an `i16`, little-endian.
    pub fn write_i16(&mut self, value: i16) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a `u32`, little-endian.
    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends an `i32`, little-endian.
    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a `u64`, little-endian.
    pub fn write_u64(&mut self, value: u64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends an `i64`, little-endian.
    pub fn write_i64(&mut self, value: i64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a `u128`, little-endian.
    pub fn write_u128(&mut self, value: u128) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends an `i128`, little-endian.
    pub fn write_i128(&mut self, value: i128) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends an `f32`, little-endian.
    pub fn write_f32(&mut self, value: f32) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends an `f64`, little-endian.
    pub fn write_f64(&mut self, value: f64) {
        self.bytes.extend_from_slice(&value.to_le_bytes());
    }

    /// Appends a bool as one byte (1 or 0).
    pub fn write_bool(&mut self, value: bool) {
        self.bytes.push(u8::from(value));
    }

    /// Appends a char as one little-endian UTF-16 code unit (2 bytes).
    ///
    /// # Errors
    ///
    /// Returns `WireError::InvalidChar` for chars outside the Basic
    /// Multilingual Plane, which need a surrogate pair.
    pub fn write_char(&mut self, value: char) -> WireResult<()> {
        let code = u32::from(value);
        let unit = u16::try_from(code).map_err(|_| WireError::InvalidChar(code))?;
        self.bytes.extend_from_slice(&unit.to_le_bytes());
        Ok(())
    }

    /// Appends raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Appends a string's UTF-8 bytes with no framing.
    pub fn write_str(&mut self, value: &str) {
        self.bytes.extend_from_slice(value.as_bytes());
    }

    /// Appends a string as little-endian UTF-16 code units with no framing.
    pub fn write_utf16_str(&mut self, value: &str) {
        for unit in value.encode_utf16() {
            self.bytes.extend_from_slice(&unit.to_le_bytes());
        }
    }

    /// Appends a u32 little-endian byte length followed by UTF-8 bytes.
    pub fn write_sized_str(&mut self, value: &str) {
        let raw = value.as_bytes();
        self.bytes
            .extend_from_slice(&(raw.len() as u32).to_le_bytes());
        self.bytes.extend_from_slice(raw);
    }

    /// Appends a fixed-layout value's encoding.
    pub fn write_value<T: FixedBinary>(&mut self, value: &T) {
        value.encode_into(self);
    }

    // --- positional reads ----------------------------------------------

    /// Borrows the `len`-byte window starting at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if the window extends past the end.
    pub fn window(&self, position: usize, len: usize) -> WireResult<&[u8]> {
        slice_window(&self.bytes, position, len)
    }

    /// Reads one byte at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_u8(&self, position: usize) -> WireResult<u8> {
        self.bytes
            .get(position)
            .copied()
            .ok_or_else(|| WireError::out_of_range(position, 1, self.bytes.len()))
    }

    /// Reads one signed byte at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_i8(&self, position: usize) -> WireResult<i8> {
        self.read_u8(position).map(|b| b as i8)
    }

    /// Reads a little-endian `u16` at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_u16(&self, position: usize) -> WireResult<u16> {
        self.read_value(position)
    }

    /// Reads a little-endian `i16` at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_i16(&self, position: usize) -> WireResult<i16> {
        self.read_value(position)
    }

    /// Reads a little-endian `u32` at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_u32(&self, position: usize) -> WireResult<u32> {
        self.read_value(position)
    }

    /// Reads a little-endian `i32` at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_i32(&self, position: usize) -> WireResult<i32> {
        self.read_value(position)
    }

    /// Reads a little-endian `u64` at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_u64(&self, position: usize) -> WireResult<u64> {
        self.read_value(position)
    }

    /// Reads a little-endian `i64` at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_i64(&self, position: usize) -> WireResult<i64> {
        self.read_value(position)
    }

    /// Reads a little-endian `u128` at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_u128(&self, position: usize) -> WireResult<u128> {
        self.read_value(position)
    }

    /// Reads a little-endian `i128` at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_i128(&self, position: usize) -> WireResult<i128> {
        self.read_value(position)
    }

    /// Reads a little-endian `f32` at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_f32(&self, position: usize) -> WireResult<f32> {
        self.read_value(position)
    }

    /// Reads a little-endian `f64` at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_f64(&self, position: usize) -> WireResult<f64> {
        self.read_value(position)
    }

    /// Reads a bool at `position` (nonzero is true).
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end.
    pub fn read_bool(&self, position: usize) -> WireResult<bool> {
        self.read_u8(position).map(|b| b != 0)
    }

    /// Reads a char stored as one little-endian UTF-16 code unit.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` past the end, or
    /// `WireError::InvalidChar` if the code unit is a surrogate.
    pub fn read_char(&self, position: usize) -> WireResult<char> {
        char_from_unit(self.read_u16(position)?)
    }

    /// Borrows `len` raw bytes at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if the window extends past the end.
    pub fn read_bytes(&self, position: usize, len: usize) -> WireResult<&[u8]> {
        self.window(position, len)
    }

    /// Reads `len` bytes at `position` as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if the window extends past the end,
    /// or `WireError::InvalidString` on invalid UTF-8.
    pub fn read_str(&self, position: usize, len: usize) -> WireResult<String> {
        decode_utf8(self.window(position, len)?)
    }

    /// Reads `len` bytes at `position` as little-endian UTF-16 code units.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if the window extends past the end,
    /// or `WireError::InvalidString` if `len` is odd or the code units are
    /// not well-formed UTF-16.
    pub fn read_utf16_str(&self, position: usize, len: usize) -> WireResult<String> {
        decode_utf16(self.window(position, len)?)
    }

    /// Reads a u32-length-prefixed UTF-8 string at `position`.
    ///
    /// Returns the string and the total consumed width (prefix + payload).
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if the prefix or payload extends past
    /// the end, or `WireError::InvalidString` on invalid UTF-8.
    pub fn read_sized_str(&self, position: usize) -> WireResult<(String, usize)> {
        let len = self.read_u32(position)? as usize;
        let payload = position
            .checked_add(SIZED_STR_PREFIX)
            .ok_or_else(|| WireError::out_of_range(position, SIZED_STR_PREFIX, self.len()))?;
        let value = self.read_str(payload, len)?;
        Ok((value, SIZED_STR_PREFIX + len))
    }

    /// Decodes a fixed-layout value from the window starting at `position`.
    ///
    /// # Errors
    ///
    /// Returns `WireError::OutOfRange` if fewer than `T::SIZE` bytes remain
    /// at `position`.
    pub fn read_value<T: FixedBinary>(&self, position: usize) -> WireResult<T> {
        T::decode(self.window(position, T::SIZE)?)
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_vec(bytes)
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_vec(bytes.to_vec())
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod writes {
        use super::*;

        #[test]
        fn integers_are_little_endian() {
            let mut buf = ByteBuffer::new();
            buf.write_u16(0x0201);
            buf.write_u32(0x0605_0403);
            buf.write_u64(0x0E0D_0C0B_0A09_0807);
            assert_eq!(
                buf.as_bytes(),
                &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]
            );
        }

        #[test]
        fn length_tracks_appends() {
            let mut buf = ByteBuffer::new();
            buf.write_u8(0);
            buf.write_i64(-1);
            buf.write_f32(0.5);
            buf.write_bool(false);
            assert_eq!(buf.len(), 1 + 8 + 4 + 1);
        }

        #[test]
        fn char_is_two_bytes() {
            let mut buf = ByteBuffer::new();
            buf.write_char('A').unwrap();
            buf.write_char('é').unwrap();
            assert_eq!(buf.len(), 2 * CHAR_SIZE);
            assert_eq!(buf.read_char(0).unwrap(), 'A');
            assert_eq!(buf.read_char(2).unwrap(), 'é');
        }

        #[test]
        fn non_bmp_char_is_rejected() {
            let mut buf = ByteBuffer::new();
            let err = buf.write_char('🦀').unwrap_err();
            assert_eq!(err, WireError::InvalidChar(u32::from('🦀')));
            assert!(buf.is_empty());
        }

        #[test]
        fn str_has_no_framing() {
            let mut buf = ByteBuffer::new();
            buf.write_str("héllo");
            assert_eq!(buf.len(), "héllo".len());
            assert_eq!(buf.read_str(0, buf.len()).unwrap(), "héllo");
        }

        #[test]
        fn utf16_str_is_code_units() {
            let mut buf = ByteBuffer::new();
            buf.write_utf16_str("ab");
            assert_eq!(buf.as_bytes(), &[b'a', 0, b'b', 0]);
            assert_eq!(buf.read_utf16_str(0, 4).unwrap(), "ab");
        }

        #[test]
        fn utf16_str_surrogate_pairs_roundtrip() {
            // write_char rejects non-BMP chars; the string path carries them
            // as surrogate pairs.
            let mut buf = ByteBuffer::new();
            buf.write_utf16_str("a🦀");
            assert_eq!(buf.len(), 6);
            assert_eq!(buf.read_utf16_str(0, 6).unwrap(), "a🦀");
        }

        #[test]
        fn utf16_odd_length_is_rejected() {
            let mut buf = ByteBuffer::new();
            buf.write_bytes(&[b'a', 0, b'b']);
            let err = buf.read_utf16_str(0, 3).unwrap_err();
            assert!(matches!(err, WireError::InvalidString(_)));
        }

        #[test]
        fn sized_str_prefixes_byte_length() {
            let mut buf = ByteBuffer::new();
            buf.write_sized_str("hey");
            assert_eq!(buf.as_bytes(), &[3, 0, 0, 0, b'h', b'e', b'y']);
            let (value, consumed) = buf.read_sized_str(0).unwrap();
            assert_eq!(value, "hey");
            assert_eq!(consumed, 7);
        }

        #[test]
        fn value_write_matches_typed_write() {
            let mut typed = ByteBuffer::new();
            typed.write_u32(99);
            let mut generic = ByteBuffer::new();
            generic.write_value(&99u32);
            assert_eq!(typed, generic);
        }
    }

    mod reads {
        use super::*;

        #[test]
        fn positional_reads_do_not_mutate() {
            let mut buf = ByteBuffer::new();
            buf.write_u32(7);
            buf.write_u32(11);
            // Any order, any number of times.
            assert_eq!(buf.read_u32(4).unwrap(), 11);
            assert_eq!(buf.read_u32(0).unwrap(), 7);
            assert_eq!(buf.read_u32(0).unwrap(), 7);
        }

        #[test]
        fn out_of_range_is_checked() {
            let mut buf = ByteBuffer::new();
            buf.write_u16(1);
            let err = buf.read_u32(0).unwrap_err();
            assert_eq!(err, WireError::out_of_range(0, 4, 2));
            let err = buf.read_u8(2).unwrap_err();
            assert_eq!(err, WireError::out_of_range(2, 1, 2));
        }

        #[test]
        fn overflowing_window_is_out_of_range() {
            let buf = ByteBuffer::from_vec(vec![0; 4]);
            let err = buf.read_bytes(usize::MAX, 2).unwrap_err();
            assert!(err.is_truncation());
        }

        #[test]
        fn invalid_utf8_is_rejected() {
            let buf = ByteBuffer::from_vec(vec![0xFF, 0xFE]);
            let err = buf.read_str(0, 2).unwrap_err();
            assert!(matches!(err, WireError::InvalidString(_)));
        }

        #[test]
        fn surrogate_code_unit_is_rejected() {
            let mut buf = ByteBuffer::new();
            buf.write_u16(0xD800);
            let err = buf.read_char(0).unwrap_err();
            assert_eq!(err, WireError::InvalidChar(0xD800));
        }

        #[test]
        fn sized_str_truncated_payload() {
            let mut buf = ByteBuffer::new();
            buf.write_u32(10); // claims 10 bytes, none follow
            let err = buf.read_sized_str(0).unwrap_err();
            assert!(err.is_truncation());
        }
    }

    mod mutation {
        use super::*;

        #[test]
        fn insert_byte_shifts_tail() {
            let mut buf = ByteBuffer::new();
            buf.write_bytes(&[2, 3, 4]);
            buf.insert_byte(0, 1).unwrap();
            assert_eq!(buf.as_bytes(), &[1, 2, 3, 4]);
            buf.insert_byte(4, 5).unwrap();
            assert_eq!(buf.as_bytes(), &[1, 2, 3, 4, 5]);
        }

        #[test]
        fn insert_past_end_fails() {
            let mut buf = ByteBuffer::new();
            buf.write_u8(0);
            let err = buf.insert_byte(2, 9).unwrap_err();
            assert!(err.is_truncation());
        }

        #[test]
        fn clear_resets_length() {
            let mut buf = ByteBuffer::new();
            buf.write_u64(1);
            buf.clear();
            assert!(buf.is_empty());
            buf.write_u8(5);
            assert_eq!(buf.as_bytes(), &[5]);
        }
    }
}
