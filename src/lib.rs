//! # rlewire
//!
//! Binary buffer toolkit with typed little-endian encoding and a
//! run-length-encoded wire codec.
//!
//! Three strictly layered pieces:
//!
//! - [`ByteBuffer`] — growable byte sequence with typed appends and
//!   positional, cursorless reads.
//! - [`BufferReader`] — sequential cursor over a buffer, advancing by each
//!   read's encoded width.
//! - [`rle`] — `compress`/`decompress` of fixed-layout value sequences into
//!   a mode-prefixed byte stream, falling back to flat storage when
//!   run-length records would not shrink the data.
//!
//! Element types implement [`FixedBinary`], which fixes their encoded width
//! ahead of decoding; the wire format carries no type tag, so producer and
//! consumer must agree on the element type.
//!
//! All types are transient and exclusively owned per call: no global state,
//! no internal synchronization, no I/O. Failures surface as [`WireError`];
//! nothing panics on malformed input.
//!
//! # Examples
//!
//! ```
//! use rlewire::rle;
//!
//! let readings = [20i16, 20, 20, 20, 21, 21, 19];
//! let stream = rle::compress(&readings).unwrap();
//! let back: Vec<i16> = rle::decompress(&stream).unwrap();
//! assert_eq!(back, readings);
//! ```

pub mod buffer;
pub mod error;
pub mod fixed;
pub mod reader;
pub mod rle;

pub use buffer::ByteBuffer;
pub use error::{WireError, WireResult};
pub use fixed::FixedBinary;
pub use reader::BufferReader;
