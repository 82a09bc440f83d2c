//! # Lodestar XDR
//!
//! The byte codec underneath every Lodestar transaction: a big-endian,
//! 4-byte aligned encoding in the style of RFC 4506 (XDR).
//!
//! This crate knows nothing about accounts, assets or operations. It only
//! provides the scalar rules that every domain type is built from.
//!
//! ## Key Types
//!
//! - [`XdrWriter`] - Append-only encoder producing aligned bytes
//! - [`XdrReader`] - Bounds-checked decode cursor over a byte slice
//! - [`XdrEncode`] / [`XdrDecode`] - Implemented by every wire type
//! - [`Sha256Hash`] - Transaction hashing
//!
//! ## Encoding Rules
//!
//! - Integers are big-endian, 4 or 8 bytes
//! - Booleans are a `u32` of 0 or 1
//! - Opaque data and strings are zero-padded to a multiple of 4
//! - Variable-length data carries a `u32` length prefix (unpadded length)
//! - Optional values carry a boolean presence flag
//!
//! Any read past the end of the input fails with [`XdrError::UnexpectedEof`].

pub mod checksum;
pub mod codec;
pub mod error;
pub mod reader;
pub mod writer;

pub use checksum::{crc16_xmodem, Sha256Hash};
pub use codec::{decode_base64, encode_base64, padding_for, XdrDecode, XdrEncode};
pub use error::{Result, XdrError};
pub use reader::XdrReader;
pub use writer::XdrWriter;
