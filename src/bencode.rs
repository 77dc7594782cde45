//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Examples
//!
//! ## Decoding bencode data
//!
//! ```
//! use rbencode::bencode::{decode, Value};
//!
//! // Decode an integer
//! let value = decode(b"i42e").unwrap();
//! assert_eq!(value.as_integer(), Some(42));
//!
//! // Decode a string
//! let value = decode(b"4:spam").unwrap();
//! assert_eq!(value.as_str(), Some("spam"));
//!
//! // Decode a list
//! let value = decode(b"l4:spami42ee").unwrap();
//! let list = value.as_list().unwrap();
//! assert_eq!(list.len(), 2);
//!
//! // Decode a dictionary
//! let value = decode(b"d3:foo3:bare").unwrap();
//! let foo = value.get(b"foo").unwrap();
//! assert_eq!(foo.as_str(), Some("bar"));
//! ```
//!
//! ## Preserving original bytes
//!
//! Re-encoding a decoded dictionary follows the order its keys were read in,
//! but sorted output or values built by hand will differ from the source.
//! When the exact bytes matter, slice them out instead:
//!
//! ```
//! use rbencode::bencode::{decode, encode_sorted, extract_raw};
//!
//! let data = b"d4:infod1:bi2e1:ai1eee";
//! let raw = extract_raw(data, b"info").unwrap();
//! assert_eq!(raw, b"d1:bi2e1:ai1ee");
//!
//! let info = decode(raw).unwrap();
//! assert_ne!(encode_sorted(&info).unwrap(), raw);
//! ```
//!
//! # Error Handling
//!
//! Decoding can fail for various reasons:
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended unexpectedly
//! - [`BencodeError::InvalidInteger`] - Malformed integer (e.g., leading zeros)
//! - [`BencodeError::MissingColon`] - Length prefix not followed by `:`
//! - [`BencodeError::DuplicateKey`] - A dictionary repeats a key
//! - [`BencodeError::UnexpectedChar`] - Unexpected character in input
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded (64 levels by default)
//! - [`BencodeError::TrailingData`] - Extra data after the value
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod raw;
mod value;

pub use decode::{decode, decode_prefix, Decoder};
pub use encode::{encode, encode_sorted, encode_with, Encoder};
pub use error::BencodeError;
pub use raw::{extract_raw, extract_raw_path, RawEntries};
pub use value::{Dict, Value};

#[cfg(test)]
mod tests;
