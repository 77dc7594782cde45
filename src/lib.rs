//! rbencode - bencode codec and marshalling
//!
//! This library decodes and encodes bencode ([BEP-3]), the serialization used
//! by `.torrent` files, tracker responses and DHT messages, and maps it onto
//! Rust types.
//!
//! # Modules
//!
//! - [`bencode`] - Value tree, decoder, encoder and raw byte extraction
//! - [`marshal`] - `Marshal`/`Unmarshal` traits and `#[derive(Bencode)]`
//! - [`config`] - Decoder and encoder options
//! - [`constants`] - Wire tokens and defaults
//!
//! # Examples
//!
//! ```
//! use rbencode::{extract_raw, from_bytes, Bencode};
//!
//! #[derive(Debug, Default, Bencode)]
//! pub struct Torrent {
//!     pub announce: String,
//!     #[bencode(rename = "creation date")]
//!     pub creation_date: Option<i64>,
//! }
//!
//! let data = b"d8:announce18:http://tracker/ann13:creation datei1700000000e4:infod4:name1:xee";
//! let torrent: Torrent = from_bytes(data).unwrap();
//! assert_eq!(torrent.announce, "http://tracker/ann");
//! assert_eq!(torrent.creation_date, Some(1700000000));
//!
//! // The info dictionary, byte for byte, ready to be hashed
//! assert_eq!(extract_raw(data, b"info").unwrap(), b"d4:name1:xe");
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

// Lets `#[derive(Bencode)]` refer to `::rbencode` inside this crate.
extern crate self as rbencode;

pub mod bencode;
pub mod config;
pub mod constants;
pub mod marshal;

pub use bencode::{
    decode, decode_prefix, encode, encode_sorted, extract_raw, extract_raw_path, BencodeError,
    Decoder, Dict, Encoder, RawEntries, Value,
};
pub use config::{DecodeConfig, EncodeConfig};
pub use marshal::{
    from_bytes, from_value, marshal, marshal_with, unmarshal, unmarshal_with, Aggregate,
    Bencode, FieldDescriptor, MapKey, Marshal, Unmarshal,
};
