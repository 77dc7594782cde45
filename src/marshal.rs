//! Type-directed conversion between Rust values and bencode.
//!
//! [`Marshal`] writes a value straight to an [`Encoder`](crate::Encoder)
//! without building a [`Value`](crate::Value) tree. [`Unmarshal`] populates
//! an existing value from a decoded tree.
//!
//! Structs opt in with `#[derive(Bencode)]`, which generates a
//! [`FieldDescriptor`] table and both trait implementations:
//!
//! - a field is stored under its own name unless renamed with
//!   `#[bencode(rename = "...")]`;
//! - `#[bencode(skip)]` fields are ignored in both directions;
//! - fields that are not `pub` are always ignored.
//!
//! # Examples
//!
//! ```
//! use rbencode::{marshal, unmarshal, Bencode};
//!
//! #[derive(Debug, Default, PartialEq, Bencode)]
//! pub struct Info {
//!     pub name: String,
//!     #[bencode(rename = "piece length")]
//!     pub piece_length: i64,
//!     pub files: Vec<FileEntry>,
//!     #[bencode(skip)]
//!     pub cached_size: u64,
//! }
//!
//! #[derive(Debug, Default, PartialEq, Bencode)]
//! pub struct FileEntry {
//!     pub length: i64,
//!     pub path: Vec<String>,
//! }
//!
//! let info = Info {
//!     name: "demo".into(),
//!     piece_length: 16384,
//!     files: vec![FileEntry { length: 3, path: vec!["a.txt".into()] }],
//!     cached_size: 3,
//! };
//!
//! let bytes = marshal(&info).unwrap();
//! assert_eq!(
//!     bytes,
//!     b"d4:name4:demo12:piece lengthi16384e5:filesld6:lengthi3e4:pathl5:a.txteeee".as_slice()
//! );
//!
//! let mut decoded = Info::default();
//! unmarshal(&bytes, &mut decoded).unwrap();
//! assert_eq!(decoded.files, info.files);
//! assert_eq!(decoded.cached_size, 0);
//! ```
//!
//! # Empty strings
//!
//! Map entries and struct fields holding an empty string are not written at
//! all. Unmarshalling such output leaves the corresponding field at whatever
//! value it already had.

mod field;
mod from_bencode;
mod key;
mod to_bencode;

pub use field::{marshal_aggregate, unmarshal_aggregate, Aggregate, FieldDescriptor};
pub use from_bencode::{from_bytes, from_value, unmarshal, unmarshal_with, Unmarshal};
pub use key::MapKey;
pub use rbencode_derive::Bencode;
pub use to_bencode::{marshal, marshal_with, Marshal};
