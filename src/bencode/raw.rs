//! Byte-exact access to dictionary entries.
//!
//! Decoding and re-encoding a dictionary only reproduces the input when its
//! keys come back in the same order. Anything that must hash or forward the
//! original bytes (an `info` dictionary, for instance) should slice them out
//! here instead.

use super::decode::{lossy, Cursor, Decoder};
use super::error::BencodeError;
use crate::config::DecodeConfig;
use crate::constants::{DICT_START, END};
use tracing::trace;

/// Returns the exact bytes of the value stored under `key` in the top-level
/// dictionary of `data`.
///
/// Keys are validated as byte strings; values before the match are scanned
/// without being materialized. The returned slice borrows from `data`.
///
/// The scan stops at the first matching key. A later duplicate of that key is
/// not detected here, although [`decode`](crate::decode) rejects it.
///
/// # Errors
///
/// - [`BencodeError::NotADictionary`] if `data` does not start with `d`
/// - [`BencodeError::KeyNotFound`] if the dictionary ends without `key`
/// - any structural error met while scanning up to the match
///
/// # Examples
///
/// ```
/// use rbencode::extract_raw;
///
/// let data = b"d8:announce3:url4:infod4:name4:test6:lengthi3eee";
/// let info = extract_raw(data, b"info").unwrap();
/// assert_eq!(info, b"d4:name4:test6:lengthi3ee");
/// ```
pub fn extract_raw<'a>(data: &'a [u8], key: &[u8]) -> Result<&'a [u8], BencodeError> {
    Decoder::default().extract_raw(data, key)
}

/// Follows `path` through nested dictionaries and returns the raw bytes of the
/// last key. An empty path returns `data` unchanged.
///
/// # Examples
///
/// ```
/// use rbencode::extract_raw_path;
///
/// let data = b"d4:infod4:name4:test6:lengthi3eee";
/// assert_eq!(extract_raw_path(data, ["info", "length"]).unwrap(), b"i3e");
/// ```
pub fn extract_raw_path<'a, I>(data: &'a [u8], path: I) -> Result<&'a [u8], BencodeError>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let decoder = Decoder::default();
    path.into_iter()
        .try_fold(data, |raw, key| decoder.extract_raw(raw, key.as_ref()))
}

impl Decoder {
    /// [`extract_raw`] with this decoder's configuration.
    pub fn extract_raw<'a>(&self, data: &'a [u8], key: &[u8]) -> Result<&'a [u8], BencodeError> {
        for entry in self.raw_entries(data)? {
            let (entry_key, raw) = entry?;
            if entry_key == key {
                trace!(
                    "raw entry {:?} found ({} bytes)",
                    String::from_utf8_lossy(key),
                    raw.len()
                );
                return Ok(raw);
            }
            trace!("skipping raw entry {:?}", String::from_utf8_lossy(entry_key));
        }

        Err(BencodeError::KeyNotFound(lossy(key)))
    }

    /// Iterates over the entries of the top-level dictionary of `data`.
    pub fn raw_entries<'a>(&self, data: &'a [u8]) -> Result<RawEntries<'a>, BencodeError> {
        RawEntries::with_config(data, *self.config())
    }
}

/// Iterator over `(key, raw value)` pairs of a bencoded dictionary.
///
/// Each item borrows both slices from the input. The iterator stops after the
/// closing `e` or after the first error.
///
/// # Examples
///
/// ```
/// use rbencode::RawEntries;
///
/// let entries = RawEntries::new(b"d1:ai1e1:bli2eee")
///     .unwrap()
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// assert_eq!(entries, vec![(&b"a"[..], &b"i1e"[..]), (&b"b"[..], &b"li2ee"[..])]);
/// ```
pub struct RawEntries<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> RawEntries<'a> {
    pub fn new(data: &'a [u8]) -> Result<Self, BencodeError> {
        Self::with_config(data, DecodeConfig::default())
    }

    pub fn with_config(data: &'a [u8], config: DecodeConfig) -> Result<Self, BencodeError> {
        let mut cursor = Cursor::new(data, config);
        if cursor.peek()? != DICT_START {
            return Err(BencodeError::NotADictionary);
        }
        cursor.advance();

        Ok(Self {
            cursor,
            done: false,
        })
    }

    /// Bytes of the input consumed so far, including the opening `d`.
    pub fn consumed(&self) -> usize {
        self.cursor.position()
    }

    fn next_entry(&mut self) -> Result<Option<(&'a [u8], &'a [u8])>, BencodeError> {
        if self.cursor.peek()? == END {
            self.cursor.advance();
            return Ok(None);
        }

        let key = self.cursor.parse_key()?;
        if self.cursor.peek()? == END {
            return Err(BencodeError::MissingValue(lossy(key)));
        }

        let start = self.cursor.position();
        self.cursor.skip_value(1)?;
        Ok(Some((key, self.cursor.slice_from(start))))
    }
}

impl<'a> Iterator for RawEntries<'a> {
    type Item = Result<(&'a [u8], &'a [u8]), BencodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_entry() {
            Ok(Some(entry)) => Some(Ok(entry)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
