use super::error::BencodeError;
use super::value::Value;
use crate::config::EncodeConfig;
use crate::constants::{DICT_START, END, INT_START, LIST_START, STRING_DELIMITER};
use std::io::Write;

/// Encodes a bencode value to a byte vector.
///
/// The output follows the bencode format:
/// - Integers: `i<number>e`
/// - Byte strings: `<length>:<data>` (an empty string is `0:`)
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e`, keys in the dictionary's insertion order
///
/// Use [`encode_sorted`] for canonical output.
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails.
///
/// # Examples
///
/// ```
/// use rbencode::{encode, Dict, Value};
/// use bytes::Bytes;
///
/// // Encode an integer
/// let encoded = encode(&Value::Integer(42)).unwrap();
/// assert_eq!(encoded, b"i42e");
///
/// // Encode a string
/// let encoded = encode(&Value::string("hello")).unwrap();
/// assert_eq!(encoded, b"5:hello");
///
/// // Encode a list
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// let encoded = encode(&list).unwrap();
/// assert_eq!(encoded, b"li1e3:twoe");
///
/// // Dictionaries keep insertion order
/// let mut dict = Dict::new();
/// dict.insert(Bytes::from_static(b"b"), Value::Integer(2));
/// dict.insert(Bytes::from_static(b"a"), Value::Integer(1));
/// let encoded = encode(&Value::Dict(dict)).unwrap();
/// assert_eq!(encoded, b"d1:bi2e1:ai1ee");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, BencodeError> {
    encode_with(value, EncodeConfig::default())
}

/// Encodes a value with every dictionary's keys in ascending byte order.
///
/// # Examples
///
/// ```
/// use rbencode::{decode, encode_sorted};
///
/// let value = decode(b"d1:bi2e1:ai1ee").unwrap();
/// assert_eq!(encode_sorted(&value).unwrap(), b"d1:ai1e1:bi2ee");
/// ```
pub fn encode_sorted(value: &Value) -> Result<Vec<u8>, BencodeError> {
    encode_with(value, EncodeConfig::sorted())
}

pub fn encode_with(value: &Value, config: EncodeConfig) -> Result<Vec<u8>, BencodeError> {
    let mut encoder = Encoder::with_config(config);
    encoder.write_value(value)?;
    Ok(encoder.into_bytes())
}

/// Low-level bencode writer.
///
/// The encoder appends tokens to an owned buffer. It does not track nesting:
/// every [`begin_list`](Self::begin_list) or [`begin_dict`](Self::begin_dict)
/// must be closed with [`end`](Self::end), and dictionary contents must
/// alternate between a byte-string key and a value.
///
/// # Examples
///
/// ```
/// use rbencode::Encoder;
///
/// let mut encoder = Encoder::new();
/// encoder.begin_dict().unwrap();
/// encoder.write_str("port").unwrap();
/// encoder.write_integer(6881).unwrap();
/// encoder.end().unwrap();
/// assert_eq!(encoder.into_bytes(), b"d4:porti6881ee");
/// ```
#[derive(Debug, Default)]
pub struct Encoder {
    buf: Vec<u8>,
    config: EncodeConfig,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EncodeConfig) -> Self {
        Self {
            buf: Vec::new(),
            config,
        }
    }

    /// Whether dictionaries should be written with sorted keys.
    pub fn sorts_keys(&self) -> bool {
        self.config.sort_keys
    }

    pub fn write_integer(&mut self, i: i64) -> Result<(), BencodeError> {
        self.buf.push(INT_START);
        write!(self.buf, "{}", i)?;
        self.buf.push(END);
        Ok(())
    }

    pub fn write_bytes(&mut self, b: &[u8]) -> Result<(), BencodeError> {
        write!(self.buf, "{}", b.len())?;
        self.buf.push(STRING_DELIMITER);
        self.buf.write_all(b)?;
        Ok(())
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), BencodeError> {
        self.write_bytes(s.as_bytes())
    }

    pub fn begin_list(&mut self) -> Result<(), BencodeError> {
        self.buf.push(LIST_START);
        Ok(())
    }

    pub fn begin_dict(&mut self) -> Result<(), BencodeError> {
        self.buf.push(DICT_START);
        Ok(())
    }

    pub fn end(&mut self) -> Result<(), BencodeError> {
        self.buf.push(END);
        Ok(())
    }

    /// Writes a whole value tree.
    pub fn write_value(&mut self, value: &Value) -> Result<(), BencodeError> {
        match value {
            Value::Integer(i) => self.write_integer(*i)?,
            Value::Bytes(b) => self.write_bytes(b)?,
            Value::List(l) => {
                self.begin_list()?;
                for item in l {
                    self.write_value(item)?;
                }
                self.end()?;
            }
            Value::Dict(d) => {
                self.begin_dict()?;
                let mut entries: Vec<_> = d.iter().collect();
                if self.sorts_keys() {
                    entries.sort_by(|a, b| a.0.cmp(b.0));
                }
                for (key, val) in entries {
                    self.write_bytes(key)?;
                    self.write_value(val)?;
                }
                self.end()?;
            }
        }
        Ok(())
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
