use super::error::BencodeError;
use super::value::{Dict, Value};
use crate::config::DecodeConfig;
use crate::constants::{DICT_START, END, INT_START, LIST_START, MINUS, STRING_DELIMITER};
use bytes::Bytes;
use tracing::debug;

/// Decodes a complete bencode document.
///
/// The input must contain exactly one value; anything after it is reported as
/// [`BencodeError::TrailingData`]. Uses [`DecodeConfig::default`].
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    Decoder::default().decode(data)
}

/// Decodes the first value of `data` and returns it with the number of bytes
/// it occupied. Bytes after the value are left untouched.
///
/// # Examples
///
/// ```
/// use rbencode::{decode_prefix, Value};
///
/// let (value, consumed) = decode_prefix(b"i42etrailer").unwrap();
/// assert_eq!(value, Value::Integer(42));
/// assert_eq!(consumed, 4);
/// ```
pub fn decode_prefix(data: &[u8]) -> Result<(Value, usize), BencodeError> {
    Decoder::default().decode_prefix(data)
}

/// A configured decoder.
///
/// The free functions [`decode`] and [`decode_prefix`] use the default
/// configuration; build a `Decoder` to change the depth limit or to accept
/// non-canonical integers.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder {
    config: DecodeConfig,
}

impl Decoder {
    pub fn new(config: DecodeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    pub fn decode(&self, data: &[u8]) -> Result<Value, BencodeError> {
        let (value, consumed) = self.decode_prefix(data)?;

        if consumed != data.len() {
            return Err(BencodeError::TrailingData);
        }

        Ok(value)
    }

    pub fn decode_prefix(&self, data: &[u8]) -> Result<(Value, usize), BencodeError> {
        let mut cursor = Cursor::new(data, self.config);
        let value = cursor.decode_value(0)?;
        Ok((value, cursor.position()))
    }
}

/// Position over a fully buffered input.
///
/// Both the decoder and the raw scanner walk the grammar through this type, so
/// integers and length prefixes are validated identically on both paths.
pub(crate) struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
    config: DecodeConfig,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(data: &'a [u8], config: DecodeConfig) -> Self {
        Self {
            data,
            pos: 0,
            config,
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    pub(crate) fn peek(&self) -> Result<u8, BencodeError> {
        self.data
            .get(self.pos)
            .copied()
            .ok_or(BencodeError::UnexpectedEof)
    }

    pub(crate) fn advance(&mut self) {
        self.pos += 1;
    }

    /// Input consumed since `start`.
    pub(crate) fn slice_from(&self, start: usize) -> &'a [u8] {
        &self.data[start..self.pos]
    }

    fn enter(&self, depth: usize) -> Result<(), BencodeError> {
        if depth > self.config.max_depth {
            debug!(
                "bencode nesting limit {} exceeded at offset {}",
                self.config.max_depth, self.pos
            );
            return Err(BencodeError::NestingTooDeep);
        }
        Ok(())
    }

    pub(crate) fn decode_value(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.enter(depth)?;

        match self.peek()? {
            INT_START => self.parse_integer().map(Value::Integer),
            LIST_START => self.decode_list(depth),
            DICT_START => self.decode_dict(depth),
            b'0'..=b'9' => self
                .parse_bytes()
                .map(|b| Value::Bytes(Bytes::copy_from_slice(b))),
            c => Err(BencodeError::UnexpectedChar(c as char)),
        }
    }

    /// Walks one value without building it.
    pub(crate) fn skip_value(&mut self, depth: usize) -> Result<(), BencodeError> {
        self.enter(depth)?;

        match self.peek()? {
            INT_START => self.parse_integer().map(drop),
            b'0'..=b'9' => self.parse_bytes().map(drop),
            LIST_START => {
                self.advance();
                while self.peek()? != END {
                    self.skip_value(depth + 1)?;
                }
                self.advance();
                Ok(())
            }
            DICT_START => {
                self.advance();
                while self.peek()? != END {
                    let key = self.parse_key()?;
                    if self.peek()? == END {
                        return Err(BencodeError::MissingValue(lossy(key)));
                    }
                    self.skip_value(depth + 1)?;
                }
                self.advance();
                Ok(())
            }
            c => Err(BencodeError::UnexpectedChar(c as char)),
        }
    }

    fn parse_integer(&mut self) -> Result<i64, BencodeError> {
        self.advance();

        let start = self.pos;
        let mut negative = false;
        let mut digits = 0usize;
        let mut value: i64 = 0;

        loop {
            let byte = self.peek()?;
            match byte {
                b'0'..=b'9' => {
                    let digit = i64::from(byte - b'0');
                    value = value
                        .checked_mul(10)
                        .and_then(|v| {
                            if negative {
                                v.checked_sub(digit)
                            } else {
                                v.checked_add(digit)
                            }
                        })
                        .ok_or_else(|| BencodeError::InvalidInteger("overflow".into()))?;
                    digits += 1;
                }
                MINUS => {
                    if negative || digits > 0 {
                        return Err(BencodeError::InvalidInteger("misplaced sign".into()));
                    }
                    negative = true;
                }
                END => break,
                c => {
                    return Err(BencodeError::InvalidInteger(format!(
                        "unexpected character {:?}",
                        c as char
                    )))
                }
            }
            self.advance();
        }

        if digits == 0 {
            return Err(BencodeError::InvalidInteger("empty".into()));
        }

        if self.config.strict_integers {
            let magnitude = &self.data[start + usize::from(negative)..self.pos];
            if negative && value == 0 {
                return Err(BencodeError::InvalidInteger("negative zero".into()));
            }
            if magnitude.len() > 1 && magnitude[0] == b'0' {
                return Err(BencodeError::InvalidInteger("leading zeros".into()));
            }
        }

        self.advance();
        Ok(value)
    }

    /// Parses `<len>:<payload>` and borrows the payload from the input.
    pub(crate) fn parse_bytes(&mut self) -> Result<&'a [u8], BencodeError> {
        let mut len: usize = 0;

        loop {
            let byte = self.peek()?;
            match byte {
                b'0'..=b'9' => {
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(byte - b'0')))
                        .ok_or(BencodeError::InvalidStringLength)?;
                    self.advance();
                }
                STRING_DELIMITER => break,
                _ => return Err(BencodeError::MissingColon),
            }
        }

        self.advance();

        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(BencodeError::UnexpectedEof)?;

        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub(crate) fn parse_key(&mut self) -> Result<&'a [u8], BencodeError> {
        match self.peek()? {
            b'0'..=b'9' => self.parse_bytes(),
            c => Err(BencodeError::InvalidKey(c as char)),
        }
    }

    fn decode_list(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.advance();
        let mut list = Vec::new();

        while self.peek()? != END {
            list.push(self.decode_value(depth + 1)?);
        }

        self.advance();
        Ok(Value::List(list))
    }

    fn decode_dict(&mut self, depth: usize) -> Result<Value, BencodeError> {
        self.advance();
        let mut dict = Dict::new();

        while self.peek()? != END {
            let key = self.parse_key()?;
            if dict.contains_key(key) {
                return Err(BencodeError::DuplicateKey(lossy(key)));
            }
            if self.peek()? == END {
                return Err(BencodeError::MissingValue(lossy(key)));
            }

            let value = self.decode_value(depth + 1)?;
            dict.insert(Bytes::copy_from_slice(key), value);
        }

        self.advance();
        Ok(Value::Dict(dict))
    }
}

pub(crate) fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
