use thiserror::Error;

/// Errors produced by decoding, raw extraction, encoding and (un)marshalling.
#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    #[error("invalid string length")]
    InvalidStringLength,

    #[error("missing ':' after string length")]
    MissingColon,

    #[error("unexpected character: {0:?}")]
    UnexpectedChar(char),

    /// A dictionary key did not start with a length prefix.
    #[error("dictionary key must be a byte string, found {0:?}")]
    InvalidKey(char),

    #[error("duplicate dictionary key: {0}")]
    DuplicateKey(String),

    #[error("dictionary key has no value: {0}")]
    MissingValue(String),

    #[error("trailing data after value")]
    TrailingData,

    #[error("nesting too deep")]
    NestingTooDeep,

    #[error("not a dictionary")]
    NotADictionary,

    #[error("key not found: {0}")]
    KeyNotFound(String),

    #[error("integer out of range: {0}")]
    IntegerOutOfRange(String),

    /// A bencode leaf could not be stored in the destination type.
    #[error("cannot convert {from} to {to}")]
    IncompatibleConversion {
        from: &'static str,
        to: &'static str,
    },

    /// A list or dictionary was unmarshalled into a type of another shape.
    #[error("cannot unmarshal {found} into {target}")]
    UnsupportedShape {
        found: &'static str,
        target: &'static str,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
