use crate::bencode::BencodeError;
use bytes::Bytes;

/// Types usable as map keys on both sides of the mapping.
///
/// Bencode dictionary keys are byte strings. `String` keys additionally
/// require the bytes to be valid UTF-8 when unmarshalling.
pub trait MapKey: Sized {
    fn key_bytes(&self) -> &[u8];

    fn from_key_bytes(bytes: &Bytes) -> Result<Self, BencodeError>;
}

impl MapKey for String {
    fn key_bytes(&self) -> &[u8] {
        self.as_bytes()
    }

    fn from_key_bytes(bytes: &Bytes) -> Result<Self, BencodeError> {
        String::from_utf8(bytes.to_vec()).map_err(|_| BencodeError::IncompatibleConversion {
            from: "non-UTF-8 byte string",
            to: "String",
        })
    }
}

impl MapKey for Bytes {
    fn key_bytes(&self) -> &[u8] {
        self
    }

    fn from_key_bytes(bytes: &Bytes) -> Result<Self, BencodeError> {
        Ok(bytes.clone())
    }
}
