use super::key::MapKey;
use crate::bencode::{BencodeError, Encoder, Value};
use crate::config::EncodeConfig;
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};

/// Types that can write themselves as bencode.
///
/// Implemented for integers, strings, [`Bytes`], [`Value`], sequences, maps
/// keyed by a [`MapKey`], `Option`, `Box` and references. Structs get an
/// implementation from `#[derive(Bencode)]`.
pub trait Marshal {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError>;

    /// True for text holding the empty string.
    ///
    /// Map entries and struct fields whose value reports `true` are left out
    /// of the enclosing dictionary.
    fn is_empty_text(&self) -> bool {
        false
    }
}

/// Marshals `value` into a new buffer, writing dictionaries in iteration order.
///
/// # Examples
///
/// ```
/// use rbencode::marshal;
/// use std::collections::BTreeMap;
///
/// let mut peers = BTreeMap::new();
/// peers.insert("interval".to_string(), vec![1800, 900]);
/// assert_eq!(marshal(&peers).unwrap(), b"d8:intervalli1800ei900eee");
/// ```
pub fn marshal<T: Marshal + ?Sized>(value: &T) -> Result<Vec<u8>, BencodeError> {
    marshal_with(value, EncodeConfig::default())
}

pub fn marshal_with<T: Marshal + ?Sized>(
    value: &T,
    config: EncodeConfig,
) -> Result<Vec<u8>, BencodeError> {
    let mut encoder = Encoder::with_config(config);
    value.marshal(&mut encoder)?;
    Ok(encoder.into_bytes())
}

macro_rules! marshal_lossless_integer {
    ($($t:ty),*) => {$(
        impl Marshal for $t {
            fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
                encoder.write_integer(i64::from(*self))
            }
        }
    )*};
}

macro_rules! marshal_checked_integer {
    ($($t:ty),*) => {$(
        impl Marshal for $t {
            fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
                let value = i64::try_from(*self).map_err(|_| {
                    BencodeError::IntegerOutOfRange(format!(
                        "{} does not fit in a bencode integer",
                        self
                    ))
                })?;
                encoder.write_integer(value)
            }
        }
    )*};
}

marshal_lossless_integer!(i8, i16, i32, i64, u8, u16, u32);
marshal_checked_integer!(isize, u64, usize);

impl Marshal for str {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
        encoder.write_str(self)
    }

    fn is_empty_text(&self) -> bool {
        self.is_empty()
    }
}

impl Marshal for String {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
        self.as_str().marshal(encoder)
    }

    fn is_empty_text(&self) -> bool {
        self.is_empty()
    }
}

// Binary payloads are never elided, empty or not.
impl Marshal for Bytes {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
        encoder.write_bytes(self)
    }
}

impl Marshal for Value {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
        encoder.write_value(self)
    }
}

impl<T: Marshal + ?Sized> Marshal for &T {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
        (**self).marshal(encoder)
    }

    fn is_empty_text(&self) -> bool {
        (**self).is_empty_text()
    }
}

impl<T: Marshal + ?Sized> Marshal for Box<T> {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
        (**self).marshal(encoder)
    }

    fn is_empty_text(&self) -> bool {
        (**self).is_empty_text()
    }
}

/// An absent value is written as `T::default()`; the option itself is left
/// untouched.
impl<T: Marshal + Default> Marshal for Option<T> {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
        match self {
            Some(value) => value.marshal(encoder),
            None => T::default().marshal(encoder),
        }
    }

    fn is_empty_text(&self) -> bool {
        match self {
            Some(value) => value.is_empty_text(),
            None => T::default().is_empty_text(),
        }
    }
}

impl<T: Marshal> Marshal for [T] {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
        encoder.begin_list()?;
        for item in self {
            item.marshal(encoder)?;
        }
        encoder.end()
    }
}

impl<T: Marshal> Marshal for Vec<T> {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
        self.as_slice().marshal(encoder)
    }
}

impl<T: Marshal, const N: usize> Marshal for [T; N] {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
        self.as_slice().marshal(encoder)
    }
}

fn marshal_entries<'a, K, V, I>(entries: I, encoder: &mut Encoder) -> Result<(), BencodeError>
where
    K: MapKey + 'a,
    V: Marshal + 'a,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    let mut entries: Vec<_> = entries.filter(|(_, v)| !v.is_empty_text()).collect();
    if encoder.sorts_keys() {
        entries.sort_by(|a, b| a.0.key_bytes().cmp(b.0.key_bytes()));
    }

    encoder.begin_dict()?;
    for (key, value) in entries {
        encoder.write_bytes(key.key_bytes())?;
        value.marshal(encoder)?;
    }
    encoder.end()
}

impl<K: MapKey, V: Marshal, S> Marshal for HashMap<K, V, S> {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
        marshal_entries(self.iter(), encoder)
    }
}

impl<K: MapKey, V: Marshal> Marshal for BTreeMap<K, V> {
    fn marshal(&self, encoder: &mut Encoder) -> Result<(), BencodeError> {
        marshal_entries(self.iter(), encoder)
    }
}
