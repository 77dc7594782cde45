use super::key::MapKey;
use crate::bencode::{BencodeError, Decoder, Dict, Value};
use crate::config::DecodeConfig;
use bytes::Bytes;
use std::any::type_name;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Types that can be populated from a decoded [`Value`].
///
/// Unmarshalling writes into an existing value. Scalars, sequences and maps
/// are replaced; `Option` and `Box` are followed to the innermost slot,
/// creating absent levels with `Default`; structs derived with
/// `#[derive(Bencode)]` only touch the fields present in the input.
pub trait Unmarshal {
    fn unmarshal_from(&mut self, value: &Value) -> Result<(), BencodeError>;
}

/// Decodes `data` and populates `target` from it.
///
/// The whole input must be a single value.
///
/// # Examples
///
/// ```
/// use rbencode::unmarshal;
///
/// let mut ports: Vec<u16> = Vec::new();
/// unmarshal(b"li6881ei6882ee", &mut ports).unwrap();
/// assert_eq!(ports, vec![6881, 6882]);
/// ```
pub fn unmarshal<T: Unmarshal + ?Sized>(data: &[u8], target: &mut T) -> Result<(), BencodeError> {
    unmarshal_with(data, target, DecodeConfig::default())
}

pub fn unmarshal_with<T: Unmarshal + ?Sized>(
    data: &[u8],
    target: &mut T,
    config: DecodeConfig,
) -> Result<(), BencodeError> {
    let value = Decoder::new(config).decode(data)?;
    target.unmarshal_from(&value)
}

/// Unmarshals into a fresh `T::default()`.
pub fn from_bytes<T: Unmarshal + Default>(data: &[u8]) -> Result<T, BencodeError> {
    let mut target = T::default();
    unmarshal(data, &mut target)?;
    Ok(target)
}

/// Populates a fresh `T::default()` from an already decoded value.
///
/// # Examples
///
/// ```
/// use rbencode::{decode, from_value};
///
/// let value = decode(b"d4:porti6881ee").unwrap();
/// let port: u16 = from_value(value.get(b"port").unwrap()).unwrap();
/// assert_eq!(port, 6881);
/// ```
pub fn from_value<T: Unmarshal + Default>(value: &Value) -> Result<T, BencodeError> {
    let mut target = T::default();
    target.unmarshal_from(value)?;
    Ok(target)
}

/// Error for a value that does not fit the destination type `T`.
pub(crate) fn mismatch<T: ?Sized>(value: &Value) -> BencodeError {
    match value {
        Value::Integer(_) | Value::Bytes(_) => BencodeError::IncompatibleConversion {
            from: value.kind(),
            to: type_name::<T>(),
        },
        Value::List(_) | Value::Dict(_) => BencodeError::UnsupportedShape {
            found: value.kind(),
            target: type_name::<T>(),
        },
    }
}

macro_rules! unmarshal_integer {
    ($($t:ty),*) => {$(
        impl Unmarshal for $t {
            fn unmarshal_from(&mut self, value: &Value) -> Result<(), BencodeError> {
                match value {
                    Value::Integer(i) => {
                        *self = <$t>::try_from(*i).map_err(|_| {
                            BencodeError::IntegerOutOfRange(format!(
                                "{} does not fit in {}",
                                i,
                                stringify!($t)
                            ))
                        })?;
                        Ok(())
                    }
                    other => Err(mismatch::<$t>(other)),
                }
            }
        }
    )*};
}

unmarshal_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Unmarshal for String {
    fn unmarshal_from(&mut self, value: &Value) -> Result<(), BencodeError> {
        match value {
            Value::Bytes(b) => {
                let text =
                    std::str::from_utf8(b).map_err(|_| BencodeError::IncompatibleConversion {
                        from: "non-UTF-8 byte string",
                        to: "String",
                    })?;
                *self = text.to_owned();
                Ok(())
            }
            other => Err(mismatch::<String>(other)),
        }
    }
}

impl Unmarshal for Bytes {
    fn unmarshal_from(&mut self, value: &Value) -> Result<(), BencodeError> {
        match value {
            Value::Bytes(b) => {
                *self = b.clone();
                Ok(())
            }
            other => Err(mismatch::<Bytes>(other)),
        }
    }
}

/// Untyped destination: the value tree is copied as is.
impl Unmarshal for Value {
    fn unmarshal_from(&mut self, value: &Value) -> Result<(), BencodeError> {
        *self = value.clone();
        Ok(())
    }
}

impl<T: Unmarshal + ?Sized> Unmarshal for Box<T> {
    fn unmarshal_from(&mut self, value: &Value) -> Result<(), BencodeError> {
        (**self).unmarshal_from(value)
    }
}

impl<T: Unmarshal + Default> Unmarshal for Option<T> {
    fn unmarshal_from(&mut self, value: &Value) -> Result<(), BencodeError> {
        self.get_or_insert_with(T::default).unmarshal_from(value)
    }
}

impl<T: Unmarshal + Default> Unmarshal for Vec<T> {
    fn unmarshal_from(&mut self, value: &Value) -> Result<(), BencodeError> {
        let items = match value {
            Value::List(items) => items,
            other => return Err(mismatch::<Self>(other)),
        };

        let mut list = Vec::with_capacity(items.len());
        for item in items {
            let mut slot = T::default();
            slot.unmarshal_from(item)?;
            list.push(slot);
        }

        *self = list;
        Ok(())
    }
}

fn unmarshal_entries<K, V>(dict: &Dict) -> Result<Vec<(K, V)>, BencodeError>
where
    K: MapKey,
    V: Unmarshal + Default,
{
    dict.iter()
        .map(|(key, value)| {
            let mut slot = V::default();
            slot.unmarshal_from(value)?;
            Ok((K::from_key_bytes(key)?, slot))
        })
        .collect()
}

impl<K, V, S> Unmarshal for HashMap<K, V, S>
where
    K: MapKey + Eq + Hash,
    V: Unmarshal + Default,
    S: BuildHasher + Default,
{
    fn unmarshal_from(&mut self, value: &Value) -> Result<(), BencodeError> {
        match value {
            Value::Dict(dict) => {
                *self = unmarshal_entries(dict)?.into_iter().collect();
                Ok(())
            }
            other => Err(mismatch::<Self>(other)),
        }
    }
}

impl<K, V> Unmarshal for BTreeMap<K, V>
where
    K: MapKey + Ord,
    V: Unmarshal + Default,
{
    fn unmarshal_from(&mut self, value: &Value) -> Result<(), BencodeError> {
        match value {
            Value::Dict(dict) => {
                *self = unmarshal_entries(dict)?.into_iter().collect();
                Ok(())
            }
            other => Err(mismatch::<Self>(other)),
        }
    }
}
