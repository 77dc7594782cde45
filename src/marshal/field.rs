use super::from_bencode::{mismatch, Unmarshal};
use super::to_bencode::Marshal;
use crate::bencode::{BencodeError, Encoder, Value};
use tracing::trace;

/// How one struct field maps onto a dictionary entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Name of the field in Rust.
    pub name: &'static str,
    /// Dictionary key: the `rename` override, else the field name.
    pub wire_name: &'static str,
    /// Marked `#[bencode(skip)]`.
    pub skipped: bool,
    /// Not `pub`, so never mapped.
    pub hidden: bool,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, wire_name: &'static str) -> Self {
        Self {
            name,
            wire_name,
            skipped: false,
            hidden: false,
        }
    }

    pub const fn is_mapped(&self) -> bool {
        !self.skipped && !self.hidden
    }
}

/// A struct whose fields are (un)marshalled through a descriptor table.
///
/// Normally generated by `#[derive(Bencode)]`. `FIELDS` lists every field in
/// declaration order; `field` and `field_mut` return the field at the same
/// index, or `None` for fields that are not mapped.
pub trait Aggregate {
    const FIELDS: &'static [FieldDescriptor];

    fn field(&self, index: usize) -> Option<&dyn Marshal>;

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Unmarshal>;
}

/// Writes the mapped fields of `value` as a dictionary.
///
/// Fields are written in declaration order, or sorted by wire name when the
/// encoder sorts keys. Fields holding empty text are left out.
pub fn marshal_aggregate<T: Aggregate + ?Sized>(
    value: &T,
    encoder: &mut Encoder,
) -> Result<(), BencodeError> {
    let mut order: Vec<usize> = T::FIELDS
        .iter()
        .enumerate()
        .filter(|(_, descriptor)| descriptor.is_mapped())
        .map(|(index, _)| index)
        .collect();
    if encoder.sorts_keys() {
        order.sort_by_key(|&index| T::FIELDS[index].wire_name.as_bytes());
    }

    encoder.begin_dict()?;
    for index in order {
        let Some(field) = value.field(index) else {
            continue;
        };
        if field.is_empty_text() {
            continue;
        }
        encoder.write_str(T::FIELDS[index].wire_name)?;
        field.marshal(encoder)?;
    }
    encoder.end()
}

/// Populates the mapped fields of `target` from a dictionary.
///
/// Fields whose wire name is missing keep their current value, and keys that
/// match no field are ignored.
pub fn unmarshal_aggregate<T: Aggregate + ?Sized>(
    target: &mut T,
    value: &Value,
) -> Result<(), BencodeError> {
    let dict = match value {
        Value::Dict(dict) => dict,
        other => return Err(mismatch::<T>(other)),
    };

    for (index, descriptor) in T::FIELDS.iter().enumerate() {
        if !descriptor.is_mapped() {
            continue;
        }
        let Some(entry) = dict.get(descriptor.wire_name.as_bytes()) else {
            trace!("field {} absent from input", descriptor.name);
            continue;
        };
        if let Some(field) = target.field_mut(index) {
            field.unmarshal_from(entry)?;
        }
    }

    Ok(())
}
