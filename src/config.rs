//! Codec configuration.
//!
//! Both structs are small `Copy` values. Defaults match the behaviour of the
//! free functions ([`decode`](crate::decode), [`encode`](crate::encode),
//! [`marshal`](crate::marshal()), [`unmarshal`](crate::unmarshal())).

use crate::constants::DEFAULT_MAX_DEPTH;

/// Options for the decoder and the raw scanner.
///
/// # Examples
///
/// ```
/// use rbencode::{DecodeConfig, Decoder};
///
/// // Accept non-canonical integers such as `i007e`
/// let decoder = Decoder::new(DecodeConfig::default().with_strict_integers(false));
/// assert_eq!(decoder.decode(b"i007e").unwrap().as_integer(), Some(7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeConfig {
    /// Maximum nesting of lists and dictionaries.
    pub max_depth: usize,
    /// Reject integers with leading zeros and negative zero.
    pub strict_integers: bool,
}

impl DecodeConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_strict_integers(mut self, strict: bool) -> Self {
        self.strict_integers = strict;
        self
    }
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_integers: true,
        }
    }
}

/// Options for the encoder and the marshaller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeConfig {
    /// Write dictionary keys in ascending byte order (canonical form).
    ///
    /// When unset, dictionaries are written in iteration order: insertion
    /// order for [`Value`](crate::Value) and struct fields, and whatever
    /// order the map type yields for `HashMap`.
    pub sort_keys: bool,
}

impl EncodeConfig {
    /// Canonical configuration with sorted keys.
    pub fn sorted() -> Self {
        Self { sort_keys: true }
    }

    pub fn with_sort_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }
}
