//! Wire tokens and codec defaults.
//!
//! The byte values below are the structural markers of the bencode grammar.
//! Everything else in the format is either a decimal number or raw payload.

// ============================================================================
// Structural markers
// ============================================================================

/// Starts an integer: `i<digits>e`
pub const INT_START: u8 = b'i';

/// Starts a list: `l<values>e`
pub const LIST_START: u8 = b'l';

/// Starts a dictionary: `d<key><value>...e`
pub const DICT_START: u8 = b'd';

/// Terminates integers, lists and dictionaries
pub const END: u8 = b'e';

/// Separates a byte string's length prefix from its payload
pub const STRING_DELIMITER: u8 = b':';

/// Sign prefix accepted at the start of an integer
pub const MINUS: u8 = b'-';

// ============================================================================
// Decoder limits
// ============================================================================

/// Default maximum nesting of lists and dictionaries.
///
/// Deeply nested input would otherwise translate directly into recursion
/// depth on the decoder and the raw scanner.
pub const DEFAULT_MAX_DEPTH: usize = 64;
