//! Fixed protocol parameters for the canonical transaction encoding

/// Size of a transaction content hash (SHA-256) in bytes
pub const HASH_SIZE: usize = 32;

/// Encoded width of an output index: 4-byte little-endian signed integer
pub const OUTPUT_INDEX_SIZE: usize = 4;

/// Encoded width of an output value: 8-byte little-endian IEEE-754 double
pub const VALUE_SIZE: usize = 8;

/// Largest output index representable in the encoded 4-byte signed field
pub const MAX_OUTPUT_INDEX: u32 = i32::MAX as u32;

/// Width of each length prefix in an exported recipient key
pub const KEY_LENGTH_PREFIX_SIZE: usize = 4;

/// Largest accepted modulus or exponent magnitude, in bytes (a 65536-bit key)
pub const MAX_KEY_COMPONENT_SIZE: usize = 8192;
