//! Canonical recipient identity
//!
//! A recipient is an RSA-style public key reduced to its two numeric
//! components. Both are held as minimal big-endian unsigned magnitudes so that
//! the encoding of an output never depends on how a key library chose to pad
//! them.

use std::fmt;

use crate::constants::{KEY_LENGTH_PREFIX_SIZE, MAX_KEY_COMPONENT_SIZE};
use crate::error::{LedgerError, Result};
use crate::types::ByteString;

/// Public key identity: (modulus, exponent)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecipientKey {
    modulus: ByteString,
    exponent: ByteString,
}

impl RecipientKey {
    /// Build a key from big-endian magnitudes; leading zero bytes are stripped.
    ///
    /// Fails with `MalformedKey` if either component is zero or longer than
    /// `MAX_KEY_COMPONENT_SIZE` bytes.
    pub fn new(modulus: &[u8], exponent: &[u8]) -> Result<Self> {
        let modulus = strip_leading_zeros(modulus);
        let exponent = strip_leading_zeros(exponent);
        if modulus.is_empty() {
            return Err(LedgerError::MalformedKey("modulus is zero".to_string()));
        }
        if exponent.is_empty() {
            return Err(LedgerError::MalformedKey("exponent is zero".to_string()));
        }
        if modulus.len() > MAX_KEY_COMPONENT_SIZE || exponent.len() > MAX_KEY_COMPONENT_SIZE {
            return Err(LedgerError::MalformedKey(format!(
                "component longer than {} bytes",
                MAX_KEY_COMPONENT_SIZE
            )));
        }
        Ok(Self {
            modulus: modulus.to_vec(),
            exponent: exponent.to_vec(),
        })
    }

    /// Parse an exported key: `len(e) || e || len(n) || n`, lengths as u32 BE.
    ///
    /// Only the canonical form is accepted: no truncation, no trailing bytes,
    /// no leading zero bytes in either magnitude.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (exponent, rest) = read_component(bytes, "exponent")?;
        let (modulus, rest) = read_component(rest, "modulus")?;
        if !rest.is_empty() {
            return Err(LedgerError::MalformedKey(format!(
                "{} trailing bytes",
                rest.len()
            )));
        }
        Self::new(modulus, exponent)
    }

    /// Export in the format read by [`RecipientKey::from_bytes`].
    pub fn to_bytes(&self) -> ByteString {
        let mut out = Vec::with_capacity(
            2 * KEY_LENGTH_PREFIX_SIZE + self.exponent.len() + self.modulus.len(),
        );
        write_component(&mut out, &self.exponent);
        write_component(&mut out, &self.modulus);
        out
    }

    /// Minimal big-endian magnitude of the modulus
    pub fn modulus(&self) -> &[u8] {
        &self.modulus
    }

    /// Minimal big-endian magnitude of the exponent
    pub fn exponent(&self) -> &[u8] {
        &self.exponent
    }
}

impl fmt::Display for RecipientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

impl TryFrom<&[u8]> for RecipientKey {
    type Error = LedgerError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}

impl TryFrom<Vec<u8>> for RecipientKey {
    type Error = LedgerError;

    fn try_from(bytes: Vec<u8>) -> Result<Self> {
        Self::from_bytes(&bytes)
    }
}

impl TryFrom<&RecipientKey> for RecipientKey {
    type Error = LedgerError;

    fn try_from(key: &RecipientKey) -> Result<Self> {
        Ok(key.clone())
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

fn write_component(out: &mut Vec<u8>, component: &[u8]) {
    // new() bounds every component by MAX_KEY_COMPONENT_SIZE, well below u32::MAX
    out.extend_from_slice(&(component.len() as u32).to_be_bytes());
    out.extend_from_slice(component);
}

fn read_component<'a>(bytes: &'a [u8], name: &str) -> Result<(&'a [u8], &'a [u8])> {
    if bytes.len() < KEY_LENGTH_PREFIX_SIZE {
        return Err(LedgerError::MalformedKey(format!("truncated {} length", name)));
    }
    let (prefix, rest) = bytes.split_at(KEY_LENGTH_PREFIX_SIZE);
    let mut len_bytes = [0u8; KEY_LENGTH_PREFIX_SIZE];
    len_bytes.copy_from_slice(prefix);
    let len = u32::from_be_bytes(len_bytes) as usize;
    if len > MAX_KEY_COMPONENT_SIZE {
        return Err(LedgerError::MalformedKey(format!("{} too long", name)));
    }
    if rest.len() < len {
        return Err(LedgerError::MalformedKey(format!("truncated {}", name)));
    }
    let (component, rest) = rest.split_at(len);
    if component.first() == Some(&0) {
        return Err(LedgerError::MalformedKey(format!(
            "{} has leading zero bytes",
            name
        )));
    }
    Ok((component, rest))
}
