//! Error types for transaction construction, encoding and pool access

use thiserror::Error;

use crate::utxo::Utxo;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Input {index} has no signature")]
    MissingSignature { index: usize },

    #[error("UTXO not found: {0}")]
    KeyNotFound(Utxo),

    #[error("Malformed recipient key: {0}")]
    MalformedKey(String),

    #[error("Invalid output value: {0}")]
    InvalidValue(f64),

    #[error("Output index {0} does not fit a signed 32-bit integer")]
    InvalidOutputIndex(u32),

    #[error("Transaction has not been finalized")]
    NotFinalized,

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<std::convert::Infallible> for LedgerError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}
