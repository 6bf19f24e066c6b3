//! Core ledger types shared across modules

use serde::{Deserialize, Serialize};

use crate::constants::HASH_SIZE;

/// Hash type: 256-bit SHA-256 digest
pub type Hash = [u8; HASH_SIZE];

/// Byte string type
pub type ByteString = Vec<u8>;

/// Position of an output within its transaction's output list
pub type OutputIndex = u32;

/// Diagnostic view of an input: hex digest, index, hex signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputRecord {
    pub prev_tx_hash: String,
    pub output_index: OutputIndex,
    pub signature: Option<String>,
}

/// Diagnostic view of an output: value and hex key export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputRecord {
    pub value: f64,
    pub address: String,
}

/// Diagnostic view of a whole transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub hash: Option<String>,
    pub coinbase: bool,
    pub inputs: Vec<InputRecord>,
    pub outputs: Vec<OutputRecord>,
}
