//! Unspent output identity
//!
//! A UTXO is named by the hash of the transaction that created it and the
//! output's position in that transaction. The total order is
//! `(output_index, tx_hash)`: index first, then bytewise hash comparison.
//! Equality is derived from the same comparison.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash as StdHash, Hasher};

use crate::transaction::Input;
use crate::types::*;

#[derive(Debug, Clone)]
pub struct Utxo {
    tx_hash: ByteString,
    index: OutputIndex,
}

impl Utxo {
    pub fn new(tx_hash: impl Into<ByteString>, index: OutputIndex) -> Self {
        Self {
            tx_hash: tx_hash.into(),
            index,
        }
    }

    /// The UTXO an input claims to spend
    pub fn from_input(input: &Input) -> Self {
        Self::new(input.prev_tx_hash(), input.output_index())
    }

    pub fn tx_hash(&self) -> &[u8] {
        &self.tx_hash
    }

    pub fn index(&self) -> OutputIndex {
        self.index
    }
}

impl Ord for Utxo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index
            .cmp(&other.index)
            .then_with(|| self.tx_hash.as_slice().cmp(other.tx_hash.as_slice()))
    }
}

impl PartialOrd for Utxo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Utxo {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Utxo {}

impl StdHash for Utxo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.tx_hash.hash(state);
    }
}

impl fmt::Display for Utxo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(&self.tx_hash), self.index)
    }
}
