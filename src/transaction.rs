//! Transactions, their inputs and outputs, and the canonical byte encoding
//!
//! Two encodings are produced from the same field routines:
//!
//! - `raw_data_to_sign(i)`: input `i`'s outpoint followed by every output.
//!   This is the message an external signer authorizes.
//! - `raw_tx()`: every input (outpoint plus signature) followed by every
//!   output. This is what `finalize` hashes.
//!
//! Layout (no length prefixes, no delimiters):
//!
//! ```text
//! outpoint := prev_tx_hash || output_index (i32 LE)
//! output   := value (f64 LE) || exponent (BE, minimal) || modulus (BE, minimal)
//! ```

use sha2::{Digest, Sha256};
use std::hash::{Hash as StdHash, Hasher};
use tracing::{debug, trace};

use crate::constants::*;
use crate::error::{LedgerError, Result};
use crate::key::RecipientKey;
use crate::types::*;
use crate::utxo::Utxo;

/// An amount paid to a recipient key.
///
/// Equality and hashing use the bit pattern of `value`, which is well defined
/// because construction rejects NaN and normalizes `-0.0`.
#[derive(Debug, Clone)]
pub struct Output {
    value: f64,
    recipient: RecipientKey,
}

impl Output {
    /// Create an output from a canonical key or its exported bytes.
    ///
    /// Fails with `InvalidValue` for negative or non-finite amounts and with
    /// `MalformedKey` if the key bytes cannot be parsed.
    pub fn new<K>(value: f64, recipient: K) -> Result<Self>
    where
        K: TryInto<RecipientKey>,
        LedgerError: From<K::Error>,
    {
        if !value.is_finite() || value < 0.0 {
            return Err(LedgerError::InvalidValue(value));
        }
        // -0.0 and 0.0 must encode and compare identically
        let value = if value == 0.0 { 0.0 } else { value };
        Ok(Self {
            value,
            recipient: recipient.try_into()?,
        })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn recipient(&self) -> &RecipientKey {
        &self.recipient
    }

    pub fn to_record(&self) -> OutputRecord {
        OutputRecord {
            value: self.value,
            address: self.recipient.to_string(),
        }
    }
}

impl PartialEq for Output {
    fn eq(&self, other: &Self) -> bool {
        self.value.to_bits() == other.value.to_bits() && self.recipient == other.recipient
    }
}

impl Eq for Output {}

impl StdHash for Output {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.to_bits().hash(state);
        self.recipient.hash(state);
    }
}

/// A reference to a previously created output plus its authorization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Input {
    prev_tx_hash: ByteString,
    output_index: OutputIndex,
    signature: Option<ByteString>,
}

impl Input {
    /// Create an unsigned input spending `prev_tx_hash:output_index`.
    pub fn new(prev_tx_hash: impl Into<ByteString>, output_index: OutputIndex) -> Result<Self> {
        if output_index > MAX_OUTPUT_INDEX {
            return Err(LedgerError::InvalidOutputIndex(output_index));
        }
        Ok(Self {
            prev_tx_hash: prev_tx_hash.into(),
            output_index,
            signature: None,
        })
    }

    pub fn prev_tx_hash(&self) -> &[u8] {
        &self.prev_tx_hash
    }

    pub fn output_index(&self) -> OutputIndex {
        self.output_index
    }

    pub fn signature(&self) -> Option<&[u8]> {
        self.signature.as_deref()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// Attach a signature, replacing any previous one.
    pub fn add_signature(&mut self, signature: impl Into<ByteString>) {
        self.signature = Some(signature.into());
    }

    pub fn to_record(&self) -> InputRecord {
        InputRecord {
            prev_tx_hash: hex::encode(&self.prev_tx_hash),
            output_index: self.output_index,
            signature: self.signature.as_ref().map(hex::encode),
        }
    }
}

/// An ordered set of inputs and outputs with a derived content hash.
///
/// Equality is structural over inputs then outputs; neither the stored hash
/// nor the coinbase flag take part. `Clone` produces an independent deep copy.
///
/// Every mutation of inputs or outputs discards the stored hash, so a hash is
/// only ever present while it matches `raw_tx()`.
#[derive(Debug, Clone, Default)]
pub struct Transaction {
    hash: Option<Hash>,
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    coinbase: bool,
}

impl Transaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// A finalized coinbase transaction paying `value` to `recipient`.
    pub fn new_coinbase<K>(value: f64, recipient: K) -> Result<Self>
    where
        K: TryInto<RecipientKey>,
        LedgerError: From<K::Error>,
    {
        let mut tx = Self {
            coinbase: true,
            ..Self::default()
        };
        tx.add_output(value, recipient)?;
        tx.finalize()?;
        Ok(tx)
    }

    /// Append an unsigned input. The referenced output is not looked up.
    pub fn add_input(
        &mut self,
        prev_tx_hash: impl Into<ByteString>,
        output_index: OutputIndex,
    ) -> Result<()> {
        self.inputs.push(Input::new(prev_tx_hash, output_index)?);
        self.hash = None;
        Ok(())
    }

    /// Append an output to a canonical key or its exported bytes.
    pub fn add_output<K>(&mut self, value: f64, recipient: K) -> Result<()>
    where
        K: TryInto<RecipientKey>,
        LedgerError: From<K::Error>,
    {
        self.outputs.push(Output::new(value, recipient)?);
        self.hash = None;
        Ok(())
    }

    /// Remove the input at `index`; later inputs shift down by one.
    pub fn remove_input(&mut self, index: usize) -> Result<Input> {
        self.check_input_index(index)?;
        self.hash = None;
        Ok(self.inputs.remove(index))
    }

    /// Remove the first input spending `utxo`. Returns whether one was found.
    pub fn remove_input_by_utxo(&mut self, utxo: &Utxo) -> bool {
        match self
            .inputs
            .iter()
            .position(|input| Utxo::from_input(input) == *utxo)
        {
            Some(position) => {
                self.inputs.remove(position);
                self.hash = None;
                true
            }
            None => false,
        }
    }

    /// Set the signature of input `index`, overwriting any existing one.
    pub fn add_signature(&mut self, signature: impl Into<ByteString>, index: usize) -> Result<()> {
        self.check_input_index(index)?;
        self.inputs[index].add_signature(signature);
        self.hash = None;
        trace!(index, "attached input signature");
        Ok(())
    }

    /// The message an external signer must sign for input `index`.
    pub fn raw_data_to_sign(&self, index: usize) -> Result<ByteString> {
        self.check_input_index(index)?;
        let input = &self.inputs[index];
        let mut data = Vec::with_capacity(
            input.prev_tx_hash.len() + OUTPUT_INDEX_SIZE + self.encoded_outputs_len(),
        );
        encode_outpoint(&mut data, input);
        encode_outputs(&mut data, &self.outputs);
        Ok(data)
    }

    /// The full canonical encoding. Every input must be signed.
    pub fn raw_tx(&self) -> Result<ByteString> {
        let mut raw = Vec::new();
        for (index, input) in self.inputs.iter().enumerate() {
            let signature = input
                .signature
                .as_ref()
                .ok_or(LedgerError::MissingSignature { index })?;
            encode_outpoint(&mut raw, input);
            raw.extend_from_slice(signature);
        }
        encode_outputs(&mut raw, &self.outputs);
        Ok(raw)
    }

    /// Hash `raw_tx()` with SHA-256 and store the digest.
    pub fn finalize(&mut self) -> Result<Hash> {
        let raw = self.raw_tx()?;
        let hash: Hash = Sha256::digest(&raw).into();
        self.hash = Some(hash);
        debug!(
            hash = %hex::encode(hash),
            inputs = self.inputs.len(),
            outputs = self.outputs.len(),
            "finalized transaction"
        );
        Ok(hash)
    }

    /// Raw digest from the last `finalize`, unless inputs or outputs changed since
    pub fn hash(&self) -> Option<&Hash> {
        self.hash.as_ref()
    }

    /// Lowercase hex form of [`Transaction::hash`]
    pub fn hash_hex(&self) -> Option<String> {
        self.hash.map(hex::encode)
    }

    /// UTXO identity of output `index` of this finalized transaction.
    pub fn utxo(&self, index: usize) -> Result<Utxo> {
        let hash = self.hash.ok_or(LedgerError::NotFinalized)?;
        if index >= self.outputs.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.outputs.len(),
            });
        }
        let output_index = OutputIndex::try_from(index).map_err(|_| {
            LedgerError::IndexOutOfRange {
                index,
                len: self.outputs.len(),
            }
        })?;
        Ok(Utxo::new(hash.to_vec(), output_index))
    }

    pub fn input(&self, index: usize) -> Option<&Input> {
        self.inputs.get(index)
    }

    pub fn output(&self, index: usize) -> Option<&Output> {
        self.outputs.get(index)
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_coinbase(&self) -> bool {
        self.coinbase
    }

    pub fn set_coinbase(&mut self, coinbase: bool) {
        self.coinbase = coinbase;
    }

    pub fn to_record(&self) -> TransactionRecord {
        TransactionRecord {
            hash: self.hash_hex(),
            coinbase: self.coinbase,
            inputs: self.inputs.iter().map(Input::to_record).collect(),
            outputs: self.outputs.iter().map(Output::to_record).collect(),
        }
    }

    /// Diagnostic JSON rendering of [`Transaction::to_record`]
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_record())
            .map_err(|e| LedgerError::Serialization(e.to_string()))
    }

    fn check_input_index(&self, index: usize) -> Result<()> {
        if index >= self.inputs.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.inputs.len(),
            });
        }
        Ok(())
    }

    fn encoded_outputs_len(&self) -> usize {
        self.outputs
            .iter()
            .map(|o| VALUE_SIZE + o.recipient.exponent().len() + o.recipient.modulus().len())
            .sum()
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.inputs == other.inputs && self.outputs == other.outputs
    }
}

impl Eq for Transaction {}

impl StdHash for Transaction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inputs.hash(state);
        self.outputs.hash(state);
    }
}

fn encode_outpoint(buf: &mut Vec<u8>, input: &Input) {
    buf.extend_from_slice(&input.prev_tx_hash);
    // Input::new bounds the index to i32::MAX
    buf.extend_from_slice(&(input.output_index as i32).to_le_bytes());
}

fn encode_outputs(buf: &mut Vec<u8>, outputs: &[Output]) {
    for output in outputs {
        buf.extend_from_slice(&output.value.to_le_bytes());
        buf.extend_from_slice(output.recipient.exponent());
        buf.extend_from_slice(output.recipient.modulus());
    }
}
