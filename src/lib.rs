//! # UTXO Ledger
//!
//! Transaction and unspent-output primitives for a minimal UTXO ledger.
//!
//! This crate owns two things and nothing else:
//!
//! 1. The canonical byte encoding of a transaction, used both as the message
//!    an external signer signs for each input and as the preimage of the
//!    transaction's SHA-256 content hash.
//! 2. The identity of an unspent output and the pool of spendable outputs,
//!    with deterministic equality and ordering.
//!
//! Validation, signature policy, networking and storage belong to callers.
//!
//! ## Usage
//!
//! ```rust
//! use utxo_ledger::*;
//!
//! let alice = RecipientKey::new(&[0xc5, 0x3f], &[0x01, 0x00, 0x01]).unwrap();
//! let genesis = Transaction::new_coinbase(10.0, alice.clone()).unwrap();
//!
//! let mut pool = UtxoPool::new();
//! pool.add_transaction_outputs(&genesis).unwrap();
//!
//! let mut tx = Transaction::new();
//! tx.add_input(genesis.hash().unwrap().to_vec(), 0).unwrap();
//! tx.add_output(10.0, alice).unwrap();
//!
//! let message = tx.raw_data_to_sign(0).unwrap();
//! let signature = message.iter().rev().copied().collect::<Vec<u8>>(); // external signer
//! tx.add_signature(signature, 0).unwrap();
//! tx.finalize().unwrap();
//!
//! let spent = Utxo::from_input(tx.input(0).unwrap());
//! assert!(pool.contains(&spent));
//! pool.remove(&spent).unwrap();
//! pool.add_transaction_outputs(&tx).unwrap();
//! assert_eq!(pool.len(), 1);
//! ```

pub mod constants;
pub mod error;
pub mod key;
pub mod transaction;
pub mod types;
pub mod utxo;
pub mod utxo_pool;

// Re-export commonly used types
pub use constants::*;
pub use error::{LedgerError, Result};
pub use key::RecipientKey;
pub use transaction::{Input, Output, Transaction};
pub use types::*;
pub use utxo::Utxo;
pub use utxo_pool::UtxoPool;
