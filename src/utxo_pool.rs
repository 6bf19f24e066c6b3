//! The set of currently spendable outputs
//!
//! The pool is a plain keyed collection. It performs no validation and no
//! locking; callers decide which removals and insertions form one settlement.

use std::collections::BTreeMap;
use tracing::debug;

use crate::error::{LedgerError, Result};
use crate::transaction::{Output, Transaction};
use crate::utxo::Utxo;

/// UTXO Set: UTXO -> Output, iterated in UTXO order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtxoPool {
    entries: BTreeMap<Utxo, Output>,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the output for `utxo`.
    pub fn add(&mut self, utxo: Utxo, output: Output) {
        debug!(%utxo, value = output.value(), "adding utxo");
        if self.entries.insert(utxo, output).is_some() {
            debug!("overwrote existing utxo entry");
        }
    }

    /// Remove `utxo`, returning its output. Missing keys are an error.
    pub fn remove(&mut self, utxo: &Utxo) -> Result<Output> {
        let output = self
            .entries
            .remove(utxo)
            .ok_or_else(|| LedgerError::KeyNotFound(utxo.clone()))?;
        debug!(%utxo, "removed utxo");
        Ok(output)
    }

    pub fn get(&self, utxo: &Utxo) -> Option<&Output> {
        self.entries.get(utxo)
    }

    pub fn contains(&self, utxo: &Utxo) -> bool {
        self.entries.contains_key(utxo)
    }

    /// Snapshot of the keys present at call time, in UTXO order.
    pub fn all_utxos(&self) -> Vec<Utxo> {
        self.entries.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Utxo, &Output)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add one entry per output of a finalized transaction.
    ///
    /// This is bookkeeping only: nothing about `tx` is validated.
    pub fn add_transaction_outputs(&mut self, tx: &Transaction) -> Result<()> {
        if tx.hash().is_none() {
            return Err(LedgerError::NotFinalized);
        }
        for (index, output) in tx.outputs().iter().enumerate() {
            self.add(tx.utxo(index)?, output.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::RecipientKey;

    fn output(value: f64) -> Output {
        Output::new(value, RecipientKey::new(&[0x0b], &[0x03]).unwrap()).unwrap()
    }

    #[test]
    fn test_round_trip() {
        let mut pool = UtxoPool::new();
        let utxo = Utxo::new(b"tx".to_vec(), 0);
        pool.add(utxo.clone(), output(5.0));
        assert!(pool.contains(&utxo));
        assert_eq!(pool.get(&utxo), Some(&output(5.0)));
        assert_eq!(pool.remove(&utxo).unwrap(), output(5.0));
        assert!(!pool.contains(&utxo));
        assert!(pool.is_empty());
    }

    #[test]
    fn test_remove_missing_is_key_not_found() {
        let mut pool = UtxoPool::new();
        let utxo = Utxo::new(b"nope".to_vec(), 4);
        assert_eq!(pool.remove(&utxo), Err(LedgerError::KeyNotFound(utxo.clone())));
        assert_eq!(pool.get(&utxo), None);
    }

    #[test]
    fn test_add_overwrites() {
        let mut pool = UtxoPool::new();
        let utxo = Utxo::new(b"tx".to_vec(), 1);
        pool.add(utxo.clone(), output(1.0));
        pool.add(utxo.clone(), output(2.0));
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.get(&utxo), Some(&output(2.0)));
    }

    #[test]
    fn test_all_utxos_is_sorted_snapshot() {
        let mut pool = UtxoPool::new();
        pool.add(Utxo::new(b"b".to_vec(), 1), output(1.0));
        pool.add(Utxo::new(b"a".to_vec(), 1), output(1.0));
        pool.add(Utxo::new(b"z".to_vec(), 0), output(1.0));

        let snapshot = pool.all_utxos();
        pool.remove(&Utxo::new(b"z".to_vec(), 0)).unwrap();

        assert_eq!(
            snapshot,
            vec![
                Utxo::new(b"z".to_vec(), 0),
                Utxo::new(b"a".to_vec(), 1),
                Utxo::new(b"b".to_vec(), 1),
            ]
        );
        assert_eq!(pool.all_utxos().len(), 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut pool = UtxoPool::new();
        pool.add(Utxo::new(b"a".to_vec(), 0), output(1.0));
        let mut copy = pool.clone();
        copy.add(Utxo::new(b"b".to_vec(), 0), output(2.0));
        assert_eq!(pool.len(), 1);
        assert_eq!(copy.len(), 2);
    }

    #[test]
    fn test_add_transaction_outputs() {
        let mut tx = Transaction::new();
        tx.add_output(1.0, RecipientKey::new(&[0x0b], &[0x03]).unwrap()).unwrap();
        tx.add_output(2.0, RecipientKey::new(&[0x0d], &[0x03]).unwrap()).unwrap();

        let mut pool = UtxoPool::new();
        assert_eq!(
            pool.add_transaction_outputs(&tx),
            Err(LedgerError::NotFinalized)
        );

        tx.finalize().unwrap();
        pool.add_transaction_outputs(&tx).unwrap();
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(&tx.utxo(1).unwrap()).unwrap().value(), 2.0);
    }

    #[test]
    fn test_add_transaction_outputs_rejects_stale_hash() {
        let mut tx = Transaction::new();
        tx.add_output(1.0, RecipientKey::new(&[0x0b], &[0x03]).unwrap()).unwrap();
        tx.finalize().unwrap();
        tx.add_output(2.0, RecipientKey::new(&[0x0d], &[0x03]).unwrap()).unwrap();

        let mut pool = UtxoPool::new();
        assert_eq!(
            pool.add_transaction_outputs(&tx),
            Err(LedgerError::NotFinalized)
        );
        assert!(pool.is_empty());

        let hash = tx.finalize().unwrap();
        pool.add_transaction_outputs(&tx).unwrap();
        assert!(pool.all_utxos().iter().all(|utxo| utxo.tx_hash() == &hash[..]));
    }
}
