// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Scratchpad for slot values during the execution of one operation.

use crate::StateView;
use anyhow::Result;
use log::error;
use metered_ledger_types::state_store::SlotId;
use metered_ledger_types::u256::{Word, ZERO_WORD};
use metered_ledger_types::write_set::{WriteOp, WriteSet, WriteSetMut};
use std::collections::BTreeMap;

/// A local cache over a given `StateView`.
///
/// The cache tracks every slot write an operation performs; the base view is
/// never touched. On commit the cache freezes into a [`WriteSet`]; on
/// rollback it is simply dropped, which is what makes every operation
/// all-or-nothing.
pub struct StateViewCache<'a, S> {
    data_view: &'a S,
    data_map: BTreeMap<SlotId, Word>,
}

impl<'a, S: StateView> StateViewCache<'a, S> {
    /// Create a `StateViewCache` given a `StateView`. Holds updates and
    /// forwards reads to the `StateView` for slots not in the local cache.
    pub fn new(data_view: &'a S) -> Self {
        StateViewCache {
            data_view,
            data_map: BTreeMap::new(),
        }
    }

    /// Records one slot write. The new value is visible to subsequent reads
    /// through this cache, including writes of the zero word (reset, not
    /// deletion).
    pub fn write_word(&mut self, slot: SlotId, word: Word) {
        self.data_map.insert(slot, word);
    }

    /// Publishes a `WriteSet` computed by an already-settled operation, so
    /// that later operations executed on top of this cache observe it.
    pub fn push_write_set(&mut self, write_set: &WriteSet) {
        for (slot, op) in write_set.iter() {
            self.data_map.insert(*slot, *op.word());
        }
    }

    /// Freezes the recorded writes into a `WriteSet`, classifying each entry
    /// as creation or modification against the base view.
    pub fn into_write_set(self) -> Result<WriteSet> {
        let mut ws = WriteSetMut::default();
        for (slot, word) in self.data_map {
            let base = self.data_view.get_word(&slot)?;
            let op = if base == ZERO_WORD {
                WriteOp::Creation(word)
            } else {
                WriteOp::Modification(word)
            };
            ws.push((slot, op));
        }
        ws.freeze()
    }
}

impl<'a, S: StateView> StateView for StateViewCache<'a, S> {
    // Get some data either through the cache or the `StateView` on a cache
    // miss.
    fn get_state_value(&self, slot: &SlotId) -> Result<Option<Word>> {
        match self.data_map.get(slot) {
            Some(word) => Ok(Some(*word)),
            None => match self.data_view.get_state_value(slot) {
                Ok(remote_data) => Ok(remote_data),
                Err(e) => {
                    error!("error getting data from storage for {:?}", slot);
                    Err(e)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger_db::LedgerDB;
    use metered_ledger_types::account_address::AccountAddress;
    use metered_ledger_types::state_store::StateKey;

    #[test]
    fn test_overlay_reads_through_and_shadows() {
        let db = LedgerDB::new();
        let slot = StateKey::balance(AccountAddress::random()).slot();
        let mut cache = StateViewCache::new(&db);

        assert_eq!(cache.get_state_value(&slot).unwrap(), None);
        cache.write_word(slot, [9u8; 32]);
        assert_eq!(cache.get_state_value(&slot).unwrap(), Some([9u8; 32]));
        // the base view is untouched until the write set is applied
        assert_eq!(db.get_state_value(&slot).unwrap(), None);
    }

    #[test]
    fn test_dropping_the_cache_rolls_back() {
        let db = LedgerDB::new();
        let slot = StateKey::balance(AccountAddress::random()).slot();
        {
            let mut cache = StateViewCache::new(&db);
            cache.write_word(slot, [1u8; 32]);
        }
        assert_eq!(db.get_state_value(&slot).unwrap(), None);
    }

    #[test]
    fn test_freeze_classifies_creation_and_modification() {
        let db = LedgerDB::new();
        let created = StateKey::balance(AccountAddress::new([1u8; 20])).slot();
        let modified = StateKey::balance(AccountAddress::new([2u8; 20])).slot();

        let mut seed = StateViewCache::new(&db);
        seed.write_word(modified, [5u8; 32]);
        db.apply_write_set(&seed.into_write_set().unwrap());

        let mut cache = StateViewCache::new(&db);
        cache.write_word(created, [1u8; 32]);
        cache.write_word(modified, [6u8; 32]);
        let ws = cache.into_write_set().unwrap();
        for (slot, op) in ws.iter() {
            if *slot == created {
                assert!(op.is_creation());
            } else {
                assert!(op.is_modification());
            }
        }
    }
}
