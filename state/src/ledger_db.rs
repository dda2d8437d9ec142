// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::ledger_store::{encode_owner_meta, encode_short_string};
use crate::StateView;
use anyhow::{ensure, Result};
use log::info;
use metered_ledger_types::account_address::AccountAddress;
use metered_ledger_types::state_store::{ScalarSlot, SlotId, StateKey};
use metered_ledger_types::u256::{u256_to_word, Word, U256};
use metered_ledger_types::write_set::WriteSet;
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::collections::BTreeMap;

/// Parameters fixed once at ledger initialization.
#[derive(Clone, Debug)]
pub struct GenesisConfig {
    pub owner: AccountAddress,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Minted to the owner at genesis.
    pub initial_supply: U256,
}

/// The persisted slot table of one ledger instance.
///
/// Reads are snapshot-consistent (they take the read lock per slot) and may
/// proceed concurrently; mutation goes through `apply_write_set` under the
/// write lock. Callers that need the serializable single-writer guarantee
/// across a whole operation hold [`LedgerDB::exclusive_lock`] for its
/// duration.
pub struct LedgerDB {
    state: RwLock<BTreeMap<SlotId, Word>>,
    exclusive: Mutex<()>,
}

impl LedgerDB {
    /// An empty ledger: zero supply, unset owner. Supply-changing operations
    /// fail `Unauthorized` until state carrying an owner is applied.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(BTreeMap::new()),
            exclusive: Mutex::new(()),
        }
    }

    /// Initializes the three logical tables (balances, allowances, scalars)
    /// with the genesis configuration: the whole initial supply goes to the
    /// owner, and the metadata scalars are written once.
    ///
    /// `owner` + `decimals` pack into the single `OwnerMeta` slot; `name` and
    /// `symbol` must fit one slot each (at most 31 bytes).
    pub fn genesis(config: &GenesisConfig) -> Result<Self> {
        ensure!(
            !config.owner.is_zero(),
            "genesis owner must not be the null identifier"
        );
        let mut state = BTreeMap::new();
        state.insert(
            SlotId::Scalar(ScalarSlot::TotalSupply),
            u256_to_word(&config.initial_supply),
        );
        state.insert(
            SlotId::Scalar(ScalarSlot::OwnerMeta),
            encode_owner_meta(config.owner, config.decimals),
        );
        state.insert(
            SlotId::Scalar(ScalarSlot::Name),
            encode_short_string(&config.name)?,
        );
        state.insert(
            SlotId::Scalar(ScalarSlot::Symbol),
            encode_short_string(&config.symbol)?,
        );
        if !config.initial_supply.is_zero() {
            state.insert(
                StateKey::balance(config.owner).slot(),
                u256_to_word(&config.initial_supply),
            );
        }
        info!(
            "ledger genesis: {} ({}) supply {} owned by {}",
            config.name, config.symbol, config.initial_supply, config.owner
        );
        Ok(Self {
            state: RwLock::new(state),
            exclusive: Mutex::new(()),
        })
    }

    /// Applies a committed operation's effects. Zero words are stored, not
    /// removed: slots are only ever reset to zero, never deleted.
    pub fn apply_write_set(&self, write_set: &WriteSet) {
        let mut state = self.state.write();
        for (slot, op) in write_set.iter() {
            state.insert(*slot, *op.word());
        }
    }

    /// Lock spanning one entire operation, for the total-ordering guarantee.
    pub fn exclusive_lock(&self) -> MutexGuard<'_, ()> {
        self.exclusive.lock()
    }

    pub fn dump(&self) -> BTreeMap<SlotId, Word> {
        self.state.read().clone()
    }
}

impl Default for LedgerDB {
    fn default() -> Self {
        Self::new()
    }
}

impl StateView for LedgerDB {
    fn get_state_value(&self, slot: &SlotId) -> Result<Option<Word>> {
        Ok(self.state.read().get(slot).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger_store::{decode_owner_meta, decode_short_string};

    fn test_genesis() -> GenesisConfig {
        GenesisConfig {
            owner: AccountAddress::new([0xaa; 20]),
            name: "Metered Token".to_string(),
            symbol: "MTK".to_string(),
            decimals: 9,
            initial_supply: U256::from(1_000u64),
        }
    }

    #[test]
    fn test_genesis_seeds_scalars_and_owner_balance() {
        let config = test_genesis();
        let db = LedgerDB::genesis(&config).unwrap();

        let supply = db
            .get_word(&SlotId::Scalar(ScalarSlot::TotalSupply))
            .unwrap();
        assert_eq!(supply, u256_to_word(&config.initial_supply));

        let meta = db.get_word(&SlotId::Scalar(ScalarSlot::OwnerMeta)).unwrap();
        assert_eq!(decode_owner_meta(&meta), (config.owner, config.decimals));

        let name = db.get_word(&SlotId::Scalar(ScalarSlot::Name)).unwrap();
        assert_eq!(decode_short_string(&name), "Metered Token");

        let balance = db.get_word(&StateKey::balance(config.owner).slot()).unwrap();
        assert_eq!(balance, u256_to_word(&config.initial_supply));
    }

    #[test]
    fn test_genesis_rejects_null_owner() {
        let mut config = test_genesis();
        config.owner = AccountAddress::ZERO;
        assert!(LedgerDB::genesis(&config).is_err());
    }

    #[test]
    fn test_genesis_rejects_long_names() {
        let mut config = test_genesis();
        config.name = "x".repeat(32);
        assert!(LedgerDB::genesis(&config).is_err());
    }
}
