// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Typed mutation primitives over the slot table.
//!
//! Every primitive here is atomic against the per-operation overlay and
//! reports the slot it touched; none of them meters itself. The operation
//! engine prices each access before or after invoking the primitive and
//! rolls the whole overlay back on any failure.

use crate::state_view_cache::StateViewCache;
use crate::StateView;
use anyhow::Result;
use metered_ledger_types::account_address::AccountAddress;
use metered_ledger_types::error::LedgerError;
use metered_ledger_types::state_store::{ScalarField, SlotId, StateKey};
use metered_ledger_types::u256::{u256_to_word, word_to_u256, Word, U256, ZERO_WORD};
use metered_ledger_types::write_set::WriteSet;

/// One applied slot mutation: which physical slot, and the word it held
/// before and after. The meter prices the write from the old/new pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotWrite {
    pub slot: SlotId,
    pub old: Word,
    pub new: Word,
}

pub struct LedgerStore<'a, S> {
    cache: StateViewCache<'a, S>,
}

impl<'a, S: StateView> LedgerStore<'a, S> {
    pub fn new(state: &'a S) -> Self {
        Self {
            cache: StateViewCache::new(state),
        }
    }

    fn read_word(&self, key: &StateKey) -> Result<Word, LedgerError> {
        self.cache.get_word(&key.slot()).map_err(LedgerError::storage)
    }

    fn write_word(&mut self, key: &StateKey, new: Word) -> Result<SlotWrite, LedgerError> {
        let slot = key.slot();
        let old = self.cache.get_word(&slot).map_err(LedgerError::storage)?;
        self.cache.write_word(slot, new);
        Ok(SlotWrite { slot, old, new })
    }

    fn read_u256(&self, key: &StateKey) -> Result<U256, LedgerError> {
        Ok(word_to_u256(&self.read_word(key)?))
    }

    fn write_u256(&mut self, key: &StateKey, value: U256) -> Result<SlotWrite, LedgerError> {
        self.write_word(key, u256_to_word(&value))
    }

    pub fn balance(&self, account: AccountAddress) -> Result<U256, LedgerError> {
        self.read_u256(&StateKey::balance(account))
    }

    /// `balance[account] -= amount`, failing rather than wrapping.
    pub fn debit(
        &mut self,
        account: AccountAddress,
        amount: U256,
    ) -> Result<SlotWrite, LedgerError> {
        let balance = self.balance(account)?;
        let new = balance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                account,
                balance,
                required: amount,
            })?;
        self.write_u256(&StateKey::balance(account), new)
    }

    /// `balance[account] += amount`; fails with `SupplyOverflow` if this
    /// would exceed the maximum representable value.
    pub fn credit(
        &mut self,
        account: AccountAddress,
        amount: U256,
    ) -> Result<SlotWrite, LedgerError> {
        let balance = self.balance(account)?;
        let new = balance
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;
        self.write_u256(&StateKey::balance(account), new)
    }

    pub fn allowance(
        &self,
        owner: AccountAddress,
        spender: AccountAddress,
    ) -> Result<U256, LedgerError> {
        self.read_u256(&StateKey::allowance(owner, spender))
    }

    /// Unconditional overwrite, the inherited ERC20-family approve
    /// semantics: the prior allowance is replaced, never accumulated.
    pub fn set_allowance(
        &mut self,
        owner: AccountAddress,
        spender: AccountAddress,
        amount: U256,
    ) -> Result<SlotWrite, LedgerError> {
        self.write_u256(&StateKey::allowance(owner, spender), amount)
    }

    /// Decrements the allowance by exactly `amount`; fails without touching
    /// it if insufficient.
    pub fn spend_allowance(
        &mut self,
        owner: AccountAddress,
        spender: AccountAddress,
        amount: U256,
    ) -> Result<SlotWrite, LedgerError> {
        let allowance = self.allowance(owner, spender)?;
        let new = allowance
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientAllowance {
                owner,
                spender,
                allowance,
                required: amount,
            })?;
        self.write_u256(&StateKey::allowance(owner, spender), new)
    }

    pub fn total_supply(&self) -> Result<U256, LedgerError> {
        self.read_u256(&StateKey::Scalar(ScalarField::TotalSupply))
    }

    pub fn add_total_supply(&mut self, amount: U256) -> Result<SlotWrite, LedgerError> {
        let supply = self.total_supply()?;
        let new = supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;
        self.write_u256(&StateKey::Scalar(ScalarField::TotalSupply), new)
    }

    pub fn owner(&self) -> Result<AccountAddress, LedgerError> {
        let word = self.read_word(&StateKey::Scalar(ScalarField::Owner))?;
        Ok(decode_owner_meta(&word).0)
    }

    pub fn decimals(&self) -> Result<u8, LedgerError> {
        let word = self.read_word(&StateKey::Scalar(ScalarField::Decimals))?;
        Ok(decode_owner_meta(&word).1)
    }

    /// Replaces the owner identifier, leaving the decimals byte packed in
    /// the same slot untouched: one physical slot write.
    pub fn set_owner(&mut self, new_owner: AccountAddress) -> Result<SlotWrite, LedgerError> {
        let word = self.read_word(&StateKey::Scalar(ScalarField::Owner))?;
        let (_, decimals) = decode_owner_meta(&word);
        self.write_word(
            &StateKey::Scalar(ScalarField::Owner),
            encode_owner_meta(new_owner, decimals),
        )
    }

    /// Freezes the accumulated effects into a write set. Committing is the
    /// caller's decision; dropping the store instead rolls everything back.
    pub fn freeze(self) -> Result<WriteSet> {
        self.cache.into_write_set()
    }
}

/// `owner` (20 bytes) and `decimals` (1 byte) packed into one slot word.
pub fn encode_owner_meta(owner: AccountAddress, decimals: u8) -> Word {
    let mut word = ZERO_WORD;
    word[..AccountAddress::LENGTH].copy_from_slice(owner.as_ref());
    word[AccountAddress::LENGTH] = decimals;
    word
}

pub fn decode_owner_meta(word: &Word) -> (AccountAddress, u8) {
    let owner = AccountAddress::try_from(&word[..AccountAddress::LENGTH])
        .expect("owner meta slot holds a 20-byte address");
    (owner, word[AccountAddress::LENGTH])
}

/// Short-string slot encoding: bytes left-aligned, length in the final byte.
/// Strings longer than 31 bytes do not fit one slot and are rejected.
pub fn encode_short_string(s: &str) -> Result<Word> {
    let bytes = s.as_bytes();
    anyhow::ensure!(
        bytes.len() < 32,
        "string does not fit one slot: {} bytes",
        bytes.len()
    );
    let mut word = ZERO_WORD;
    word[..bytes.len()].copy_from_slice(bytes);
    word[31] = bytes.len() as u8;
    Ok(word)
}

pub fn decode_short_string(word: &Word) -> String {
    let len = word[31] as usize;
    String::from_utf8_lossy(&word[..len.min(31)]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger_db::LedgerDB;

    fn store(db: &LedgerDB) -> LedgerStore<'_, LedgerDB> {
        LedgerStore::new(db)
    }

    #[test]
    fn test_debit_checks_balance() {
        let db = LedgerDB::new();
        let mut store = store(&db);
        let account = AccountAddress::random();
        store.credit(account, U256::from(10)).unwrap();
        assert_eq!(
            store.debit(account, U256::from(11)).unwrap_err(),
            LedgerError::InsufficientBalance {
                account,
                balance: U256::from(10),
                required: U256::from(11),
            }
        );
        store.debit(account, U256::from(10)).unwrap();
        assert_eq!(store.balance(account).unwrap(), U256::zero());
    }

    #[test]
    fn test_credit_overflow() {
        let db = LedgerDB::new();
        let mut store = store(&db);
        let account = AccountAddress::random();
        store.credit(account, U256::max_value()).unwrap();
        assert_eq!(
            store.credit(account, U256::one()).unwrap_err(),
            LedgerError::SupplyOverflow
        );
    }

    #[test]
    fn test_spend_allowance_exact_decrement() {
        let db = LedgerDB::new();
        let mut store = store(&db);
        let owner = AccountAddress::random();
        let spender = AccountAddress::random();
        store.set_allowance(owner, spender, U256::from(5)).unwrap();
        store.spend_allowance(owner, spender, U256::from(2)).unwrap();
        assert_eq!(store.allowance(owner, spender).unwrap(), U256::from(3));
        assert!(store
            .spend_allowance(owner, spender, U256::from(4))
            .is_err());
        // a failed spend decrements nothing
        assert_eq!(store.allowance(owner, spender).unwrap(), U256::from(3));
    }

    #[test]
    fn test_set_owner_preserves_packed_decimals() {
        let db = LedgerDB::genesis(&crate::ledger_db::GenesisConfig {
            owner: AccountAddress::new([1u8; 20]),
            name: "T".into(),
            symbol: "T".into(),
            decimals: 12,
            initial_supply: U256::zero(),
        })
        .unwrap();
        let mut store = store(&db);
        let new_owner = AccountAddress::new([2u8; 20]);
        let write = store.set_owner(new_owner).unwrap();
        assert_eq!(store.owner().unwrap(), new_owner);
        assert_eq!(store.decimals().unwrap(), 12);
        // a single physical slot carries both fields
        assert_eq!(
            write.slot,
            StateKey::Scalar(ScalarField::Decimals).slot()
        );
    }

    #[test]
    fn test_short_string_roundtrip() {
        let word = encode_short_string("Metered Token").unwrap();
        assert_eq!(decode_short_string(&word), "Metered Token");
        assert!(encode_short_string(&"y".repeat(32)).is_err());
    }
}
