// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

pub mod ledger_db;
pub mod ledger_store;
pub mod state_view_cache;

pub use ledger_db::{GenesisConfig, LedgerDB};
pub use ledger_store::{LedgerStore, SlotWrite};
pub use state_view_cache::StateViewCache;

use anyhow::Result;
use metered_ledger_types::state_store::SlotId;
use metered_ledger_types::u256::{Word, ZERO_WORD};

/// Read access to persisted ledger state, one 32-byte word per slot.
pub trait StateView {
    /// Gets the word stored in `slot`, or `None` if the slot was never
    /// written. An absent slot and the zero word are indistinguishable to
    /// the ledger.
    fn get_state_value(&self, slot: &SlotId) -> Result<Option<Word>>;

    fn get_word(&self, slot: &SlotId) -> Result<Word> {
        Ok(self.get_state_value(slot)?.unwrap_or(ZERO_WORD))
    }
}

impl<S: StateView + ?Sized> StateView for &S {
    fn get_state_value(&self, slot: &SlotId) -> Result<Option<Word>> {
        (**self).get_state_value(slot)
    }
}
