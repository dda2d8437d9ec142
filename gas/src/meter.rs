// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::algebra::InternalGas;
use crate::schedule::LedgerGasParameters;
use metered_ledger_types::error::LedgerError;
use metered_ledger_types::state_store::SlotId;
use metered_ledger_types::u256::{Word, ZERO_WORD};
use std::collections::BTreeSet;

/// Deterministic gas meter scoped to one top-level operation.
///
/// The warm-slot and written-slot sets live and die with the meter, so a
/// rolled-back operation cannot leak warmth into later, unrelated operations.
pub struct LedgerGasMeter<'a> {
    params: &'a LedgerGasParameters,
    max_gas: InternalGas,
    balance: InternalGas,
    warm_slots: BTreeSet<SlotId>,
    written_slots: BTreeSet<SlotId>,
}

impl<'a> LedgerGasMeter<'a> {
    pub fn new(params: &'a LedgerGasParameters, max_gas: u64) -> Self {
        Self {
            params,
            max_gas: max_gas.into(),
            balance: max_gas.into(),
            warm_slots: BTreeSet::new(),
            written_slots: BTreeSet::new(),
        }
    }

    /// Deducts `amount` from the remaining budget. On overrun the remaining
    /// budget is clamped to zero: the caller pays for the work measured up to
    /// the abort point, not for the charge that failed.
    pub fn charge(&mut self, amount: InternalGas) -> Result<(), LedgerError> {
        match self.balance.checked_sub(amount) {
            Some(balance) => {
                self.balance = balance;
                Ok(())
            }
            None => {
                self.balance = InternalGas::zero();
                Err(LedgerError::OutOfBudget {
                    limit: self.max_gas.into(),
                })
            }
        }
    }

    pub fn charge_operation_base(&mut self) -> Result<(), LedgerError> {
        self.charge(self.params.operation_base)
    }

    /// Cold price on the first touch of `slot` in this scope, warm after.
    pub fn charge_slot_read(&mut self, slot: SlotId) -> Result<(), LedgerError> {
        let amount = if self.warm_slots.insert(slot) {
            self.params.slot_read_cold
        } else {
            self.params.slot_read_warm
        };
        self.charge(amount)
    }

    /// Prices one slot write from the word it replaces.
    ///
    /// The first touch of the slot in this scope adds the cold surcharge.
    /// A repeated write to a slot already written in this scope is charged
    /// warm only, which is what makes packed fields sharing one physical
    /// slot cost a single slot access when modified together.
    pub fn charge_slot_write(
        &mut self,
        slot: SlotId,
        old: &Word,
        new: &Word,
    ) -> Result<(), LedgerError> {
        let mut amount = if self.warm_slots.insert(slot) {
            self.params.slot_read_cold
        } else {
            InternalGas::zero()
        };
        amount += if !self.written_slots.insert(slot) {
            self.params.slot_write_warm
        } else if old == new {
            self.params.slot_write_noop
        } else if old == &ZERO_WORD {
            self.params.slot_write_create
        } else {
            self.params.slot_write_update
        };
        self.charge(amount)
    }

    pub fn charge_event(&mut self) -> Result<(), LedgerError> {
        self.charge(self.params.event_base)
    }

    pub fn charge_auth_check(&mut self) -> Result<(), LedgerError> {
        self.charge(self.params.auth_check_base)
    }

    pub fn used(&self) -> u64 {
        u64::from(self.max_gas) - u64::from(self.balance)
    }

    pub fn remaining(&self) -> u64 {
        self.balance.into()
    }
}
