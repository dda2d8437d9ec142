// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::access_control::{AccessGuard, OwnerGuard};
use log::{debug, warn};
use metered_ledger_gas::fee;
use metered_ledger_gas::meter::LedgerGasMeter;
use metered_ledger_gas::schedule::LedgerGasParameters;
use metered_ledger_state::ledger_store::LedgerStore;
use metered_ledger_state::StateView;
use metered_ledger_types::account_address::AccountAddress;
use metered_ledger_types::error::LedgerError;
use metered_ledger_types::event::ContractEvent;
use metered_ledger_types::state_store::{ScalarField, StateKey};
use metered_ledger_types::transaction::{
    Operation, OperationOutput, OperationRequest,
};
use metered_ledger_types::u256::U256;

/// Executes ledger operations as metered transactions.
///
/// Each operation runs `Pending -> Executing -> {Committed | RolledBack}`:
/// the fee quote admits or rejects it while still pending; entering
/// `Executing` creates the per-operation meter and state overlay; any failure
/// drops the overlay (all-or-nothing) while keeping the gas measured up to
/// the abort point; success freezes the overlay into the output's write set.
pub struct OperationEngine<G = OwnerGuard> {
    gas_params: LedgerGasParameters,
    /// The current protocol floor price per unit of work. Produced by an
    /// external adjustment rule; consumed here as a value.
    base_fee: U256,
    guard: G,
}

impl OperationEngine<OwnerGuard> {
    pub fn new(gas_params: LedgerGasParameters, base_fee: U256) -> Self {
        Self::with_guard(gas_params, base_fee, OwnerGuard)
    }
}

impl<G: AccessGuard> OperationEngine<G> {
    pub fn with_guard(gas_params: LedgerGasParameters, base_fee: U256, guard: G) -> Self {
        Self {
            gas_params,
            base_fee,
            guard,
        }
    }

    pub fn gas_params(&self) -> &LedgerGasParameters {
        &self.gas_params
    }

    pub fn base_fee(&self) -> U256 {
        self.base_fee
    }

    /// Installs the floor for the next settlement period.
    pub fn set_base_fee(&mut self, base_fee: U256) {
        self.base_fee = base_fee;
    }

    /// Executes one operation against `state` without applying its effects.
    ///
    /// `Err` is returned only for admission failures (`CapTooLow`,
    /// `InvalidBudget`), which charge nothing and touch nothing. Every
    /// admitted operation yields an output: committed with its write set, or
    /// rolled back with the failure reason and the fee for the work measured
    /// up to the abort point.
    pub fn execute_operation<S: StateView>(
        &self,
        state: &S,
        request: &OperationRequest,
    ) -> Result<OperationOutput, LedgerError> {
        let quote = fee::quote(self.base_fee, &request.budget, &self.gas_params)?;

        let mut meter = LedgerGasMeter::new(&self.gas_params, request.budget.max_gas);
        let mut store = LedgerStore::new(state);
        let mut events = Vec::new();

        match self.run(&mut store, &mut meter, request, &mut events) {
            Ok(()) => {
                let fee = fee::settle(meter.used(), self.base_fee, &request.budget, &quote);
                let write_set = store.freeze().map_err(LedgerError::storage)?;
                debug!(
                    "{} by {} committed: {} units at {}",
                    request.operation.name(),
                    request.caller,
                    fee.used_units(),
                    fee.effective_gas_price()
                );
                Ok(OperationOutput::committed(fee, events, write_set))
            }
            Err(reason) => {
                let fee = fee::settle(meter.used(), self.base_fee, &request.budget, &quote);
                warn!(
                    "{} by {} rolled back after {} units: {}",
                    request.operation.name(),
                    request.caller,
                    fee.used_units(),
                    reason
                );
                Ok(OperationOutput::rolled_back(reason, fee))
            }
        }
    }

    fn run<S: StateView>(
        &self,
        store: &mut LedgerStore<'_, S>,
        meter: &mut LedgerGasMeter<'_>,
        request: &OperationRequest,
        events: &mut Vec<ContractEvent>,
    ) -> Result<(), LedgerError> {
        meter.charge_operation_base()?;
        let caller = request.caller;
        match &request.operation {
            Operation::Transfer { to, value } => {
                self.charged_debit(store, meter, caller, *value)?;
                self.charged_credit(store, meter, *to, *value)?;
                self.charged_event(meter, events, ContractEvent::transfer(caller, *to, *value))?;
            }
            Operation::TransferFrom { from, to, value } => {
                let key = StateKey::allowance(*from, caller);
                meter.charge_slot_read(key.slot())?;
                let write = store.spend_allowance(*from, caller, *value)?;
                meter.charge_slot_write(write.slot, &write.old, &write.new)?;

                self.charged_debit(store, meter, *from, *value)?;
                self.charged_credit(store, meter, *to, *value)?;
                self.charged_event(meter, events, ContractEvent::transfer(*from, *to, *value))?;
            }
            Operation::Approve { spender, value } => {
                let write = store.set_allowance(caller, *spender, *value)?;
                meter.charge_slot_write(write.slot, &write.old, &write.new)?;
                self.charged_event(
                    meter,
                    events,
                    ContractEvent::approval(caller, *spender, *value),
                )?;
            }
            Operation::Mint { to, value } => {
                self.charged_auth(store, meter, caller)?;
                self.charged_credit(store, meter, *to, *value)?;

                let key = StateKey::Scalar(ScalarField::TotalSupply);
                meter.charge_slot_read(key.slot())?;
                let write = store.add_total_supply(*value)?;
                meter.charge_slot_write(write.slot, &write.old, &write.new)?;

                self.charged_event(
                    meter,
                    events,
                    ContractEvent::transfer(AccountAddress::ZERO, *to, *value),
                )?;
            }
            Operation::TransferOwnership { new_owner } => {
                self.charged_auth(store, meter, caller)?;
                if new_owner.is_zero() {
                    return Err(LedgerError::InvalidOwner);
                }
                // decimals share the owner's slot: one write for the pair
                let write = store.set_owner(*new_owner)?;
                meter.charge_slot_write(write.slot, &write.old, &write.new)?;
            }
        }
        Ok(())
    }

    fn charged_debit<S: StateView>(
        &self,
        store: &mut LedgerStore<'_, S>,
        meter: &mut LedgerGasMeter<'_>,
        account: AccountAddress,
        value: U256,
    ) -> Result<(), LedgerError> {
        meter.charge_slot_read(StateKey::balance(account).slot())?;
        let write = store.debit(account, value)?;
        meter.charge_slot_write(write.slot, &write.old, &write.new)
    }

    fn charged_credit<S: StateView>(
        &self,
        store: &mut LedgerStore<'_, S>,
        meter: &mut LedgerGasMeter<'_>,
        account: AccountAddress,
        value: U256,
    ) -> Result<(), LedgerError> {
        meter.charge_slot_read(StateKey::balance(account).slot())?;
        let write = store.credit(account, value)?;
        meter.charge_slot_write(write.slot, &write.old, &write.new)
    }

    /// Reads the owner scalar (metered) and runs the guard. The check is
    /// performed strictly before any guarded mutation.
    fn charged_auth<S: StateView>(
        &self,
        store: &mut LedgerStore<'_, S>,
        meter: &mut LedgerGasMeter<'_>,
        caller: AccountAddress,
    ) -> Result<(), LedgerError> {
        meter.charge_slot_read(StateKey::Scalar(ScalarField::Owner).slot())?;
        meter.charge_auth_check()?;
        let current_owner = store.owner()?;
        self.guard.authorize(caller, current_owner)
    }

    fn charged_event(
        &self,
        meter: &mut LedgerGasMeter<'_>,
        events: &mut Vec<ContractEvent>,
        event: ContractEvent,
    ) -> Result<(), LedgerError> {
        meter.charge_event()?;
        events.push(event);
        Ok(())
    }
}
