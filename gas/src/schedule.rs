// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::algebra::InternalGas;
use crate::traits::InitialGasSchedule;
use once_cell::sync::Lazy;

crate::define_gas_parameters!(
    LedgerGasParameters,
    "ledger",
    [
        // flat charge admitting one operation into the engine
        [operation_base: InternalGas, "operation.base", 21_000],
        // first access to a slot within one operation scope
        [slot_read_cold: InternalGas, "slot.read.cold", 2_100],
        // subsequent access to the same slot within the same scope
        [slot_read_warm: InternalGas, "slot.read.warm", 100],
        // write turning the zero word into a non-zero word
        [slot_write_create: InternalGas, "slot.write.create", 20_000],
        // write updating an already-non-zero word
        [slot_write_update: InternalGas, "slot.write.update", 2_900],
        // write storing the identical word, near-free
        [slot_write_noop: InternalGas, "slot.write.noop", 100],
        // repeated write to a slot already written in this scope
        [slot_write_warm: InternalGas, "slot.write.warm", 100],
        [event_base: InternalGas, "event.base", 375],
        [auth_check_base: InternalGas, "auth_check.base", 100],
        // budget bounds, per the admission rules
        [maximum_number_of_gas_units: u64, "txn.maximum_number_of_gas_units", 40_000_000],
        [max_price_per_gas_unit: u64, "txn.max_price_per_gas_unit", 10_000],
    ]
);

pub static G_LATEST_GAS_PARAMS: Lazy<LedgerGasParameters> =
    Lazy::new(LedgerGasParameters::initial);

pub static G_TEST_GAS_PARAMS: Lazy<LedgerGasParameters> = Lazy::new(|| {
    let mut params = LedgerGasParameters::initial();
    params.maximum_number_of_gas_units *= 10;
    params
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{FromOnChainGasSchedule, ToOnChainGasSchedule};

    #[test]
    fn test_on_chain_schedule_roundtrip() {
        let params = LedgerGasParameters::initial();
        let entries = params
            .to_on_chain_gas_schedule()
            .into_iter()
            .collect::<crate::traits::OnChainGasSchedule>();
        assert_eq!(entries["ledger.slot.read.cold"], 2_100);
        assert_eq!(
            LedgerGasParameters::from_on_chain_gas_schedule(&entries),
            Some(params)
        );
    }

    #[test]
    fn test_missing_entry_is_rejected() {
        let mut entries = LedgerGasParameters::initial()
            .to_on_chain_gas_schedule()
            .into_iter()
            .collect::<crate::traits::OnChainGasSchedule>();
        entries.remove("ledger.operation.base");
        assert_eq!(
            LedgerGasParameters::from_on_chain_gas_schedule(&entries),
            None
        );
    }

    #[test]
    fn test_write_pricing_ordering() {
        let params = LedgerGasParameters::initial();
        assert!(params.slot_write_create > params.slot_write_update);
        assert!(params.slot_write_update > params.slot_write_noop);
        assert!(params.slot_read_cold > params.slot_read_warm);
    }
}
