// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use std::collections::BTreeMap;

/// A mapping from parameter keys to values, in the shape a deployed ledger
/// stores its schedule as configuration.
pub type OnChainGasSchedule = BTreeMap<String, u64>;

pub trait FromOnChainGasSchedule: Sized {
    /// Constructs a value of this type from a map representation of the
    /// on-chain gas schedule. `None` should be returned when the schedule is
    /// missing a required entry.
    fn from_on_chain_gas_schedule(gas_schedule: &OnChainGasSchedule) -> Option<Self>;
}

pub trait ToOnChainGasSchedule {
    /// Converts this value into a list of entries of the on-chain gas
    /// schedule. Each entry is a key-value pair where the key is the full
    /// name of the parameter.
    fn to_on_chain_gas_schedule(&self) -> Vec<(String, u64)>;
}

pub trait InitialGasSchedule: Sized {
    /// The initial value of this type, which is used in the genesis.
    fn initial() -> Self;
}
