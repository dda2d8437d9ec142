// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::u256::U256;
use serde::{Deserialize, Serialize};

/// Breakdown of fee charge and refund for one operation.
///
/// Invariant: `burned + beneficiary_amount == used_units * effective_gas_price`
/// and `prefund - refund == used_units * effective_gas_price` exactly, where
/// `prefund = budget.max_gas * effective_gas_price`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FeeStatement {
    /// Units of metered work actually consumed.
    used_units: u64,
    /// Per-unit price charged: `min(cap, floor + tip)`.
    effective_gas_price: U256,
    /// `used_units * floor`, destroyed.
    burned: U256,
    /// `used_units * min(tip, cap - floor)`, paid to the beneficiary.
    beneficiary_amount: U256,
    /// Unused part of the pre-funded budget, returned to the caller.
    refund: U256,
}

impl FeeStatement {
    pub fn zero() -> Self {
        Self {
            used_units: 0,
            effective_gas_price: U256::zero(),
            burned: U256::zero(),
            beneficiary_amount: U256::zero(),
            refund: U256::zero(),
        }
    }

    pub fn new(
        used_units: u64,
        effective_gas_price: U256,
        burned: U256,
        beneficiary_amount: U256,
        refund: U256,
    ) -> Self {
        Self {
            used_units,
            effective_gas_price,
            burned,
            beneficiary_amount,
            refund,
        }
    }

    pub fn used_units(&self) -> u64 {
        self.used_units
    }

    pub fn effective_gas_price(&self) -> U256 {
        self.effective_gas_price
    }

    pub fn burned(&self) -> U256 {
        self.burned
    }

    pub fn beneficiary_amount(&self) -> U256 {
        self.beneficiary_amount
    }

    pub fn refund(&self) -> U256 {
        self.refund
    }

    /// Total charged to the caller for this operation.
    pub fn total_charge(&self) -> U256 {
        self.burned + self.beneficiary_amount
    }
}
