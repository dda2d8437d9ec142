// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Fee market: prices one unit of metered work from the protocol floor, the
//! caller's tip, and the caller's cap, and settles the burn / beneficiary /
//! refund split.
//!
//! The floor itself comes from an external adjustment rule (bounded to
//! ±12.5% per settlement period); this module only consumes its current
//! value.

use crate::schedule::LedgerGasParameters;
use metered_ledger_types::error::LedgerError;
use metered_ledger_types::fee_statement::FeeStatement;
use metered_ledger_types::transaction::Budget;
use metered_ledger_types::u256::U256;
use std::cmp;

/// Per-operation price quote, produced before any state is touched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeeQuote {
    effective_gas_price: U256,
    /// `max_gas * effective_gas_price`: the amount the caller pre-funds.
    prefund: U256,
}

impl FeeQuote {
    pub fn effective_gas_price(&self) -> U256 {
        self.effective_gas_price
    }

    pub fn prefund(&self) -> U256 {
        self.prefund
    }
}

/// `EffectivePrice = min(cap, floor + tip)`.
///
/// Fails with `CapTooLow` when `cap < floor` (the operation cannot possibly
/// be paid for) and with `InvalidBudget` when the budget exceeds the
/// schedule's admission bounds. Both rejections happen before any state
/// mutation and consume nothing.
pub fn quote(
    floor: U256,
    budget: &Budget,
    params: &LedgerGasParameters,
) -> Result<FeeQuote, LedgerError> {
    if budget.max_gas > params.maximum_number_of_gas_units {
        return Err(LedgerError::InvalidBudget {
            reason: format!(
                "max_gas {} exceeds the maximum of {} units",
                budget.max_gas, params.maximum_number_of_gas_units
            ),
        });
    }
    if budget.gas_unit_price_cap > U256::from(params.max_price_per_gas_unit) {
        return Err(LedgerError::InvalidBudget {
            reason: format!(
                "price cap {} exceeds the maximum of {} per unit",
                budget.gas_unit_price_cap, params.max_price_per_gas_unit
            ),
        });
    }
    if budget.gas_unit_price_cap < floor {
        return Err(LedgerError::CapTooLow {
            cap: budget.gas_unit_price_cap,
            floor,
        });
    }
    let effective_gas_price = cmp::min(
        budget.gas_unit_price_cap,
        floor.saturating_add(budget.gas_tip),
    );
    Ok(FeeQuote {
        effective_gas_price,
        // cannot overflow: both factors are bounded by the admission rules
        prefund: U256::from(budget.max_gas) * effective_gas_price,
    })
}

/// Splits the effective fee of `used_units` of work:
/// the floor part is burned, the tip part goes to the beneficiary, and the
/// unused part of the prefund is returned to the caller.
pub fn settle(used_units: u64, floor: U256, budget: &Budget, quote: &FeeQuote) -> FeeStatement {
    let used = U256::from(used_units);
    let burned = used * floor;
    let tip_per_unit = cmp::min(
        budget.gas_tip,
        budget.gas_unit_price_cap.saturating_sub(floor),
    );
    let beneficiary_amount = used * tip_per_unit;
    let refund = quote
        .prefund
        .saturating_sub(used * quote.effective_gas_price);
    FeeStatement::new(
        used_units,
        quote.effective_gas_price,
        burned,
        beneficiary_amount,
        refund,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::InitialGasSchedule;

    fn budget(max_gas: u64, cap: u64, tip: u64) -> Budget {
        Budget::new(max_gas, U256::from(cap), U256::from(tip))
    }

    #[test]
    fn test_price_is_capped() {
        let params = LedgerGasParameters::initial();
        let q = quote(U256::from(100), &budget(1_000, 150, 80), &params).unwrap();
        assert_eq!(q.effective_gas_price(), U256::from(150));
        let q = quote(U256::from(100), &budget(1_000, 250, 80), &params).unwrap();
        assert_eq!(q.effective_gas_price(), U256::from(180));
    }

    #[test]
    fn test_cap_below_floor_is_rejected() {
        let params = LedgerGasParameters::initial();
        let err = quote(U256::from(100), &budget(1_000, 99, 0), &params).unwrap_err();
        assert_eq!(
            err,
            LedgerError::CapTooLow {
                cap: U256::from(99),
                floor: U256::from(100),
            }
        );
    }

    #[test]
    fn test_budget_bounds() {
        let params = LedgerGasParameters::initial();
        assert!(matches!(
            quote(
                U256::one(),
                &budget(params.maximum_number_of_gas_units + 1, 10, 0),
                &params
            ),
            Err(LedgerError::InvalidBudget { .. })
        ));
        assert!(matches!(
            quote(
                U256::one(),
                &budget(1_000, params.max_price_per_gas_unit + 1, 0),
                &params
            ),
            Err(LedgerError::InvalidBudget { .. })
        ));
    }

    #[test]
    fn test_settle_splits_exactly() {
        let params = LedgerGasParameters::initial();
        let floor = U256::from(100);
        let b = budget(1_000, 150, 80);
        let q = quote(floor, &b, &params).unwrap();
        let fee = settle(400, floor, &b, &q);

        assert_eq!(fee.used_units(), 400);
        assert_eq!(fee.burned(), U256::from(400u64 * 100));
        // tip is clamped to cap - floor
        assert_eq!(fee.beneficiary_amount(), U256::from(400u64 * 50));
        assert_eq!(fee.total_charge(), U256::from(400) * q.effective_gas_price());
        // budget refund identity
        assert_eq!(
            q.prefund() - fee.refund(),
            U256::from(400) * q.effective_gas_price()
        );
    }

    #[test]
    fn test_zero_usage_refunds_everything() {
        let params = LedgerGasParameters::initial();
        let floor = U256::from(1);
        let b = budget(10_000, 10, 1);
        let q = quote(floor, &b, &params).unwrap();
        let fee = settle(0, floor, &b, &q);
        assert_eq!(fee.refund(), q.prefund());
        assert_eq!(fee.total_charge(), U256::zero());
    }
}
