// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::account_address::AccountAddress;
use crate::u256::U256;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every caller-visible failure of the ledger engine.
///
/// All of them roll the whole operation back; none survives as a partial
/// balance or allowance mutation. `OutOfBudget` additionally consumes the
/// budget measured up to the abort point. Each variant carries the operands
/// of the violated precondition; amounts are never truncated or clamped.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LedgerError {
    #[error("insufficient balance of {account}: has {balance}, needs {required}")]
    InsufficientBalance {
        account: AccountAddress,
        balance: U256,
        required: U256,
    },
    #[error("insufficient allowance from {owner} to {spender}: has {allowance}, needs {required}")]
    InsufficientAllowance {
        owner: AccountAddress,
        spender: AccountAddress,
        allowance: U256,
        required: U256,
    },
    #[error("total supply would overflow the maximum representable value")]
    SupplyOverflow,
    #[error("caller {caller} does not hold the Owner role")]
    Unauthorized { caller: AccountAddress },
    #[error("the null identifier is not a valid owner")]
    InvalidOwner,
    #[error("operation exceeded its gas budget of {limit} units")]
    OutOfBudget { limit: u64 },
    #[error("gas price cap {cap} is below the protocol floor {floor}")]
    CapTooLow { cap: U256, floor: U256 },
    #[error("invalid budget: {reason}")]
    InvalidBudget { reason: String },
    #[error("storage failure: {reason}")]
    StorageFailure { reason: String },
}

impl LedgerError {
    pub fn storage(err: anyhow::Error) -> Self {
        Self::StorageFailure {
            reason: err.to_string(),
        }
    }
}
