// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Operation submission and output shapes, the interface consumed from an
//! external execution-request collaborator.

use crate::account_address::AccountAddress;
use crate::error::LedgerError;
use crate::event::ContractEvent;
use crate::fee_statement::FeeStatement;
use crate::u256::U256;
use crate::write_set::WriteSet;
use serde::{Deserialize, Serialize};

/// A ledger operation, pre-authorization. The caller is carried separately in
/// the [`OperationRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Transfer {
        to: AccountAddress,
        value: U256,
    },
    TransferFrom {
        from: AccountAddress,
        to: AccountAddress,
        value: U256,
    },
    Approve {
        spender: AccountAddress,
        value: U256,
    },
    Mint {
        to: AccountAddress,
        value: U256,
    },
    TransferOwnership {
        new_owner: AccountAddress,
    },
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transfer { .. } => "transfer",
            Self::TransferFrom { .. } => "transfer_from",
            Self::Approve { .. } => "approve",
            Self::Mint { .. } => "mint",
            Self::TransferOwnership { .. } => "transfer_ownership",
        }
    }
}

/// Caller-declared maximum willing cost for one operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Unit limit: the most metered work the caller will pay for.
    pub max_gas: u64,
    /// Price cap: the most the caller will pay per unit.
    pub gas_unit_price_cap: U256,
    /// Tip offered on top of the protocol floor, per unit.
    pub gas_tip: U256,
}

impl Budget {
    pub fn new(max_gas: u64, gas_unit_price_cap: U256, gas_tip: U256) -> Self {
        Self {
            max_gas,
            gas_unit_price_cap,
            gas_tip,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRequest {
    pub caller: AccountAddress,
    pub operation: Operation,
    pub budget: Budget,
}

impl OperationRequest {
    pub fn new(caller: AccountAddress, operation: Operation, budget: Budget) -> Self {
        Self {
            caller,
            operation,
            budget,
        }
    }
}

/// Final state of one operation. There is no partially-applied state: a
/// rolled-back operation leaves the ledger exactly as it found it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    Committed,
    RolledBack(LedgerError),
}

impl OperationStatus {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutput {
    status: OperationStatus,
    fee: FeeStatement,
    events: Vec<ContractEvent>,
    write_set: WriteSet,
}

impl OperationOutput {
    pub fn committed(fee: FeeStatement, events: Vec<ContractEvent>, write_set: WriteSet) -> Self {
        Self {
            status: OperationStatus::Committed,
            fee,
            events,
            write_set,
        }
    }

    /// A rolled-back operation carries no effects, only the failure reason
    /// and the fee for the work measured up to the abort point.
    pub fn rolled_back(reason: LedgerError, fee: FeeStatement) -> Self {
        Self {
            status: OperationStatus::RolledBack(reason),
            fee,
            events: vec![],
            write_set: WriteSet::default(),
        }
    }

    pub fn status(&self) -> &OperationStatus {
        &self.status
    }

    pub fn fee(&self) -> &FeeStatement {
        &self.fee
    }

    pub fn used_units(&self) -> u64 {
        self.fee.used_units()
    }

    pub fn effective_gas_price(&self) -> U256 {
        self.fee.effective_gas_price()
    }

    pub fn refund(&self) -> U256 {
        self.fee.refund()
    }

    pub fn events(&self) -> &[ContractEvent] {
        &self.events
    }

    pub fn write_set(&self) -> &WriteSet {
        &self.write_set
    }

    pub fn into_inner(self) -> (OperationStatus, FeeStatement, Vec<ContractEvent>, WriteSet) {
        (self.status, self.fee, self.events, self.write_set)
    }
}
