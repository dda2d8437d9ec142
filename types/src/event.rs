// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::account_address::AccountAddress;
use crate::u256::U256;
use serde::{Deserialize, Serialize};

/// Event records appended on commit, in fixed shapes consumed by an external
/// log collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    /// Emitted on every successful balance movement. Mint emits this with
    /// `from == AccountAddress::ZERO`.
    Transfer {
        from: AccountAddress,
        to: AccountAddress,
        value: U256,
    },
    /// Emitted on every successful approve call, including setting to zero.
    Approval {
        owner: AccountAddress,
        spender: AccountAddress,
        value: U256,
    },
}

impl ContractEvent {
    pub fn transfer(from: AccountAddress, to: AccountAddress, value: U256) -> Self {
        Self::Transfer { from, to, value }
    }

    pub fn approval(owner: AccountAddress, spender: AccountAddress, value: U256) -> Self {
        Self::Approval {
            owner,
            spender,
            value,
        }
    }

    pub fn is_transfer(&self) -> bool {
        matches!(self, Self::Transfer { .. })
    }

    pub fn is_approval(&self) -> bool {
        matches!(self, Self::Approval { .. })
    }
}
