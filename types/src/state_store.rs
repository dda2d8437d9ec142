// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Naming layer of the storage slot model.
//!
//! A [`StateKey`] names one logical field of persisted state; a [`SlotId`]
//! names one physical 32-byte slot. The mapping between the two is the data
//! layout: several small fields may share a slot, and modifying them together
//! is priced as a single slot access.

use crate::account_address::AccountAddress;
use serde::{Deserialize, Serialize};

/// A logical field of the scalars table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScalarField {
    TotalSupply,
    Owner,
    Decimals,
    Name,
    Symbol,
}

/// A physical slot of the scalars table.
///
/// `Owner` (20 bytes) and `Decimals` (1 byte) pack into the single
/// `OwnerMeta` slot, so mutating both in one operation costs one slot write.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScalarSlot {
    TotalSupply,
    OwnerMeta,
    Name,
    Symbol,
}

impl ScalarField {
    pub fn slot(&self) -> ScalarSlot {
        match self {
            Self::TotalSupply => ScalarSlot::TotalSupply,
            Self::Owner | Self::Decimals => ScalarSlot::OwnerMeta,
            Self::Name => ScalarSlot::Name,
            Self::Symbol => ScalarSlot::Symbol,
        }
    }
}

/// A logical field of persisted ledger state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StateKey {
    Balance(AccountAddress),
    Allowance {
        owner: AccountAddress,
        spender: AccountAddress,
    },
    Scalar(ScalarField),
}

/// A physical 32-byte-aligned slot, the unit of metering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotId {
    Balance(AccountAddress),
    Allowance {
        owner: AccountAddress,
        spender: AccountAddress,
    },
    Scalar(ScalarSlot),
}

impl StateKey {
    pub fn balance(account: AccountAddress) -> Self {
        Self::Balance(account)
    }

    pub fn allowance(owner: AccountAddress, spender: AccountAddress) -> Self {
        Self::Allowance { owner, spender }
    }

    /// Physical slot this field lives in.
    pub fn slot(&self) -> SlotId {
        match self {
            Self::Balance(account) => SlotId::Balance(*account),
            Self::Allowance { owner, spender } => SlotId::Allowance {
                owner: *owner,
                spender: *spender,
            },
            Self::Scalar(field) => SlotId::Scalar(field.slot()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_and_decimals_share_a_slot() {
        assert_eq!(
            StateKey::Scalar(ScalarField::Owner).slot(),
            StateKey::Scalar(ScalarField::Decimals).slot(),
        );
        assert_ne!(
            StateKey::Scalar(ScalarField::Owner).slot(),
            StateKey::Scalar(ScalarField::TotalSupply).slot(),
        );
    }

    #[test]
    fn test_distinct_accounts_get_distinct_slots() {
        let a = AccountAddress::random();
        let b = AccountAddress::random();
        assert_ne!(StateKey::balance(a).slot(), StateKey::balance(b).slot());
        assert_ne!(
            StateKey::allowance(a, b).slot(),
            StateKey::allowance(b, a).slot()
        );
        assert_ne!(StateKey::balance(a).slot(), StateKey::allowance(a, b).slot());
    }
}
