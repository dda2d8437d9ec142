// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

use metered_ledger_types::account_address::AccountAddress;
use metered_ledger_types::error::LedgerError;

/// Authorization check gating supply-changing operations.
///
/// Guards are composed into the engine explicitly at construction time; there
/// is no override chain to resolve. The engine reads the current owner (a
/// metered slot access) and charges the check itself before invoking the
/// guard, so a failed authorization is not free.
pub trait AccessGuard {
    fn authorize(
        &self,
        caller: AccountAddress,
        current_owner: AccountAddress,
    ) -> Result<(), LedgerError>;
}

/// The single-owner model: exactly the account recorded in the owner scalar
/// holds the Owner role. An unset (null) owner authorizes nobody.
#[derive(Clone, Copy, Debug, Default)]
pub struct OwnerGuard;

impl AccessGuard for OwnerGuard {
    fn authorize(
        &self,
        caller: AccountAddress,
        current_owner: AccountAddress,
    ) -> Result<(), LedgerError> {
        if current_owner.is_zero() || caller != current_owner {
            return Err(LedgerError::Unauthorized { caller });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_guard() {
        let owner = AccountAddress::random();
        let other = AccountAddress::random();
        assert!(OwnerGuard.authorize(owner, owner).is_ok());
        assert_eq!(
            OwnerGuard.authorize(other, owner).unwrap_err(),
            LedgerError::Unauthorized { caller: other }
        );
    }

    #[test]
    fn test_unset_owner_authorizes_nobody() {
        assert!(OwnerGuard
            .authorize(AccountAddress::ZERO, AccountAddress::ZERO)
            .is_err());
    }
}
