// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

//! Read-only, unmetered query interface. Queries go against any `StateView`
//! snapshot and never serialize with mutations.

use anyhow::Result;
use metered_ledger_state::ledger_store::{decode_owner_meta, decode_short_string};
use metered_ledger_state::StateView;
use metered_ledger_types::account_address::AccountAddress;
use metered_ledger_types::state_store::{ScalarField, StateKey};
use metered_ledger_types::u256::{word_to_u256, U256};

pub fn balance_of<S: StateView>(state: &S, account: AccountAddress) -> Result<U256> {
    let word = state.get_word(&StateKey::balance(account).slot())?;
    Ok(word_to_u256(&word))
}

pub fn allowance<S: StateView>(
    state: &S,
    owner: AccountAddress,
    spender: AccountAddress,
) -> Result<U256> {
    let word = state.get_word(&StateKey::allowance(owner, spender).slot())?;
    Ok(word_to_u256(&word))
}

pub fn total_supply<S: StateView>(state: &S) -> Result<U256> {
    let word = state.get_word(&StateKey::Scalar(ScalarField::TotalSupply).slot())?;
    Ok(word_to_u256(&word))
}

pub fn owner<S: StateView>(state: &S) -> Result<AccountAddress> {
    let word = state.get_word(&StateKey::Scalar(ScalarField::Owner).slot())?;
    Ok(decode_owner_meta(&word).0)
}

pub fn decimals<S: StateView>(state: &S) -> Result<u8> {
    let word = state.get_word(&StateKey::Scalar(ScalarField::Decimals).slot())?;
    Ok(decode_owner_meta(&word).1)
}

pub fn name<S: StateView>(state: &S) -> Result<String> {
    let word = state.get_word(&StateKey::Scalar(ScalarField::Name).slot())?;
    Ok(decode_short_string(&word))
}

pub fn symbol<S: StateView>(state: &S) -> Result<String> {
    let word = state.get_word(&StateKey::Scalar(ScalarField::Symbol).slot())?;
    Ok(decode_short_string(&word))
}
