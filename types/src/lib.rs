// Copyright (c) The Starcoin Core Contributors
// SPDX-License-Identifier: Apache-2.0

pub mod account_address;
pub mod error;
pub mod event;
pub mod fee_statement;
pub mod state_store;
pub mod transaction;
pub mod u256;
pub mod write_set;
